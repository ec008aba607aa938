//! Utilities for generating examples, benchmarks, and test cases.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::Point;

/// The sites from the illustration on Wikipedia's article about Fortune's
/// algorithm.
pub fn wikipedia() -> Vec<Point> {
    [
        (155.0, 552.0),
        (405.0, 552.0),
        (624.0, 463.0),
        (211.0, 419.0),
        (458.0, 358.0),
        (673.0, 299.0),
        (261.0, 278.0),
        (88.0, 196.0),
        (497.0, 177.0),
        (715.0, 118.0),
        (275.0, 99.0),
    ]
    .into_iter()
    .map(Point::from)
    .collect()
}

/// Three sites in a horizontal row.
///
/// All of them become active at once, so there are no arcs to split.
pub fn level_row() -> Vec<Point> {
    vec![
        Point::new(300.0, 300.0),
        Point::new(200.0, 300.0),
        Point::new(400.0, 300.0),
    ]
}

/// Four sites in a diamond.
///
/// The bottom site arrives just in time to cancel a circle event that was
/// scheduled when the middle row arrived.
pub fn diamond() -> Vec<Point> {
    vec![
        Point::new(300.0, 500.0),
        Point::new(200.0, 450.0),
        Point::new(400.0, 450.0),
        Point::new(300.0, 400.0),
    ]
}

/// An `n` by `n` grid of sites, `spacing` apart.
///
/// Grids are full of co-circular quadruples, so lots of circle events happen
/// simultaneously.
pub fn grid(n: usize, spacing: f64) -> Vec<Point> {
    let mut ret = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            ret.push(Point::new(i as f64 * spacing, j as f64 * spacing));
        }
    }
    ret
}

/// A grid in which every row is shifted horizontally by half a cell, and
/// every other row is nudged down a little.
///
/// Unlike [`grid`], this has no co-circular quadruples.
pub fn staggered_grid(n: usize, spacing: f64) -> Vec<Point> {
    let mut ret = Vec::with_capacity(n * n);
    for j in 0..n {
        let x_off = if j % 2 == 0 { 0.0 } else { spacing / 2.0 };
        let y_off = if j % 2 == 0 { 0.0 } else { spacing / 7.0 };
        for i in 0..n {
            ret.push(Point::new(
                i as f64 * spacing + x_off,
                j as f64 * spacing + y_off,
            ));
        }
    }
    ret
}

/// `n` sites spread uniformly over a `size` by `size` square.
///
/// The output is determined by `seed`.
pub fn random(n: usize, size: f64, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size)))
        .collect()
}

/// `n` sites with integer coordinates in a `size` by `size` square.
///
/// There will be plenty of repeated coordinates, and probably some
/// duplicate sites.
pub fn random_integer(n: usize, size: u32, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.gen_range(0..size) as f64,
                rng.gen_range(0..size) as f64,
            )
        })
        .collect()
}

/// Looks up one of the named site sets.
pub fn named(name: &str) -> Option<Vec<Point>> {
    match name {
        "wikipedia" => Some(wikipedia()),
        "level-row" => Some(level_row()),
        "diamond" => Some(diamond()),
        "grid" => Some(grid(8, 50.0)),
        "staggered" => Some(staggered_grid(8, 50.0)),
        _ => None,
    }
}

/// The names accepted by [`named`].
pub const NAMES: &[&str] = &["wikipedia", "level-row", "diamond", "grid", "staggered"];
