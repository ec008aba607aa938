//! Arcs of the beachline, and where they meet the growing edges.
//!
//! An arc with focus `f` and directrix `y = d` (the current position of the
//! sweep line) is the set of points equidistant from `f` and the directrix. For
//! `f.y > d` that's the parabola
//!
//! ```text
//! y = (x - f.x)^2 / (2 (f.y - d)) + (f.y + d) / 2
//! ```
//!
//! When the sweep line passes exactly through the focus, the arc degenerates to
//! a vertical ray through the focus, and most of the functions here need to
//! treat it specially.

use arrayvec::ArrayVec;
use kurbo::common::solve_quadratic;

use crate::geom::{EdgeRay, Point};

/// The height of the arc with focus `focus` at horizontal position `x`, when the
/// sweep line is at `directrix_y`.
///
/// This is non-finite when `focus.y == directrix_y`, because then the arc is a
/// vertical line. Callers need to check for that case first.
pub fn arc_height(focus: Point, x: f64, directrix_y: f64) -> f64 {
    // Measuring from the focus' x coordinate keeps the formula free of a linear
    // term, which is kinder to the precision when far from the origin.
    let a = 1.0 / (2.0 * (focus.y - directrix_y));
    let c = (focus.y + directrix_y) * 0.5;
    let w = x - focus.x;
    a * w * w + c
}

/// Returns true if the arc with this focus is currently a vertical line.
pub fn is_degenerate(focus: Point, directrix_y: f64) -> bool {
    focus.y == directrix_y
}

/// Finds the point where the edge meets the arc with focus `focus`, when the
/// sweep line is at `directrix_y`.
///
/// If the edge's line hits the arc twice, we want the intersection that's
/// ahead of the edge's start point. If both are ahead, we take the nearer one
/// and if neither is, we take the one that's least far behind. The last case
/// happens near the time the edge was created, where a tiny error can push
/// both roots behind the start.
pub fn arc_edge_intersection(edge: &EdgeRay, focus: Point, directrix_y: f64) -> Option<Point> {
    let start = edge.start;
    let dir = edge.direction;

    if dir.x == 0.0 {
        if is_degenerate(focus, directrix_y) {
            // Two vertical lines: they either coincide or they don't meet.
            return (start.x == focus.x).then_some(focus);
        }
        let y = arc_height(focus, start.x, directrix_y);
        return Some(Point::new(start.x, y));
    }

    // The edge's line is y = p x + q.
    let p = dir.y / dir.x;
    let q = start.y - p * start.x;

    if is_degenerate(focus, directrix_y) {
        // The arc is the vertical line through the focus, so the only question
        // is whether the edge is heading towards it.
        let x_offset = focus.x - start.x;
        if x_offset * dir.x < 0.0 {
            return None;
        }
        return Some(Point::new(focus.x, p * focus.x + q));
    }

    let x = pick_root(&line_arc_roots(p, q, focus, directrix_y), start.x, dir.x)?;
    let y = arc_height(focus, x, directrix_y);
    debug_assert!(y.is_finite());
    Some(Point::new(x, y))
}

// The x coordinates where the line y = p x + q meets the (non-degenerate) arc.
fn line_arc_roots(p: f64, q: f64, focus: Point, directrix_y: f64) -> ArrayVec<f64, 2> {
    // Expand the arc to y = a2 x^2 + a1' x + a0' and subtract the line.
    let a2 = 1.0 / (2.0 * (focus.y - directrix_y));
    let a1 = -p - 2.0 * a2 * focus.x;
    let a0 = a2 * focus.x * focus.x + (focus.y + directrix_y) * 0.5 - q;
    solve_quadratic(a0, a1, a2)
}

// Chooses among the candidate x coordinates by how far ahead of `start_x` they
// are, measured along the edge direction.
fn pick_root(roots: &[f64], start_x: f64, dir_x: f64) -> Option<f64> {
    let ahead = |x: f64| (x - start_x) * dir_x;

    let nearest_ahead = roots
        .iter()
        .copied()
        .filter(|&x| ahead(x) >= 0.0)
        .min_by(|&x, &y| ahead(x).total_cmp(&ahead(y)));
    nearest_ahead.or_else(|| {
        roots
            .iter()
            .copied()
            .max_by(|&x, &y| ahead(x).total_cmp(&ahead(y)))
    })
}
