//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::Point;

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

fn coordinate(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    float_in_range(-1e4, 1e4, u)
}

/// Generate a coordinate that has a good chance of being equal, or very
/// close, to one we already have.
fn another_coordinate(orig: f64, u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    match u.int_in_range(0..=3)? {
        0 => Ok(orig),
        1 => {
            let ulps: i32 = u.int_in_range(-32..=32)?;
            let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
            Ok(orig * scale)
        }
        _ => coordinate(u),
    }
}

/// Generate a single site.
pub fn site(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(coordinate(u)?, coordinate(u)?))
}

/// Generate a collection of sites.
///
/// Sites are biased towards sharing coordinates with earlier sites, so that
/// we get level rows, vertical columns and exact duplicates much more often
/// than uniform sampling would.
pub fn sites(u: &mut Unstructured<'_>) -> Result<Vec<Point>, arbitrary::Error> {
    let len = u.int_in_range(0..=64)?;
    let mut ret: Vec<Point> = Vec::with_capacity(len);
    for _ in 0..len {
        let p = if ret.is_empty() || u.ratio(1, 3)? {
            site(u)?
        } else {
            let q = *u.choose(&ret)?;
            Point::new(another_coordinate(q.x, u)?, another_coordinate(q.y, u)?)
        };
        ret.push(p);
    }
    Ok(ret)
}

/// Generate a sweep cutoff that's usually somewhere among the sites.
pub fn cutoff(sites: &[Point], u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    if sites.is_empty() || u.ratio(1, 4)? {
        return Ok(f64::NEG_INFINITY);
    }
    let p = u.choose(sites)?;
    another_coordinate(p.y, u)
}

/// Checks that can be driven either by `arbtest` or by a fuzzer.
pub mod arbtests {
    use arbitrary::Unstructured;

    use crate::sweep::{Phase, SweepOptions, Sweeper};

    /// Sweeps over some arbitrary sites, and checks that the result hangs together.
    pub fn sweep(u: &mut Unstructured<'_>) -> Result<(), arbitrary::Error> {
        let sites = super::sites(u)?;
        let cutoff = super::cutoff(&sites, u)?;
        let site_count = sites.len();
        let Ok(mut sweeper) = Sweeper::new(sites, cutoff, SweepOptions::default()) else {
            unreachable!("generated sites are always finite");
        };
        while sweeper.advance() != Phase::Done {}
        let diagram = sweeper.into_diagram();

        for ev in &diagram.unencountered {
            assert!(ev.y() < cutoff);
        }
        if let Some(line) = &diagram.beachline {
            assert_eq!(line.arcs().count(), line.edges().count() + 1);
            assert_eq!(line.len(), 2 * line.edges().count() + 1);
        }
        let stats = diagram.stats;
        assert!(stats.sites_processed <= site_count);
        assert!(stats.circles_processed + stats.stale_circles_skipped <= stats.circles_scheduled);
        Ok(())
    }
}
