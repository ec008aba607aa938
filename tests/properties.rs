use std::collections::BTreeSet;

use fortune::{sweep, CompleteEdge, Point, SweepEvent};
use proptest::prelude::*;

// Sites on an integer grid, so that level rows, columns and co-circular
// quadruples all show up regularly.
fn sites() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0i32..100, 0i32..100), 0..16).prop_map(|v| {
        v.into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect()
    })
}

fn distinct(sites: &[Point]) -> usize {
    sites.iter().collect::<BTreeSet<_>>().len()
}

fn equidistant(q: Point, a: Point, b: Point) -> bool {
    let (da, db) = (q.distance(&a), q.distance(&b));
    (da - db).abs() <= 1e-6 * (1.0 + da)
}

fn check_bisector(e: &CompleteEdge) -> Result<(), TestCaseError> {
    let [s0, s1] = e.sites;
    prop_assert_ne!(s0, s1);
    for q in [e.a, e.b] {
        if q.y != f64::MAX {
            prop_assert!(equidistant(q, s0, s1), "{e:?}");
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn edges_are_bisectors(sites in sites()) {
        let d = sweep(sites, f64::NEG_INFINITY).unwrap();
        for e in &d.edges {
            check_bisector(e)?;
        }
    }

    #[test]
    fn vertices_are_equidistant(sites in sites()) {
        let d = sweep(sites, f64::NEG_INFINITY).unwrap();
        // Each circle event finishes two edges, before anything gets finalized.
        let from_circles = &d.edges[..2 * d.stats.circles_processed];
        for pair in from_circles.chunks(2) {
            let [left, right] = pair else { unreachable!() };
            prop_assert_eq!(left.b, right.b);
            prop_assert_eq!(left.sites[1], right.sites[0]);
            let v = left.b;
            prop_assert!(equidistant(v, left.sites[0], left.sites[1]));
            prop_assert!(equidistant(v, right.sites[0], right.sites[1]));
        }
    }

    #[test]
    fn input_order_does_not_matter(sites in sites().prop_shuffle()) {
        let mut sorted = sites.clone();
        sorted.sort();
        let d0 = sweep(sites, f64::NEG_INFINITY).unwrap();
        let d1 = sweep(sorted, f64::NEG_INFINITY).unwrap();
        prop_assert_eq!(d0.edges, d1.edges);
        prop_assert_eq!(d0.stats, d1.stats);
    }

    #[test]
    fn cutoff_above_everything(sites in sites()) {
        let top = sites.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let d = sweep(sites.iter().copied(), top + 1.0).unwrap();
        prop_assert!(d.edges.is_empty());
        prop_assert!(d.beachline.is_none());
        prop_assert_eq!(d.unencountered.len(), distinct(&sites));
        prop_assert!(d.unencountered.iter().all(|ev| matches!(ev, SweepEvent::Site(_))));
    }

    #[test]
    fn deep_cutoff(sites in sites()) {
        let d = sweep(sites.iter().copied(), -1000.0).unwrap();
        prop_assert!(d.beachline.is_none());
        // Nearly collinear sites can have circle events below the cutoff,
        // but once the tree is gone none of them can still be live.
        for ev in &d.unencountered {
            prop_assert!(ev.y() < -1000.0);
            prop_assert!(!ev.is_live(), "{ev:?}");
        }
        if distinct(&sites) >= 2 {
            prop_assert!(!d.edges.is_empty());
        }

        let again = sweep(sites.iter().copied(), -1000.0).unwrap();
        prop_assert_eq!(d.edges, again.edges);
    }

    #[test]
    fn partial_sweeps_are_prefixes(sites in sites(), cutoff in 0.0f64..100.0) {
        let full = sweep(sites.iter().copied(), f64::NEG_INFINITY).unwrap();
        let partial = sweep(sites.iter().copied(), cutoff).unwrap();
        prop_assert!(partial.edges.len() <= full.edges.len());
        prop_assert_eq!(&partial.edges[..], &full.edges[..partial.edges.len()]);
        for ev in &partial.unencountered {
            prop_assert!(ev.y() < cutoff);
        }
        if let Some(line) = &partial.beachline {
            prop_assert_eq!(line.arcs().count(), line.edges().count() + 1);
        }
    }
}
