#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod beachline;
pub mod events;
mod geom;
pub mod parabola;
pub mod sweep;

#[cfg(feature = "generators")]
pub mod generators;

pub use beachline::{Beachline, NodeIdx};
pub use events::{CircleEvent, SweepEvent};
pub use geom::{ray_intersection, CompleteEdge, EdgeRay, Point};
pub use sweep::{sweep, sweep_with_options, Diagram, SweepOptions, SweepStats};

#[derive(Clone, Copy, Debug, PartialEq)]
/// The input points were faulty.
pub enum Error {
    /// At least one of the sites was infinite.
    Infinity,
    /// At least one of the sites, or the cutoff, was not a number.
    NaN,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the sites was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(Error::NaN.to_string(), "one of the inputs had a NaN");
        assert_eq!(Error::Infinity.to_string(), "one of the sites was infinite");
    }

    #[test]
    fn wikipedia() {
        let sites = [
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
        ];
        let diagram = sweep(sites, f64::NEG_INFINITY).unwrap();
        assert!(diagram.beachline.is_none());
        assert_eq!(diagram.stats.sites_processed, sites.len());
        assert!(diagram.stats.circles_processed > 0);
        for e in &diagram.edges {
            let [s0, s1] = e.sites;
            let d0 = e.b.distance(&s0);
            let d1 = e.b.distance(&s1);
            assert!((d0 - d1).abs() < 1e-6 * (1.0 + d0));
        }
    }
}
