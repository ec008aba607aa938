//! The sweep itself.
//!
//! The main entry points are [`sweep`] and [`sweep_with_options`], which run a
//! [`Sweeper`] from the top of the input down to a cutoff and collect what it
//! produced into a [`Diagram`].

use std::collections::BTreeSet;

use crate::beachline::Beachline;
use crate::events::{EventQueue, SweepEvent};
use crate::geom::{CompleteEdge, Point};
use crate::Error;

/// Tunable constants for the sweep.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepOptions {
    /// If the cutoff is at or below this, the edges that are still growing when
    /// the sweep stops are finished off anyway.
    pub deep_cutoff: f64,
    /// The length of the segments that stand in for edges that grow forever.
    pub finite_edge_length: f64,
    /// Sites that are strictly less than this far below the first site are
    /// treated as being level with it.
    pub bootstrap_band: f64,
    /// How far above a row of level sites to put the nominal starting points
    /// of the vertical edges between them.
    pub bootstrap_lift: f64,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            deep_cutoff: -200.0,
            finite_edge_length: 10_000.0,
            bootstrap_band: 1.0,
            bootstrap_lift: 100.0,
        }
    }
}

/// Counts of what happened during a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SweepStats {
    /// The number of sites that were added to the beachline.
    pub sites_processed: usize,
    /// The number of arcs that were squeezed out.
    pub circles_processed: usize,
    /// The number of invalidated circle events that were popped and ignored.
    pub stale_circles_skipped: usize,
    /// The number of circle events that were ever scheduled.
    pub circles_scheduled: usize,
}

/// The result of a sweep.
#[derive(Clone, Debug)]
pub struct Diagram {
    /// The finished edges of the Voronoi diagram.
    pub edges: Vec<CompleteEdge>,
    /// The beachline, if the sweep stopped partway through.
    pub beachline: Option<Beachline>,
    /// The events that the sweep didn't get to, in the order it would have
    /// processed them.
    pub unencountered: Vec<SweepEvent>,
    /// Some statistics about the sweep.
    pub stats: SweepStats,
}

/// The stages of a sweep, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The sites haven't been queued yet.
    Seeding,
    /// Adding the first site, along with any sites level with it.
    Bootstrapping,
    /// Processing events one at a time.
    MainLoop,
    /// Turning the growing edges into finished ones.
    Finalizing,
    /// Nothing left to do.
    Done,
}

/// Runs a sweep, one phase at a time.
#[derive(Debug)]
pub struct Sweeper {
    sites: Vec<Point>,
    cutoff: f64,
    options: SweepOptions,
    phase: Phase,
    queue: EventQueue,
    line: Beachline,
    edges: Vec<CompleteEdge>,
    stats: SweepStats,
}

impl Sweeper {
    /// Prepares to sweep over `sites`, stopping at the first event below `cutoff`.
    ///
    /// Returns an error if any of the sites are non-finite, or if the cutoff is
    /// NaN. An infinite cutoff is fine: use `f64::NEG_INFINITY` to run the sweep
    /// to completion.
    pub fn new(sites: Vec<Point>, cutoff: f64, options: SweepOptions) -> Result<Self, Error> {
        if cutoff.is_nan() || sites.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
            return Err(Error::NaN);
        }
        if sites.iter().any(|p| !p.is_finite()) {
            return Err(Error::Infinity);
        }

        Ok(Sweeper {
            sites,
            cutoff,
            options,
            phase: Phase::Seeding,
            queue: EventQueue::default(),
            line: Beachline::default(),
            edges: Vec::new(),
            stats: SweepStats::default(),
        })
    }

    /// The phase that will run on the next call to [`Sweeper::advance`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The beachline as it currently stands.
    pub fn beachline(&self) -> &Beachline {
        &self.line
    }

    /// The edges finished so far.
    pub fn edges(&self) -> &[CompleteEdge] {
        &self.edges
    }

    /// Runs the current phase to completion, and moves on to the next one.
    pub fn advance(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Seeding => self.seed(),
            Phase::Bootstrapping => self.bootstrap(),
            Phase::MainLoop => self.main_loop(),
            Phase::Finalizing => self.finalize(),
            Phase::Done => Phase::Done,
        };
        self.phase
    }

    /// Runs all the remaining phases and returns the result.
    pub fn run(mut self) -> Diagram {
        while self.phase != Phase::Done {
            self.advance();
        }
        self.into_diagram()
    }

    /// Stops the sweep wherever it currently is, and returns the result.
    pub fn into_diagram(mut self) -> Diagram {
        let unencountered = self.queue.drain_in_order();
        self.stats.circles_scheduled = self.queue.circles_scheduled();
        let beachline = (!self.line.is_empty()).then_some(self.line);
        tracing::debug!(
            edges = self.edges.len(),
            has_beachline = beachline.is_some(),
            unencountered = unencountered.len(),
            "finished sweep"
        );
        Diagram {
            edges: self.edges,
            beachline,
            unencountered,
            stats: self.stats,
        }
    }

    fn seed(&mut self) -> Phase {
        tracing::debug!(sites = self.sites.len(), cutoff = self.cutoff, "starting sweep");
        // A repeated site would give a zero-width arc, so only keep one copy.
        let distinct: BTreeSet<Point> = std::mem::take(&mut self.sites).into_iter().collect();
        for site in distinct {
            self.queue.push_site(site);
        }
        Phase::Bootstrapping
    }

    fn bootstrap(&mut self) -> Phase {
        let Some(first_y) = self.queue.peek_y() else {
            return Phase::Finalizing;
        };
        if first_y < self.cutoff {
            return Phase::Done;
        }
        let Some(SweepEvent::Site(first)) = self.queue.pop() else {
            unreachable!("only sites are queued before the sweep starts");
        };
        self.line.insert_root(first);
        self.stats.sites_processed += 1;

        while self.queue.peek_is_site() {
            let Some(y) = self.queue.peek_y() else {
                break;
            };
            if y <= first.y - self.options.bootstrap_band || y < self.cutoff {
                break;
            }
            let Some(SweepEvent::Site(site)) = self.queue.pop() else {
                unreachable!("we just peeked a site");
            };
            self.line.insert_beside(site, self.options.bootstrap_lift);
            self.stats.sites_processed += 1;
            self.line.check_invariants(&self.queue);
        }
        Phase::MainLoop
    }

    fn main_loop(&mut self) -> Phase {
        while let Some(y) = self.queue.peek_y() {
            if y < self.cutoff {
                break;
            }
            let Some(event) = self.queue.pop() else {
                break;
            };
            self.process(event);
            self.line.check_invariants(&self.queue);
        }

        if self.queue.is_empty() || self.cutoff <= self.options.deep_cutoff {
            Phase::Finalizing
        } else {
            Phase::Done
        }
    }

    fn process(&mut self, event: SweepEvent) {
        match event {
            SweepEvent::Site(site) => {
                tracing::trace!(?site, "site event");
                self.line
                    .insert_site(site, self.options.bootstrap_lift, &mut self.queue);
                self.stats.sites_processed += 1;
            }
            SweepEvent::Circle(circle) if circle.valid => {
                tracing::trace!(y = circle.y, vertex = ?circle.vertex, "circle event");
                let finished = self
                    .line
                    .remove_arc(circle.arc, circle.vertex, &mut self.queue);
                self.edges.extend(finished);
                self.stats.circles_processed += 1;
            }
            SweepEvent::Circle(circle) => {
                tracing::trace!(y = circle.y, "skipping stale circle event");
                self.stats.stale_circles_skipped += 1;
            }
        }
    }

    fn finalize(&mut self) -> Phase {
        let finished = self.line.finalize(self.options.finite_edge_length);
        self.queue.invalidate_circles();
        tracing::trace!(count = finished.len(), "finalized growing edges");
        self.edges.extend(finished);
        Phase::Done
    }
}

/// Computes the Voronoi diagram of `sites`, as seen by a sweep line that
/// stopped just above `cutoff`.
///
/// Pass `f64::NEG_INFINITY` as the cutoff to get the whole diagram.
pub fn sweep<P: Into<Point>>(
    sites: impl IntoIterator<Item = P>,
    cutoff: f64,
) -> Result<Diagram, Error> {
    sweep_with_options(sites, cutoff, &SweepOptions::default())
}

/// Like [`sweep`], but with non-default options.
pub fn sweep_with_options<P: Into<Point>>(
    sites: impl IntoIterator<Item = P>,
    cutoff: f64,
    options: &SweepOptions,
) -> Result<Diagram, Error> {
    let sites = sites.into_iter().map(Into::into).collect();
    Ok(Sweeper::new(sites, cutoff, options.clone())?.run())
}

#[cfg(feature = "debug-svg")]
impl Diagram {
    /// Draws the finished edges, and the sites they separate, as an svg document.
    ///
    /// The drawing is framed around the sites, so edges that go off to
    /// infinity get clipped.
    pub fn dump_svg(&self) -> svg::Document {
        use svg::node::element::{Circle, Group, Line};

        let sites: BTreeSet<Point> = self
            .edges
            .iter()
            .flat_map(|e| e.sites)
            .chain(
                self.beachline
                    .iter()
                    .flat_map(|line| line.arcs().map(|(_, arc)| arc.focus)),
            )
            .collect();
        let Some(bbox) = sites
            .iter()
            .map(|p| kurbo::Rect::from_points(p.to_kurbo(), p.to_kurbo()))
            .reduce(|a, b| a.union(b))
        else {
            return svg::Document::new();
        };
        let pad = 0.1 * bbox.width().max(bbox.height()).max(1.0);
        let bbox = bbox.inflate(pad, pad);
        let stroke_width = bbox.width().max(bbox.height()) / 512.0;
        // Unbounded starting points are drawn at the top of the picture.
        let clamp = |p: Point| Point::new(p.x, p.y.min(bbox.max_y() + pad));

        // svg's y axis points down, and ours points up.
        let mut group = Group::new().set("transform", "scale(1, -1)");
        for e in &self.edges {
            let (a, b) = (clamp(e.a), clamp(e.b));
            group = group.add(
                Line::new()
                    .set("x1", a.x)
                    .set("y1", a.y)
                    .set("x2", b.x)
                    .set("y2", b.y)
                    .set("stroke", "black")
                    .set("stroke-width", stroke_width),
            );
        }
        for p in &sites {
            group = group.add(
                Circle::new()
                    .set("cx", p.x)
                    .set("cy", p.y)
                    .set("r", 2.0 * stroke_width)
                    .set("fill", "red"),
            );
        }

        svg::Document::new()
            .set(
                "viewBox",
                (bbox.min_x(), -bbox.max_y(), bbox.width(), bbox.height()),
            )
            .add(group)
    }
}
