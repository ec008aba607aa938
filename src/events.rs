//! The event queue that drives the sweep.
//!
//! Circle events are scheduled speculatively and frequently turn out to be
//! unnecessary, because some other event changes the beachline before they're
//! reached. Instead of digging them out of the heap, we mark them invalid and
//! leave them where they are: invalid events are inert, and the sweep skips
//! them when they come out of the queue.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use slotmap::{new_key_type, SlotMap};

use crate::beachline::NodeIdx;
use crate::geom::Point;

new_key_type! {
    /// A handle to a scheduled circle event.
    ///
    /// The handle goes stale once the event leaves the queue.
    pub struct CircleIdx;
}

/// A scheduled disappearance of an arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CircleEvent {
    /// The sweep coordinate at which the event happens: the bottom of the
    /// circle through the three sites involved.
    pub y: f64,
    /// The center of that circle, which will be a vertex of the diagram.
    pub vertex: Point,
    /// The arc that gets squeezed out.
    #[serde(skip)]
    pub arc: NodeIdx,
    /// False if the beachline changed after this event was scheduled, so that
    /// it no longer needs to happen.
    pub valid: bool,
}

/// A sweep event, as handed back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum SweepEvent {
    /// A site becoming active.
    Site(Point),
    /// An arc disappearing.
    Circle(CircleEvent),
}

impl SweepEvent {
    /// The sweep coordinate of this event.
    pub fn y(&self) -> f64 {
        match self {
            SweepEvent::Site(p) => p.y,
            SweepEvent::Circle(c) => c.y,
        }
    }

    /// Is this an event that the sweep would act on?
    pub fn is_live(&self) -> bool {
        match self {
            SweepEvent::Site(_) => true,
            SweepEvent::Circle(c) => c.valid,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum QueuedKind {
    Site(Point),
    Circle(CircleIdx),
}

#[derive(Clone, Copy, Debug)]
struct Queued {
    y: f64,
    x: f64,
    seq: usize,
    kind: QueuedKind,
}

impl Queued {
    // The heap pops the largest key first: higher events, then circle events
    // before sites, then the leftmost, then the earliest pushed.
    fn key(&self) -> (OrderedFloat<f64>, u8, Reverse<OrderedFloat<f64>>, Reverse<usize>) {
        let rank = match self.kind {
            QueuedKind::Site(_) => 0,
            QueuedKind::Circle(_) => 1,
        };
        (
            OrderedFloat(self.y),
            rank,
            Reverse(OrderedFloat(self.x)),
            Reverse(self.seq),
        )
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A max-priority queue of sweep events, ordered by sweep coordinate.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Queued>,
    circles: SlotMap<CircleIdx, CircleEvent>,
    next_seq: usize,
    circles_scheduled: usize,
}

impl EventQueue {
    fn push(&mut self, y: f64, x: f64, kind: QueuedKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { y, x, seq, kind });
    }

    /// Schedules a new site.
    pub fn push_site(&mut self, site: Point) {
        self.push(site.y, site.x, QueuedKind::Site(site));
    }

    /// Schedules the removal of `arc` at sweep coordinate `y`.
    pub fn push_circle(&mut self, y: f64, vertex: Point, arc: NodeIdx) -> CircleIdx {
        let idx = self.circles.insert(CircleEvent {
            y,
            vertex,
            arc,
            valid: true,
        });
        self.circles_scheduled += 1;
        self.push(y, vertex.x, QueuedKind::Circle(idx));
        idx
    }

    /// Looks up a circle event that's still in the queue.
    pub fn circle(&self, idx: CircleIdx) -> Option<&CircleEvent> {
        self.circles.get(idx)
    }

    /// Marks a circle event as no longer needed, if it's still in the queue.
    ///
    /// The event stays in the queue, and will be handed out by [`EventQueue::pop`]
    /// in its turn (with its `valid` flag cleared).
    pub fn invalidate(&mut self, idx: CircleIdx) {
        if let Some(circle) = self.circles.get_mut(idx) {
            circle.valid = false;
        }
    }

    /// Invalidates every circle event that's still in the queue.
    ///
    /// Once the beachline has been torn down, the arcs these events refer to
    /// are gone.
    pub fn invalidate_circles(&mut self) {
        for circle in self.circles.values_mut() {
            circle.valid = false;
        }
    }

    /// The sweep coordinate of the next event.
    pub fn peek_y(&self) -> Option<f64> {
        self.heap.peek().map(|q| q.y)
    }

    /// Is the next event a site?
    pub fn peek_is_site(&self) -> bool {
        matches!(
            self.heap.peek(),
            Some(Queued {
                kind: QueuedKind::Site(_),
                ..
            })
        )
    }

    /// Removes and returns the highest event.
    ///
    /// Popping a circle event releases its record, so any handles to it go stale.
    pub fn pop(&mut self) -> Option<SweepEvent> {
        let queued = self.heap.pop()?;
        Some(match queued.kind {
            QueuedKind::Site(p) => SweepEvent::Site(p),
            QueuedKind::Circle(idx) => {
                // unwrap: every circle in the heap has a record, and records are
                // only removed here.
                SweepEvent::Circle(self.circles.remove(idx).unwrap())
            }
        })
    }

    /// The number of queued events, including invalidated ones.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// The number of circle events ever pushed.
    pub fn circles_scheduled(&self) -> usize {
        self.circles_scheduled
    }

    /// Are there any events left, including invalidated ones?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Empties the queue, returning all its events in the order they would
    /// have been processed.
    pub fn drain_in_order(&mut self) -> Vec<SweepEvent> {
        std::iter::from_fn(|| self.pop()).collect()
    }
}
