//! The beachline: the arcs that are currently closest to the sweep line.
//!
//! The beachline is stored as a binary tree whose leaves are arcs and whose
//! internal nodes are the edges (breakpoints) between them. An in-order
//! traversal of the leaves visits the arcs from left to right, and every edge
//! separates the rightmost arc of its left subtree from the leftmost arc of its
//! right subtree.
//!
//! Nodes live in an arena and refer to each other by [`NodeIdx`]. Removed nodes
//! are returned to the arena immediately, and their handles go stale: looking
//! one up gives `None` (or panics, inside this module).

use slotmap::{new_key_type, SlotMap};

use crate::events::{CircleIdx, EventQueue};
use crate::geom::{breakpoint_direction, ray_intersection, CompleteEdge, EdgeRay, Point};
use crate::parabola::{arc_edge_intersection, arc_height, is_degenerate};

new_key_type! {
    /// A handle to a node in a [`Beachline`].
    pub struct NodeIdx;
}

/// A leaf of the beachline: part of the parabola of a single site.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    /// The site that this arc belongs to.
    pub focus: Point,
    /// The circle event that will remove this arc, if one is scheduled.
    ///
    /// This might refer to an event that has already left the queue.
    pub squeeze: Option<CircleIdx>,
}

/// An internal node of the beachline: a growing Voronoi edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// The geometry of the edge.
    pub ray: EdgeRay,
    /// Everything to the left of this edge.
    pub left: NodeIdx,
    /// Everything to the right of this edge.
    pub right: NodeIdx,
}

/// The two kinds of beachline nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// A leaf.
    Arc(Arc),
    /// An internal node, with exactly two children.
    Edge(Edge),
}

/// A node in the beachline tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// The parent node, or `None` for the root.
    pub parent: Option<NodeIdx>,
    /// What kind of node this is.
    pub kind: NodeKind,
}

/// The beachline tree.
///
/// Once a sweep has finished, this is handed out for inspection only.
#[derive(Clone, Debug, Default)]
pub struct Beachline {
    nodes: SlotMap<NodeIdx, Node>,
    root: Option<NodeIdx>,
}

impl Beachline {
    /// The root of the tree, if there is anything in it.
    pub fn root(&self) -> Option<NodeIdx> {
        self.root
    }

    /// Looks up a node, returning `None` if the handle is stale.
    pub fn get(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// The total number of nodes, arcs and edges together.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the tree empty?
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterates over the arcs, from left to right.
    pub fn arcs(&self) -> impl Iterator<Item = (NodeIdx, &Arc)> + '_ {
        let first = self.root.map(|r| self.leftmost_leaf(r));
        std::iter::successors(first, move |&idx| self.next_arc(idx))
            .map(move |idx| (idx, self.arc(idx)))
    }

    /// Iterates over the edges, parents before children and left before right.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIdx, &Edge)> + '_ {
        let mut stack: Vec<NodeIdx> = self.root.into_iter().collect();
        std::iter::from_fn(move || loop {
            let idx = stack.pop()?;
            if let NodeKind::Edge(edge) = &self.nodes[idx].kind {
                stack.push(edge.right);
                stack.push(edge.left);
                return Some((idx, edge));
            }
        })
    }

    /// The arc immediately to the left of `arc`.
    pub fn prev_arc(&self, arc: NodeIdx) -> Option<NodeIdx> {
        let edge = self.left_edge(arc)?;
        Some(self.rightmost_leaf(self.edge(edge).left))
    }

    /// The arc immediately to the right of `arc`.
    pub fn next_arc(&self, arc: NodeIdx) -> Option<NodeIdx> {
        let edge = self.right_edge(arc)?;
        Some(self.leftmost_leaf(self.edge(edge).right))
    }

    /// The edge immediately to the left of `node`.
    ///
    /// This is the closest ancestor that has `node` in its right subtree.
    pub fn left_edge(&self, node: NodeIdx) -> Option<NodeIdx> {
        let mut child = node;
        while let Some(parent) = self.nodes[child].parent {
            if self.edge(parent).right == child {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The edge immediately to the right of `node`.
    ///
    /// This is the closest ancestor that has `node` in its left subtree.
    pub fn right_edge(&self, node: NodeIdx) -> Option<NodeIdx> {
        let mut child = node;
        while let Some(parent) = self.nodes[child].parent {
            if self.edge(parent).left == child {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The foci of the arcs on either side of an edge.
    pub fn edge_sites(&self, edge: NodeIdx) -> [Point; 2] {
        let e = self.edge(edge);
        [
            self.arc(self.rightmost_leaf(e.left)).focus,
            self.arc(self.leftmost_leaf(e.right)).focus,
        ]
    }

    /// Where an edge currently is, when the sweep line is at `directrix_y`.
    ///
    /// We intersect the edge with the arc on its left and, if that fails,
    /// with the arc on its right.
    pub fn breakpoint(&self, edge: NodeIdx, directrix_y: f64) -> Option<Point> {
        let [left, right] = self.edge_sites(edge);
        let ray = &self.edge(edge).ray;
        arc_edge_intersection(ray, left, directrix_y)
            .or_else(|| arc_edge_intersection(ray, right, directrix_y))
    }

    fn breakpoint_x(&self, edge: NodeIdx, directrix_y: f64) -> f64 {
        self.breakpoint(edge, directrix_y)
            .map_or(self.edge(edge).ray.start.x, |p| p.x)
    }

    /// Finds the arc directly above horizontal position `x`.
    pub fn locate_arc(&self, x: f64, directrix_y: f64) -> Option<NodeIdx> {
        let mut cur = self.root?;
        loop {
            match &self.nodes[cur].kind {
                NodeKind::Arc(_) => return Some(cur),
                NodeKind::Edge(edge) => {
                    cur = if x < self.breakpoint_x(cur, directrix_y) {
                        edge.left
                    } else {
                        edge.right
                    };
                }
            }
        }
    }

    fn leftmost_leaf(&self, mut idx: NodeIdx) -> NodeIdx {
        while let NodeKind::Edge(edge) = &self.nodes[idx].kind {
            idx = edge.left;
        }
        idx
    }

    fn rightmost_leaf(&self, mut idx: NodeIdx) -> NodeIdx {
        while let NodeKind::Edge(edge) = &self.nodes[idx].kind {
            idx = edge.right;
        }
        idx
    }

    fn arc(&self, idx: NodeIdx) -> &Arc {
        match &self.nodes[idx].kind {
            NodeKind::Arc(arc) => arc,
            NodeKind::Edge(_) => panic!("{idx:?} is an edge, not an arc"),
        }
    }

    fn arc_mut(&mut self, idx: NodeIdx) -> &mut Arc {
        match &mut self.nodes[idx].kind {
            NodeKind::Arc(arc) => arc,
            NodeKind::Edge(_) => panic!("{idx:?} is an edge, not an arc"),
        }
    }

    fn edge(&self, idx: NodeIdx) -> &Edge {
        match &self.nodes[idx].kind {
            NodeKind::Edge(edge) => edge,
            NodeKind::Arc(_) => panic!("{idx:?} is an arc, not an edge"),
        }
    }

    fn new_arc(&mut self, focus: Point) -> NodeIdx {
        self.nodes.insert(Node {
            parent: None,
            kind: NodeKind::Arc(Arc {
                focus,
                squeeze: None,
            }),
        })
    }

    // Creates an edge node and adopts its two children.
    fn new_edge(&mut self, ray: EdgeRay, left: NodeIdx, right: NodeIdx) -> NodeIdx {
        let idx = self.nodes.insert(Node {
            parent: None,
            kind: NodeKind::Edge(Edge { ray, left, right }),
        });
        self.nodes[left].parent = Some(idx);
        self.nodes[right].parent = Some(idx);
        idx
    }

    // Puts `new` where `old` used to be, below `parent`.
    fn replace_child(&mut self, parent: Option<NodeIdx>, old: NodeIdx, new: NodeIdx) {
        self.nodes[new].parent = parent;
        let Some(parent) = parent else {
            self.root = Some(new);
            return;
        };
        let NodeKind::Edge(edge) = &mut self.nodes[parent].kind else {
            panic!("{parent:?} has children but is not an edge");
        };
        if edge.left == old {
            edge.left = new;
        } else {
            debug_assert_eq!(edge.right, old);
            edge.right = new;
        }
    }

    // Invalidates the circle event that would remove `arc`, if there is one.
    fn cancel_squeeze(&mut self, arc: NodeIdx, queue: &mut EventQueue) {
        if let Some(circle) = self.arc_mut(arc).squeeze.take() {
            queue.invalidate(circle);
        }
    }

    /// Makes `site` the only arc of an empty beachline.
    pub(crate) fn insert_root(&mut self, site: Point) -> NodeIdx {
        debug_assert!(self.root.is_none());
        let idx = self.new_arc(site);
        self.root = Some(idx);
        idx
    }

    /// Adds a site that lies (almost) level with the arc above it.
    ///
    /// The arc above is not split. Instead, the new arc goes next to it,
    /// separated by a vertical edge that extends forever upwards. `lift` says
    /// how far above the site to put the edge's nominal start.
    pub(crate) fn insert_beside(&mut self, site: Point, lift: f64) -> NodeIdx {
        let Some(active) = self.locate_arc(site.x, site.y) else {
            return self.insert_root(site);
        };
        let active_focus = self.arc(active).focus;
        let through = Point::new((site.x + active_focus.x) / 2.0, site.y + lift);

        let new_arc = self.new_arc(site);
        let (left, right) = if site.x < active_focus.x {
            (new_arc, active)
        } else {
            (active, new_arc)
        };
        let parent = self.nodes[active].parent;
        let edge = self.new_edge(EdgeRay::unbounded_vertical(through), left, right);
        self.replace_child(parent, active, edge);

        tracing::trace!(?site, beside = ?active_focus, "inserted level site");
        new_arc
    }

    /// Adds a new site, splitting the arc above it in two.
    ///
    /// The sweep line is assumed to be passing through `site`. Returns the new
    /// arc.
    pub(crate) fn insert_site(
        &mut self,
        site: Point,
        lift: f64,
        queue: &mut EventQueue,
    ) -> NodeIdx {
        let Some(old) = self.locate_arc(site.x, site.y) else {
            return self.insert_root(site);
        };
        let old_focus = self.arc(old).focus;
        if is_degenerate(old_focus, site.y) {
            // Both foci are on the sweep line, so the edge between them comes
            // down vertically from infinity.
            return self.insert_beside(site, lift);
        }

        self.cancel_squeeze(old, queue);

        let start = Point::new(site.x, arc_height(old_focus, site.x, site.y));
        let dir = breakpoint_direction(old_focus, site);

        let split_left = self.new_arc(old_focus);
        let new_arc = self.new_arc(site);
        let split_right = self.new_arc(old_focus);
        let right_edge = self.new_edge(EdgeRay::new(start, -dir), new_arc, split_right);
        let left_edge = self.new_edge(EdgeRay::new(start, dir), split_left, right_edge);
        self.replace_child(self.nodes[old].parent, old, left_edge);
        self.nodes.remove(old);

        tracing::trace!(?site, splits = ?old_focus, ?start, "inserted site");

        self.schedule_squeeze(split_left, queue);
        self.schedule_squeeze(split_right, queue);
        new_arc
    }

    /// Removes an arc that has been squeezed down to nothing at `vertex`.
    ///
    /// The two edges that bounded the arc are finished off and returned, and a
    /// new edge starts growing from `vertex` between the arcs that used to be
    /// the removed arc's neighbors.
    pub(crate) fn remove_arc(
        &mut self,
        arc: NodeIdx,
        vertex: Point,
        queue: &mut EventQueue,
    ) -> [CompleteEdge; 2] {
        let left_edge = self
            .left_edge(arc)
            .expect("a squeezed arc always has an edge on its left");
        let right_edge = self
            .right_edge(arc)
            .expect("a squeezed arc always has an edge on its right");
        let left_arc = self.rightmost_leaf(self.edge(left_edge).left);
        let right_arc = self.leftmost_leaf(self.edge(right_edge).right);

        let focus = self.arc(arc).focus;
        let left_focus = self.arc(left_arc).focus;
        let right_focus = self.arc(right_arc).focus;
        let finished = [
            CompleteEdge {
                a: self.edge(left_edge).ray.reported_start(),
                b: vertex,
                sites: [left_focus, focus],
            },
            CompleteEdge {
                a: self.edge(right_edge).ray.reported_start(),
                b: vertex,
                sites: [focus, right_focus],
            },
        ];

        self.cancel_squeeze(arc, queue);
        self.cancel_squeeze(left_arc, queue);
        self.cancel_squeeze(right_arc, queue);

        // One of the bounding edges is the arc's parent. The other one is
        // higher up, and it's the one that gets replaced by the new edge.
        let lower = self.nodes[arc]
            .parent
            .expect("a squeezed arc has a parent");
        let higher = if lower == left_edge {
            right_edge
        } else {
            left_edge
        };
        let lower_edge = self.edge(lower);
        let sibling = if lower_edge.left == arc {
            lower_edge.right
        } else {
            lower_edge.left
        };
        self.replace_child(self.nodes[lower].parent, lower, sibling);

        let ray = EdgeRay::new(vertex, breakpoint_direction(left_focus, right_focus));
        let Edge { left, right, .. } = *self.edge(higher);
        let parent = self.nodes[higher].parent;
        let new_edge = self.new_edge(ray, left, right);
        self.replace_child(parent, higher, new_edge);

        for removed in [arc, lower, higher] {
            self.nodes.remove(removed);
        }

        tracing::trace!(?vertex, removed = ?focus, "removed arc");

        self.schedule_squeeze(left_arc, queue);
        self.schedule_squeeze(right_arc, queue);
        finished
    }

    /// Schedules the circle event that will remove `arc`, if its two bounding
    /// edges are converging.
    ///
    /// If the arc already has a pending event that happens no later than the
    /// new one, the new one is dropped. Returns true if a new event was
    /// scheduled.
    pub(crate) fn schedule_squeeze(&mut self, arc: NodeIdx, queue: &mut EventQueue) -> bool {
        let (Some(left), Some(right)) = (self.left_edge(arc), self.right_edge(arc)) else {
            return false;
        };
        let Some(vertex) = ray_intersection(&self.edge(left).ray, &self.edge(right).ray) else {
            return false;
        };
        let focus = self.arc(arc).focus;
        let y = vertex.y - focus.distance(&vertex);

        let pending = self
            .arc(arc)
            .squeeze
            .and_then(|c| queue.circle(c))
            .filter(|c| c.valid);
        if let Some(pending) = pending {
            if pending.y >= y {
                tracing::trace!(?focus, y, pending = pending.y, "dominated circle event");
                return false;
            }
        }

        self.cancel_squeeze(arc, queue);
        let circle = queue.push_circle(y, vertex, arc);
        self.arc_mut(arc).squeeze = Some(circle);
        tracing::trace!(?focus, ?vertex, y, "scheduled circle event");
        true
    }

    /// Turns every remaining edge into a finished segment of length `length`,
    /// and empties the tree.
    pub(crate) fn finalize(&mut self, length: f64) -> Vec<CompleteEdge> {
        let ret = self
            .edges()
            .map(|(idx, edge)| CompleteEdge {
                a: edge.ray.start,
                b: edge.ray.start.along(edge.ray.direction, length),
                sites: self.edge_sites(idx),
            })
            .collect();
        self.nodes.clear();
        self.root = None;
        ret
    }

    /// Checks the structure of the tree, panicking if anything is wrong.
    #[cfg(any(test, feature = "slow-asserts"))]
    pub(crate) fn check_invariants(&self, queue: &EventQueue) {
        let Some(root) = self.root else {
            assert!(self.nodes.is_empty(), "empty tree with leftover nodes");
            return;
        };
        assert_eq!(self.nodes[root].parent, None, "the root has a parent");

        let mut reached = 0;
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            reached += 1;
            match &self.nodes[idx].kind {
                NodeKind::Arc(arc) => {
                    if let Some(circle) = arc.squeeze.and_then(|c| queue.circle(c)) {
                        assert_eq!(circle.arc, idx, "{idx:?} owns someone else's event");
                    }
                }
                NodeKind::Edge(edge) => {
                    for child in [edge.left, edge.right] {
                        let node = self
                            .nodes
                            .get(child)
                            .unwrap_or_else(|| panic!("{idx:?} has a stale child {child:?}"));
                        assert_eq!(node.parent, Some(idx), "bad back-reference at {child:?}");
                        stack.push(child);
                    }
                    let [l, r] = self.edge_sites(idx);
                    assert_ne!(l, r, "{idx:?} separates a site from itself");
                }
            }
        }
        // A node reachable twice, or not at all, would show up here.
        assert_eq!(reached, self.nodes.len(), "unreachable or shared nodes");
    }

    #[cfg(not(any(test, feature = "slow-asserts")))]
    pub(crate) fn check_invariants(&self, _queue: &EventQueue) {}
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use kurbo::Vec2;

    use super::*;
    use crate::events::SweepEvent;

    fn foci(line: &Beachline) -> Vec<Point> {
        line.arcs().map(|(_, arc)| arc.focus).collect()
    }

    fn close(p: Point, q: Point) -> bool {
        p.distance(&q) < 1e-9
    }

    #[test]
    fn split_an_arc() {
        let mut line = Beachline::default();
        let mut queue = EventQueue::default();
        let a = Point::new(0.0, 10.0);
        let b = Point::new(0.0, 0.0);
        line.insert_root(a);
        let new_arc = line.insert_site(b, 100.0, &mut queue);
        line.check_invariants(&queue);

        assert_eq!(foci(&line), vec![a, b, a]);
        assert_eq!(line.len(), 5);
        assert_eq!(line.arc(new_arc).focus, b);

        let edges: Vec<_> = line.edges().map(|(_, e)| e.ray).collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].start, Point::new(0.0, 5.0));
        assert_eq!(edges[0].direction, Vec2::new(-1.0, 0.0));
        assert_eq!(edges[1].start, Point::new(0.0, 5.0));
        assert_eq!(edges[1].direction, Vec2::new(1.0, 0.0));

        // Neither half of the split arc is bounded on both sides.
        assert!(queue.is_empty());
    }

    #[test]
    fn locate() {
        let mut line = Beachline::default();
        let mut queue = EventQueue::default();
        assert_eq!(line.locate_arc(0.0, 0.0), None);

        line.insert_root(Point::new(0.0, 10.0));
        let mid = line.insert_site(Point::new(0.0, 0.0), 100.0, &mut queue);

        // At directrix -10 the arcs are y = x^2/40 and y = x^2/20 - 5, which
        // cross at x = +/- sqrt(200).
        assert_eq!(line.locate_arc(0.0, -10.0), Some(mid));
        assert_eq!(line.locate_arc(14.0, -10.0), Some(mid));
        assert_ne!(line.locate_arc(15.0, -10.0), Some(mid));
        assert_ne!(line.locate_arc(-15.0, -10.0), Some(mid));
    }

    #[test]
    fn level_sites() {
        let mut line = Beachline::default();
        line.insert_root(Point::new(200.0, 300.0));
        line.insert_beside(Point::new(300.0, 300.0), 100.0);
        line.insert_beside(Point::new(400.0, 300.0), 100.0);
        line.check_invariants(&EventQueue::default());

        assert_eq!(
            foci(&line),
            vec![
                Point::new(200.0, 300.0),
                Point::new(300.0, 300.0),
                Point::new(400.0, 300.0)
            ]
        );
        let starts: Vec<_> = line.edges().map(|(_, e)| e.ray.start).collect();
        assert_eq!(
            starts,
            vec![Point::new(250.0, 400.0), Point::new(350.0, 400.0)]
        );
        assert!(line.edges().all(|(_, e)| e.ray.unbounded_above));
    }

    #[test]
    fn level_site_to_the_left() {
        let mut line = Beachline::default();
        line.insert_root(Point::new(5.0, 0.0));
        line.insert_beside(Point::new(1.0, 0.0), 1.0);
        assert_eq!(
            foci(&line),
            vec![Point::new(1.0, 0.0), Point::new(5.0, 0.0)]
        );
    }

    // Three sites on a circle of radius 10 around the origin.
    fn three_sites() -> (Beachline, EventQueue) {
        let mut line = Beachline::default();
        let mut queue = EventQueue::default();
        line.insert_root(Point::new(0.0, 10.0));
        line.insert_site(Point::new(-10.0, 0.0), 100.0, &mut queue);
        line.check_invariants(&queue);
        line.insert_site(Point::new(10.0, 0.0), 100.0, &mut queue);
        line.check_invariants(&queue);
        (line, queue)
    }

    #[test]
    fn squeeze_is_scheduled() {
        let (line, mut queue) = three_sites();
        assert_eq!(
            foci(&line),
            vec![
                Point::new(0.0, 10.0),
                Point::new(-10.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ]
        );

        assert_eq!(queue.len(), 1);
        assert_matches!(queue.pop(), Some(SweepEvent::Circle(c)) => {
            assert!(c.valid);
            assert!(close(c.vertex, Point::new(0.0, 0.0)));
            assert!((c.y + 10.0).abs() < 1e-9);
            // The middle copy of the top site is the one that disappears.
            assert_eq!(
                line.prev_arc(c.arc).map(|a| line.arc(a).focus),
                Some(Point::new(-10.0, 0.0))
            );
        });
    }

    #[test]
    fn squeeze_an_arc() {
        let (mut line, mut queue) = three_sites();
        let Some(SweepEvent::Circle(circle)) = queue.pop() else {
            panic!("expected a circle event");
        };
        let old_len = line.len();
        let finished = line.remove_arc(circle.arc, circle.vertex, &mut queue);
        line.check_invariants(&queue);

        assert_eq!(line.len(), old_len - 2);
        assert!(line.get(circle.arc).is_none());
        assert_eq!(
            foci(&line),
            vec![
                Point::new(0.0, 10.0),
                Point::new(-10.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 10.0),
            ]
        );

        assert!(close(finished[0].a, Point::new(-10.0, 10.0)));
        assert!(close(finished[1].a, Point::new(10.0, 10.0)));
        for e in &finished {
            assert!(close(e.b, Point::new(0.0, 0.0)));
        }
        assert_eq!(
            finished[0].sites,
            [Point::new(-10.0, 0.0), Point::new(0.0, 10.0)]
        );
        assert_eq!(
            finished[1].sites,
            [Point::new(0.0, 10.0), Point::new(10.0, 0.0)]
        );

        // The new edge heads straight down from the vertex.
        let (new_idx, new_edge) = line
            .edges()
            .find(|(_, e)| close(e.ray.start, Point::new(0.0, 0.0)))
            .unwrap();
        assert_eq!(new_edge.ray.direction, Vec2::new(0.0, -1.0));
        assert_eq!(
            line.edge_sites(new_idx),
            [Point::new(-10.0, 0.0), Point::new(10.0, 0.0)]
        );
    }

    #[test]
    fn splitting_invalidates_the_squeeze() {
        let (mut line, mut queue) = three_sites();
        // A site right under the vertex splits the arc that was about to vanish.
        line.insert_site(Point::new(0.0, -1.0), 100.0, &mut queue);
        line.check_invariants(&queue);

        let events = queue.drain_in_order();
        let first = events.iter().position(|ev| !ev.is_live()).unwrap();
        assert_matches!(
            events[first],
            SweepEvent::Circle(c) if !c.valid && (c.y + 10.0).abs() < 1e-9
        );
    }

    #[test]
    fn dominated_squeeze_is_dropped() {
        let (mut line, mut queue) = three_sites();
        let arc = line
            .arcs()
            .nth(2)
            .map(|(idx, _)| idx)
            .unwrap();
        // The same event again: it's no earlier than the pending one.
        assert!(!line.schedule_squeeze(arc, &mut queue));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.circles_scheduled(), 1);
    }

    #[test]
    fn finalize_empties_the_tree() {
        let (mut line, _) = three_sites();
        let edges = line.finalize(1000.0);
        assert_eq!(edges.len(), 4);
        for e in &edges {
            assert!((e.length() - 1000.0).abs() < 1e-9);
        }
        assert!(line.is_empty());
        assert_eq!(line.len(), 0);
        assert_eq!(line.arcs().count(), 0);
    }
}
