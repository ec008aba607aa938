//! Geometric primitives: points, growing Voronoi edges, and finished segments.

use kurbo::Vec2;
use ordered_float::OrderedFloat;

/// A two-dimensional point.
///
/// Points are sorted by `y` and then by `x`. Note that the sweep runs from
/// large `y` to small `y`, so the "first" site to be swept is the *largest*
/// point in this order.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Vertical coordinate. The sweep line moves towards smaller values.
    pub y: f64,
    /// Horizontal coordinate.
    pub x: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (OrderedFloat(self.y), OrderedFloat(self.x))
            .cmp(&(OrderedFloat(other.y), OrderedFloat(other.x)))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// The Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).hypot()
    }

    /// Translates this point by `t` times `dir`.
    pub fn along(&self, dir: Vec2, t: f64) -> Self {
        Point {
            x: self.x + t * dir.x,
            y: self.y + t * dir.y,
        }
    }

    /// Converts to a `kurbo` point, for drawing.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// The direction in which the breakpoint between two arcs moves as the sweep
/// line descends.
///
/// `left` and `right` are the foci of the arcs on either side of the breakpoint,
/// in beachline order. The result is a unit vector perpendicular to the segment
/// joining them.
pub(crate) fn breakpoint_direction(left: Point, right: Point) -> Vec2 {
    let offset = right - left;
    debug_assert!(offset.x != 0.0 || offset.y != 0.0, "coincident foci");
    Vec2::new(offset.y, -offset.x).normalize()
}

/// The geometry of a growing Voronoi edge: a ray from `start` in `direction`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EdgeRay {
    /// The point where this edge began growing.
    pub start: Point,
    /// The unit direction in which this edge grows.
    pub direction: Vec2,
    /// True for the edges seeded between a leading row of equal-height sites.
    ///
    /// These edges actually extend forever in the direction opposite
    /// `direction`; their `start` is just a convenient point on them.
    pub unbounded_above: bool,
}

impl EdgeRay {
    /// A bounded ray, starting at `start`.
    pub fn new(start: Point, direction: Vec2) -> Self {
        EdgeRay {
            start,
            direction,
            unbounded_above: false,
        }
    }

    /// A vertical edge that extends forever upwards, passing through `through`
    /// and growing downwards.
    pub fn unbounded_vertical(through: Point) -> Self {
        EdgeRay {
            start: through,
            direction: Vec2::new(0.0, -1.0),
            unbounded_above: true,
        }
    }

    /// The start point as it should be reported in a finished segment.
    ///
    /// Edges that are unbounded above report an effectively infinite start.
    pub fn reported_start(&self) -> Point {
        if self.unbounded_above {
            Point::new(self.start.x, f64::MAX)
        } else {
            self.start
        }
    }
}

/// Intersects two edge rays.
///
/// A ray's parameter is only allowed to be negative if that ray is unbounded
/// above. Two rays meeting exactly at both of their own starting points do not
/// count as intersecting (unless one of them is unbounded), and neither do
/// parallel rays.
pub fn ray_intersection(e1: &EdgeRay, e2: &EdgeRay) -> Option<Point> {
    let d1 = e1.direction;
    let d2 = e2.direction;
    let offset = e2.start - e1.start;
    let det = d2.x * d1.y - d2.y * d1.x;
    if det == 0.0 {
        return None;
    }
    let u = (offset.y * d2.x - offset.x * d2.y) / det;
    let v = (offset.y * d1.x - offset.x * d1.y) / det;
    if !u.is_finite() || !v.is_finite() {
        return None;
    }

    if u < 0.0 && !e1.unbounded_above {
        return None;
    }
    if v < 0.0 && !e2.unbounded_above {
        return None;
    }
    if u == 0.0 && v == 0.0 && !e1.unbounded_above && !e2.unbounded_above {
        return None;
    }

    Some(e1.start.along(d1, u))
}

/// A finished segment of the Voronoi diagram.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub struct CompleteEdge {
    /// The point where the edge started growing.
    pub a: Point,
    /// The point where the edge stopped growing.
    pub b: Point,
    /// The two sites whose cells this edge separates, in beachline order.
    pub sites: [Point; 2],
}

impl std::fmt::Debug for CompleteEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let CompleteEdge { a, b, sites } = self;
        write!(f, "{a:?} -- {b:?} between {:?} and {:?}", sites[0], sites[1])
    }
}

impl CompleteEdge {
    /// Converts to a `kurbo` line, for drawing.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.a.to_kurbo(), self.b.to_kurbo())
    }

    /// The length of this segment.
    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }
}
