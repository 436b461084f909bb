//! Planar geometry used by feature snapping and embankment checks.

use serde::{Deserialize, Serialize};

/// A point in model coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Straight line piece between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let cross = (b.y - a.y) * (c.x - b.x) - (b.x - a.x) * (c.y - b.y);
    if cross.abs() < f64::EPSILON {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// `q` lies on segment `pr`, given the three are collinear.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether the two segments share at least one point, touching included.
    pub fn intersects(&self, other: &Segment) -> bool {
        let (p1, q1, p2, q2) = (self.start, self.end, other.start, other.end);
        let o1 = orientation(p1, q1, p2);
        let o2 = orientation(p1, q1, q2);
        let o3 = orientation(p2, q2, p1);
        let o4 = orientation(p2, q2, q1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
            || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
            || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
            || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min: Point,
    pub max: Point,
}

impl Envelope {
    /// Bounding box of the given points, `None` when there are none.
    pub fn of(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self { min: first, max: first }, |env, p| Self {
            min: Point::new(env.min.x.min(p.x), env.min.y.min(p.y)),
            max: Point::new(env.max.x.max(p.x), env.max.y.max(p.y)),
        }))
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// An ordered sequence of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build from `(x, y)` pairs.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last point coincide.
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.points.first() == self.points.last()
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1])).collect()
    }

    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::of(self.points.iter().copied())
    }

    /// Whether any segment of `self` touches any segment of `other`.
    pub fn intersects(&self, other: &Polyline) -> bool {
        match (self.envelope(), other.envelope()) {
            (Some(a), Some(b)) if a.intersects(&b) => {}
            _ => return false,
        }
        let theirs = other.segments();
        self.segments()
            .iter()
            .any(|mine| theirs.iter().any(|s| mine.intersects(s)))
    }

    /// Whether two non-adjacent segments of this line touch.
    ///
    /// For a closed line the first and last segment count as adjacent.
    pub fn self_intersects(&self) -> bool {
        let segments = self.segments();
        let count = segments.len();
        let closed = self.is_closed();
        for i in 0..count {
            for j in (i + 2)..count {
                if closed && i == 0 && j == count - 1 {
                    continue;
                }
                if segments[i].intersects(&segments[j]) {
                    return true;
                }
            }
        }
        false
    }
}
