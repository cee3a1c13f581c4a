//! 2-D generating-profile geometry.
//!
//! A [`GeneratingProfile`] is the ordered, closed sequence of edges a
//! handler hands to the kernel for revolution, extrusion, or lofting. The
//! invariants the kernel relies on (closure, non-zero area, no
//! self-intersection) are checkable here, before any kernel call.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Tolerance for coincidence checks on profile endpoints.
pub const PROFILE_TOLERANCE: f64 = 1e-6;

/// A point in the profile's local plane.
///
/// For revolved profiles the convention is x = axial position, y = radius
/// (y >= 0, the x axis is the revolution axis). For extruded profiles the
/// plane is the sketch plane and extrusion is along +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One edge of a generating profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProfileSegment {
    /// Straight segment.
    Line { from: Point2, to: Point2 },
    /// Circular arc through three points.
    Arc {
        from: Point2,
        mid: Point2,
        to: Point2,
    },
    /// Interpolated curve, stored as its sample polyline (first sample is
    /// the start point, last is the end point).
    Spline { points: Vec<Point2> },
}

impl ProfileSegment {
    pub fn start(&self) -> Point2 {
        match self {
            ProfileSegment::Line { from, .. } | ProfileSegment::Arc { from, .. } => *from,
            ProfileSegment::Spline { points } => points[0],
        }
    }

    pub fn end(&self) -> Point2 {
        match self {
            ProfileSegment::Line { to, .. } | ProfileSegment::Arc { to, .. } => *to,
            ProfileSegment::Spline { points } => points[points.len() - 1],
        }
    }

    /// Polyline approximation including the start point, excluding the end
    /// point (so consecutive segments chain without duplicates).
    fn flatten_into(&self, out: &mut Vec<Point2>) {
        match self {
            ProfileSegment::Line { from, .. } => out.push(*from),
            ProfileSegment::Spline { points } => {
                out.extend_from_slice(&points[..points.len() - 1])
            }
            ProfileSegment::Arc { from, mid, to } => flatten_arc(*from, *mid, *to, out),
        }
    }
}

/// Tessellate a three-point arc. Collinear inputs degrade to a line.
fn flatten_arc(from: Point2, mid: Point2, to: Point2, out: &mut Vec<Point2>) {
    // Circumcenter of the three points.
    let d = 2.0
        * (from.x * (mid.y - to.y) + mid.x * (to.y - from.y) + to.x * (from.y - mid.y));
    if d.abs() < 1e-12 {
        out.push(from);
        return;
    }
    let f2 = from.x * from.x + from.y * from.y;
    let m2 = mid.x * mid.x + mid.y * mid.y;
    let t2 = to.x * to.x + to.y * to.y;
    let cx = (f2 * (mid.y - to.y) + m2 * (to.y - from.y) + t2 * (from.y - mid.y)) / d;
    let cy = (f2 * (to.x - mid.x) + m2 * (from.x - to.x) + t2 * (mid.x - from.x)) / d;
    let radius = (from.x - cx).hypot(from.y - cy);

    let a0 = (from.y - cy).atan2(from.x - cx);
    let am = (mid.y - cy).atan2(mid.x - cx);
    let a1 = (to.y - cy).atan2(to.x - cx);

    // Sweep from a0 to a1 passing through am.
    let ccw_sweep = |from: f64, to: f64| -> f64 {
        let mut s = to - from;
        while s < 0.0 {
            s += std::f64::consts::TAU;
        }
        s
    };
    let (sweep, sign) = {
        let ccw = ccw_sweep(a0, a1);
        if ccw_sweep(a0, am) <= ccw {
            (ccw, 1.0)
        } else {
            (std::f64::consts::TAU - ccw, -1.0)
        }
    };

    let steps = ((sweep * radius / 0.25).ceil() as usize).clamp(8, 128);
    for i in 0..steps {
        let a = a0 + sign * sweep * (i as f64) / (steps as f64);
        out.push(Point2::new(cx + radius * a.cos(), cy + radius * a.sin()));
    }
}

/// An ordered, closed loop of profile segments in a local plane.
///
/// Produced fresh per build request and consumed by exactly one kernel
/// call. Must enclose a non-self-intersecting, non-zero-area region with
/// counterclockwise (positive-area) orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratingProfile {
    segments: Vec<ProfileSegment>,
}

impl GeneratingProfile {
    pub fn new(segments: Vec<ProfileSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[ProfileSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every segment's end coincides with the next segment's start, and
    /// the last closes back onto the first.
    pub fn is_closed(&self) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        self.segments.iter().zip(self.segments.iter().cycle().skip(1)).all(
            |(a, b)| a.end().distance_to(&b.start()) <= PROFILE_TOLERANCE,
        )
    }

    /// Polyline approximation of the whole loop, one entry per vertex,
    /// without a repeated closing point.
    pub fn flatten(&self) -> Vec<Point2> {
        let mut out = Vec::new();
        for segment in &self.segments {
            segment.flatten_into(&mut out);
        }
        out.dedup_by(|a, b| a.distance_to(b) <= PROFILE_TOLERANCE);
        if out.len() > 1
            && out[0].distance_to(&out[out.len() - 1]) <= PROFILE_TOLERANCE
        {
            out.pop();
        }
        out
    }

    /// Signed area of the flattened loop (positive = counterclockwise).
    pub fn area(&self) -> f64 {
        let pts = self.flatten();
        shoelace(&pts)
    }

    /// True when any two non-adjacent flattened edges cross, or run back
    /// over each other along a shared line.
    pub fn self_intersects(&self) -> bool {
        let pts = self.flatten();
        let n = pts.len();
        if n < 4 {
            return false;
        }
        for i in 0..n {
            let (a1, a2) = (pts[i], pts[(i + 1) % n]);
            for j in (i + 2)..n {
                // Skip the edge sharing a vertex with edge i (including the
                // wrap-around pair).
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b1, b2) = (pts[j], pts[(j + 1) % n]);
                if segments_cross(a1, a2, b1, b2)
                    || segments_overlap(a1, a2, b1, b2)
                {
                    return true;
                }
            }
        }
        false
    }
}

fn shoelace(pts: &[Point2]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Even-odd point-in-polygon test.
pub fn point_in_polygon(p: Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y)
            && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Strict proper-crossing test; shared endpoints do not count.
fn segments_cross(a1: Point2, a2: Point2, b1: Point2, b2: Point2) -> bool {
    let orient = |p: Point2, q: Point2, r: Point2| -> f64 {
        (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
    };
    let d1 = orient(b1, b2, a1);
    let d2 = orient(b1, b2, a2);
    let d3 = orient(a1, a2, b1);
    let d4 = orient(a1, a2, b2);
    d1 * d2 < -1e-12 && d3 * d4 < -1e-12
}

/// Collinear segments sharing more than a single point: the loop doubles
/// back over itself. Touching at one point does not count.
fn segments_overlap(a1: Point2, a2: Point2, b1: Point2, b2: Point2) -> bool {
    let dx = a2.x - a1.x;
    let dy = a2.y - a1.y;
    let len = dx.hypot(dy);
    if len <= PROFILE_TOLERANCE {
        return false;
    }
    let offset = |p: Point2| ((p.x - a1.x) * dy - (p.y - a1.y) * dx).abs() / len;
    if offset(b1) > PROFILE_TOLERANCE || offset(b2) > PROFILE_TOLERANCE {
        return false;
    }
    let along = |p: Point2| ((p.x - a1.x) * dx + (p.y - a1.y) * dy) / (len * len);
    let (t1, t2) = (along(b1), along(b2));
    let (lo, hi) = (t1.min(t2), t1.max(t2));
    (hi.min(1.0) - lo.max(0.0)) * len > PROFILE_TOLERANCE
}

/// One planar cross-section of a loft, at a station along the loft axis
/// (+Z in the kernel's local frame). All sections of a loft must carry the
/// same number of vertices, in corresponding order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub station: f64,
    pub polygon: Vec<Point2>,
}

impl Section {
    pub fn new(station: f64, polygon: Vec<Point2>) -> Self {
        Self { station, polygon }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn extents(&self) -> (f64, f64, f64) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    pub fn volume(&self) -> f64 {
        let (dx, dy, dz) = self.extents();
        (dx * dy * dz).max(0.0)
    }

    pub fn contains(&self, p: &Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> GeneratingProfile {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let c = Point2::new(4.0, 2.0);
        let d = Point2::new(0.0, 2.0);
        GeneratingProfile::new(vec![
            ProfileSegment::Line { from: a, to: b },
            ProfileSegment::Line { from: b, to: c },
            ProfileSegment::Line { from: c, to: d },
            ProfileSegment::Line { from: d, to: a },
        ])
    }

    #[test]
    fn rectangle_is_closed_with_positive_area() {
        let profile = rect();
        assert!(profile.is_closed());
        assert!((profile.area() - 8.0).abs() < 1e-9);
        assert!(!profile.self_intersects());
    }

    #[test]
    fn open_chain_is_not_closed() {
        let profile = GeneratingProfile::new(vec![
            ProfileSegment::Line {
                from: Point2::new(0.0, 0.0),
                to: Point2::new(1.0, 0.0),
            },
            ProfileSegment::Line {
                from: Point2::new(1.0, 0.0),
                to: Point2::new(1.0, 1.0),
            },
        ]);
        assert!(!profile.is_closed());
    }

    #[test]
    fn bowtie_self_intersects() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 2.0);
        let c = Point2::new(2.0, 0.0);
        let d = Point2::new(0.0, 2.0);
        let profile = GeneratingProfile::new(vec![
            ProfileSegment::Line { from: a, to: b },
            ProfileSegment::Line { from: b, to: c },
            ProfileSegment::Line { from: c, to: d },
            ProfileSegment::Line { from: d, to: a },
        ]);
        assert!(profile.self_intersects());
    }

    #[test]
    fn doubled_back_edge_self_intersects() {
        // Edges (0,0)->(0,5) and (0,3)->(0,8) overlap along x = 0 without
        // a proper crossing.
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 5.0),
            Point2::new(2.0, 5.0),
            Point2::new(2.0, 3.0),
            Point2::new(0.0, 3.0),
            Point2::new(0.0, 8.0),
            Point2::new(-2.0, 8.0),
            Point2::new(-2.0, 0.0),
        ];
        let segments = pts
            .iter()
            .zip(pts.iter().cycle().skip(1))
            .map(|(a, b)| ProfileSegment::Line { from: *a, to: *b })
            .collect();
        let profile = GeneratingProfile::new(segments);
        assert!(profile.is_closed());
        assert!(profile.self_intersects());
    }

    #[test]
    fn arc_flattens_onto_its_circle() {
        let from = Point2::new(1.0, 0.0);
        let mid = Point2::new(0.0, 1.0);
        let to = Point2::new(-1.0, 0.0);
        let mut pts = Vec::new();
        flatten_arc(from, mid, to, &mut pts);
        assert!(pts.len() >= 8);
        for p in &pts {
            assert!((p.x.hypot(p.y) - 1.0).abs() < 1e-9);
            assert!(p.y >= -1e-9);
        }
    }

    #[test]
    fn point_in_polygon_basics() {
        let square = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(point_in_polygon(Point2::new(1.0, 1.0), &square));
        assert!(!point_in_polygon(Point2::new(3.0, 1.0), &square));
    }
}
