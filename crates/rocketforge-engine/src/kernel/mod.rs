//! A point-classification kernel backing the engine's tests and any host
//! that needs volumes and bounds without a full B-rep stack.
//!
//! Solids are immutable expression trees over the profile primitives;
//! membership of a point is evaluated by walking the tree, and volume is
//! a deterministic grid sample over the bounding box. Two builds from
//! identical parameters therefore report identical volumes and bounds.

use std::sync::Arc;

use nalgebra::{Isometry3, Point3};
use tracing::debug;

use rocketforge_core::geometry::{
    point_in_polygon, Aabb, GeneratingProfile, Point2, Section, PROFILE_TOLERANCE,
};
use rocketforge_core::kernel::{EdgeSelect, Kernel, KernelError, KernelResult};

/// Grid-sampling kernel. `resolution` is the number of cells per axis
/// used for volume integration.
#[derive(Debug, Clone)]
pub struct SamplingKernel {
    resolution: u32,
}

impl SamplingKernel {
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution: resolution.max(16),
        }
    }
}

impl Default for SamplingKernel {
    fn default() -> Self {
        Self::new(96)
    }
}

/// Opaque solid handle: a shared, immutable expression tree.
#[derive(Debug, Clone)]
pub struct SampledSolid {
    node: Arc<Node>,
}

impl SampledSolid {
    fn leaf(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }
}

#[derive(Debug)]
enum Node {
    /// Profile in the xr half-plane, revolved about the x axis.
    Revolved { polygon: Vec<Point2> },
    /// Profile in XY, swept along +z.
    Extruded { polygon: Vec<Point2>, height: f64 },
    /// Equal-arity sections skinned along +z.
    Lofted { sections: Vec<Section> },
    Union(Arc<Node>, Arc<Node>),
    Difference(Arc<Node>, Arc<Node>),
    Transformed {
        placement: Isometry3<f64>,
        inner: Arc<Node>,
    },
}

fn contains(node: &Node, p: &Point3<f64>) -> bool {
    match node {
        Node::Revolved { polygon } => {
            let r = p.y.hypot(p.z);
            point_in_polygon(Point2::new(p.x, r), polygon)
        }
        Node::Extruded { polygon, height } => {
            p.z >= 0.0
                && p.z <= *height
                && point_in_polygon(Point2::new(p.x, p.y), polygon)
        }
        Node::Lofted { sections } => lofted_contains(sections, p),
        Node::Union(a, b) => contains(a, p) || contains(b, p),
        Node::Difference(a, b) => contains(a, p) && !contains(b, p),
        Node::Transformed { placement, inner } => {
            contains(inner, &placement.inverse_transform_point(p))
        }
    }
}

/// Membership against the section pair bracketing the query station, with
/// vertex-wise interpolation. Crossing count runs over the interpolated
/// polygon without materializing it.
fn lofted_contains(sections: &[Section], p: &Point3<f64>) -> bool {
    let first = &sections[0];
    let last = &sections[sections.len() - 1];
    if p.z < first.station || p.z > last.station {
        return false;
    }
    for pair in sections.windows(2) {
        let (lo, hi) = (&pair[0], &pair[1]);
        if p.z > hi.station {
            continue;
        }
        let t = (p.z - lo.station) / (hi.station - lo.station);
        let n = lo.polygon.len();
        let vertex = |i: usize| -> Point2 {
            let a = lo.polygon[i];
            let b = hi.polygon[i];
            Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
        };
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (vertex(i), vertex(j));
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        return inside;
    }
    false
}

fn bbox(node: &Node) -> Aabb {
    match node {
        Node::Revolved { polygon } => {
            let (x_lo, x_hi) = min_max(polygon.iter().map(|p| p.x));
            let r = polygon.iter().map(|p| p.y).fold(0.0, f64::max);
            Aabb::new(Point3::new(x_lo, -r, -r), Point3::new(x_hi, r, r))
        }
        Node::Extruded { polygon, height } => {
            let (x_lo, x_hi) = min_max(polygon.iter().map(|p| p.x));
            let (y_lo, y_hi) = min_max(polygon.iter().map(|p| p.y));
            Aabb::new(Point3::new(x_lo, y_lo, 0.0), Point3::new(x_hi, y_hi, *height))
        }
        Node::Lofted { sections } => {
            let points = sections.iter().flat_map(|s| s.polygon.iter());
            let (x_lo, x_hi) = min_max(points.clone().map(|p| p.x));
            let (y_lo, y_hi) = min_max(points.map(|p| p.y));
            Aabb::new(
                Point3::new(x_lo, y_lo, sections[0].station),
                Point3::new(x_hi, y_hi, sections[sections.len() - 1].station),
            )
        }
        Node::Union(a, b) => bbox(a).union(&bbox(b)),
        // Cuts only remove material.
        Node::Difference(a, _) => bbox(a),
        Node::Transformed { placement, inner } => {
            let inner = bbox(inner);
            let corners = [
                Point3::new(inner.min.x, inner.min.y, inner.min.z),
                Point3::new(inner.min.x, inner.min.y, inner.max.z),
                Point3::new(inner.min.x, inner.max.y, inner.min.z),
                Point3::new(inner.min.x, inner.max.y, inner.max.z),
                Point3::new(inner.max.x, inner.min.y, inner.min.z),
                Point3::new(inner.max.x, inner.min.y, inner.max.z),
                Point3::new(inner.max.x, inner.max.y, inner.min.z),
                Point3::new(inner.max.x, inner.max.y, inner.max.z),
            ];
            let mut out: Option<Aabb> = None;
            for corner in corners {
                let c = placement.transform_point(&corner);
                let cell = Aabb::new(c, c);
                out = Some(match out {
                    Some(acc) => acc.union(&cell),
                    None => cell,
                });
            }
            out.unwrap_or(inner)
        }
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Flatten and check the invariants every profile-consuming primitive
/// relies on.
fn checked_polygon(profile: &GeneratingProfile) -> KernelResult<Vec<Point2>> {
    if profile.is_empty() || !profile.is_closed() {
        return Err(KernelError::OpenProfile);
    }
    if profile.self_intersects() {
        return Err(KernelError::SelfIntersecting);
    }
    let polygon = profile.flatten();
    if polygon.len() < 3 || profile.area().abs() < PROFILE_TOLERANCE {
        return Err(KernelError::ZeroArea);
    }
    Ok(polygon)
}

impl Kernel for SamplingKernel {
    type Solid = SampledSolid;

    fn revolve(&self, profile: &GeneratingProfile) -> KernelResult<SampledSolid> {
        let polygon = checked_polygon(profile)?;
        if polygon.iter().any(|p| p.y < -PROFILE_TOLERANCE) {
            return Err(KernelError::Degenerate {
                reason: "revolved profile crosses the revolution axis".into(),
            });
        }
        Ok(SampledSolid::leaf(Node::Revolved { polygon }))
    }

    fn extrude(&self, profile: &GeneratingProfile, height: f64) -> KernelResult<SampledSolid> {
        if height <= 0.0 {
            return Err(KernelError::Degenerate {
                reason: "extrusion height must be positive".into(),
            });
        }
        let polygon = checked_polygon(profile)?;
        Ok(SampledSolid::leaf(Node::Extruded { polygon, height }))
    }

    fn loft(&self, sections: &[Section]) -> KernelResult<SampledSolid> {
        if sections.len() < 2 {
            return Err(KernelError::Degenerate {
                reason: "loft needs at least two sections".into(),
            });
        }
        let arity = sections[0].polygon.len();
        if arity < 3 {
            return Err(KernelError::ZeroArea);
        }
        for (i, section) in sections.iter().enumerate() {
            if section.polygon.len() != arity {
                return Err(KernelError::IncompatibleSections {
                    reason: format!(
                        "section {} has {} vertices, expected {}",
                        i,
                        section.polygon.len(),
                        arity
                    ),
                });
            }
        }
        for pair in sections.windows(2) {
            if pair[1].station <= pair[0].station {
                return Err(KernelError::Degenerate {
                    reason: "loft stations must be strictly increasing".into(),
                });
            }
        }
        Ok(SampledSolid::leaf(Node::Lofted {
            sections: sections.to_vec(),
        }))
    }

    fn fuse(&self, base: &SampledSolid, tool: &SampledSolid) -> KernelResult<SampledSolid> {
        Ok(SampledSolid {
            node: Arc::new(Node::Union(base.node.clone(), tool.node.clone())),
        })
    }

    fn cut(&self, base: &SampledSolid, tool: &SampledSolid) -> KernelResult<SampledSolid> {
        let result = SampledSolid {
            node: Arc::new(Node::Difference(base.node.clone(), tool.node.clone())),
        };
        // A cut that consumes everything is a modeling error, not a solid.
        if !any_occupied(&result.node, 24) {
            return Err(KernelError::EmptyResult);
        }
        Ok(result)
    }

    fn transform(
        &self,
        solid: &SampledSolid,
        placement: &Isometry3<f64>,
    ) -> KernelResult<SampledSolid> {
        Ok(SampledSolid {
            node: Arc::new(Node::Transformed {
                placement: *placement,
                inner: solid.node.clone(),
            }),
        })
    }

    fn fillet(
        &self,
        solid: &SampledSolid,
        edge: EdgeSelect,
        radius: f64,
    ) -> KernelResult<SampledSolid> {
        if radius <= 0.0 {
            return Err(KernelError::Degenerate {
                reason: "fillet radius must be positive".into(),
            });
        }
        Ok(SampledSolid {
            node: with_filleted(&solid.node, edge, radius)?,
        })
    }

    fn volume(&self, solid: &SampledSolid) -> f64 {
        let bounds = bbox(&solid.node);
        let n = self.resolution as usize;
        let (dx, dy, dz) = bounds.extents();
        if dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
            return 0.0;
        }
        let (sx, sy, sz) = (dx / n as f64, dy / n as f64, dz / n as f64);
        let mut hits: u64 = 0;
        for i in 0..n {
            let x = bounds.min.x + (i as f64 + 0.5) * sx;
            for j in 0..n {
                let y = bounds.min.y + (j as f64 + 0.5) * sy;
                for k in 0..n {
                    let z = bounds.min.z + (k as f64 + 0.5) * sz;
                    if contains(&solid.node, &Point3::new(x, y, z)) {
                        hits += 1;
                    }
                }
            }
        }
        debug!(hits, cells = (n * n * n) as u64, "volume sample complete");
        hits as f64 * sx * sy * sz
    }

    fn bounding_box(&self, solid: &SampledSolid) -> Aabb {
        bbox(&solid.node)
    }
}

/// Coarse occupancy probe over the node's own bounds.
fn any_occupied(node: &Node, n: usize) -> bool {
    let bounds = bbox(node);
    let (dx, dy, dz) = bounds.extents();
    if dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
        return false;
    }
    for i in 0..n {
        let x = bounds.min.x + (i as f64 + 0.5) * dx / n as f64;
        for j in 0..n {
            let y = bounds.min.y + (j as f64 + 0.5) * dy / n as f64;
            for k in 0..n {
                let z = bounds.min.z + (k as f64 + 0.5) * dz / n as f64;
                if contains(node, &Point3::new(x, y, z)) {
                    return true;
                }
            }
        }
    }
    false
}

/// Rebuild the tree with the selected rim of its base revolved leaf
/// rounded. Booleans and transforms pass through; the base solid is
/// always the left operand.
fn with_filleted(node: &Arc<Node>, edge: EdgeSelect, radius: f64) -> KernelResult<Arc<Node>> {
    match &**node {
        Node::Revolved { polygon } => Ok(Arc::new(Node::Revolved {
            polygon: fillet_polygon(polygon, edge, radius)?,
        })),
        Node::Union(a, b) => Ok(Arc::new(Node::Union(
            with_filleted(a, edge, radius)?,
            b.clone(),
        ))),
        Node::Difference(a, b) => Ok(Arc::new(Node::Difference(
            with_filleted(a, edge, radius)?,
            b.clone(),
        ))),
        Node::Transformed { placement, inner } => Ok(Arc::new(Node::Transformed {
            placement: *placement,
            inner: with_filleted(inner, edge, radius)?,
        })),
        Node::Extruded { .. } | Node::Lofted { .. } => Err(KernelError::Degenerate {
            reason: "fillet requires a revolved base solid".into(),
        }),
    }
}

/// Round the polygon corner at the selected rim with a tangent arc.
fn fillet_polygon(
    polygon: &[Point2],
    edge: EdgeSelect,
    radius: f64,
) -> KernelResult<Vec<Point2>> {
    let n = polygon.len();
    let x_pick = match edge {
        EdgeSelect::TopOuterRim => min_max(polygon.iter().map(|p| p.x)).1,
        EdgeSelect::BaseOuterRim => min_max(polygon.iter().map(|p| p.x)).0,
    };
    let corner = polygon
        .iter()
        .enumerate()
        .filter(|(_, p)| (p.x - x_pick).abs() < PROFILE_TOLERANCE)
        .max_by(|a, b| a.1.y.total_cmp(&b.1.y))
        .map(|(i, _)| i)
        .ok_or_else(|| KernelError::Degenerate {
            reason: "no rim vertex on the selected end".into(),
        })?;

    let v = polygon[corner];
    let a = polygon[(corner + n - 1) % n];
    let b = polygon[(corner + 1) % n];
    let len1 = v.distance_to(&a);
    let len2 = v.distance_to(&b);
    let u1 = Point2::new((a.x - v.x) / len1, (a.y - v.y) / len1);
    let u2 = Point2::new((b.x - v.x) / len2, (b.y - v.y) / len2);

    // Tangent offset along each edge for an arc of the requested radius.
    let cos_phi = (u1.x * u2.x + u1.y * u2.y).clamp(-1.0, 1.0);
    let phi = cos_phi.acos();
    let half = phi / 2.0;
    if half.tan() <= 0.0 {
        return Err(KernelError::FilletTooLarge { radius });
    }
    let offset = radius / half.tan();
    if offset > len1 || offset > len2 {
        return Err(KernelError::FilletTooLarge { radius });
    }

    let bisector = Point2::new(u1.x + u2.x, u1.y + u2.y);
    let bisector_len = bisector.x.hypot(bisector.y);
    let center = Point2::new(
        v.x + bisector.x / bisector_len * radius / half.sin(),
        v.y + bisector.y / bisector_len * radius / half.sin(),
    );
    let p1 = Point2::new(v.x + u1.x * offset, v.y + u1.y * offset);
    let p2 = Point2::new(v.x + u2.x * offset, v.y + u2.y * offset);

    // Sweep the short way from p1 to p2 about the center.
    let a0 = (p1.y - center.y).atan2(p1.x - center.x);
    let a1 = (p2.y - center.y).atan2(p2.x - center.x);
    let mut delta = a1 - a0;
    while delta > std::f64::consts::PI {
        delta -= std::f64::consts::TAU;
    }
    while delta < -std::f64::consts::PI {
        delta += std::f64::consts::TAU;
    }

    let steps = 8;
    let mut arc = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let t = a0 + delta * i as f64 / steps as f64;
        arc.push(Point2::new(
            center.x + radius * t.cos(),
            center.y + radius * t.sin(),
        ));
    }

    let mut out = Vec::with_capacity(n + steps);
    for (i, p) in polygon.iter().enumerate() {
        if i == corner {
            out.extend(arc.iter().copied());
        } else {
            out.push(*p);
        }
    }
    Ok(out)
}
