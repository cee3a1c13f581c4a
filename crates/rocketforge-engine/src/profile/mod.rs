//! Per-family 2-D generating-profile construction.
//!
//! Each builder turns an already validated parameter record into the
//! closed planar loop (or loft sections) the solid constructor feeds to
//! the kernel, plus the secondary features to apply afterwards.
//!
//! Frame conventions follow the kernel contract: revolved profiles use
//! x = axial position, y = radius; extruded profiles sketch in XY and
//! sweep along +Z.

mod fin;
mod guide;
mod nose;
mod revolved;
mod transition;

pub use fin::{fin_plan, resolve_sketch, FinPlan};
pub use guide::rail_guide_plan;
pub use nose::nose_profile;
pub use revolved::{
    body_tube_profile, bulkhead_plan, centering_ring_plan, rail_button_plan, BuildPlan,
};
pub use transition::transition_profile;

use rocketforge_core::geometry::{GeneratingProfile, Point2, ProfileSegment};

/// Close a polyline into a profile of line segments.
pub(crate) fn line_loop(points: &[Point2]) -> GeneratingProfile {
    let mut segments = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        segments.push(ProfileSegment::Line {
            from: points[i],
            to: points[(i + 1) % points.len()],
        });
    }
    GeneratingProfile::new(segments)
}
