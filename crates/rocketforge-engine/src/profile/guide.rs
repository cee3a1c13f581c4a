//! Rail guide plan: an extruded flange/web/flange cross-section with
//! optional end sweeps and an underside channel.
//!
//! Component frame: the cross-section sits in XY, widths along x
//! (symmetric about 0) and the stack height along +y from the base plane
//! y = 0; the guide runs along +z for its length.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use rocketforge_core::features::{Feature, ToolSolid};
use rocketforge_core::geometry::{GeneratingProfile, Point2};
use rocketforge_core::params::RailGuideParams;

use super::line_loop;
use super::revolved::BuildPlan;

fn cross_section(p: &RailGuideParams) -> GeneratingProfile {
    let (bw, mw, tw) = (
        p.base_width / 2.0,
        p.middle_width / 2.0,
        p.top_width / 2.0,
    );
    let total = p.total_thickness;
    let web_top = total - p.top_thickness;
    line_loop(&[
        Point2::new(-bw, 0.0),
        Point2::new(bw, 0.0),
        Point2::new(bw, p.base_thickness),
        Point2::new(mw, p.base_thickness),
        Point2::new(mw, web_top),
        Point2::new(tw, web_top),
        Point2::new(tw, total),
        Point2::new(-tw, total),
        Point2::new(-tw, web_top),
        Point2::new(-mw, web_top),
        Point2::new(-mw, p.base_thickness),
        Point2::new(-bw, p.base_thickness),
    ])
}

/// Rotation taking the chamfer tool's sketch plane (length along x,
/// height along y) into the guide frame, with the extrusion running
/// across the guide width.
fn across_width(p: &RailGuideParams, margin: f64) -> Isometry3<f64> {
    let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2);
    Isometry3::from_parts(
        Translation3::new(p.base_width / 2.0 + margin, 0.0, 0.0),
        rotation,
    )
}

/// Wedge removing the top of one guide end at the sweep angle, leaving
/// the base at full length.
fn sweep_cut(p: &RailGuideParams, degrees: f64, aft: bool) -> Feature {
    let total = p.total_thickness;
    let run = total / degrees.to_radians().tan();
    let triangle = if aft {
        line_loop(&[
            Point2::new(p.length, 0.0),
            Point2::new(p.length, total),
            Point2::new(p.length - run, total),
        ])
    } else {
        line_loop(&[
            Point2::new(0.0, 0.0),
            Point2::new(run, total),
            Point2::new(0.0, total),
        ])
    };
    let margin = p.base_width;
    Feature::Cut(
        ToolSolid::extruded(triangle, p.base_width + 2.0 * margin)
            .placed(across_width(p, margin)),
    )
}

pub fn rail_guide_plan(p: &RailGuideParams) -> BuildPlan {
    let mut plan = BuildPlan {
        base: ToolSolid::extruded(cross_section(p), p.length),
        features: Default::default(),
    };

    if let Some(angle) = p.forward_sweep {
        plan.features.push(sweep_cut(p, angle, false));
    }
    if let Some(angle) = p.aft_sweep {
        plan.features.push(sweep_cut(p, angle, true));
    }

    if let Some(notch) = p.notch {
        let margin = notch.depth;
        let profile = line_loop(&[
            Point2::new(-notch.width / 2.0, -margin),
            Point2::new(notch.width / 2.0, -margin),
            Point2::new(notch.width / 2.0, notch.depth),
            Point2::new(-notch.width / 2.0, notch.depth),
        ]);
        let tool = ToolSolid::extruded(profile, p.length + 2.0 * margin)
            .placed(Translation3::new(0.0, 0.0, -margin).into());
        plan.features.push(Feature::Cut(tool));
    }

    plan
}
