//! Profiles for the simple surfaces of revolution: body tubes, bulkheads,
//! centering rings, and rail buttons.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use rocketforge_core::features::{Feature, FeatureSpec, ToolSolid};
use rocketforge_core::geometry::{GeneratingProfile, Point2, ProfileSegment};
use rocketforge_core::kernel::EdgeSelect;
use rocketforge_core::params::{
    BodyTubeParams, BulkheadParams, CenteringRingParams, Fastener, HolePattern,
    RailButtonParams, RailButtonType,
};

use super::line_loop;

/// A base solid plus the secondary features to apply to it.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub base: ToolSolid,
    pub features: FeatureSpec,
}

impl BuildPlan {
    fn bare(base: ToolSolid) -> Self {
        Self {
            base,
            features: FeatureSpec::new(),
        }
    }
}

/// Annular cross-section of a body tube, revolved about the tube axis.
pub fn body_tube_profile(p: &BodyTubeParams) -> GeneratingProfile {
    line_loop(&[
        Point2::new(0.0, p.inner_radius()),
        Point2::new(p.length, p.inner_radius()),
        Point2::new(p.length, p.outer_radius()),
        Point2::new(0.0, p.outer_radius()),
    ])
}

/// Disk profile of a bulkhead, with the optional seating step on the aft
/// face; the bore radius is zero for a plain bulkhead and positive for a
/// centering ring.
fn disk_profile(p: &BulkheadParams, bore_radius: f64) -> GeneratingProfile {
    let outer = p.outer_radius();
    let total = p.total_thickness();
    let mut points = vec![
        Point2::new(0.0, bore_radius),
        Point2::new(total, bore_radius),
    ];
    if let Some(step) = p.step {
        points.push(Point2::new(total, step.diameter / 2.0));
        points.push(Point2::new(p.thickness, step.diameter / 2.0));
    }
    points.push(Point2::new(p.thickness, outer));
    points.push(Point2::new(0.0, outer));
    line_loop(&points)
}

/// Cylindrical drill tool for one hole of a radial pattern, long enough to
/// pierce the whole stack, with its placements around the axis.
fn hole_pattern_cut(holes: &HolePattern, total_thickness: f64) -> Feature {
    let margin = total_thickness;
    let profile = line_loop(&[
        Point2::new(-margin, 0.0),
        Point2::new(total_thickness + margin, 0.0),
        Point2::new(total_thickness + margin, holes.radius()),
        Point2::new(-margin, holes.radius()),
    ]);
    let placements = holes
        .angles()
        .map(|a| {
            Translation3::new(0.0, holes.center * a.cos(), holes.center * a.sin()).into()
        })
        .collect();
    Feature::CutPattern {
        tool: ToolSolid::revolved(profile),
        placements,
    }
}

pub fn bulkhead_plan(p: &BulkheadParams) -> BuildPlan {
    let mut plan = BuildPlan::bare(ToolSolid::revolved(disk_profile(p, 0.0)));
    if let Some(holes) = p.holes {
        plan.features.push(hole_pattern_cut(&holes, p.total_thickness()));
    }
    plan
}

pub fn centering_ring_plan(p: &CenteringRingParams) -> BuildPlan {
    let mut plan = BuildPlan::bare(ToolSolid::revolved(disk_profile(
        &p.bulkhead,
        p.center_radius(),
    )));

    if let Some(holes) = p.bulkhead.holes {
        plan.features
            .push(hole_pattern_cut(&holes, p.bulkhead.total_thickness()));
    }

    if let Some(notch) = p.notch {
        // Rectangular slot from the bore outward on one side, through the
        // full stack.
        let total = p.bulkhead.total_thickness();
        let margin = total;
        let reach = p.center_radius() + notch.height;
        let profile = line_loop(&[
            Point2::new(-margin, 0.0),
            Point2::new(total + margin, 0.0),
            Point2::new(total + margin, reach),
            Point2::new(-margin, reach),
        ]);
        let tool = ToolSolid::extruded(profile, notch.width)
            .placed(Translation3::new(0.0, 0.0, -notch.width / 2.0).into());
        plan.features.push(Feature::Cut(tool));
    }

    plan
}

/// Spool cross-section of a cylindrical rail button: outer-diameter
/// flanges at each end, the inner-diameter web between.
fn spool_profile(p: &RailButtonParams) -> GeneratingProfile {
    let outer = p.outer_radius();
    let inner = p.inner_radius();
    let top_start = p.thickness - p.top_thickness;
    line_loop(&[
        Point2::new(0.0, 0.0),
        Point2::new(p.thickness, 0.0),
        Point2::new(p.thickness, outer),
        Point2::new(top_start, outer),
        Point2::new(top_start, inner),
        Point2::new(p.base_thickness, inner),
        Point2::new(p.base_thickness, outer),
        Point2::new(0.0, outer),
    ])
}

/// Teardrop planform: a circle of the given radius about the origin, with
/// tangent lines meeting at the tail point.
fn teardrop(radius: f64, tail: f64) -> GeneratingProfile {
    let theta = (radius / tail).acos();
    let upper = Point2::new(radius * theta.cos(), radius * theta.sin());
    let lower = Point2::new(radius * theta.cos(), -radius * theta.sin());
    let nose = Point2::new(-radius, 0.0);
    let tail = Point2::new(tail, 0.0);
    GeneratingProfile::new(vec![
        ProfileSegment::Line {
            from: tail,
            to: upper,
        },
        ProfileSegment::Arc {
            from: upper,
            mid: nose,
            to: lower,
        },
        ProfileSegment::Line {
            from: lower,
            to: tail,
        },
    ])
}

/// Countersunk fastener bore: shank hole through the stack, opening into a
/// cone toward the top face. Revolved about the local X axis.
fn fastener_cut(f: &Fastener, stack: f64, placement: Isometry3<f64>) -> Feature {
    let shank = f.shank_diameter / 2.0;
    let head = f.head_diameter / 2.0;
    let slope = (f.countersink_angle / 2.0).to_radians().tan();
    let margin = stack;
    // Cone surface radius as a function of axial position, floored at the
    // shank radius.
    let cone_start = stack - (head - shank) / slope;
    let r_at = |x: f64| shank + slope * (x - cone_start).max(0.0);

    let x0 = -margin;
    let x1 = cone_start.clamp(-margin, stack + margin);
    let x2 = stack + margin;
    let profile = line_loop(&[
        Point2::new(x0, 0.0),
        Point2::new(x2, 0.0),
        Point2::new(x2, r_at(x2)),
        Point2::new(x1, r_at(x1)),
        Point2::new(x0, r_at(x0)),
    ]);
    Feature::Cut(ToolSolid::revolved(profile).placed(placement))
}

pub fn rail_button_plan(p: &RailButtonParams) -> BuildPlan {
    let mut plan = match p.button_type {
        RailButtonType::Cylindrical => BuildPlan::bare(ToolSolid::revolved(spool_profile(p))),
        RailButtonType::Airfoil => airfoil_plan(p),
    };

    if let Some(fastener) = p.fastener {
        let placement = match p.button_type {
            // The spool is revolved about X; the bore shares its axis.
            RailButtonType::Cylindrical => Isometry3::identity(),
            // The airfoil stack is extruded along Z; rotate the revolved
            // bore tool to match.
            RailButtonType::Airfoil => Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2),
            ),
        };
        plan.features
            .push(fastener_cut(&fastener, p.thickness, placement));
    }

    if let Some(radius) = p.top_fillet_radius {
        plan.features.push(Feature::Fillet {
            edge: EdgeSelect::TopOuterRim,
            radius,
        });
    }

    plan
}

/// Airfoil button: teardrop flanges and web stacked along +Z, fused onto
/// the base flange.
fn airfoil_plan(p: &RailButtonParams) -> BuildPlan {
    let tail = p.length - p.outer_radius();
    let flange = teardrop(p.outer_radius(), tail);
    let web = teardrop(p.inner_radius(), tail);

    let mut plan = BuildPlan::bare(ToolSolid::extruded(flange.clone(), p.base_thickness));

    let web_height = p.thickness - p.top_thickness - p.base_thickness;
    if web_height > 0.0 {
        plan.features.push(Feature::Fuse(
            ToolSolid::extruded(web, web_height)
                .placed(Translation3::new(0.0, 0.0, p.base_thickness).into()),
        ));
    }
    plan.features.push(Feature::Fuse(
        ToolSolid::extruded(flange, p.top_thickness).placed(
            Translation3::new(0.0, 0.0, p.thickness - p.top_thickness).into(),
        ),
    ));

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketforge_core::params::Step;

    #[test]
    fn body_tube_profile_is_a_closed_ring_section() {
        let profile = body_tube_profile(&BodyTubeParams {
            inner_diameter: 10.0,
            outer_diameter: 12.0,
            length: 100.0,
        });
        assert!(profile.is_closed());
        // Wall cross-section: 1 thick by 100 long.
        assert!((profile.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn stepped_bulkhead_profile_carries_both_faces() {
        let profile = disk_profile(
            &BulkheadParams {
                outer_diameter: 50.0,
                thickness: 3.0,
                step: Some(Step {
                    diameter: 40.0,
                    thickness: 2.0,
                }),
                holes: None,
            },
            0.0,
        );
        assert!(profile.is_closed());
        // 25 * 3 face plus 20 * 2 step.
        assert!((profile.area() - 115.0).abs() < 1e-9);
    }

    #[test]
    fn hole_pattern_places_one_tool_per_hole() {
        let plan = bulkhead_plan(&BulkheadParams {
            outer_diameter: 50.0,
            thickness: 3.0,
            step: None,
            holes: Some(HolePattern {
                diameter: 4.0,
                center: 18.0,
                count: 6,
                offset_angle: 30.0,
            }),
        });
        assert_eq!(plan.features.len(), 1);
        let feature = plan.features.ordered().next();
        match feature {
            Some(Feature::CutPattern { placements, .. }) => {
                assert_eq!(placements.len(), 6)
            }
            other => panic!("expected a cut pattern, got {other:?}"),
        }
    }

    #[test]
    fn airfoil_fastener_bore_aligns_with_the_stack_axis() {
        let plan = rail_button_plan(&RailButtonParams {
            button_type: RailButtonType::Airfoil,
            outer_diameter: 10.0,
            inner_diameter: 6.0,
            top_thickness: 2.0,
            base_thickness: 2.0,
            thickness: 8.0,
            length: 25.0,
            top_fillet_radius: None,
            fastener: Some(Fastener {
                shank_diameter: 3.0,
                head_diameter: 5.5,
                countersink_angle: 82.0,
            }),
        });
        let cut = plan.features.ordered().find_map(|f| match f {
            Feature::Cut(tool) => Some(tool),
            _ => None,
        });
        let tool = cut.expect("fastener cut planned");
        // The bore is revolved about local X; the placement must carry it
        // onto the extrusion axis.
        let axis = tool.placement.transform_vector(&Vector3::x());
        assert!((axis - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn teardrop_is_closed_and_longer_than_wide() {
        let planform = teardrop(5.0, 20.0);
        assert!(planform.is_closed());
        assert!(!planform.self_intersects());
        let pts = planform.flatten();
        let x_max = pts.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let y_max = pts.iter().map(|p| p.y.abs()).fold(0.0, f64::max);
        assert!((x_max - 20.0).abs() < 1e-9);
        assert!((y_max - 5.0).abs() < 1e-2);
    }
}
