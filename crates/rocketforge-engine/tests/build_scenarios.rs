//! End-to-end build scenarios across every component family.

use std::f64::consts::PI;

use rocketforge_core::error::BuildError;
use rocketforge_core::kernel::Kernel;
use rocketforge_core::params::*;
use rocketforge_engine::{build, SamplingKernel};

fn kernel() -> SamplingKernel {
    SamplingKernel::default()
}

fn body_tube(inner: f64, outer: f64, length: f64) -> ComponentParameters {
    ComponentParameters::BodyTube(BodyTubeParams {
        inner_diameter: inner,
        outer_diameter: outer,
        length,
    })
}

#[test]
fn body_tube_builds_a_hollow_cylinder() {
    let k = kernel();
    let solid = build(&k, &body_tube(10.0, 12.0, 100.0)).expect("feasible tube");

    let bounds = k.bounding_box(&solid);
    assert!((bounds.min.x - 0.0).abs() < 1e-9);
    assert!((bounds.max.x - 100.0).abs() < 1e-9);
    assert!((bounds.max.y - 6.0).abs() < 1e-9);

    let expected = PI * (36.0 - 25.0) * 100.0;
    let volume = k.volume(&solid);
    assert!(
        (volume - expected).abs() / expected < 0.08,
        "volume {volume} vs {expected}"
    );
}

#[test]
fn body_tube_swapped_diameters_are_rejected() {
    let err = build(&kernel(), &body_tube(12.0, 10.0, 100.0)).unwrap_err();
    assert!(err.is_validation());
    assert!(err
        .to_string()
        .contains("outer diameter must be greater than the inner"));
}

#[test]
fn body_tube_equal_diameters_are_rejected() {
    // ">"-style rules are strict.
    let err = build(&kernel(), &body_tube(10.0, 10.0, 100.0)).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn identical_parameters_build_identical_solids() {
    let k = SamplingKernel::new(32);
    let params = ComponentParameters::NoseCone(NoseConeParams {
        length: 80.0,
        diameter: 40.0,
        thickness: 2.0,
        style: WallStyle::Hollow,
        shape: NoseShape::Ogive,
        resolution: 32,
        shoulder: Some(Shoulder {
            length: 15.0,
            diameter: 36.0,
            thickness: 2.0,
        }),
    });
    let first = build(&k, &params).expect("feasible cone");
    let second = build(&k, &params).expect("feasible cone");

    assert_eq!(k.volume(&first), k.volume(&second));
    assert_eq!(k.bounding_box(&first), k.bounding_box(&second));
}

#[test]
fn deserialized_parameters_build_the_same_solid() {
    let k = kernel();
    let params = body_tube(10.0, 12.0, 100.0);
    let json = serde_json::to_string(&params).expect("serializable");
    let back: ComponentParameters = serde_json::from_str(&json).expect("deserializable");

    let direct = build(&k, &params).expect("feasible tube");
    let round_tripped = build(&k, &back).expect("feasible tube");
    assert_eq!(k.volume(&direct), k.volume(&round_tripped));
    assert_eq!(k.bounding_box(&direct), k.bounding_box(&round_tripped));
}

#[test]
fn centering_ring_center_at_step_diameter_is_rejected() {
    let params = ComponentParameters::CenteringRing(CenteringRingParams {
        bulkhead: BulkheadParams {
            outer_diameter: 50.0,
            thickness: 3.0,
            step: Some(Step {
                diameter: 40.0,
                thickness: 2.0,
            }),
            holes: None,
        },
        center_diameter: 40.0,
        notch: None,
    });
    let err = build(&kernel(), &params).unwrap_err();
    assert!(err.is_validation());
    match err {
        BuildError::Validation(v) => {
            assert_eq!(v.key(), "must-be-less");
            assert!(v.to_string().contains("center diameter"));
            assert!(v.to_string().contains("step diameter"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn drilled_bulkhead_loses_volume_to_its_holes() {
    let k = kernel();
    let solid_params = ComponentParameters::Bulkhead(BulkheadParams {
        outer_diameter: 50.0,
        thickness: 5.0,
        step: None,
        holes: None,
    });
    let drilled_params = ComponentParameters::Bulkhead(BulkheadParams {
        outer_diameter: 50.0,
        thickness: 5.0,
        step: None,
        holes: Some(HolePattern {
            diameter: 6.0,
            center: 18.0,
            count: 4,
            offset_angle: 0.0,
        }),
    });
    let solid = build(&k, &solid_params).expect("feasible bulkhead");
    let drilled = build(&k, &drilled_params).expect("feasible bulkhead");

    let removed = 4.0 * PI * 9.0 * 5.0;
    let difference = k.volume(&solid) - k.volume(&drilled);
    assert!(
        (difference - removed).abs() / removed < 0.2,
        "removed {difference} vs {removed}"
    );
}

#[test]
fn notched_centering_ring_builds() {
    let k = kernel();
    let params = ComponentParameters::CenteringRing(CenteringRingParams {
        bulkhead: BulkheadParams {
            outer_diameter: 50.0,
            thickness: 3.0,
            step: None,
            holes: None,
        },
        center_diameter: 29.0,
        notch: Some(Notch {
            width: 8.0,
            height: 4.0,
        }),
    });
    build(&k, &params).expect("feasible ring");
}

#[test]
fn power_profile_with_zero_coefficient_is_rejected() {
    let params = ComponentParameters::NoseCone(NoseConeParams {
        length: 100.0,
        diameter: 50.0,
        thickness: 2.0,
        style: WallStyle::Solid,
        shape: NoseShape::Power { exponent: 0.0 },
        resolution: 64,
        shoulder: None,
    });
    let err = build(&kernel(), &params).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("power series"));
}

#[test]
fn every_nose_shape_family_builds_a_solid_cone() {
    let k = SamplingKernel::new(32);
    let shapes = [
        NoseShape::Conical,
        NoseShape::Elliptical,
        NoseShape::Ogive,
        NoseShape::SecantOgive { rho: 300.0 },
        NoseShape::BluntedOgive { cap_radius: 5.0 },
        NoseShape::Power { exponent: 0.5 },
        NoseShape::Parabolic { weight: 0.5 },
        NoseShape::Haack { coefficient: 0.0 },
    ];
    for shape in shapes {
        let params = ComponentParameters::NoseCone(NoseConeParams {
            length: 100.0,
            diameter: 50.0,
            thickness: 2.0,
            style: WallStyle::Solid,
            shape,
            resolution: 32,
            shoulder: None,
        });
        build(&k, &params)
            .unwrap_or_else(|e| panic!("{} failed: {e}", shape.kind()));
    }
}

#[test]
fn transition_with_oversized_fore_shoulder_is_rejected() {
    let params = ComponentParameters::Transition(TransitionParams {
        length: 60.0,
        fore_diameter: 30.0,
        aft_diameter: 50.0,
        thickness: 2.0,
        style: TransitionStyle::Solid,
        shape: NoseShape::Conical,
        resolution: 64,
        core_diameter: None,
        fore_shoulder: Some(Shoulder {
            length: 10.0,
            diameter: 32.0,
            thickness: 2.0,
        }),
        aft_shoulder: None,
    });
    let err = build(&kernel(), &params).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("forward shoulder diameter"));
}

#[test]
fn capped_transition_builds_and_stays_within_bounds() {
    let k = SamplingKernel::new(32);
    let params = ComponentParameters::Transition(TransitionParams {
        length: 60.0,
        fore_diameter: 30.0,
        aft_diameter: 50.0,
        thickness: 2.0,
        style: TransitionStyle::Capped,
        shape: NoseShape::Conical,
        resolution: 32,
        core_diameter: None,
        fore_shoulder: None,
        aft_shoulder: None,
    });
    let solid = build(&k, &params).expect("feasible transition");
    let bounds = k.bounding_box(&solid);
    assert!((bounds.min.x - 0.0).abs() < 1e-9);
    assert!((bounds.max.x - 60.0).abs() < 1e-9);
    assert!((bounds.max.y - 25.0).abs() < 1e-9);
}

fn trapezoid_fin(ttw: Option<TtwTab>) -> ComponentParameters {
    let root = ChordSection {
        chord: 60.0,
        thickness: 3.0,
        cross_section: CrossSection::Square,
        positions: ChordPositions::Percent {
            length1: 25.0,
            length2: 75.0,
        },
    };
    let tip = ChordSection {
        chord: 30.0,
        cross_section: CrossSection::SameAsRoot,
        ..root
    };
    ComponentParameters::Fin(FinParams {
        profile: FinProfile::Trapezoid {
            root,
            tip,
            span: 50.0,
            sweep: Sweep::Length(20.0),
        },
        ttw,
    })
}

#[test]
fn trapezoid_fin_volume_matches_the_planform() {
    let k = kernel();
    let solid = build(&k, &trapezoid_fin(None)).expect("feasible fin");
    // Planform area (60 + 30) / 2 * 50 at constant thickness 3.
    let expected = 45.0 * 50.0 * 3.0;
    let volume = k.volume(&solid);
    assert!(
        (volume - expected).abs() / expected < 0.05,
        "volume {volume} vs {expected}"
    );
}

#[test]
fn ttw_offset_at_root_chord_is_rejected() {
    let err = build(
        &kernel(),
        &trapezoid_fin(Some(TtwTab {
            offset: 60.0,
            length: 20.0,
            depth: 5.0,
            thickness: 3.0,
        })),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Fin: Ttw offset must be less than the root chord"
    );
}

#[test]
fn ttw_tab_adds_volume_below_the_root() {
    let k = kernel();
    let plain = build(&k, &trapezoid_fin(None)).expect("feasible fin");
    let tabbed = build(
        &k,
        &trapezoid_fin(Some(TtwTab {
            offset: 10.0,
            length: 20.0,
            depth: 5.0,
            thickness: 3.0,
        })),
    )
    .expect("feasible fin");

    let bounds = k.bounding_box(&tabbed);
    assert!((bounds.min.z + 5.0).abs() < 1e-9);
    assert!(k.volume(&tabbed) > k.volume(&plain));
}

#[test]
fn sketched_fin_with_curved_edges_is_a_construction_failure() {
    let params = ComponentParameters::Fin(FinParams {
        profile: FinProfile::Sketch(SketchProfile {
            edges: vec![
                SketchEdge::Line {
                    from: rocketforge_core::geometry::Point2::new(0.0, 0.0),
                    to: rocketforge_core::geometry::Point2::new(40.0, 0.0),
                },
                SketchEdge::Spline {
                    from: rocketforge_core::geometry::Point2::new(40.0, 0.0),
                    to: rocketforge_core::geometry::Point2::new(0.0, 0.0),
                },
            ],
            thickness: 3.0,
        }),
        ttw: None,
    });
    let err = build(&kernel(), &params).unwrap_err();
    assert!(err.is_construction());
    assert!(err.to_string().contains("unsupported sketch geometry"));
}

#[test]
fn empty_fin_sketch_is_an_invalid_sketch() {
    let params = ComponentParameters::Fin(FinParams {
        profile: FinProfile::Sketch(SketchProfile {
            edges: vec![],
            thickness: 3.0,
        }),
        ttw: None,
    });
    let err = build(&kernel(), &params).unwrap_err();
    assert!(err.is_construction());
    assert!(err.to_string().contains("invalid sketch"));
}

fn cylindrical_button(
    top_fillet_radius: Option<f64>,
    fastener: Option<Fastener>,
) -> ComponentParameters {
    ComponentParameters::RailButton(RailButtonParams {
        button_type: RailButtonType::Cylindrical,
        outer_diameter: 10.0,
        inner_diameter: 6.0,
        top_thickness: 2.0,
        base_thickness: 2.0,
        thickness: 8.0,
        length: 0.0,
        top_fillet_radius,
        fastener,
    })
}

#[test]
fn cylindrical_rail_button_with_fillet_and_fastener_builds() {
    let k = kernel();
    let params = cylindrical_button(
        Some(1.0),
        Some(Fastener {
            shank_diameter: 3.0,
            head_diameter: 5.5,
            countersink_angle: 82.0,
        }),
    );
    let solid = build(&k, &params).expect("feasible button");
    let bounds = k.bounding_box(&solid);
    assert!((bounds.max.x - 8.0).abs() < 1e-9);
    assert!((bounds.max.y - 5.0).abs() < 1e-9);
}

#[test]
fn button_fillet_and_countersink_each_remove_material() {
    let k = kernel();
    let plain = k.volume(&build(&k, &cylindrical_button(None, None)).expect("plain"));
    let filleted =
        k.volume(&build(&k, &cylindrical_button(Some(1.0), None)).expect("filleted"));
    let bored = k.volume(
        &build(
            &k,
            &cylindrical_button(
                None,
                Some(Fastener {
                    shank_diameter: 3.0,
                    head_diameter: 5.5,
                    countersink_angle: 82.0,
                }),
            ),
        )
        .expect("bored"),
    );
    assert!(filleted < plain);
    assert!(bored < plain);
}

#[test]
fn airfoil_rail_button_spans_its_planform_length() {
    let k = SamplingKernel::new(32);
    let params = ComponentParameters::RailButton(RailButtonParams {
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
    let solid = build(&k, &params).expect("feasible button");
    let bounds = k.bounding_box(&solid);
    // Planform: blunt nose at -5 (tessellated arc), tail point at 20.
    assert!((bounds.min.x + 5.0).abs() < 1e-2);
    assert!((bounds.max.x - 20.0).abs() < 1e-9);
    assert!((bounds.max.z - 8.0).abs() < 1e-9);
}

#[test]
fn rail_guide_with_sweeps_and_notch_builds() {
    let k = SamplingKernel::new(32);
    let params = ComponentParameters::RailGuide(RailGuideParams {
        top_width: 12.0,
        middle_width: 6.0,
        base_width: 14.0,
        top_thickness: 2.0,
        base_thickness: 2.0,
        total_thickness: 8.0,
        length: 40.0,
        forward_sweep: Some(30.0),
        aft_sweep: Some(45.0),
        notch: Some(GuideNotch {
            width: 4.0,
            depth: 1.0,
        }),
    });
    let solid = build(&k, &params).expect("feasible guide");
    let bounds = k.bounding_box(&solid);
    assert!((bounds.max.z - 40.0).abs() < 1e-9);
    assert!((bounds.max.y - 8.0).abs() < 1e-9);
}

#[test]
fn rail_guide_inverted_thickness_stack_is_rejected() {
    let params = ComponentParameters::RailGuide(RailGuideParams {
        top_width: 12.0,
        middle_width: 6.0,
        base_width: 14.0,
        top_thickness: 4.0,
        base_thickness: 4.0,
        total_thickness: 8.0,
        length: 40.0,
        forward_sweep: None,
        aft_sweep: None,
        notch: None,
    });
    let err = build(&kernel(), &params).unwrap_err();
    assert!(err.is_validation());
    assert!(err
        .to_string()
        .contains("total thickness must be greater than the top and base thickness"));
}
