//! Per-family geometric feasibility rules.
//!
//! Validation is the primary failure-avoidance layer: every rule here
//! rejects a parameter set the kernel could not realize, before any
//! geometry is attempted. Rules run in a fixed order per family and the
//! first violation is returned (fail-fast).
//!
//! Thresholds are strict: `outer == inner` is rejected, not accepted.

use tracing::debug;

use rocketforge_core::error::{Field, ValidationError};
use rocketforge_core::geometry::PROFILE_TOLERANCE;
use rocketforge_core::params::{
    BodyTubeParams, BulkheadParams, CenteringRingParams, ComponentFamily, ComponentParameters,
    CrossSection, FinParams, FinProfile, NoseConeParams, NoseShape, RailButtonParams,
    RailButtonType, RailGuideParams, Shoulder, Sweep, TransitionParams, TransitionStyle,
    WallStyle,
};

use crate::curves::ProfileCurve;

/// Check one parameter record against its family's rule set.
pub fn validate(params: &ComponentParameters) -> Result<(), ValidationError> {
    debug!(family = %params.family(), "validating parameters");
    match params {
        ComponentParameters::BodyTube(p) => validate_body_tube(p),
        ComponentParameters::Bulkhead(p) => validate_bulkhead(ComponentFamily::Bulkhead, p),
        ComponentParameters::CenteringRing(p) => validate_centering_ring(p),
        ComponentParameters::Fin(p) => validate_fin(p),
        ComponentParameters::NoseCone(p) => validate_nose_cone(p),
        ComponentParameters::Transition(p) => validate_transition(p),
        ComponentParameters::RailGuide(p) => validate_rail_guide(p),
        ComponentParameters::RailButton(p) => validate_rail_button(p),
    }
}

fn positive(family: ComponentFamily, field: Field, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive {
            family,
            field,
            value,
        })
    }
}

fn exceeds(
    family: ComponentFamily,
    field: Field,
    value: f64,
    bound: Field,
    limit: f64,
) -> Result<(), ValidationError> {
    if value > limit {
        Ok(())
    } else {
        Err(ValidationError::MustExceed {
            family,
            field,
            bound,
            value,
            limit,
        })
    }
}

fn less_than(
    family: ComponentFamily,
    field: Field,
    value: f64,
    bound: Field,
    limit: f64,
) -> Result<(), ValidationError> {
    if value < limit {
        Ok(())
    } else {
        Err(ValidationError::MustBeLess {
            family,
            field,
            bound,
            value,
            limit,
        })
    }
}

fn at_most(
    family: ComponentFamily,
    field: Field,
    value: f64,
    bound: Field,
    limit: f64,
) -> Result<(), ValidationError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ValidationError::MustNotExceed {
            family,
            field,
            bound,
            value,
            limit,
        })
    }
}

fn angle_within(
    family: ComponentFamily,
    field: Field,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(ValidationError::AngleOutOfRange {
            family,
            field,
            value,
            min,
            max,
        })
    }
}

pub fn validate_body_tube(p: &BodyTubeParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::BodyTube;
    positive(family, Field::InnerDiameter, p.inner_diameter)?;
    exceeds(
        family,
        Field::OuterDiameter,
        p.outer_diameter,
        Field::InnerDiameter,
        p.inner_diameter,
    )?;
    positive(family, Field::Length, p.length)
}

/// Shared by bulkheads and centering rings; `family` selects the name
/// reported in errors.
pub fn validate_bulkhead(
    family: ComponentFamily,
    p: &BulkheadParams,
) -> Result<(), ValidationError> {
    positive(family, Field::OuterDiameter, p.outer_diameter)?;
    positive(family, Field::Thickness, p.thickness)?;

    if let Some(step) = p.step {
        positive(family, Field::StepDiameter, step.diameter)?;
        less_than(
            family,
            Field::StepDiameter,
            step.diameter,
            Field::OuterDiameter,
            p.outer_diameter,
        )?;
        positive(family, Field::StepThickness, step.thickness)?;
    }

    if let Some(holes) = p.holes {
        positive(family, Field::HoleDiameter, holes.diameter)?;
        if holes.count < 1 {
            return Err(ValidationError::CountTooSmall {
                family,
                field: Field::HoleCount,
                value: holes.count,
                min: 1,
            });
        }
        // Holes must land entirely within the narrowest face they pierce.
        let extent = 2.0 * (holes.center + holes.radius());
        let (bound, limit) = match p.step {
            Some(step) => (Field::StepDiameter, step.diameter),
            None => (Field::OuterDiameter, p.outer_diameter),
        };
        at_most(family, Field::HoleExtent, extent, bound, limit)?;
    }

    Ok(())
}

pub fn validate_centering_ring(p: &CenteringRingParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::CenteringRing;
    validate_bulkhead(family, &p.bulkhead)?;

    positive(family, Field::CenterDiameter, p.center_diameter)?;
    less_than(
        family,
        Field::CenterDiameter,
        p.center_diameter,
        Field::OuterDiameter,
        p.bulkhead.outer_diameter,
    )?;
    if let Some(step) = p.bulkhead.step {
        less_than(
            family,
            Field::CenterDiameter,
            p.center_diameter,
            Field::StepDiameter,
            step.diameter,
        )?;
    }

    if let Some(holes) = p.bulkhead.holes {
        // The pattern must clear the bore.
        let inner_edge = 2.0 * (holes.center - holes.radius());
        exceeds(
            family,
            Field::HoleInnerEdge,
            inner_edge,
            Field::CenterDiameter,
            p.center_diameter,
        )?;
    }

    if let Some(notch) = p.notch {
        positive(family, Field::NotchWidth, notch.width)?;
        at_most(
            family,
            Field::NotchWidth,
            notch.width,
            Field::CenterDiameter,
            p.center_diameter,
        )?;
        positive(family, Field::NotchHeight, notch.height)?;
    }

    Ok(())
}

fn validate_shoulder(
    family: ComponentFamily,
    shoulder: &Shoulder,
    length_field: Field,
    diameter_field: Field,
    thickness_field: Field,
    body_diameter_field: Field,
    body_diameter: f64,
    hollow: bool,
) -> Result<(), ValidationError> {
    positive(family, length_field, shoulder.length)?;
    positive(family, diameter_field, shoulder.diameter)?;
    at_most(
        family,
        diameter_field,
        shoulder.diameter,
        body_diameter_field,
        body_diameter,
    )?;
    if hollow {
        positive(family, thickness_field, shoulder.thickness)?;
        less_than(
            family,
            thickness_field,
            shoulder.thickness,
            Field::ShoulderRadius,
            shoulder.radius(),
        )?;
    }
    Ok(())
}

pub fn validate_nose_cone(p: &NoseConeParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::NoseCone;
    positive(family, Field::Length, p.length)?;
    positive(family, Field::Diameter, p.diameter)?;

    // Ogive circles cannot reach the axis when the base radius exceeds
    // the length.
    if matches!(p.shape, NoseShape::Ogive | NoseShape::BluntedOgive { .. }) {
        at_most(family, Field::Radius, p.radius(), Field::Length, p.length)?;
    }

    // Coefficient domain check; the curve itself is rebuilt by the
    // profile stage.
    ProfileCurve::new(p.shape, p.length, p.radius())?;

    let hollow = matches!(p.style, WallStyle::Hollow | WallStyle::Capped);
    if hollow {
        positive(family, Field::Thickness, p.thickness)?;
        less_than(
            family,
            Field::Thickness,
            p.thickness,
            Field::Radius,
            p.radius(),
        )?;
    }

    if let Some(shoulder) = &p.shoulder {
        validate_shoulder(
            family,
            shoulder,
            Field::ShoulderLength,
            Field::ShoulderDiameter,
            Field::ShoulderThickness,
            Field::Diameter,
            p.diameter,
            hollow,
        )?;
    }

    Ok(())
}

pub fn validate_transition(p: &TransitionParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::Transition;
    positive(family, Field::Length, p.length)?;
    positive(family, Field::ForeDiameter, p.fore_diameter)?;
    positive(family, Field::AftDiameter, p.aft_diameter)?;

    // The curve spans the radius difference; equal diameters degenerate
    // to a plain cylinder and need no curve at all.
    let spread = (p.aft_radius() - p.fore_radius()).abs();
    if spread > PROFILE_TOLERANCE {
        if matches!(p.shape, NoseShape::Ogive | NoseShape::BluntedOgive { .. }) {
            at_most(family, Field::Radius, spread, Field::Length, p.length)?;
        }
        ProfileCurve::new(p.shape, p.length, spread)?;
    }

    let hollow = matches!(p.style, TransitionStyle::Hollow | TransitionStyle::Capped);
    if hollow {
        positive(family, Field::Thickness, p.thickness)?;
        less_than(
            family,
            Field::Thickness,
            p.thickness,
            Field::ForeRadius,
            p.fore_radius(),
        )?;
        less_than(
            family,
            Field::Thickness,
            p.thickness,
            Field::AftRadius,
            p.aft_radius(),
        )?;
    }

    if p.style == TransitionStyle::SolidCore {
        let core = p.core_diameter.unwrap_or(0.0);
        positive(family, Field::CoreDiameter, core)?;
        less_than(
            family,
            Field::CoreDiameter,
            core,
            Field::ForeDiameter,
            p.fore_diameter,
        )?;
        less_than(
            family,
            Field::CoreDiameter,
            core,
            Field::AftDiameter,
            p.aft_diameter,
        )?;
        if let Some(shoulder) = &p.fore_shoulder {
            less_than(
                family,
                Field::CoreDiameter,
                core,
                Field::ForeShoulderDiameter,
                shoulder.diameter,
            )?;
        }
        if let Some(shoulder) = &p.aft_shoulder {
            less_than(
                family,
                Field::CoreDiameter,
                core,
                Field::AftShoulderDiameter,
                shoulder.diameter,
            )?;
        }
    }

    if let Some(shoulder) = &p.fore_shoulder {
        validate_shoulder(
            family,
            shoulder,
            Field::ForeShoulderLength,
            Field::ForeShoulderDiameter,
            Field::ForeShoulderThickness,
            Field::ForeDiameter,
            p.fore_diameter,
            hollow,
        )?;
    }
    if let Some(shoulder) = &p.aft_shoulder {
        validate_shoulder(
            family,
            shoulder,
            Field::AftShoulderLength,
            Field::AftShoulderDiameter,
            Field::AftShoulderThickness,
            Field::AftDiameter,
            p.aft_diameter,
            hollow,
        )?;
    }

    Ok(())
}

pub fn validate_fin(p: &FinParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::Fin;

    let root_chord = match &p.profile {
        FinProfile::Trapezoid {
            root,
            tip,
            span,
            sweep,
        } => {
            positive(family, Field::RootChord, root.chord)?;
            positive(family, Field::TipChord, tip.chord)?;
            positive(family, Field::Span, *span)?;
            positive(family, Field::RootThickness, root.thickness)?;
            positive(family, Field::TipThickness, tip.thickness)?;

            if let Sweep::Angle(degrees) = sweep {
                angle_within(family, Field::SweepAngle, *degrees, -90.0, 90.0)?;
            }

            if tip.cross_section != CrossSection::SameAsRoot
                && tip.cross_section != root.cross_section
            {
                return Err(ValidationError::IncompatibleSections {
                    family,
                    root: root.cross_section.name(),
                    tip: tip.cross_section.name(),
                });
            }

            // Diamond break points must land inside the chord.
            for (section, chord_field) in
                [(root, Field::RootChord), (tip, Field::TipChord)]
            {
                if section.cross_section == CrossSection::Diamond {
                    let (l1, l2) = section.positions.resolve(section.chord);
                    positive(family, Field::ChordPosition, l1)?;
                    at_most(
                        family,
                        Field::ChordPosition,
                        l2,
                        chord_field,
                        section.chord,
                    )?;
                }
            }

            Some(root.chord)
        }
        FinProfile::Sketch(sketch) => {
            // Closure and edge-type checks happen at sketch resolution;
            // only the dimensional rule lives here.
            positive(family, Field::Thickness, sketch.thickness)?;
            None
        }
    };

    if let Some(ttw) = p.ttw {
        if let Some(root_chord) = root_chord {
            less_than(
                family,
                Field::TtwOffset,
                ttw.offset,
                Field::RootChord,
                root_chord,
            )?;
        }
        positive(family, Field::TtwLength, ttw.length)?;
        positive(family, Field::TtwDepth, ttw.depth)?;
        positive(family, Field::TtwThickness, ttw.thickness)?;
    }

    Ok(())
}

pub fn validate_rail_button(p: &RailButtonParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::RailButton;
    positive(family, Field::OuterDiameter, p.outer_diameter)?;
    positive(family, Field::InnerDiameter, p.inner_diameter)?;
    exceeds(
        family,
        Field::OuterDiameter,
        p.outer_diameter,
        Field::InnerDiameter,
        p.inner_diameter,
    )?;
    positive(family, Field::TopThickness, p.top_thickness)?;
    positive(family, Field::BaseThickness, p.base_thickness)?;
    positive(family, Field::Thickness, p.thickness)?;
    at_most(
        family,
        Field::TopAndBaseThickness,
        p.top_thickness + p.base_thickness,
        Field::TotalThickness,
        p.thickness,
    )?;

    if p.button_type == RailButtonType::Airfoil {
        positive(family, Field::Length, p.length)?;
        exceeds(
            family,
            Field::Length,
            p.length,
            Field::OuterDiameter,
            p.outer_diameter,
        )?;
    }

    if let Some(fillet) = p.top_fillet_radius {
        positive(family, Field::FilletRadius, fillet)?;
        at_most(
            family,
            Field::FilletRadius,
            fillet,
            Field::TopThickness,
            p.top_thickness,
        )?;
    }

    if let Some(fastener) = p.fastener {
        positive(family, Field::ShankDiameter, fastener.shank_diameter)?;
        exceeds(
            family,
            Field::HeadDiameter,
            fastener.head_diameter,
            Field::ShankDiameter,
            fastener.shank_diameter,
        )?;
        less_than(
            family,
            Field::HeadDiameter,
            fastener.head_diameter,
            Field::InnerDiameter,
            p.inner_diameter,
        )?;
        angle_within(
            family,
            Field::CountersinkAngle,
            fastener.countersink_angle,
            0.0,
            180.0,
        )?;
    }

    Ok(())
}

pub fn validate_rail_guide(p: &RailGuideParams) -> Result<(), ValidationError> {
    let family = ComponentFamily::RailGuide;
    positive(family, Field::MiddleWidth, p.middle_width)?;
    exceeds(
        family,
        Field::TopWidth,
        p.top_width,
        Field::MiddleWidth,
        p.middle_width,
    )?;
    exceeds(
        family,
        Field::BaseWidth,
        p.base_width,
        Field::MiddleWidth,
        p.middle_width,
    )?;
    positive(family, Field::TopThickness, p.top_thickness)?;
    positive(family, Field::BaseThickness, p.base_thickness)?;
    exceeds(
        family,
        Field::TotalThickness,
        p.total_thickness,
        Field::TopAndBaseThickness,
        p.top_thickness + p.base_thickness,
    )?;
    positive(family, Field::Length, p.length)?;

    if let Some(angle) = p.forward_sweep {
        angle_within(family, Field::ForwardSweepAngle, angle, 0.0, 90.0)?;
    }
    if let Some(angle) = p.aft_sweep {
        angle_within(family, Field::AftSweepAngle, angle, 0.0, 90.0)?;
    }

    if let Some(notch) = p.notch {
        positive(family, Field::NotchWidth, notch.width)?;
        at_most(
            family,
            Field::NotchWidth,
            notch.width,
            Field::MiddleWidth,
            p.middle_width,
        )?;
        positive(family, Field::NotchDepth, notch.depth)?;
        at_most(
            family,
            Field::NotchDepth,
            notch.depth,
            Field::TotalThickness,
            p.total_thickness,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketforge_core::params::{ChordPositions, ChordSection, HolePattern, Step, TtwTab};

    fn tube(inner: f64, outer: f64, length: f64) -> BodyTubeParams {
        BodyTubeParams {
            inner_diameter: inner,
            outer_diameter: outer,
            length,
        }
    }

    #[test]
    fn body_tube_accepts_feasible_dimensions() {
        assert!(validate_body_tube(&tube(10.0, 12.0, 100.0)).is_ok());
    }

    #[test]
    fn body_tube_rejects_outer_not_exceeding_inner() {
        let err = validate_body_tube(&tube(12.0, 10.0, 100.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Body tube: outer diameter must be greater than the inner diameter"
        );
    }

    #[test]
    fn body_tube_thresholds_are_strict() {
        assert!(validate_body_tube(&tube(10.0, 10.0, 100.0)).is_err());
        assert!(validate_body_tube(&tube(10.0, 12.0, 0.0)).is_err());
    }

    fn ring(center: f64, step: Option<Step>) -> CenteringRingParams {
        CenteringRingParams {
            bulkhead: BulkheadParams {
                outer_diameter: 50.0,
                thickness: 3.0,
                step,
                holes: None,
            },
            center_diameter: center,
            notch: None,
        }
    }

    #[test]
    fn centering_ring_bore_must_stay_inside_the_step() {
        let step = Step {
            diameter: 40.0,
            thickness: 2.0,
        };
        let err = validate_centering_ring(&ring(40.0, Some(step))).unwrap_err();
        assert_eq!(err.key(), "must-be-less");
        assert_eq!(err.field(), Some(Field::CenterDiameter));
        assert!(validate_centering_ring(&ring(30.0, Some(step))).is_ok());
    }

    #[test]
    fn centering_ring_holes_must_clear_the_bore() {
        let mut params = ring(30.0, None);
        params.bulkhead.holes = Some(HolePattern {
            diameter: 4.0,
            center: 16.0,
            count: 3,
            offset_angle: 0.0,
        });
        // Inner edge at 2 * (16 - 2) = 28 < 30.
        let err = validate_centering_ring(&params).unwrap_err();
        assert_eq!(err.field(), Some(Field::HoleInnerEdge));

        params.bulkhead.holes = Some(HolePattern {
            diameter: 4.0,
            center: 20.0,
            count: 3,
            offset_angle: 0.0,
        });
        assert!(validate_centering_ring(&params).is_ok());
    }

    fn nose(shape: NoseShape) -> NoseConeParams {
        NoseConeParams {
            length: 100.0,
            diameter: 50.0,
            thickness: 2.0,
            style: WallStyle::Solid,
            shape,
            resolution: 100,
            shoulder: None,
        }
    }

    #[test]
    fn nose_cone_power_coefficient_zero_is_rejected() {
        let err = validate_nose_cone(&nose(NoseShape::Power { exponent: 0.0 })).unwrap_err();
        assert_eq!(err.key(), "invalid-coefficient");
    }

    #[test]
    fn nose_cone_hollow_wall_must_fit_the_radius() {
        let mut params = nose(NoseShape::Conical);
        params.style = WallStyle::Hollow;
        params.thickness = 25.0;
        let err = validate_nose_cone(&params).unwrap_err();
        assert_eq!(err.field(), Some(Field::Thickness));
    }

    #[test]
    fn nose_cone_ogive_rejects_radius_beyond_length() {
        let mut params = nose(NoseShape::Ogive);
        params.length = 20.0;
        let err = validate_nose_cone(&params).unwrap_err();
        assert_eq!(err.key(), "must-not-exceed");
    }

    fn transition() -> TransitionParams {
        TransitionParams {
            length: 60.0,
            fore_diameter: 30.0,
            aft_diameter: 50.0,
            thickness: 2.0,
            style: TransitionStyle::Solid,
            shape: NoseShape::Conical,
            resolution: 100,
            core_diameter: None,
            fore_shoulder: None,
            aft_shoulder: None,
        }
    }

    #[test]
    fn transition_shoulder_cannot_outgrow_its_end() {
        let mut params = transition();
        params.fore_shoulder = Some(Shoulder {
            length: 10.0,
            diameter: 32.0,
            thickness: 1.0,
        });
        let err = validate_transition(&params).unwrap_err();
        assert_eq!(err.field(), Some(Field::ForeShoulderDiameter));
    }

    #[test]
    fn transition_solid_core_requires_a_core_diameter() {
        let mut params = transition();
        params.style = TransitionStyle::SolidCore;
        let err = validate_transition(&params).unwrap_err();
        assert_eq!(err.field(), Some(Field::CoreDiameter));

        params.core_diameter = Some(20.0);
        assert!(validate_transition(&params).is_ok());
    }

    #[test]
    fn transition_with_equal_diameters_skips_the_curve() {
        let mut params = transition();
        params.aft_diameter = params.fore_diameter;
        params.shape = NoseShape::Ogive;
        assert!(validate_transition(&params).is_ok());
    }

    fn trapezoid_fin() -> FinParams {
        let section = ChordSection {
            chord: 60.0,
            thickness: 3.0,
            cross_section: CrossSection::Square,
            positions: ChordPositions::Percent {
                length1: 25.0,
                length2: 75.0,
            },
        };
        FinParams {
            profile: FinProfile::Trapezoid {
                root: section,
                tip: ChordSection {
                    chord: 30.0,
                    cross_section: CrossSection::SameAsRoot,
                    ..section
                },
                span: 50.0,
                sweep: Sweep::Length(20.0),
            },
            ttw: None,
        }
    }

    #[test]
    fn fin_ttw_offset_must_stay_inside_the_root_chord() {
        let mut params = trapezoid_fin();
        params.ttw = Some(TtwTab {
            offset: 60.0,
            length: 20.0,
            depth: 5.0,
            thickness: 3.0,
        });
        let err = validate_fin(&params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fin: Ttw offset must be less than the root chord"
        );
    }

    #[test]
    fn fin_tip_break_point_is_checked_against_the_tip_chord() {
        let mut params = trapezoid_fin();
        if let FinProfile::Trapezoid { root, tip, .. } = &mut params.profile {
            root.cross_section = CrossSection::Diamond;
            tip.cross_section = CrossSection::Diamond;
            // l2 = 40 lands past the 30 tip chord but inside the root's.
            tip.positions = ChordPositions::Absolute {
                length1: 5.0,
                length2: 40.0,
            };
        }
        let err = validate_fin(&params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Fin: chord break position must not exceed the tip chord"
        );
    }

    #[test]
    fn fin_mismatched_cross_sections_cannot_loft() {
        let mut params = trapezoid_fin();
        if let FinProfile::Trapezoid { root, tip, .. } = &mut params.profile {
            root.cross_section = CrossSection::Square;
            tip.cross_section = CrossSection::Diamond;
        }
        let err = validate_fin(&params).unwrap_err();
        assert_eq!(err.key(), "incompatible-sections");
    }

    #[test]
    fn rail_button_flanges_must_fit_the_stack() {
        let params = RailButtonParams {
            button_type: RailButtonType::Cylindrical,
            outer_diameter: 10.0,
            inner_diameter: 6.0,
            top_thickness: 3.0,
            base_thickness: 3.0,
            thickness: 5.0,
            length: 0.0,
            top_fillet_radius: None,
            fastener: None,
        };
        let err = validate_rail_button(&params).unwrap_err();
        assert_eq!(err.field(), Some(Field::TopAndBaseThickness));
    }

    #[test]
    fn rail_guide_sweep_angles_are_open_interval() {
        let params = RailGuideParams {
            top_width: 12.0,
            middle_width: 6.0,
            base_width: 14.0,
            top_thickness: 2.0,
            base_thickness: 2.0,
            total_thickness: 8.0,
            length: 40.0,
            forward_sweep: Some(90.0),
            aft_sweep: None,
            notch: None,
        };
        let err = validate_rail_guide(&params).unwrap_err();
        assert_eq!(err.key(), "angle-out-of-range");
    }
}
