//! Fin cross-sections, loft sections, and sketch resolution.
//!
//! Component frame: chord runs along +x from the root leading edge,
//! thickness along y (symmetric about y = 0), span along +z. A trapezoid
//! fin lofts the root section at z = 0 to the swept tip section at
//! z = span; a sketched fin extrudes its planform by the fin thickness.

use nalgebra::Translation3;

use rocketforge_core::error::ConstructionError;
use rocketforge_core::features::{Feature, FeatureSpec, ToolSolid};
use rocketforge_core::geometry::{
    GeneratingProfile, Point2, ProfileSegment, Section, PROFILE_TOLERANCE,
};
use rocketforge_core::params::{
    ChordSection, CrossSection, FinParams, FinProfile, SketchEdge, SketchProfile, TtwTab,
};

use super::line_loop;

/// How the fin base solid is produced, plus its secondary features.
#[derive(Debug, Clone)]
pub enum FinPlan {
    Loft {
        sections: Vec<Section>,
        features: FeatureSpec,
    },
    Extrude {
        profile: GeneratingProfile,
        height: f64,
        features: FeatureSpec,
    },
}

/// Cross-section polygon for one chordwise station. All variants emit the
/// same vertex count for a given base shape so that root and tip loft
/// cleanly.
fn section_polygon(section: &ChordSection, base: CrossSection, offset: f64) -> Vec<Point2> {
    let chord = section.chord;
    let half = section.thickness / 2.0;
    let x0 = offset;
    match base {
        CrossSection::Square | CrossSection::SameAsRoot => vec![
            Point2::new(x0, -half),
            Point2::new(x0 + chord, -half),
            Point2::new(x0 + chord, half),
            Point2::new(x0, half),
        ],
        CrossSection::Wedge => vec![
            Point2::new(x0, -half),
            Point2::new(x0 + chord, 0.0),
            Point2::new(x0, half),
        ],
        CrossSection::Diamond => {
            let (l1, l2) = section.positions.resolve(chord);
            vec![
                Point2::new(x0, 0.0),
                Point2::new(x0 + l1, -half),
                Point2::new(x0 + l2, -half),
                Point2::new(x0 + chord, 0.0),
                Point2::new(x0 + l2, half),
                Point2::new(x0 + l1, half),
            ]
        }
    }
}

/// Through-the-wall tab for a lofted fin: a rectangular block fused under
/// the root section, reaching `depth` toward the body axis (-z).
fn ttw_feature(tab: &TtwTab) -> Feature {
    let half = tab.thickness / 2.0;
    let profile = line_loop(&[
        Point2::new(tab.offset, -half),
        Point2::new(tab.offset + tab.length, -half),
        Point2::new(tab.offset + tab.length, half),
        Point2::new(tab.offset, half),
    ]);
    Feature::Fuse(
        ToolSolid::extruded(profile, tab.depth)
            .placed(Translation3::new(0.0, 0.0, -tab.depth).into()),
    )
}

/// Through-the-wall tab for a sketched fin. The planform plane is XY with
/// the root edge along y = 0, so the tab drops below it and is centered
/// in the extrusion thickness.
fn sketch_ttw_feature(tab: &TtwTab, fin_thickness: f64) -> Feature {
    let profile = line_loop(&[
        Point2::new(tab.offset, -tab.depth),
        Point2::new(tab.offset + tab.length, -tab.depth),
        Point2::new(tab.offset + tab.length, 0.0),
        Point2::new(tab.offset, 0.0),
    ]);
    let z = (fin_thickness - tab.thickness) / 2.0;
    Feature::Fuse(
        ToolSolid::extruded(profile, tab.thickness)
            .placed(Translation3::new(0.0, 0.0, z).into()),
    )
}

/// Build the loft or extrusion plan for a validated fin.
pub fn fin_plan(p: &FinParams) -> Result<FinPlan, ConstructionError> {
    let mut features = FeatureSpec::new();

    match &p.profile {
        FinProfile::Trapezoid {
            root,
            tip,
            span,
            sweep,
        } => {
            if let Some(tab) = p.ttw {
                features.push(ttw_feature(&tab));
            }
            let base = root.cross_section;
            let sections = vec![
                Section::new(0.0, section_polygon(root, base, 0.0)),
                Section::new(
                    *span,
                    section_polygon(tip, base, sweep.length_for(*span)),
                ),
            ];
            Ok(FinPlan::Loft { sections, features })
        }
        FinProfile::Sketch(sketch) => {
            let profile = resolve_sketch(sketch)?;
            if let Some(tab) = p.ttw {
                features.push(sketch_ttw_feature(&tab, sketch.thickness));
            }
            Ok(FinPlan::Extrude {
                profile,
                height: sketch.thickness,
                features,
            })
        }
    }
}

/// Resolve an externally authored sketch into a single closed planform
/// face of line segments.
pub fn resolve_sketch(sketch: &SketchProfile) -> Result<GeneratingProfile, ConstructionError> {
    if sketch.edges.is_empty() {
        return Err(ConstructionError::InvalidSketch {
            reason: "sketch contains no edges".into(),
        });
    }

    let mut segments = Vec::with_capacity(sketch.edges.len());
    for edge in &sketch.edges {
        match edge {
            SketchEdge::Line { from, to } => {
                segments.push(ProfileSegment::Line {
                    from: *from,
                    to: *to,
                });
            }
            SketchEdge::Arc { .. } | SketchEdge::Spline { .. } => {
                return Err(ConstructionError::UnsupportedGeometry {
                    reason: "only line segments are supported in fin sketches".into(),
                });
            }
        }
    }

    // Edges must already chain end-to-start into one loop; a gap anywhere
    // means a disjoint or open sketch.
    for pair in segments.windows(2) {
        if pair[0].end().distance_to(&pair[1].start()) > PROFILE_TOLERANCE {
            return Err(ConstructionError::InvalidSketch {
                reason: "sketch does not form a single closed loop".into(),
            });
        }
    }
    let profile = GeneratingProfile::new(segments);
    if !profile.is_closed() {
        return Err(ConstructionError::InvalidSketch {
            reason: "sketch does not form a single closed loop".into(),
        });
    }
    if profile.area().abs() < PROFILE_TOLERANCE {
        return Err(ConstructionError::InvalidSketch {
            reason: "sketch encloses no area".into(),
        });
    }
    if profile.self_intersects() {
        return Err(ConstructionError::InvalidSketch {
            reason: "sketch is self-intersecting".into(),
        });
    }
    Ok(profile)
}
