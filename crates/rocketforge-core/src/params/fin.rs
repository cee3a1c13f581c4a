use serde::{Deserialize, Serialize};

use crate::geometry::Point2;

/// Fin sweep, with exactly one authoritative representation. The other
/// value is derived via [`Sweep::length_for`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sweep {
    /// Axial distance from the root leading edge to the tip leading edge.
    Length(f64),
    /// Leading-edge sweep angle from the root chord normal, degrees.
    Angle(f64),
}

impl Sweep {
    /// Sweep distance for a fin of the given span.
    pub fn length_for(&self, span: f64) -> f64 {
        match self {
            Sweep::Length(length) => *length,
            Sweep::Angle(degrees) => span * degrees.to_radians().tan(),
        }
    }
}

/// Cross-section cut perpendicular to the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossSection {
    /// Constant thickness, square edges.
    Square,
    /// Full thickness at the leading edge, tapering to the trailing edge.
    Wedge,
    /// Tapered from both edges to full thickness at the break points.
    Diamond,
    /// Tip only: reuse the root cross-section.
    SameAsRoot,
}

impl CrossSection {
    pub fn name(&self) -> &'static str {
        match self {
            CrossSection::Square => "square",
            CrossSection::Wedge => "wedge",
            CrossSection::Diamond => "diamond",
            CrossSection::SameAsRoot => "same as root",
        }
    }
}

/// Break-point positions along a chord, either absolute lengths or
/// percentages of that chord. Exactly one interpretation is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChordPositions {
    Absolute { length1: f64, length2: f64 },
    Percent { length1: f64, length2: f64 },
}

impl ChordPositions {
    /// Resolve both break points to absolute distances from the leading
    /// edge of a chord of the given length.
    pub fn resolve(&self, chord: f64) -> (f64, f64) {
        match self {
            ChordPositions::Absolute { length1, length2 } => (*length1, *length2),
            ChordPositions::Percent { length1, length2 } => {
                (chord * length1 / 100.0, chord * length2 / 100.0)
            }
        }
    }
}

/// One chordwise section of a trapezoid fin (root or tip).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordSection {
    pub chord: f64,
    pub thickness: f64,
    pub cross_section: CrossSection,
    pub positions: ChordPositions,
}

/// Through-the-wall mounting tab on the fin root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtwTab {
    /// Distance from the root leading edge to the front of the tab.
    pub offset: f64,
    /// Chordwise length of the tab.
    pub length: f64,
    /// How far the tab reaches through the wall, toward the axis.
    pub depth: f64,
    pub thickness: f64,
}

/// A single edge of an externally authored fin sketch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SketchEdge {
    Line { from: Point2, to: Point2 },
    Arc { from: Point2, mid: Point2, to: Point2 },
    Spline { from: Point2, to: Point2 },
}

impl SketchEdge {
    pub fn endpoints(&self) -> (Point2, Point2) {
        match self {
            SketchEdge::Line { from, to }
            | SketchEdge::Arc { from, to, .. }
            | SketchEdge::Spline { from, to } => (*from, *to),
        }
    }
}

/// An externally authored planform sketch: must resolve to exactly one
/// closed loop of supported edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchProfile {
    pub edges: Vec<SketchEdge>,
    /// Extrusion thickness of the sketched fin.
    pub thickness: f64,
}

/// Planform source for a fin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FinProfile {
    Trapezoid {
        root: ChordSection,
        tip: ChordSection,
        span: f64,
        sweep: Sweep,
    },
    Sketch(SketchProfile),
}

/// Parameters for a single fin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinParams {
    pub profile: FinProfile,
    pub ttw: Option<TtwTab>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_angle_derives_length() {
        let sweep = Sweep::Angle(45.0);
        assert!((sweep.length_for(30.0) - 30.0).abs() < 1e-9);
        let sweep = Sweep::Length(12.5);
        assert!((sweep.length_for(30.0) - 12.5).abs() < 1e-12);
    }

    #[test]
    fn percent_positions_scale_with_chord() {
        let positions = ChordPositions::Percent {
            length1: 25.0,
            length2: 75.0,
        };
        let (l1, l2) = positions.resolve(80.0);
        assert!((l1 - 20.0).abs() < 1e-12);
        assert!((l2 - 60.0).abs() < 1e-12);
    }
}
