use serde::{Deserialize, Serialize};

/// The profile curve family for a nose cone or transition, with its shape
/// coefficient where the family takes one. Coefficient domains are
/// enforced when the curve is constructed, not at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoseShape {
    Conical,
    Elliptical,
    /// Tangent ogive.
    Ogive,
    /// Secant ogive; `rho` is the defining circle radius.
    SecantOgive { rho: f64 },
    /// Tangent ogive with a spherical nose cap of the given radius.
    BluntedOgive { cap_radius: f64 },
    /// Power series, exponent in (0, 1].
    Power { exponent: f64 },
    /// Parabolic series, weight in [0, 1].
    Parabolic { weight: f64 },
    /// Haack series, coefficient >= 0 (0 = von Karman, 1/3 = LV-Haack).
    Haack { coefficient: f64 },
}

impl NoseShape {
    /// Curve family name, used in coefficient-domain error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            NoseShape::Conical => "conical",
            NoseShape::Elliptical => "elliptical",
            NoseShape::Ogive => "ogive",
            NoseShape::SecantOgive { .. } => "secant ogive",
            NoseShape::BluntedOgive { .. } => "blunted ogive",
            NoseShape::Power { .. } => "power series",
            NoseShape::Parabolic { .. } => "parabolic series",
            NoseShape::Haack { .. } => "Haack series",
        }
    }
}

/// Wall treatment of a nose cone or transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallStyle {
    Solid,
    /// Shelled to the given wall thickness, open at the base.
    Hollow,
    /// Shelled, with a closing cap at the base.
    Capped,
}

/// A stepped-down cylindrical extension used for friction-fit into an
/// adjoining tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shoulder {
    pub length: f64,
    pub diameter: f64,
    /// Wall thickness of the shoulder, used by hollow/capped styles.
    pub thickness: f64,
}

impl Shoulder {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Parameters for a nose cone of revolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoseConeParams {
    pub length: f64,
    /// Diameter at the base.
    pub diameter: f64,
    /// Wall thickness, used by hollow/capped styles.
    pub thickness: f64,
    pub style: WallStyle,
    pub shape: NoseShape,
    /// Number of samples used to sketch the profile curve.
    pub resolution: u32,
    pub shoulder: Option<Shoulder>,
}

impl NoseConeParams {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}
