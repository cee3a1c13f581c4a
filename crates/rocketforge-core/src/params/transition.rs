use serde::{Deserialize, Serialize};

use super::nose_cone::{NoseShape, Shoulder};

/// Wall treatment of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStyle {
    Solid,
    /// Solid with a cylindrical core bore through the full length.
    SolidCore,
    Hollow,
    Capped,
}

/// Parameters for a diameter transition between two tubes.
///
/// The forward end is the smaller-x end of the component frame; fore and
/// aft diameters may be in either relation (increasing or reducing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionParams {
    pub length: f64,
    pub fore_diameter: f64,
    pub aft_diameter: f64,
    /// Wall thickness, used by hollow/capped styles.
    pub thickness: f64,
    pub style: TransitionStyle,
    pub shape: NoseShape,
    /// Number of samples used to sketch the profile curve.
    pub resolution: u32,
    /// Core bore diameter; required by [`TransitionStyle::SolidCore`].
    pub core_diameter: Option<f64>,
    pub fore_shoulder: Option<Shoulder>,
    pub aft_shoulder: Option<Shoulder>,
}

impl TransitionParams {
    pub fn fore_radius(&self) -> f64 {
        self.fore_diameter / 2.0
    }

    pub fn aft_radius(&self) -> f64 {
        self.aft_diameter / 2.0
    }
}
