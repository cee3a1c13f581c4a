use serde::{Deserialize, Serialize};

/// A hollow cylindrical airframe section.
///
/// Diameters are measured across the tube; the engine is unit-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTubeParams {
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub length: f64,
}

impl BodyTubeParams {
    pub fn inner_radius(&self) -> f64 {
        self.inner_diameter / 2.0
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_diameter / 2.0
    }
}
