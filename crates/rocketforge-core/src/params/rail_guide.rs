use serde::{Deserialize, Serialize};

/// Channel cut along the underside of a rail guide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideNotch {
    pub width: f64,
    pub depth: f64,
}

/// Parameters for a launch rail guide.
///
/// The cross-section is a base flange, a narrower middle web, and a top
/// flange; `total_thickness` is the overall height of the stack. Sweeps
/// chamfer the ends of the guide at the given angle from the base plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailGuideParams {
    pub top_width: f64,
    pub middle_width: f64,
    pub base_width: f64,
    pub top_thickness: f64,
    pub base_thickness: f64,
    pub total_thickness: f64,
    pub length: f64,
    /// Forward end sweep angle, degrees, strictly in (0, 90) when set.
    pub forward_sweep: Option<f64>,
    /// Aft end sweep angle, degrees, strictly in (0, 90) when set.
    pub aft_sweep: Option<f64>,
    pub notch: Option<GuideNotch>,
}
