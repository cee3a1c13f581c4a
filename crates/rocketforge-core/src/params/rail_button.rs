use serde::{Deserialize, Serialize};

/// Rail button planform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RailButtonType {
    /// Round spool: inner web between two flanges.
    Cylindrical,
    /// Streamlined spool with a teardrop planform.
    Airfoil,
}

/// Countersunk fastener bore through the button axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fastener {
    pub shank_diameter: f64,
    pub head_diameter: f64,
    /// Included countersink angle, degrees, in (0, 180).
    pub countersink_angle: f64,
}

/// Parameters for a launch rail button.
///
/// `thickness` is the total stack height; the top and base flanges use
/// the outer diameter, the web between them the inner diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailButtonParams {
    pub button_type: RailButtonType,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
    pub top_thickness: f64,
    pub base_thickness: f64,
    pub thickness: f64,
    /// Planform length; only meaningful for airfoil buttons.
    pub length: f64,
    /// Rounding of the top flange rim, applied after all cuts.
    pub top_fillet_radius: Option<f64>,
    pub fastener: Option<Fastener>,
}

impl RailButtonParams {
    pub fn outer_radius(&self) -> f64 {
        self.outer_diameter / 2.0
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_diameter / 2.0
    }
}
