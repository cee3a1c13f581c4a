use serde::{Deserialize, Serialize};

use super::bulkhead::BulkheadParams;

/// A bulkhead with a central bore, used to center an inner tube within
/// the airframe. May carry an engine-hook notch across the bore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenteringRingParams {
    pub bulkhead: BulkheadParams,
    /// Diameter of the central bore.
    pub center_diameter: f64,
    pub notch: Option<Notch>,
}

/// A rectangular notch cut through the ring at the bore edge, clearing
/// an engine retention hook.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Notch {
    pub width: f64,
    /// Radial extent of the notch, measured outward from the bore.
    pub height: f64,
}

impl CenteringRingParams {
    pub fn center_radius(&self) -> f64 {
        self.center_diameter / 2.0
    }
}
