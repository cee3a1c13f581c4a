use serde::{Deserialize, Serialize};

/// A solid disk closing off a tube, optionally stepped to seat into a
/// coupler and optionally drilled with a radial hole pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkheadParams {
    pub outer_diameter: f64,
    pub thickness: f64,
    pub step: Option<Step>,
    pub holes: Option<HolePattern>,
}

/// A reduced-diameter step on the aft face of a bulkhead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub diameter: f64,
    pub thickness: f64,
}

/// Evenly spaced holes drilled parallel to the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HolePattern {
    /// Diameter of each hole.
    pub diameter: f64,
    /// Radial distance from the component axis to each hole's axis.
    pub center: f64,
    /// Number of holes, spaced at equal angles.
    pub count: u32,
    /// Rotation of the whole pattern, degrees.
    pub offset_angle: f64,
}

impl BulkheadParams {
    pub fn outer_radius(&self) -> f64 {
        self.outer_diameter / 2.0
    }

    /// Total axial extent including the step, when present.
    pub fn total_thickness(&self) -> f64 {
        self.thickness + self.step.map_or(0.0, |s| s.thickness)
    }
}

impl HolePattern {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Hole axis positions as angles in radians.
    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        let start = self.offset_angle.to_radians();
        let step = std::f64::consts::TAU / self.count.max(1) as f64;
        (0..self.count).map(move |i| start + step * i as f64)
    }
}
