//! Secondary operations applied after the base solid is formed.
//!
//! Handlers plan features as fully placed tool solids; the constructor
//! interprets them against the kernel in a fixed order: cuts and fusions
//! in declared order first, fillets always last. Fillets on un-cut edges
//! would be invalidated by later booleans, so the ordering is a
//! construction invariant, not a preference.

use nalgebra::Isometry3;

use crate::geometry::GeneratingProfile;
use crate::kernel::EdgeSelect;

/// Shape of a feature tool, in the tool's local frame.
#[derive(Debug, Clone)]
pub enum ToolShape {
    /// Revolved about the local X axis, full turn.
    Revolved(GeneratingProfile),
    /// Extruded from the local XY plane along +Z.
    Extruded { profile: GeneratingProfile, height: f64 },
}

/// A tool solid with its placement in the component frame.
#[derive(Debug, Clone)]
pub struct ToolSolid {
    pub shape: ToolShape,
    pub placement: Isometry3<f64>,
}

impl ToolSolid {
    pub fn revolved(profile: GeneratingProfile) -> Self {
        Self {
            shape: ToolShape::Revolved(profile),
            placement: Isometry3::identity(),
        }
    }

    pub fn extruded(profile: GeneratingProfile, height: f64) -> Self {
        Self {
            shape: ToolShape::Extruded { profile, height },
            placement: Isometry3::identity(),
        }
    }

    pub fn placed(mut self, placement: Isometry3<f64>) -> Self {
        self.placement = placement;
        self
    }
}

/// One secondary operation.
#[derive(Debug, Clone)]
pub enum Feature {
    /// Boolean subtraction of the tool.
    Cut(ToolSolid),
    /// Boolean union of the tool (e.g. a through-the-wall fin tab).
    Fuse(ToolSolid),
    /// The same tool subtracted at several placements (hole patterns).
    CutPattern {
        tool: ToolSolid,
        placements: Vec<Isometry3<f64>>,
    },
    /// Edge rounding; always applied after every boolean.
    Fillet { edge: EdgeSelect, radius: f64 },
}

impl Feature {
    fn is_fillet(&self) -> bool {
        matches!(self, Feature::Fillet { .. })
    }
}

/// The declared list of secondary operations for one build.
#[derive(Debug, Clone, Default)]
pub struct FeatureSpec {
    features: Vec<Feature>,
}

impl FeatureSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Features in application order: booleans in declared order, then
    /// fillets in declared order.
    pub fn ordered(&self) -> impl Iterator<Item = &Feature> {
        let booleans = self.features.iter().filter(|f| !f.is_fillet());
        let fillets = self.features.iter().filter(|f| f.is_fillet());
        booleans.chain(fillets)
    }
}
