//! Typed parameter records, one variant per component family.
//!
//! A [`ComponentParameters`] value is created by the host per build
//! request, validated, consumed by profile and solid construction, and
//! discarded once the result is produced. The engine never mutates it and
//! retains nothing across requests.

mod body_tube;
mod bulkhead;
mod centering_ring;
mod fin;
mod nose_cone;
mod rail_button;
mod rail_guide;
mod transition;

pub use body_tube::BodyTubeParams;
pub use bulkhead::{BulkheadParams, HolePattern, Step};
pub use centering_ring::{CenteringRingParams, Notch};
pub use fin::{
    ChordPositions, ChordSection, CrossSection, FinParams, FinProfile, SketchEdge,
    SketchProfile, Sweep, TtwTab,
};
pub use nose_cone::{NoseConeParams, NoseShape, Shoulder, WallStyle};
pub use rail_button::{Fastener, RailButtonParams, RailButtonType};
pub use rail_guide::{GuideNotch, RailGuideParams};
pub use transition::{TransitionParams, TransitionStyle};

use serde::{Deserialize, Serialize};

/// Fieldless tag identifying a component family, used in error reporting
/// and dispatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentFamily {
    BodyTube,
    Bulkhead,
    CenteringRing,
    Fin,
    NoseCone,
    Transition,
    RailGuide,
    RailButton,
}

impl std::fmt::Display for ComponentFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComponentFamily::BodyTube => "Body tube",
            ComponentFamily::Bulkhead => "Bulkhead",
            ComponentFamily::CenteringRing => "Centering ring",
            ComponentFamily::Fin => "Fin",
            ComponentFamily::NoseCone => "Nose cone",
            ComponentFamily::Transition => "Transition",
            ComponentFamily::RailGuide => "Rail guide",
            ComponentFamily::RailButton => "Rail button",
        };
        f.write_str(name)
    }
}

/// Tagged parameter record for one build request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentParameters {
    BodyTube(BodyTubeParams),
    Bulkhead(BulkheadParams),
    CenteringRing(CenteringRingParams),
    Fin(FinParams),
    NoseCone(NoseConeParams),
    Transition(TransitionParams),
    RailGuide(RailGuideParams),
    RailButton(RailButtonParams),
}

impl ComponentParameters {
    pub fn family(&self) -> ComponentFamily {
        match self {
            ComponentParameters::BodyTube(_) => ComponentFamily::BodyTube,
            ComponentParameters::Bulkhead(_) => ComponentFamily::Bulkhead,
            ComponentParameters::CenteringRing(_) => ComponentFamily::CenteringRing,
            ComponentParameters::Fin(_) => ComponentFamily::Fin,
            ComponentParameters::NoseCone(_) => ComponentFamily::NoseCone,
            ComponentParameters::Transition(_) => ComponentFamily::Transition,
            ComponentParameters::RailGuide(_) => ComponentFamily::RailGuide,
            ComponentParameters::RailButton(_) => ComponentFamily::RailButton,
        }
    }
}
