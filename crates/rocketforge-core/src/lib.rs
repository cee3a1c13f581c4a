//! # RocketForge Core
//!
//! Core types for the parametric airframe shape engine: typed parameter
//! records per component family, the two-tier error taxonomy, 2-D
//! generating-profile geometry, feature specifications, and the narrow
//! geometry-kernel contract the engine drives.
//!
//! This crate holds no geometry algorithms of its own; curve evaluation,
//! validation, and solid construction live in `rocketforge-engine`.

pub mod error;
pub mod features;
pub mod geometry;
pub mod kernel;
pub mod params;

pub use error::{BuildError, ConstructionError, Field, ShapeResult, ValidationError};

pub use features::{Feature, FeatureSpec, ToolShape, ToolSolid};

pub use geometry::{Aabb, GeneratingProfile, Point2, ProfileSegment, Section};

pub use kernel::{EdgeSelect, Kernel, KernelError, KernelResult};

pub use params::{
    BodyTubeParams, BulkheadParams, CenteringRingParams, ChordPositions, ChordSection,
    ComponentFamily, ComponentParameters, CrossSection, Fastener, FinParams, FinProfile,
    GuideNotch, HolePattern, NoseConeParams, NoseShape, Notch, RailButtonParams,
    RailButtonType, RailGuideParams, Shoulder, SketchEdge, SketchProfile, Step, Sweep,
    TransitionParams, TransitionStyle, TtwTab, WallStyle,
};
