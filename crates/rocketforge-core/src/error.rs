//! Error taxonomy for the shape engine.
//!
//! Two tiers, mirroring the two ways a build request can fail:
//! - [`ValidationError`] — the parameters violate a known geometric
//!   feasibility rule. Caught before any geometry is attempted, and always
//!   attributable to specific fields.
//! - [`ConstructionError`] — the parameters passed validation but the
//!   geometry kernel could not realize them. Reported as a family-level
//!   catch-all since the kernel-internal cause is not always attributable
//!   to one field.
//!
//! All error types use `thiserror`. Display strings are developer-facing;
//! hosts that need locale-stable identifiers should use
//! [`ValidationError::key`] and [`Field::key`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kernel::KernelError;
use crate::params::ComponentFamily;

macro_rules! fields {
    ($($variant:ident => $text:literal, $key:literal;)+) => {
        /// A parameter field referenced by a validation rule.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Field {
            $($variant,)+
        }

        impl Field {
            /// Stable kebab-case identifier, independent of display text.
            pub fn key(&self) -> &'static str {
                match self {
                    $(Field::$variant => $key,)+
                }
            }
        }

        impl std::fmt::Display for Field {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Field::$variant => f.write_str($text),)+
                }
            }
        }
    };
}

fields! {
    Length => "length", "length";
    Diameter => "diameter", "diameter";
    Radius => "radius", "radius";
    Thickness => "thickness", "thickness";
    InnerDiameter => "inner diameter", "inner-diameter";
    OuterDiameter => "outer diameter", "outer-diameter";
    StepDiameter => "step diameter", "step-diameter";
    StepThickness => "step thickness", "step-thickness";
    HoleDiameter => "hole diameter", "hole-diameter";
    HoleCenter => "hole center offset", "hole-center";
    HoleCount => "hole count", "hole-count";
    HoleExtent => "outermost hole edge", "hole-extent";
    HoleInnerEdge => "innermost hole edge", "hole-inner-edge";
    CenterDiameter => "center diameter", "center-diameter";
    CenterRadius => "center radius", "center-radius";
    NotchWidth => "notch width", "notch-width";
    NotchHeight => "notch height", "notch-height";
    NotchDepth => "notch depth", "notch-depth";
    ShoulderLength => "shoulder length", "shoulder-length";
    ShoulderDiameter => "shoulder diameter", "shoulder-diameter";
    ShoulderRadius => "shoulder radius", "shoulder-radius";
    ShoulderThickness => "shoulder thickness", "shoulder-thickness";
    ForeDiameter => "forward diameter", "fore-diameter";
    AftDiameter => "aft diameter", "aft-diameter";
    ForeRadius => "forward radius", "fore-radius";
    AftRadius => "aft radius", "aft-radius";
    CoreDiameter => "core diameter", "core-diameter";
    ForeShoulderLength => "forward shoulder length", "fore-shoulder-length";
    ForeShoulderDiameter => "forward shoulder diameter", "fore-shoulder-diameter";
    ForeShoulderThickness => "forward shoulder thickness", "fore-shoulder-thickness";
    AftShoulderLength => "aft shoulder length", "aft-shoulder-length";
    AftShoulderDiameter => "aft shoulder diameter", "aft-shoulder-diameter";
    AftShoulderThickness => "aft shoulder thickness", "aft-shoulder-thickness";
    RootChord => "root chord", "root-chord";
    TipChord => "tip chord", "tip-chord";
    RootThickness => "root thickness", "root-thickness";
    TipThickness => "tip thickness", "tip-thickness";
    Span => "span", "span";
    SweepAngle => "sweep angle", "sweep-angle";
    ChordPosition => "chord break position", "chord-position";
    TtwOffset => "Ttw offset", "ttw-offset";
    TtwLength => "Ttw length", "ttw-length";
    TtwDepth => "Ttw depth", "ttw-depth";
    TtwThickness => "Ttw thickness", "ttw-thickness";
    TopThickness => "top thickness", "top-thickness";
    BaseThickness => "base thickness", "base-thickness";
    TopAndBaseThickness => "top and base thickness", "top-and-base-thickness";
    TopWidth => "top width", "top-width";
    MiddleWidth => "middle width", "middle-width";
    BaseWidth => "base width", "base-width";
    TotalThickness => "total thickness", "total-thickness";
    ForwardSweepAngle => "forward sweep angle", "forward-sweep-angle";
    AftSweepAngle => "aft sweep angle", "aft-sweep-angle";
    FilletRadius => "fillet radius", "fillet-radius";
    ShankDiameter => "fastener shank diameter", "shank-diameter";
    HeadDiameter => "fastener head diameter", "head-diameter";
    CountersinkAngle => "countersink angle", "countersink-angle";
    Coefficient => "coefficient", "coefficient";
}

/// A parameter set failed a geometric feasibility rule.
///
/// Validation is fail-fast: the first violated rule in the family's fixed
/// rule order is returned and construction is never attempted.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    /// A dimension that must be strictly positive was zero or negative.
    #[error("{family}: {field} must be greater than zero")]
    NotPositive {
        family: ComponentFamily,
        field: Field,
        value: f64,
    },

    /// A dimension must be strictly greater than another.
    #[error("{family}: {field} must be greater than the {bound}")]
    MustExceed {
        family: ComponentFamily,
        field: Field,
        bound: Field,
        value: f64,
        limit: f64,
    },

    /// A dimension must be strictly less than another.
    #[error("{family}: {field} must be less than the {bound}")]
    MustBeLess {
        family: ComponentFamily,
        field: Field,
        bound: Field,
        value: f64,
        limit: f64,
    },

    /// A dimension may equal but not exceed another.
    #[error("{family}: {field} must not exceed the {bound}")]
    MustNotExceed {
        family: ComponentFamily,
        field: Field,
        bound: Field,
        value: f64,
        limit: f64,
    },

    /// An angle fell outside its open interval.
    #[error("{family}: {field} must be between {min} and {max} degrees, exclusive")]
    AngleOutOfRange {
        family: ComponentFamily,
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A count fell below its minimum.
    #[error("{family}: {field} must be at least {min}")]
    CountTooSmall {
        family: ComponentFamily,
        field: Field,
        value: u32,
        min: u32,
    },

    /// A profile-curve shape coefficient fell outside the curve's domain.
    #[error("{curve} profile requires a coefficient {expected} (got {value})")]
    InvalidCoefficient {
        curve: &'static str,
        value: f64,
        /// Human-readable domain, e.g. "in (0, 1]".
        expected: &'static str,
    },

    /// Root and tip cross-sections cannot be lofted against each other.
    #[error("{family}: root cross-section '{root}' cannot be lofted to tip cross-section '{tip}'")]
    IncompatibleSections {
        family: ComponentFamily,
        root: &'static str,
        tip: &'static str,
    },
}

impl ValidationError {
    /// Stable message key for the violated rule, independent of locale
    /// and display text.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationError::NotPositive { .. } => "not-positive",
            ValidationError::MustExceed { .. } => "must-exceed",
            ValidationError::MustBeLess { .. } => "must-be-less",
            ValidationError::MustNotExceed { .. } => "must-not-exceed",
            ValidationError::AngleOutOfRange { .. } => "angle-out-of-range",
            ValidationError::CountTooSmall { .. } => "count-too-small",
            ValidationError::InvalidCoefficient { .. } => "invalid-coefficient",
            ValidationError::IncompatibleSections { .. } => "incompatible-sections",
        }
    }

    /// The primary offending field, when the rule names one.
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::NotPositive { field, .. }
            | ValidationError::MustExceed { field, .. }
            | ValidationError::MustBeLess { field, .. }
            | ValidationError::MustNotExceed { field, .. }
            | ValidationError::AngleOutOfRange { field, .. }
            | ValidationError::CountTooSmall { field, .. } => Some(*field),
            ValidationError::InvalidCoefficient { .. }
            | ValidationError::IncompatibleSections { .. } => None,
        }
    }
}

/// The parameters passed validation but could not be realized as a solid.
#[derive(Error, Debug, Clone)]
pub enum ConstructionError {
    /// Catch-all for kernel failures: self-intersection, degenerate or
    /// zero-volume results, unfittable fillets.
    #[error("{family} parameters produce an invalid shape")]
    InvalidShape {
        family: ComponentFamily,
        #[source]
        source: Option<KernelError>,
    },

    /// A custom fin sketch was empty, disjoint, or not a single closed face.
    #[error("invalid sketch: {reason}")]
    InvalidSketch { reason: String },

    /// A custom fin sketch contained edge types this handler does not support.
    #[error("unsupported sketch geometry: {reason}")]
    UnsupportedGeometry { reason: String },
}

/// Either failure tier, as surfaced to the caller.
#[derive(Error, Debug, Clone)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl BuildError {
    /// True when the failure was caught by the constraint validator.
    pub fn is_validation(&self) -> bool {
        matches!(self, BuildError::Validation(_))
    }

    /// True when the failure came from the kernel or sketch resolution.
    pub fn is_construction(&self) -> bool {
        matches!(self, BuildError::Construction(_))
    }
}

/// Result of one build request: an opaque solid handle or a structured
/// rejection. No partial solid is ever returned.
pub type ShapeResult<S> = std::result::Result<S, BuildError>;
