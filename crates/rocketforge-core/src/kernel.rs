//! The narrow contract between the engine and a B-rep/CSG geometry
//! kernel.
//!
//! The engine depends only on these primitive operations, not on any
//! particular kernel's object model. Implementations must be usable from
//! `&self` with no per-call mutable state: two concurrent builds against
//! the same kernel handle must not interfere.

use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Aabb, GeneratingProfile, Section};

/// Failure surfaced by a kernel primitive. The engine maps every kernel
/// error to the family-level construction catch-all; the variants exist
/// for diagnostics and for kernel-level tests.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KernelError {
    #[error("profile is not closed")]
    OpenProfile,

    #[error("profile encloses no area")]
    ZeroArea,

    #[error("profile is self-intersecting")]
    SelfIntersecting,

    #[error("loft sections are incompatible: {reason}")]
    IncompatibleSections { reason: String },

    #[error("boolean operation produced an empty solid")]
    EmptyResult,

    #[error("fillet radius {radius} does not fit the selected edge")]
    FilletTooLarge { radius: f64 },

    #[error("degenerate input: {reason}")]
    Degenerate { reason: String },
}

pub type KernelResult<T> = std::result::Result<T, KernelError>;

/// Selects a circular rim edge of a revolved solid for filleting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSelect {
    /// The outermost rim at the maximum-x end of the revolved profile.
    TopOuterRim,
    /// The outermost rim at the minimum-x end of the revolved profile.
    BaseOuterRim,
}

/// Geometry kernel primitives the engine drives.
///
/// Frame conventions: `revolve` spins the profile's XY plane about its X
/// axis through a full turn (y is the radius and must be >= 0 on the
/// profile); `extrude` sweeps the profile's XY plane along +Z by
/// `height`; `loft` skins equal-arity planar sections stacked along +Z
/// at their stations.
pub trait Kernel {
    /// Opaque solid handle. Owned by the caller once returned.
    type Solid: Clone;

    fn revolve(&self, profile: &GeneratingProfile) -> KernelResult<Self::Solid>;

    fn extrude(&self, profile: &GeneratingProfile, height: f64) -> KernelResult<Self::Solid>;

    fn loft(&self, sections: &[Section]) -> KernelResult<Self::Solid>;

    fn fuse(&self, base: &Self::Solid, tool: &Self::Solid) -> KernelResult<Self::Solid>;

    fn cut(&self, base: &Self::Solid, tool: &Self::Solid) -> KernelResult<Self::Solid>;

    fn transform(
        &self,
        solid: &Self::Solid,
        placement: &Isometry3<f64>,
    ) -> KernelResult<Self::Solid>;

    fn fillet(
        &self,
        solid: &Self::Solid,
        edge: EdgeSelect,
        radius: f64,
    ) -> KernelResult<Self::Solid>;

    fn volume(&self, solid: &Self::Solid) -> f64;

    fn bounding_box(&self, solid: &Self::Solid) -> Aabb;

    /// Subtract the tool at each placement in turn. Kernels with a native
    /// pattern primitive may override this.
    fn cut_pattern(
        &self,
        base: &Self::Solid,
        tool: &Self::Solid,
        placements: &[Isometry3<f64>],
    ) -> KernelResult<Self::Solid> {
        let mut current = base.clone();
        for placement in placements {
            let placed = self.transform(tool, placement)?;
            current = self.cut(&current, &placed)?;
        }
        Ok(current)
    }
}
