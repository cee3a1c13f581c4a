//! # RocketForge Engine
//!
//! Parametric shape validation and construction for rocket airframe
//! components. For each family the engine is a pure function from a
//! typed parameter record to either a solid handle or a structured
//! rejection:
//!
//! 1. family-specific constraint validation (fail fast, first rule wins);
//! 2. closed-form profile curve evaluation and 2-D profile construction;
//! 3. kernel-driven solid construction: revolve or loft, boolean feature
//!    cuts and fusions, fillets last.
//!
//! The engine is synchronous and stateless: identical parameters produce
//! geometrically identical solids, and concurrent builds never interfere
//! as long as the kernel handle itself is safe to share.
//!
//! ```
//! use rocketforge_core::params::{BodyTubeParams, ComponentParameters};
//! use rocketforge_engine::{build, SamplingKernel};
//!
//! let kernel = SamplingKernel::default();
//! let params = ComponentParameters::BodyTube(BodyTubeParams {
//!     inner_diameter: 10.0,
//!     outer_diameter: 12.0,
//!     length: 100.0,
//! });
//! let solid = build(&kernel, &params).expect("feasible tube");
//! let bounds = rocketforge_core::kernel::Kernel::bounding_box(&kernel, &solid);
//! assert!((bounds.max.x - 100.0).abs() < 1e-9);
//! ```

pub mod curves;
pub mod handlers;
pub mod kernel;
pub mod profile;
pub mod solid;
pub mod validate;

pub use curves::ProfileCurve;
pub use handlers::build;
pub use kernel::{SampledSolid, SamplingKernel};
pub use solid::Constructor;
pub use validate::validate;
