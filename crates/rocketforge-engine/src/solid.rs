//! Drives kernel primitives in construction order and maps every kernel
//! failure to the family-level catch-all.
//!
//! Order is fixed: base solid first, then booleans as declared, fillets
//! last. The ordering comes from [`FeatureSpec::ordered`]; this stage
//! only interprets it against the kernel.

use tracing::debug;

use rocketforge_core::error::ConstructionError;
use rocketforge_core::features::{Feature, FeatureSpec, ToolShape, ToolSolid};
use rocketforge_core::geometry::{GeneratingProfile, Section};
use rocketforge_core::kernel::{Kernel, KernelResult};
use rocketforge_core::params::ComponentFamily;

/// One family's view of the kernel for the duration of a build request.
pub struct Constructor<'k, K: Kernel> {
    kernel: &'k K,
    family: ComponentFamily,
}

impl<'k, K: Kernel> Constructor<'k, K> {
    pub fn new(kernel: &'k K, family: ComponentFamily) -> Self {
        Self { kernel, family }
    }

    fn realize(&self, result: KernelResult<K::Solid>) -> Result<K::Solid, ConstructionError> {
        result.map_err(|source| {
            debug!(family = %self.family, error = %source, "kernel rejected the shape");
            ConstructionError::InvalidShape {
                family: self.family,
                source: Some(source),
            }
        })
    }

    pub fn revolve(&self, profile: &GeneratingProfile) -> Result<K::Solid, ConstructionError> {
        self.realize(self.kernel.revolve(profile))
    }

    pub fn extrude(
        &self,
        profile: &GeneratingProfile,
        height: f64,
    ) -> Result<K::Solid, ConstructionError> {
        self.realize(self.kernel.extrude(profile, height))
    }

    pub fn loft(&self, sections: &[Section]) -> Result<K::Solid, ConstructionError> {
        self.realize(self.kernel.loft(sections))
    }

    /// Realize a tool in its declared placement.
    pub fn tool(&self, tool: &ToolSolid) -> Result<K::Solid, ConstructionError> {
        let solid = match &tool.shape {
            ToolShape::Revolved(profile) => self.realize(self.kernel.revolve(profile))?,
            ToolShape::Extruded { profile, height } => {
                self.realize(self.kernel.extrude(profile, *height))?
            }
        };
        self.realize(self.kernel.transform(&solid, &tool.placement))
    }

    /// Apply the declared features to the base solid, booleans first,
    /// fillets last.
    pub fn apply(
        &self,
        base: K::Solid,
        features: &FeatureSpec,
    ) -> Result<K::Solid, ConstructionError> {
        let mut current = base;
        for feature in features.ordered() {
            current = match feature {
                Feature::Cut(tool) => {
                    let tool = self.tool(tool)?;
                    self.realize(self.kernel.cut(&current, &tool))?
                }
                Feature::Fuse(tool) => {
                    let tool = self.tool(tool)?;
                    self.realize(self.kernel.fuse(&current, &tool))?
                }
                Feature::CutPattern { tool, placements } => {
                    let tool = self.tool(tool)?;
                    self.realize(self.kernel.cut_pattern(&current, &tool, placements))?
                }
                Feature::Fillet { edge, radius } => {
                    self.realize(self.kernel.fillet(&current, *edge, *radius))?
                }
            };
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Isometry3, Point3};
    use rocketforge_core::geometry::Aabb;
    use rocketforge_core::kernel::{EdgeSelect, KernelError};

    /// A kernel whose every primitive fails, for error-path coverage.
    struct RefusingKernel;

    impl Kernel for RefusingKernel {
        type Solid = ();

        fn revolve(&self, _: &GeneratingProfile) -> KernelResult<()> {
            Err(KernelError::ZeroArea)
        }
        fn extrude(&self, _: &GeneratingProfile, _: f64) -> KernelResult<()> {
            Err(KernelError::ZeroArea)
        }
        fn loft(&self, _: &[Section]) -> KernelResult<()> {
            Err(KernelError::Degenerate {
                reason: "refused".into(),
            })
        }
        fn fuse(&self, _: &(), _: &()) -> KernelResult<()> {
            Err(KernelError::EmptyResult)
        }
        fn cut(&self, _: &(), _: &()) -> KernelResult<()> {
            Err(KernelError::EmptyResult)
        }
        fn transform(&self, _: &(), _: &Isometry3<f64>) -> KernelResult<()> {
            Ok(())
        }
        fn fillet(&self, _: &(), _: EdgeSelect, radius: f64) -> KernelResult<()> {
            Err(KernelError::FilletTooLarge { radius })
        }
        fn volume(&self, _: &()) -> f64 {
            0.0
        }
        fn bounding_box(&self, _: &()) -> Aabb {
            Aabb::new(Point3::origin(), Point3::origin())
        }
    }

    #[test]
    fn kernel_failures_become_the_family_catch_all() {
        let constructor = Constructor::new(&RefusingKernel, ComponentFamily::Fin);
        let err = constructor
            .loft(&[])
            .expect_err("refusing kernel must fail");
        assert_eq!(err.to_string(), "Fin parameters produce an invalid shape");
    }

    #[test]
    fn fillet_failure_carries_the_kernel_source() {
        let constructor = Constructor::new(&RefusingKernel, ComponentFamily::RailButton);
        let mut features = FeatureSpec::new();
        features.push(Feature::Fillet {
            edge: EdgeSelect::TopOuterRim,
            radius: 2.0,
        });
        let err = constructor.apply((), &features).expect_err("must fail");
        match err {
            ConstructionError::InvalidShape { source, .. } => {
                assert_eq!(source, Some(KernelError::FilletTooLarge { radius: 2.0 }));
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
