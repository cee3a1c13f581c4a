//! One build handler per component family.
//!
//! Every handler composes the same pipeline: constraint validation,
//! profile construction, solid construction. The first failure
//! propagates unmodified; no partial solid is ever returned. Handlers
//! hold no state, so concurrent builds against a shareable kernel do not
//! interfere.

use tracing::{debug, info};

use rocketforge_core::error::ShapeResult;
use rocketforge_core::kernel::Kernel;
use rocketforge_core::params::{
    BodyTubeParams, BulkheadParams, CenteringRingParams, ComponentFamily,
    ComponentParameters, FinParams, NoseConeParams, RailButtonParams, RailGuideParams,
    TransitionParams,
};

use crate::profile::{
    body_tube_profile, bulkhead_plan, centering_ring_plan, fin_plan, nose_profile,
    rail_button_plan, rail_guide_plan, transition_profile, BuildPlan, FinPlan,
};
use crate::solid::Constructor;
use crate::validate;

/// Build one component: the single operation the engine exposes.
pub fn build<K: Kernel>(kernel: &K, params: &ComponentParameters) -> ShapeResult<K::Solid> {
    debug!(family = %params.family(), "build requested");
    let result = match params {
        ComponentParameters::BodyTube(p) => body_tube(kernel, p),
        ComponentParameters::Bulkhead(p) => bulkhead(kernel, p),
        ComponentParameters::CenteringRing(p) => centering_ring(kernel, p),
        ComponentParameters::Fin(p) => fin(kernel, p),
        ComponentParameters::NoseCone(p) => nose_cone(kernel, p),
        ComponentParameters::Transition(p) => transition(kernel, p),
        ComponentParameters::RailGuide(p) => rail_guide(kernel, p),
        ComponentParameters::RailButton(p) => rail_button(kernel, p),
    };
    match &result {
        Ok(_) => info!(family = %params.family(), "build complete"),
        Err(e) => info!(family = %params.family(), error = %e, "build rejected"),
    }
    result
}

fn run_plan<K: Kernel>(
    constructor: &Constructor<'_, K>,
    plan: &BuildPlan,
) -> ShapeResult<K::Solid> {
    let base = constructor.tool(&plan.base)?;
    Ok(constructor.apply(base, &plan.features)?)
}

pub fn body_tube<K: Kernel>(kernel: &K, p: &BodyTubeParams) -> ShapeResult<K::Solid> {
    validate::validate_body_tube(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::BodyTube);
    Ok(constructor.revolve(&body_tube_profile(p))?)
}

pub fn bulkhead<K: Kernel>(kernel: &K, p: &BulkheadParams) -> ShapeResult<K::Solid> {
    validate::validate_bulkhead(ComponentFamily::Bulkhead, p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::Bulkhead);
    run_plan(&constructor, &bulkhead_plan(p))
}

pub fn centering_ring<K: Kernel>(
    kernel: &K,
    p: &CenteringRingParams,
) -> ShapeResult<K::Solid> {
    validate::validate_centering_ring(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::CenteringRing);
    run_plan(&constructor, &centering_ring_plan(p))
}

pub fn nose_cone<K: Kernel>(kernel: &K, p: &NoseConeParams) -> ShapeResult<K::Solid> {
    validate::validate_nose_cone(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::NoseCone);
    let profile = nose_profile(p)?;
    Ok(constructor.revolve(&profile)?)
}

pub fn transition<K: Kernel>(kernel: &K, p: &TransitionParams) -> ShapeResult<K::Solid> {
    validate::validate_transition(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::Transition);
    let profile = transition_profile(p)?;
    Ok(constructor.revolve(&profile)?)
}

pub fn fin<K: Kernel>(kernel: &K, p: &FinParams) -> ShapeResult<K::Solid> {
    validate::validate_fin(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::Fin);
    match fin_plan(p)? {
        FinPlan::Loft { sections, features } => {
            let base = constructor.loft(&sections)?;
            Ok(constructor.apply(base, &features)?)
        }
        FinPlan::Extrude {
            profile,
            height,
            features,
        } => {
            let base = constructor.extrude(&profile, height)?;
            Ok(constructor.apply(base, &features)?)
        }
    }
}

pub fn rail_guide<K: Kernel>(kernel: &K, p: &RailGuideParams) -> ShapeResult<K::Solid> {
    validate::validate_rail_guide(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::RailGuide);
    run_plan(&constructor, &rail_guide_plan(p))
}

pub fn rail_button<K: Kernel>(kernel: &K, p: &RailButtonParams) -> ShapeResult<K::Solid> {
    validate::validate_rail_button(p)?;
    let constructor = Constructor::new(kernel, ComponentFamily::RailButton);
    run_plan(&constructor, &rail_button_plan(p))
}
