use crate::core::ability::{Ability, AbilityBase};
use crate::core::abilities::ids;
use crate::core::body::ActorBody;
use crate::core::config::IronBlockConfig;

/// Heavy form: multiplies mass off the baseline while enabled. Weight
/// interactions like sinking and pressure plates key off the enabled flag.
pub struct IronBlockAbility {
    base: AbilityBase,
    cfg: IronBlockConfig,
}

impl IronBlockAbility {
    pub fn new(cfg: IronBlockConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::IRON_BLOCK),
            cfg,
        }
    }

    pub fn can_sink_in_water(&self) -> bool {
        self.base.enabled
    }

    pub fn can_trigger_pressure_plates(&self) -> bool {
        self.base.enabled
    }
}

impl Ability for IronBlockAbility {
    fn type_id(&self) -> &'static str {
        ids::IRON_BLOCK
    }

    fn base(&self) -> &AbilityBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AbilityBase {
        &mut self.base
    }

    fn initialize(&mut self, _body: &ActorBody) {
        if self.base.initialized {
            return;
        }
        self.base.initialized = true;
    }

    fn on_activated(&mut self, body: &mut ActorBody) {
        self.modify_physics(body);
    }

    fn on_deactivated(&mut self, body: &mut ActorBody) {
        self.reset_physics(body);
    }

    fn modify_physics(&mut self, body: &mut ActorBody) {
        let baseline = body.baseline();
        // The sign belongs to GravityFlip; only the magnitude is ours.
        let sign = if body.gravity_scale < 0.0 { -1.0 } else { 1.0 };
        body.mass = baseline.mass * self.cfg.mass_multiplier;
        body.gravity_scale = sign * baseline.gravity_scale.abs() * self.cfg.gravity_multiplier;
    }

    fn reset_physics(&mut self, body: &mut ActorBody) {
        let baseline = body.baseline();
        let sign = if body.gravity_scale < 0.0 { -1.0 } else { 1.0 };
        body.mass = baseline.mass;
        body.gravity_scale = sign * baseline.gravity_scale.abs();
    }
}
