use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::{ids, LONG_AGO};
use crate::core::body::ActorBody;
use crate::core::config::GravityFlipConfig;

/// Inverts gravity on demand, with a cooldown between flips. Deactivation
/// restores normal gravity immediately, bypassing the cooldown.
pub struct GravityFlipAbility {
    base: AbilityBase,
    cfg: GravityFlipConfig,
    last_flip_time: f32,
    is_flipped: bool,
}

impl GravityFlipAbility {
    pub fn new(cfg: GravityFlipConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::GRAVITY_FLIP),
            cfg,
            last_flip_time: LONG_AGO,
            is_flipped: false,
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    fn apply_flip_state(&self, body: &mut ActorBody) {
        let magnitude = body.baseline().gravity_scale.abs();
        body.gravity_scale = if self.is_flipped {
            -magnitude
        } else {
            magnitude
        };
    }
}

impl Ability for GravityFlipAbility {
    fn type_id(&self) -> &'static str {
        ids::GRAVITY_FLIP
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

    fn on_deactivated(&mut self, body: &mut ActorBody) {
        if self.is_flipped {
            self.is_flipped = false;
            self.apply_flip_state(body);
        }
        self.last_flip_time = LONG_AGO;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }
        if !ctx.input.flip_pressed {
            return;
        }
        if ctx.time - self.last_flip_time < self.cfg.flip_cooldown {
            return;
        }
        self.is_flipped = !self.is_flipped;
        self.last_flip_time = ctx.time;
        self.apply_flip_state(ctx.body);
        log::debug!("gravity flipped: {}", self.is_flipped);
    }

    fn reset_physics(&mut self, body: &mut ActorBody) {
        self.is_flipped = false;
        self.apply_flip_state(body);
    }
}
