use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::{ids, LANDING_EPSILON, LONG_AGO};
use crate::core::body::ActorBody;
use crate::core::config::JumpConfig;
use glam::Vec2;

/// Single jump with coyote time and input buffering.
///
/// Both grace windows are timestamp comparisons against the tick clock, so
/// the ability carries no per-frame countdowns.
pub struct JumpAbility {
    base: AbilityBase,
    cfg: JumpConfig,
    last_grounded_time: f32,
    last_jump_pressed_time: f32,
    is_jumping: bool,
}

impl JumpAbility {
    pub fn new(cfg: JumpConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::JUMP),
            cfg,
            last_grounded_time: LONG_AGO,
            last_jump_pressed_time: LONG_AGO,
            is_jumping: false,
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Jump power after the factors for active shape abilities.
    fn effective_power(&self, ctx: &TickContext<'_>) -> f32 {
        let mut power = self.cfg.jump_power;
        if ctx.active.contains(ids::IRON_BLOCK) {
            power *= self.cfg.iron_block_factor;
        }
        if ctx.active.contains(ids::SHRINK) {
            power *= self.cfg.shrink_factor;
        }
        power
    }
}

impl Ability for JumpAbility {
    fn type_id(&self) -> &'static str {
        ids::JUMP
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

    fn on_deactivated(&mut self, _body: &mut ActorBody) {
        self.last_grounded_time = LONG_AGO;
        self.last_jump_pressed_time = LONG_AGO;
        self.is_jumping = false;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }

        if ctx.body.is_grounded {
            self.last_grounded_time = ctx.time;
        }
        if ctx.input.jump_pressed {
            self.last_jump_pressed_time = ctx.time;
        }

        let within_coyote = ctx.time - self.last_grounded_time <= self.cfg.coyote_time;
        let buffered = ctx.time - self.last_jump_pressed_time <= self.cfg.jump_buffer_time;

        if buffered && within_coyote && !self.is_jumping {
            let power = self.effective_power(ctx);
            ctx.body.add_impulse(Vec2::new(0.0, -power * ctx.body.mass));
            self.is_jumping = true;
            // Consume both windows so one press yields exactly one jump.
            self.last_grounded_time = LONG_AGO;
            self.last_jump_pressed_time = LONG_AGO;
            log::debug!("jump fired with power {}", power);
        }

        if self.is_jumping && ctx.body.is_grounded && ctx.body.velocity().y >= -LANDING_EPSILON {
            self.is_jumping = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abilities::test_support::{airborne_body, grounded_body, TickHarness};

    fn active_jump() -> JumpAbility {
        let mut ability = JumpAbility::new(JumpConfig::default());
        ability.base_mut().enabled = true;
        ability
    }

    #[test]
    fn test_grounded_jump_applies_upward_impulse() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.jump_pressed = true;
        let mut ability = active_jump();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, -400.0);
        assert!(ability.is_jumping());
    }

    #[test]
    fn test_coyote_window_allows_late_jump() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        let mut ability = active_jump();

        // Stand on the ground for one tick, then walk off the ledge.
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        body.is_grounded = false;

        harness.advance(0.05);
        harness.input.jump_pressed = true;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, -400.0);
    }

    #[test]
    fn test_coyote_window_expires() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        let mut ability = active_jump();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        body.is_grounded = false;

        harness.advance(0.2);
        harness.input.jump_pressed = true;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, 0.0);
    }

    #[test]
    fn test_buffered_press_fires_on_landing() {
        let (mut body, _) = airborne_body();
        let mut harness = TickHarness::new(Vec::new());
        let mut ability = active_jump();

        harness.input.jump_pressed = true;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, 0.0);

        // Land within the buffer window.
        harness.input.jump_pressed = false;
        harness.advance(0.05);
        body.is_grounded = true;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, -400.0);
    }

    #[test]
    fn test_one_press_cannot_double_fire() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.jump_pressed = true;
        let mut ability = active_jump();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        let after_first = body.velocity().y;

        // Still grounded next tick (sensing lags the impulse by a frame).
        harness.input.jump_pressed = false;
        harness.advance(1.0 / 60.0);
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, after_first);
    }

    #[test]
    fn test_iron_block_active_weakens_jump() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.jump_pressed = true;
        harness.active.insert(ids::IRON_BLOCK.to_string());
        let mut ability = active_jump();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, -240.0);
    }

    #[test]
    fn test_landing_clears_jump_state() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.jump_pressed = true;
        let mut ability = active_jump();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!(ability.is_jumping());

        harness.input.jump_pressed = false;
        harness.advance(1.0);
        body.set_velocity(0.0, 0.0);
        body.is_grounded = true;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!(!ability.is_jumping());
    }

    #[test]
    fn test_deactivation_resets_windows() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        let mut ability = active_jump();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        ability.on_deactivated(&mut body);

        // A press right after re-enable must not reuse the stale grounded
        // timestamp while airborne.
        body.is_grounded = false;
        harness.input.jump_pressed = true;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, 0.0);
    }
}
