use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::{ids, LONG_AGO};
use crate::core::body::ActorBody;
use crate::core::config::DashConfig;
use glam::Vec2;

/// Horizontal burst in the facing direction, gated by a cooldown.
///
/// The dash window is a pair of timestamps, not a countdown, so disabling
/// the ability mid-dash can end the window without touching the cooldown.
pub struct DashAbility {
    base: AbilityBase,
    cfg: DashConfig,
    last_dash_time: f32,
    dashing_until: f32,
}

impl DashAbility {
    pub fn new(cfg: DashConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::DASH),
            cfg,
            last_dash_time: LONG_AGO,
            dashing_until: LONG_AGO,
        }
    }

    pub fn is_dashing(&self, time: f32) -> bool {
        time < self.dashing_until
    }

    pub fn cooldown_remaining(&self, time: f32) -> f32 {
        (self.last_dash_time + self.cfg.cooldown - time).max(0.0)
    }
}

impl Ability for DashAbility {
    fn type_id(&self) -> &'static str {
        ids::DASH
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
        // End the dash window; the cooldown timestamp stays so toggling the
        // ability cannot refresh the dash early.
        self.dashing_until = LONG_AGO;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }
        if !ctx.input.dash_pressed {
            return;
        }
        if ctx.time - self.last_dash_time < self.cfg.cooldown {
            log::debug!(
                "dash on cooldown, {:.2}s remaining",
                self.cooldown_remaining(ctx.time)
            );
            return;
        }

        let direction = ctx.body.facing() as f32;
        ctx.body
            .add_impulse(Vec2::new(direction * self.cfg.dash_impulse, 0.0));
        self.last_dash_time = ctx.time;
        self.dashing_until = ctx.time + self.cfg.dash_duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abilities::test_support::{grounded_body, TickHarness};

    fn active_dash() -> DashAbility {
        let mut ability = DashAbility::new(DashConfig::default());
        ability.base_mut().enabled = true;
        ability
    }

    #[test]
    fn test_dash_bursts_in_facing_direction() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.dash_pressed = true;
        body.set_facing(-1);
        let mut ability = active_dash();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().x, -600.0);
        assert!(ability.is_dashing(harness.time));
    }

    #[test]
    fn test_cooldown_blocks_second_dash() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.dash_pressed = true;
        let mut ability = active_dash();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        body.set_velocity(0.0, 0.0);

        harness.advance(0.5);
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().x, 0.0);
        assert!(ability.cooldown_remaining(harness.time) > 0.0);
    }

    #[test]
    fn test_dash_available_after_cooldown() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.dash_pressed = true;
        let mut ability = active_dash();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        body.set_velocity(0.0, 0.0);

        harness.advance(1.1);
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().x, 600.0);
    }

    #[test]
    fn test_dash_window_expires_after_duration() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.dash_pressed = true;
        let mut ability = active_dash();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!(ability.is_dashing(harness.time + 0.1));
        assert!(!ability.is_dashing(harness.time + 0.2));
    }

    #[test]
    fn test_deactivation_ends_dash_but_keeps_cooldown() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.dash_pressed = true;
        let mut ability = active_dash();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        ability.on_deactivated(&mut body);
        assert!(!ability.is_dashing(harness.time));
        assert!(ability.cooldown_remaining(harness.time) > 0.0);
    }

    #[test]
    fn test_heavier_body_dashes_slower() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.dash_pressed = true;
        body.mass = 3.0;
        let mut ability = active_dash();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().x, 200.0);
    }
}
