use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::ids;
use crate::core::body::ActorBody;
use crate::core::config::BalloonConfig;

/// Glide: while the jump input is held in the air, gravity is reduced and
/// fall speed is capped.
pub struct BalloonAbility {
    base: AbilityBase,
    cfg: BalloonConfig,
    is_gliding: bool,
}

impl BalloonAbility {
    pub fn new(cfg: BalloonConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::BALLOON),
            cfg,
            is_gliding: false,
        }
    }

    pub fn is_gliding(&self) -> bool {
        self.is_gliding
    }
}

impl Ability for BalloonAbility {
    fn type_id(&self) -> &'static str {
        ids::BALLOON
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
        self.is_gliding = false;
        self.reset_physics(body);
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }

        let gliding = ctx.input.jump_held && !ctx.body.is_grounded;
        if gliding != self.is_gliding {
            self.is_gliding = gliding;
            if gliding {
                self.modify_physics(ctx.body);
            } else {
                self.reset_physics(ctx.body);
            }
        }

        if self.is_gliding {
            let velocity = ctx.body.velocity();
            if velocity.y > self.cfg.max_fall_speed {
                ctx.body.set_velocity(velocity.x, self.cfg.max_fall_speed);
            }
        }
    }

    fn modify_physics(&mut self, body: &mut ActorBody) {
        // The sign belongs to GravityFlip; only the magnitude is ours.
        let sign = if body.gravity_scale < 0.0 { -1.0 } else { 1.0 };
        body.gravity_scale =
            sign * body.baseline().gravity_scale.abs() * self.cfg.glide_gravity_scale;
    }

    fn reset_physics(&mut self, body: &mut ActorBody) {
        let sign = if body.gravity_scale < 0.0 { -1.0 } else { 1.0 };
        body.gravity_scale = sign * body.baseline().gravity_scale.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::abilities::test_support::{airborne_body, grounded_body, TickHarness};

    fn active_balloon() -> BalloonAbility {
        let mut ability = BalloonAbility::new(BalloonConfig::default());
        ability.base_mut().enabled = true;
        ability
    }

    #[test]
    fn test_glide_starts_when_jump_held_in_air() {
        let (mut body, _) = airborne_body();
        let mut harness = TickHarness::new(Vec::new());
        harness.input.jump_held = true;
        let mut ability = active_balloon();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!(ability.is_gliding());
        assert!((body.gravity_scale - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_no_glide_on_ground() {
        let (mut body, surfaces) = grounded_body();
        let mut harness = TickHarness::new(surfaces);
        harness.input.jump_held = true;
        let mut ability = active_balloon();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!(!ability.is_gliding());
        assert_eq!(body.gravity_scale, 1.0);
    }

    #[test]
    fn test_fall_speed_capped_while_gliding() {
        let (mut body, _) = airborne_body();
        let mut harness = TickHarness::new(Vec::new());
        harness.input.jump_held = true;
        body.set_velocity(0.0, 400.0);
        let mut ability = active_balloon();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.velocity().y, 100.0);
    }

    #[test]
    fn test_releasing_jump_restores_gravity() {
        let (mut body, _) = airborne_body();
        let mut harness = TickHarness::new(Vec::new());
        harness.input.jump_held = true;
        let mut ability = active_balloon();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        harness.input.jump_held = false;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!(!ability.is_gliding());
        assert_eq!(body.gravity_scale, 1.0);
    }

    #[test]
    fn test_glide_composes_with_flipped_gravity() {
        let (mut body, _) = airborne_body();
        body.gravity_scale = -1.0; // flipped by another ability
        let mut harness = TickHarness::new(Vec::new());
        harness.input.jump_held = true;
        let mut ability = active_balloon();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert!((body.gravity_scale - -0.3).abs() < 1e-6);

        harness.input.jump_held = false;
        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        assert_eq!(body.gravity_scale, -1.0);
    }

    #[test]
    fn test_deactivation_mid_glide_restores_gravity() {
        let (mut body, _) = airborne_body();
        let mut harness = TickHarness::new(Vec::new());
        harness.input.jump_held = true;
        let mut ability = active_balloon();

        let mut ctx = harness.ctx(&mut body);
        ability.update(&mut ctx);
        ability.on_deactivated(&mut body);
        assert!(!ability.is_gliding());
        assert_eq!(body.gravity_scale, 1.0);
    }
}
