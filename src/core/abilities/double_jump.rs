use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::{ids, LANDING_EPSILON, LONG_AGO};
use crate::core::body::ActorBody;
use crate::core::config::DoubleJumpConfig;
use crate::core::geometry::lerp;

/// Two-stage jump. The first stage mirrors the single jump's coyote and
/// buffer windows; the second fires anywhere in the air, keeps a fraction
/// of any remaining upward velocity, and grants stronger air control until
/// landing.
pub struct DoubleJumpAbility {
    base: AbilityBase,
    cfg: DoubleJumpConfig,
    jump_count: u8,
    last_grounded_time: f32,
    last_jump_pressed_time: f32,
    last_jump_time: f32,
    has_double_jumped: bool,
}

impl DoubleJumpAbility {
    pub fn new(cfg: DoubleJumpConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::DOUBLE_JUMP),
            cfg,
            jump_count: 0,
            last_grounded_time: LONG_AGO,
            last_jump_pressed_time: LONG_AGO,
            last_jump_time: LONG_AGO,
            has_double_jumped: false,
        }
    }

    pub fn jumps_used(&self) -> u8 {
        self.jump_count
    }

    fn power_factor(&self, ctx: &TickContext<'_>) -> f32 {
        let mut factor = 1.0;
        if ctx.active.contains(ids::IRON_BLOCK) {
            factor *= self.cfg.iron_block_factor;
        }
        if ctx.active.contains(ids::SHRINK) {
            factor *= self.cfg.shrink_factor;
        }
        factor
    }

    fn reset_state(&mut self) {
        self.jump_count = 0;
        self.last_grounded_time = LONG_AGO;
        self.last_jump_pressed_time = LONG_AGO;
        self.last_jump_time = LONG_AGO;
        self.has_double_jumped = false;
    }
}

impl Ability for DoubleJumpAbility {
    fn type_id(&self) -> &'static str {
        ids::DOUBLE_JUMP
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
        self.reset_state();
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }

        let landed = ctx.body.is_grounded && ctx.body.velocity().y >= -LANDING_EPSILON;
        if landed && ctx.time - self.last_jump_time > self.cfg.jump_cooldown {
            self.jump_count = 0;
            self.has_double_jumped = false;
        }
        if ctx.body.is_grounded {
            self.last_grounded_time = ctx.time;
        }
        if ctx.input.jump_pressed {
            self.last_jump_pressed_time = ctx.time;
        }

        let buffered = ctx.time - self.last_jump_pressed_time <= self.cfg.jump_buffer_time;
        let off_cooldown = ctx.time - self.last_jump_time >= self.cfg.jump_cooldown;
        if !buffered || !off_cooldown {
            return;
        }

        let within_coyote = ctx.time - self.last_grounded_time <= self.cfg.coyote_time;
        let factor = self.power_factor(ctx);
        let velocity = ctx.body.velocity();

        if self.jump_count == 0 && within_coyote {
            ctx.body
                .set_velocity(velocity.x, -self.cfg.first_jump_power * factor);
            self.jump_count = 1;
            self.last_jump_time = ctx.time;
            self.last_grounded_time = LONG_AGO;
            self.last_jump_pressed_time = LONG_AGO;
        } else if self.jump_count == 1 && !ctx.body.is_grounded {
            // Keep a fraction of remaining upward speed so chaining jumps
            // near the apex feels snappier than at the fall's bottom.
            let kept = (velocity.y * self.cfg.keep_upward_fraction).min(0.0);
            ctx.body
                .set_velocity(velocity.x, kept - self.cfg.second_jump_power * factor);
            self.jump_count = 2;
            self.has_double_jumped = true;
            self.last_jump_time = ctx.time;
            self.last_jump_pressed_time = LONG_AGO;
            log::debug!("double jump fired");
        }
    }

    fn fixed_update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled || !self.has_double_jumped || ctx.body.is_grounded {
            return;
        }
        if !ctx.input.has_horizontal() {
            return;
        }
        // Stronger steering after the second jump, until touchdown.
        let target =
            ctx.input.horizontal * self.cfg.air_move_speed * self.cfg.air_control_multiplier;
        let velocity = ctx.body.velocity();
        let new_x = lerp(velocity.x, target, self.cfg.air_control_rate * ctx.dt);
        ctx.body.set_velocity(new_x, velocity.y);
    }
}
