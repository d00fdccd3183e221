use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::ids;
use crate::core::body::{ActorBody, CONTACT_CHECK_DISTANCE};
use crate::core::config::MovementConfig;
use crate::core::geometry::{lerp, probe_solid, Aabb};
use glam::Vec2;

/// Speeds below this snap to a dead stop instead of decaying forever.
const STOP_EPSILON: f32 = 0.1;

/// Horizontal run control: walk/run target speed, exponential blend toward
/// it, wall-aware damping, and facing updates.
pub struct MovementAbility {
    base: AbilityBase,
    cfg: MovementConfig,
    is_running: bool,
}

impl MovementAbility {
    pub fn new(cfg: MovementConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::MOVEMENT),
            cfg,
            is_running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Target speed for the current input, scaled by active shape abilities.
    fn target_speed(&self, ctx: &TickContext<'_>) -> f32 {
        let base = if ctx.input.run_held {
            self.cfg.run_speed
        } else {
            self.cfg.walk_speed
        };
        let mut speed = base * ctx.input.horizontal;
        if ctx.active.contains(ids::SHRINK) {
            speed *= self.cfg.shrink_speed_factor;
        }
        if ctx.active.contains(ids::BOUNCY_BALL) {
            speed *= self.cfg.bouncy_speed_factor;
        }
        speed
    }

    /// Three probe points along the leading collider edge so a ledge lip or
    /// a half-height block is still detected.
    fn touching_wall(body: &ActorBody, direction: f32, surfaces: &[Aabb]) -> bool {
        if direction == 0.0 {
            return false;
        }
        let aabb = body.collider_aabb();
        let x = if direction > 0.0 {
            aabb.max().x
        } else {
            aabb.min().x
        };
        let dir = Vec2::new(direction.signum(), 0.0);
        let ys = [aabb.min().y + 1.0, aabb.center().y, aabb.max().y - 1.0];
        ys.iter().any(|&y| {
            probe_solid(Vec2::new(x, y), dir, CONTACT_CHECK_DISTANCE, surfaces)
        })
    }
}

impl Ability for MovementAbility {
    fn type_id(&self) -> &'static str {
        ids::MOVEMENT
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
        self.is_running = false;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }

        let has_input = ctx.input.has_horizontal();
        self.is_running = has_input && ctx.input.run_held;

        let velocity = ctx.body.velocity();
        let new_x = if has_input {
            let mut target = self.target_speed(ctx);
            if Self::touching_wall(ctx.body, ctx.input.horizontal, ctx.surfaces) {
                // Pushing into a wall: grounded motion stops outright,
                // airborne motion keeps a sliver of control so the player
                // can steer away.
                target = if ctx.body.is_grounded {
                    0.0
                } else {
                    target * self.cfg.wall_control_factor
                };
            }
            ctx.body.set_facing(ctx.input.horizontal.signum() as i32);
            lerp(velocity.x, target, self.cfg.accel_rate * ctx.dt)
        } else {
            let rate = if ctx.body.is_grounded {
                self.cfg.ground_decel_rate
            } else {
                self.cfg.air_decel_rate
            };
            let damped = lerp(velocity.x, 0.0, rate * ctx.dt);
            if damped.abs() < STOP_EPSILON {
                0.0
            } else {
                damped
            }
        };
        ctx.body.set_velocity(new_x, velocity.y);
    }
}
