use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::{ids, LONG_AGO};
use crate::core::body::ActorBody;
use crate::core::config::BouncyBallConfig;
use crate::core::geometry::{probe_solid, Aabb};
use glam::Vec2;

/// Rubber form: fast wall and ground impacts reflect into a bounce impulse.
/// Slow contacts pass through untouched so the player can still stand and
/// walk.
pub struct BouncyBallAbility {
    base: AbilityBase,
    cfg: BouncyBallConfig,
    last_bounce_time: f32,
    is_bouncing: bool,
}

/// Vertical bounces launch at this fraction of the wall bounce impulse.
const VERTICAL_BOUNCE_FACTOR: f32 = 0.7;

/// Bounce probes reach farther than contact sensing. At bounce-worthy
/// speeds a fixed step covers several pixels, and the collision resolve
/// zeroes the velocity on touch, so the probe must catch the impact a
/// step early or the speed to reflect is already gone.
const BOUNCE_PROBE_DISTANCE: f32 = 10.0;

impl BouncyBallAbility {
    pub fn new(cfg: BouncyBallConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::BOUNCY_BALL),
            cfg,
            last_bounce_time: LONG_AGO,
            is_bouncing: false,
        }
    }

    pub fn is_bouncing(&self) -> bool {
        self.is_bouncing
    }

    fn wall_contact(body: &ActorBody, direction: f32, surfaces: &[Aabb]) -> bool {
        let aabb = body.collider_aabb();
        let x = if direction > 0.0 {
            aabb.max().x
        } else {
            aabb.min().x
        };
        let dir = Vec2::new(direction.signum(), 0.0);
        let ys = [aabb.min().y + 1.0, aabb.center().y, aabb.max().y - 1.0];
        ys.iter().any(|&y| {
            probe_solid(Vec2::new(x, y), dir, BOUNCE_PROBE_DISTANCE, surfaces)
        })
    }

    fn floor_contact(body: &ActorBody, surfaces: &[Aabb]) -> bool {
        let aabb = body.collider_aabb();
        let down = Vec2::new(0.0, 1.0);
        let xs = [aabb.min().x, aabb.center().x, aabb.max().x];
        xs.iter().any(|&x| {
            probe_solid(
                Vec2::new(x, aabb.max().y),
                down,
                BOUNCE_PROBE_DISTANCE,
                surfaces,
            )
        })
    }
}

impl Ability for BouncyBallAbility {
    fn type_id(&self) -> &'static str {
        ids::BOUNCY_BALL
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
        self.is_bouncing = false;
        self.last_bounce_time = LONG_AGO;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }
        if self.is_bouncing && ctx.time - self.last_bounce_time > self.cfg.bounce_cooldown {
            self.is_bouncing = false;
        }
    }

    fn fixed_update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            return;
        }
        if ctx.time - self.last_bounce_time < self.cfg.bounce_cooldown {
            return;
        }

        let velocity = ctx.body.velocity();

        if self.cfg.wall_bounce && velocity.x.abs() > self.cfg.minimum_bounce_speed {
            let direction = velocity.x.signum();
            if Self::wall_contact(ctx.body, direction, ctx.surfaces) {
                ctx.body
                    .set_velocity(-direction * self.cfg.bounce_impulse, velocity.y);
                self.last_bounce_time = ctx.time;
                self.is_bouncing = true;
                log::debug!("wall bounce at speed {:.0}", velocity.x.abs());
                return;
            }
        }

        if self.cfg.ground_bounce
            && !ctx.body.is_grounded
            && velocity.y > self.cfg.minimum_bounce_speed
            && Self::floor_contact(ctx.body, ctx.surfaces)
        {
            ctx.body.set_velocity(
                velocity.x,
                -self.cfg.bounce_impulse * VERTICAL_BOUNCE_FACTOR,
            );
            self.last_bounce_time = ctx.time;
            self.is_bouncing = true;
            log::debug!("ground bounce at speed {:.0}", velocity.y);
        }
    }
}
