use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::ids;
use crate::core::body::ActorBody;
use crate::core::config::IceBlockConfig;
use crate::core::geometry::lerp;

/// Horizontal speeds above this count as sliding for animation queries.
const SLIDE_SPEED_THRESHOLD: f32 = 100.0;

/// Slick form: strips most drag and surface friction off the baseline and
/// amplifies grounded horizontal motion toward a multiplied target speed.
pub struct IceBlockAbility {
    base: AbilityBase,
    cfg: IceBlockConfig,
    is_sliding: bool,
}

impl IceBlockAbility {
    pub fn new(cfg: IceBlockConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::ICE_BLOCK),
            cfg,
            is_sliding: false,
        }
    }

    pub fn is_sliding(&self) -> bool {
        self.is_sliding
    }
}

impl Ability for IceBlockAbility {
    fn type_id(&self) -> &'static str {
        ids::ICE_BLOCK
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
        self.is_sliding = false;
        self.reset_physics(body);
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled {
            self.is_sliding = false;
            return;
        }
        self.is_sliding =
            ctx.body.is_grounded && ctx.body.velocity().x.abs() > SLIDE_SPEED_THRESHOLD;
    }

    fn fixed_update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled || !ctx.body.is_grounded {
            return;
        }
        if !ctx.input.has_horizontal() {
            return;
        }
        // Slow blend toward a doubled target: momentum builds and bleeds
        // off gradually, which is what sells the ice feel.
        let target = ctx.input.horizontal * self.cfg.base_speed * self.cfg.slide_speed_multiplier;
        let velocity = ctx.body.velocity();
        let new_x = lerp(velocity.x, target, self.cfg.accel_rate * ctx.dt);
        ctx.body.set_velocity(new_x, velocity.y);
    }

    fn modify_physics(&mut self, body: &mut ActorBody) {
        let keep = 1.0 - self.cfg.friction_reduction;
        let baseline = body.baseline();
        body.linear_drag = baseline.linear_drag * keep;
        body.surface_friction = baseline.surface_friction * keep;
    }

    fn reset_physics(&mut self, body: &mut ActorBody) {
        let baseline = body.baseline();
        body.linear_drag = baseline.linear_drag;
        body.surface_friction = baseline.surface_friction;
    }
}
