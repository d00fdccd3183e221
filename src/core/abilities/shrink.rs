use crate::core::ability::{Ability, AbilityBase, TickContext};
use crate::core::abilities::ids;
use crate::core::body::ActorBody;
use crate::core::config::ShrinkConfig;
use crate::core::geometry::{lerp, smoothstep};
use glam::Vec2;

/// Scale axes never go below this, keeping the collider well-formed.
const MIN_SCALE: f32 = 0.001;

/// Smooth shrink to a fraction of the baseline size over a fixed duration,
/// driven by an explicit progress accumulator. Deactivation snaps straight
/// to the restored size; only the shrink direction animates.
pub struct ShrinkAbility {
    base: AbilityBase,
    cfg: ShrinkConfig,
    transitioning: bool,
    elapsed: f32,
    start_factor: f32,
    target_factor: f32,
}

impl ShrinkAbility {
    pub fn new(cfg: ShrinkConfig) -> Self {
        Self {
            base: AbilityBase::named(ids::SHRINK),
            cfg,
            transitioning: false,
            elapsed: 0.0,
            start_factor: 1.0,
            target_factor: 1.0,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Current size as a fraction of the baseline, derived from the body.
    fn current_factor(body: &ActorBody) -> f32 {
        let baseline_y = body.baseline().scale.y.abs().max(MIN_SCALE);
        (body.scale.y.abs() / baseline_y).max(MIN_SCALE)
    }

    fn apply_factor(body: &mut ActorBody, factor: f32) {
        let baseline = body.baseline();
        let factor = factor.max(MIN_SCALE);
        body.scale = Vec2::new(
            baseline.scale.x.abs().max(MIN_SCALE) * factor * body.facing() as f32,
            baseline.scale.y.abs().max(MIN_SCALE) * factor,
        );
        body.collider.size = baseline.collider_size * factor;
        body.collider.offset = baseline.collider_offset * factor;
    }
}

impl Ability for ShrinkAbility {
    fn type_id(&self) -> &'static str {
        ids::SHRINK
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
        // Starting from the live scale makes a mid-transition re-activate
        // continue from where it is instead of popping.
        self.start_factor = Self::current_factor(body);
        self.target_factor = self.cfg.shrink_scale;
        self.elapsed = 0.0;
        self.transitioning = true;
    }

    fn on_deactivated(&mut self, body: &mut ActorBody) {
        // Cancellation contract: no grow-back animation, land on the
        // terminal restored state at once.
        self.transitioning = false;
        self.elapsed = 0.0;
        self.start_factor = 1.0;
        self.target_factor = 1.0;
        self.reset_physics(body);
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if !self.base.enabled || !self.transitioning {
            return;
        }

        self.elapsed += ctx.dt;
        let progress = (self.elapsed / self.cfg.transition_duration).clamp(0.0, 1.0);
        let eased = smoothstep(progress);
        let factor = lerp(self.start_factor, self.target_factor, eased);
        Self::apply_factor(ctx.body, factor);

        if progress >= 1.0 {
            self.transitioning = false;
            // Mass changes only once the shrink has fully settled.
            ctx.body.mass = ctx.body.baseline().mass * self.cfg.mass_multiplier;
        }
    }

    fn reset_physics(&mut self, body: &mut ActorBody) {
        let baseline = body.baseline();
        Self::apply_factor(body, 1.0);
        body.mass = baseline.mass;
    }
}
