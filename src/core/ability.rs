use crate::core::body::ActorBody;
use crate::core::geometry::Aabb;
use crate::core::input::InputSnapshot;
use std::collections::HashSet;

/// Stable string token identifying one ability type.
pub type AbilityId = String;

/// Snapshot of the ids currently applying their effects.
pub type ActiveSet = HashSet<AbilityId>;

/// Everything an ability may touch during one tick.
///
/// Abilities never hold a reference back to the actor; the context is
/// injected on every call, which keeps them plain data between ticks.
pub struct TickContext<'a> {
    pub body: &'a mut ActorBody,
    pub input: &'a InputSnapshot,
    /// Membership snapshot for cross-ability coupling (e.g. Jump reads
    /// whether IronBlock is active).
    pub active: &'a ActiveSet,
    pub surfaces: &'a [Aabb],
    /// Monotonic clock in seconds, sampled once per tick.
    pub time: f32,
    pub dt: f32,
}

/// State shared by every ability implementation.
#[derive(Clone, Debug, Default)]
pub struct AbilityBase {
    pub name: String,
    pub enabled: bool,
    pub initialized: bool,
}

impl AbilityBase {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: false,
            initialized: false,
        }
    }
}

/// A named, independently enable/disable-able unit of per-tick behavior.
///
/// Lifecycle: constructed once, `initialize`d when registered, then driven
/// by `update` every tick and `fixed_update` every physics step while it is
/// a member of the active set. Activation hooks fire exactly once per
/// transition; `set_enabled` is the only place that toggles the flag.
///
/// `Send + Sync` so a boxed ability can live inside host-engine state.
pub trait Ability: Send + Sync {
    /// The registry key. Unique across ability types.
    fn type_id(&self) -> &'static str;

    fn base(&self) -> &AbilityBase;

    fn base_mut(&mut self) -> &mut AbilityBase;

    /// Bind-time setup. Implementations must guard on `base().initialized`
    /// so a repeated call cannot stack side effects.
    fn initialize(&mut self, _body: &ActorBody) {}

    /// Fired once when the ability transitions to enabled.
    fn on_activated(&mut self, _body: &mut ActorBody) {}

    /// Fired once when the ability transitions to disabled. Must leave no
    /// effect half-applied: transient state is forced to its terminal
    /// value here.
    fn on_deactivated(&mut self, _body: &mut ActorBody) {}

    /// Per-tick behavior. Must early-return when disabled.
    fn update(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Per-physics-step behavior, reserved for forces and impulses.
    fn fixed_update(&mut self, _ctx: &mut TickContext<'_>) {}

    /// Apply this ability's physical-property overrides, computed from the
    /// body baseline and this ability's multipliers.
    fn modify_physics(&mut self, _body: &mut ActorBody) {}

    /// Undo the overrides. Calling this when nothing was modified is a
    /// no-op.
    fn reset_physics(&mut self, _body: &mut ActorBody) {}

    fn display_name(&self) -> &str {
        &self.base().name
    }

    fn is_enabled(&self) -> bool {
        self.base().enabled
    }
}

/// Enable/disable setter: fires the activation hooks only on an actual
/// value change, so callers may set the same state repeatedly without
/// re-triggering side effects.
pub fn set_enabled(ability: &mut dyn Ability, enabled: bool, body: &mut ActorBody) {
    if ability.base().enabled == enabled {
        return;
    }
    ability.base_mut().enabled = enabled;
    if enabled {
        log::debug!("ability {} activated", ability.type_id());
        ability.on_activated(body);
    } else {
        log::debug!("ability {} deactivated", ability.type_id());
        ability.on_deactivated(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Default)]
    struct CountingAbility {
        base: AbilityBase,
        activations: usize,
        deactivations: usize,
    }

    impl Ability for CountingAbility {
        fn type_id(&self) -> &'static str {
            "Counting"
        }
        fn base(&self) -> &AbilityBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut AbilityBase {
            &mut self.base
        }
        fn on_activated(&mut self, _body: &mut ActorBody) {
            self.activations += 1;
        }
        fn on_deactivated(&mut self, _body: &mut ActorBody) {
            self.deactivations += 1;
        }
    }

    fn test_body() -> ActorBody {
        ActorBody::new(Vec2::ZERO, Vec2::new(32.0, 64.0))
    }

    #[test]
    fn test_hooks_fire_only_on_transition() {
        let mut body = test_body();
        let mut ability = CountingAbility::default();

        set_enabled(&mut ability, true, &mut body);
        set_enabled(&mut ability, true, &mut body);
        set_enabled(&mut ability, false, &mut body);
        set_enabled(&mut ability, false, &mut body);

        assert_eq!(ability.activations, 1);
        assert_eq!(ability.deactivations, 1);
    }

    #[test]
    fn test_enabled_flag_tracks_setter() {
        let mut body = test_body();
        let mut ability = CountingAbility::default();
        assert!(!ability.is_enabled());
        set_enabled(&mut ability, true, &mut body);
        assert!(ability.is_enabled());
        set_enabled(&mut ability, false, &mut body);
        assert!(!ability.is_enabled());
    }
}
