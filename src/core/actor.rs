use crate::core::ability::TickContext;
use crate::core::abilities::register_default_abilities;
use crate::core::body::ActorBody;
use crate::core::config::AbilityTunables;
use crate::core::geometry::Aabb;
use crate::core::input::InputSnapshot;
use crate::core::manager::AbilityManager;
use crate::core::registry::AbilityRegistry;
use glam::Vec2;

/// Default number of equip slots.
pub const DEFAULT_MAX_SLOTS: usize = 2;

/// One controllable character: a physics body, its ability registry, and
/// the manager policy layered on top.
///
/// The actor is the composition root. Abilities receive it piecewise
/// through the tick context, never as a whole, so none of them can reach
/// around the manager.
pub struct Actor {
    pub body: ActorBody,
    pub registry: AbilityRegistry,
    pub manager: AbilityManager,
    time: f32,
}

impl Actor {
    /// An actor with the full default ability roster registered, nothing
    /// equipped yet.
    pub fn new(position: Vec2, collider_size: Vec2, tunables: &AbilityTunables) -> Self {
        let body = ActorBody::new(position, collider_size);
        let mut registry = AbilityRegistry::new();
        register_default_abilities(&mut registry, &body, tunables);
        Self {
            body,
            registry,
            manager: AbilityManager::new(DEFAULT_MAX_SLOTS),
            time: 0.0,
        }
    }

    /// Monotonic clock driven by `update`, in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn equip(&mut self, id: &str, slot: usize) -> bool {
        self.manager
            .equip(id, slot, &mut self.registry, &mut self.body)
    }

    pub fn unequip(&mut self, slot: usize) -> bool {
        self.manager
            .unequip(slot, &mut self.registry, &mut self.body)
    }

    pub fn activate(&mut self, id: &str) -> bool {
        self.manager.activate(id, &mut self.registry, &mut self.body)
    }

    pub fn deactivate(&mut self, id: &str) -> bool {
        self.manager
            .deactivate(id, &mut self.registry, &mut self.body)
    }

    pub fn pickup(&mut self, id: &str) -> bool {
        self.manager.pickup(id, &mut self.registry, &mut self.body)
    }

    /// Drop stale ids and reconcile enabled flags, in that order. Run after
    /// restoring the manager lists from outside.
    pub fn reconcile(&mut self) -> usize {
        let removed = self.manager.validate_and_clean(&self.registry);
        self.manager
            .sync_callbacks(&mut self.registry, &mut self.body);
        removed
    }

    /// Per-frame tick: advance the clock, refresh contact sensing, then run
    /// every active ability's `update` in registration order.
    pub fn update(&mut self, input: &InputSnapshot, surfaces: &[Aabb], dt: f32) {
        self.time += dt;
        self.body.sense_contacts(surfaces);
        self.drive(input, surfaces, dt, false);
    }

    /// Physics-step tick: active abilities' `fixed_update`, then body
    /// integration against the surfaces.
    pub fn fixed_update(&mut self, input: &InputSnapshot, surfaces: &[Aabb], dt: f32) {
        self.drive(input, surfaces, dt, true);
        self.body.integrate(surfaces, dt);
    }

    fn drive(&mut self, input: &InputSnapshot, surfaces: &[Aabb], dt: f32, fixed: bool) {
        let active = self.manager.active_snapshot();
        let order = self.registry.ordered_ids().to_vec();
        for id in &order {
            if !active.contains(id) {
                continue;
            }
            let Some(ability) = self.registry.get_mut(id) else {
                continue;
            };
            let mut ctx = TickContext {
                body: &mut self.body,
                input,
                active: &active,
                surfaces,
                time: self.time,
                dt,
            };
            if fixed {
                ability.fixed_update(&mut ctx);
            } else {
                ability.update(&mut ctx);
            }
        }
    }
}
