use crate::core::ability::{set_enabled, AbilityId, ActiveSet};
use crate::core::body::ActorBody;
use crate::core::registry::AbilityRegistry;

/// Owns the equip/activate policy state on top of an ability registry.
///
/// Equipped slots are a bounded, ordered overlay over the active set:
/// equipping adds the id to the active set and fires its activation hook,
/// unequipping deactivates it once no slot references it anymore. Direct
/// `activate`/`deactivate` bypass the slots for scripted or auto-granted
/// abilities, so the active set may hold ids no slot references.
///
/// Every operation validates its id against the registry at the boundary
/// and reports failure through its return value; nothing here panics.
pub struct AbilityManager {
    max_slots: usize,
    equipped: Vec<Option<AbilityId>>,
    active: ActiveSet,
}

impl AbilityManager {
    pub fn new(max_slots: usize) -> Self {
        Self {
            max_slots,
            equipped: vec![None; max_slots],
            active: ActiveSet::new(),
        }
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn equipped_slots(&self) -> &[Option<AbilityId>] {
        &self.equipped
    }

    pub fn active_ids(&self) -> &ActiveSet {
        &self.active
    }

    /// Clone of the active set, handed to abilities as their per-tick
    /// membership snapshot.
    pub fn active_snapshot(&self) -> ActiveSet {
        self.active.clone()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn is_valid_id(&self, id: &str, registry: &AbilityRegistry) -> bool {
        registry.contains(id)
    }

    /// All registered ids, in execution order.
    pub fn valid_ids(&self, registry: &AbilityRegistry) -> Vec<AbilityId> {
        registry.ordered_ids().to_vec()
    }

    pub fn has_equipped(&self, id: &str) -> bool {
        self.slot_of(id).is_some()
    }

    pub fn slot_of(&self, id: &str) -> Option<usize> {
        self.equipped
            .iter()
            .position(|slot| slot.as_deref() == Some(id))
    }

    /// Equip `id` into `slot_index`.
    ///
    /// Fails without any state change when the slot is out of range or the
    /// id is not registered. An id already held by another slot moves to
    /// the new slot; a different occupant of the target slot is unequipped
    /// first.
    pub fn equip(
        &mut self,
        id: &str,
        slot_index: usize,
        registry: &mut AbilityRegistry,
        body: &mut ActorBody,
    ) -> bool {
        if slot_index >= self.max_slots {
            log::warn!("equip {}: slot {} out of range", id, slot_index);
            return false;
        }
        if !registry.contains(id) {
            log::warn!("equip: unknown ability id {:?}", id);
            return false;
        }
        if self.equipped[slot_index].as_deref() == Some(id) {
            // The slot already holds the id, but a direct deactivate may
            // have removed it from the active set; a successful equip
            // always leaves the id active. The insert guard keeps the
            // hook from re-firing when nothing changed.
            self.activate_internal(id, registry, body);
            return true;
        }

        // One slot per id: leaving the old slot does not deactivate, the
        // id stays referenced by its new slot.
        if let Some(previous) = self.slot_of(id) {
            self.equipped[previous] = None;
        }
        if self.equipped[slot_index].is_some() {
            self.unequip(slot_index, registry, body);
        }

        self.equipped[slot_index] = Some(id.to_string());
        self.activate_internal(id, registry, body);
        true
    }

    /// Clear `slot_index`; deactivates the unequipped id when no other
    /// slot still references it.
    pub fn unequip(
        &mut self,
        slot_index: usize,
        registry: &mut AbilityRegistry,
        body: &mut ActorBody,
    ) -> bool {
        if slot_index >= self.max_slots {
            log::warn!("unequip: slot {} out of range", slot_index);
            return false;
        }
        let Some(id) = self.equipped[slot_index].take() else {
            return true;
        };
        if !self.has_equipped(&id) {
            self.deactivate_internal(&id, registry, body);
        }
        true
    }

    /// Add `id` to the active set independent of any slot.
    pub fn activate(
        &mut self,
        id: &str,
        registry: &mut AbilityRegistry,
        body: &mut ActorBody,
    ) -> bool {
        if !registry.contains(id) {
            log::warn!("activate: unknown ability id {:?}", id);
            return false;
        }
        self.activate_internal(id, registry, body);
        true
    }

    /// Remove `id` from the active set. Slot assignments are left alone;
    /// this is the scripted override path, not the equip path.
    pub fn deactivate(
        &mut self,
        id: &str,
        registry: &mut AbilityRegistry,
        body: &mut ActorBody,
    ) -> bool {
        if !registry.contains(id) {
            log::warn!("deactivate: unknown ability id {:?}", id);
            return false;
        }
        self.deactivate_internal(id, registry, body);
        true
    }

    /// Grant a collected ability: equip into the first free slot, or
    /// replace slot 0 when every slot is taken.
    pub fn pickup(
        &mut self,
        id: &str,
        registry: &mut AbilityRegistry,
        body: &mut ActorBody,
    ) -> bool {
        if !registry.contains(id) {
            log::warn!("pickup: unknown ability id {:?}", id);
            return false;
        }
        let slot = self
            .equipped
            .iter()
            .position(|s| s.is_none())
            .unwrap_or(0);
        self.equip(id, slot, registry, body)
    }

    /// Exchange the contents of two slots. Membership of the active set is
    /// unaffected, both ids stay referenced.
    pub fn swap_slots(&mut self, slot_a: usize, slot_b: usize) -> bool {
        if slot_a >= self.max_slots || slot_b >= self.max_slots {
            log::warn!("swap_slots: slot out of range ({}, {})", slot_a, slot_b);
            return false;
        }
        self.equipped.swap(slot_a, slot_b);
        true
    }

    /// Self-healing consistency pass: drop every equipped or active id the
    /// registry no longer knows, logging each removal. Run after a registry
    /// rebuild or after restoring externally edited lists.
    pub fn validate_and_clean(&mut self, registry: &AbilityRegistry) -> usize {
        let mut removed = 0;

        for slot in self.equipped.iter_mut() {
            if let Some(id) = slot {
                if !registry.contains(id) {
                    log::warn!("validate_and_clean: dropping stale equipped id {:?}", id);
                    *slot = None;
                    removed += 1;
                }
            }
        }

        let stale: Vec<AbilityId> = self
            .active
            .iter()
            .filter(|id| !registry.contains(id))
            .cloned()
            .collect();
        for id in stale {
            log::warn!("validate_and_clean: dropping stale active id {:?}", id);
            self.active.remove(&id);
            removed += 1;
        }

        removed
    }

    /// Reconcile every registered ability's enabled flag with the active
    /// set, firing activation hooks where they disagree. Used after
    /// out-of-band edits to the lists (e.g. loading a save file).
    pub fn sync_callbacks(&self, registry: &mut AbilityRegistry, body: &mut ActorBody) {
        for id in registry.ordered_ids().to_vec() {
            let desired = self.active.contains(&id);
            if let Some(ability) = registry.get_mut(&id) {
                set_enabled(ability.as_mut(), desired, body);
            }
        }
    }

    /// Replace both lists wholesale (restore path). The caller is expected
    /// to follow with `validate_and_clean` and `sync_callbacks`.
    pub fn restore_lists(&mut self, equipped: Vec<Option<AbilityId>>, active: ActiveSet) {
        self.equipped = equipped;
        self.equipped.resize(self.max_slots, None);
        self.active = active;
    }

    fn activate_internal(&mut self, id: &str, registry: &mut AbilityRegistry, body: &mut ActorBody) {
        if self.active.insert(id.to_string()) {
            if let Some(ability) = registry.get_mut(id) {
                set_enabled(ability.as_mut(), true, body);
            }
        }
    }

    fn deactivate_internal(
        &mut self,
        id: &str,
        registry: &mut AbilityRegistry,
        body: &mut ActorBody,
    ) {
        if self.active.remove(id) {
            if let Some(ability) = registry.get_mut(id) {
                set_enabled(ability.as_mut(), false, body);
            }
        }
    }
}
