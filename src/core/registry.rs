use crate::core::ability::{Ability, AbilityId};
use crate::core::body::ActorBody;
use std::collections::HashMap;

/// String-keyed map from ability id to ability instance, owned by the
/// actor.
///
/// Built once at setup time; lookups only thereafter. Insertion order is
/// preserved and defines per-tick execution order, so abilities registered
/// later can read state mutated by earlier ones in the same tick.
#[derive(Default)]
pub struct AbilityRegistry {
    abilities: HashMap<AbilityId, Box<dyn Ability>>,
    order: Vec<AbilityId>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and initialize an ability. An empty type id is rejected;
    /// re-registering an id replaces the instance but keeps its position in
    /// the execution order.
    pub fn register(&mut self, mut ability: Box<dyn Ability>, body: &ActorBody) -> bool {
        let id = ability.type_id().to_string();
        if id.is_empty() {
            log::warn!("refusing to register ability with empty id");
            return false;
        }
        ability.initialize(body);
        if self.abilities.insert(id.clone(), ability).is_none() {
            self.order.push(id);
        }
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.abilities.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Ability> {
        self.abilities.get(id).map(|b| b.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Box<dyn Ability>> {
        self.abilities.get_mut(id)
    }

    /// Ids in registration (execution) order.
    pub fn ordered_ids(&self) -> &[AbilityId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
