//! Engine-independent ability composition core.
//!
//! Everything in here is plain data plus pure-ish functions over it: the
//! physics body, the ability trait and its implementations, the registry
//! that owns them, and the manager policy on top. The host layer under
//! `plugins` is the only place that talks to the engine.

pub mod abilities;
pub mod ability;
pub mod actor;
pub mod body;
pub mod config;
pub mod geometry;
pub mod input;
pub mod manager;
pub mod registry;

pub use ability::{Ability, AbilityId, ActiveSet, TickContext};
pub use actor::Actor;
pub use body::{ActorBody, PhysicsBaseline};
pub use config::AbilityTunables;
pub use input::InputSnapshot;
pub use manager::AbilityManager;
pub use registry::AbilityRegistry;
