pub mod components;
pub mod core;
pub mod plugins;

pub use components::*;
pub use crate::core::{Actor, AbilityManager, AbilityRegistry, AbilityTunables, InputSnapshot};
