use crate::core::geometry::Aabb;
use crate::core::{Actor, InputSnapshot};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Position component - world coordinates, y grows downward
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Player marker component
#[derive(Component)]
pub struct Player;

/// Static solid level geometry - axis-aligned
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SolidGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SolidGeometry {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// Collectible crystal that grants the named ability on contact
#[derive(Component, Clone, Debug, PartialEq)]
pub struct AbilityCrystal {
    pub ability_id: String,
}

/// Crystal pickup radius box, world units
pub const CRYSTAL_SIZE: f32 = 32.0;

impl AbilityCrystal {
    pub fn new(ability_id: impl Into<String>) -> Self {
        Self {
            ability_id: ability_id.into(),
        }
    }
}

/// Resource holding the player's simulation state - body, registry and
/// manager together
#[derive(Resource)]
pub struct PlayerActor {
    pub actor: Actor,
}

/// Resource with this frame's sampled input, refreshed before the actor
/// ticks
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub snapshot: InputSnapshot,
}

/// Running count of collected crystals
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct CollectedCount {
    pub count: u32,
}
