use crate::components::{AbilityCrystal, PlayerActor, Position, SolidGeometry};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Level file loaded at startup.
pub const DEFAULT_LEVEL_PATH: &str = "assets/levels/level_01.json";

/// Level data structure matching JSON format
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub spawn_point: SpawnPoint,
    pub geometry: Vec<GeometryData>,
    #[serde(default)]
    pub crystals: Vec<CrystalData>,
}

/// Spawn point data
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

/// Geometry data for level collision
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometryData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Crystal placement data; `ability` names a registered ability id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrystalData {
    pub ability: String,
    pub x: f32,
    pub y: f32,
}

/// Level loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum LevelLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::FileNotFound(path) => write!(f, "Level file not found: {}", path),
            LevelLoadError::IoError(path, err) => {
                write!(f, "IO error reading level file {}: {}", path, err)
            }
            LevelLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse level file {}: {}", path, err)
            }
            LevelLoadError::ValidationError(msg) => write!(f, "Level validation error: {}", msg),
        }
    }
}

impl std::error::Error for LevelLoadError {}

/// Load and validate a level from a JSON file.
pub fn load_level_from_file(path: &str) -> Result<LevelData, LevelLoadError> {
    if !Path::new(path).exists() {
        return Err(LevelLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| LevelLoadError::IoError(path.to_string(), e.to_string()))?;

    let level: LevelData = serde_json::from_str(&contents)
        .map_err(|e| LevelLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_level(&level)?;

    Ok(level)
}

/// Reject levels the simulation cannot run in.
pub fn validate_level(level: &LevelData) -> Result<(), LevelLoadError> {
    if level.id.is_empty() {
        return Err(LevelLoadError::ValidationError(
            "Level id must not be empty".to_string(),
        ));
    }
    if level.width <= 0.0 || level.height <= 0.0 {
        return Err(LevelLoadError::ValidationError(format!(
            "Level dimensions must be positive, got {}x{}",
            level.width, level.height
        )));
    }
    for (index, solid) in level.geometry.iter().enumerate() {
        if solid.width <= 0.0 || solid.height <= 0.0 {
            return Err(LevelLoadError::ValidationError(format!(
                "Geometry entry {} has non-positive size",
                index
            )));
        }
    }
    for crystal in &level.crystals {
        if crystal.ability.is_empty() {
            return Err(LevelLoadError::ValidationError(
                "Crystal with empty ability id".to_string(),
            ));
        }
    }
    Ok(())
}

/// Resource storing the id of the currently loaded level
#[derive(Resource, Clone, Debug, Default)]
pub struct CurrentLevel {
    pub id: String,
}

/// Plugin for loading and spawning level content
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentLevel>().add_systems(
            Startup,
            // The player actor must exist before the level can move it to
            // the spawn point.
            load_level_system.after(crate::plugins::player::spawn_player_system),
        );
    }
}

fn load_level_system(
    mut commands: Commands,
    mut current: ResMut<CurrentLevel>,
    player: Option<ResMut<PlayerActor>>,
) {
    let level = match load_level_from_file(DEFAULT_LEVEL_PATH) {
        Ok(level) => level,
        Err(err) => {
            warn!("no level loaded: {}", err);
            return;
        }
    };
    info!("loaded level {}", level.id);
    current.id = level.id.clone();
    if let Some(mut player) = player {
        player.actor.body.position = Vec2::new(level.spawn_point.x, level.spawn_point.y);
    }
    spawn_level(&mut commands, &level);
}

/// Spawn the level's solids and crystals as entities.
pub fn spawn_level(commands: &mut Commands, level: &LevelData) {
    for solid in &level.geometry {
        commands.spawn(SolidGeometry {
            x: solid.x,
            y: solid.y,
            width: solid.width,
            height: solid.height,
        });
    }
    for crystal in &level.crystals {
        commands.spawn((
            AbilityCrystal::new(crystal.ability.clone()),
            Position::new(crystal.x, crystal.y),
        ));
    }
}
