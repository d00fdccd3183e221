use crate::components::{CollectedCount, PlayerActor, Position};
use crate::plugins::level::CurrentLevel;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Game progress that can be saved and loaded
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub level_id: String,
    pub position: Position,
    pub equipped: Vec<Option<String>>,
    pub active: Vec<String>,
    pub collected_count: u32,
    pub timestamp: u64,
}

impl GameState {
    pub fn new(
        level_id: String,
        position: Position,
        equipped: Vec<Option<String>>,
        active: Vec<String>,
        collected_count: u32,
    ) -> Self {
        Self {
            level_id,
            position,
            equipped,
            active,
            collected_count,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Resource to store the save file path
#[derive(Resource, Clone, Debug)]
pub struct SaveFilePath {
    pub path: PathBuf,
}

impl Default for SaveFilePath {
    fn default() -> Self {
        Self {
            path: PathBuf::from("save_data.json"),
        }
    }
}

/// Event triggered when requesting to save to disk
#[derive(Event)]
pub struct SaveToDisk;

/// Event triggered when requesting to load from disk
#[derive(Event)]
pub struct LoadFromDisk;

/// Plugin for saving and restoring ability progress
pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveFilePath>()
            .add_event::<SaveToDisk>()
            .add_event::<LoadFromDisk>()
            .add_systems(Update, (save_to_disk_system, load_from_disk_system));
    }
}

/// Snapshot the manager lists plus position and write them as JSON.
fn save_to_disk_system(
    mut save_events: EventReader<SaveToDisk>,
    player: Option<Res<PlayerActor>>,
    current_level: Option<Res<CurrentLevel>>,
    collected: Option<Res<CollectedCount>>,
    save_path: Res<SaveFilePath>,
) {
    for _ in save_events.read() {
        let Some(ref player) = player else {
            warn!("no player actor to save");
            continue;
        };

        let state = snapshot_state(
            player,
            current_level.as_deref().map(|l| l.id.as_str()).unwrap_or(""),
            collected.as_deref().map(|c| c.count).unwrap_or(0),
        );

        match serde_json::to_string_pretty(&state) {
            Ok(json) => match fs::write(&save_path.path, json) {
                Ok(_) => info!("progress saved to {:?}", save_path.path),
                Err(e) => error!("failed to write save file: {}", e),
            },
            Err(e) => error!("failed to serialize progress: {}", e),
        }
    }
}

/// Read the save file and restore the manager lists through the
/// validate-then-sync path, so stale ids are dropped and every ability's
/// enabled flag matches the restored active set.
fn load_from_disk_system(
    mut load_events: EventReader<LoadFromDisk>,
    player: Option<ResMut<PlayerActor>>,
    collected: Option<ResMut<CollectedCount>>,
    save_path: Res<SaveFilePath>,
) {
    if load_events.read().next().is_none() {
        return;
    }
    if !save_path.path.exists() {
        info!("no save file found, starting fresh");
        return;
    }

    let json = match fs::read_to_string(&save_path.path) {
        Ok(json) => json,
        Err(e) => {
            error!("failed to read save file: {}", e);
            return;
        }
    };
    let state: GameState = match serde_json::from_str(&json) {
        Ok(state) => state,
        Err(e) => {
            error!("save file corrupted, starting fresh: {}", e);
            return;
        }
    };

    let Some(mut player) = player else {
        warn!("no player actor to restore into");
        return;
    };
    apply_state(&mut player, &state);
    if let Some(mut collected) = collected {
        collected.count = state.collected_count;
    }
    info!("progress loaded from {:?}", save_path.path);
}

/// Capture the current progress as a serializable state.
pub fn snapshot_state(player: &PlayerActor, level_id: &str, collected: u32) -> GameState {
    GameState::new(
        level_id.to_string(),
        Position::new(player.actor.body.position.x, player.actor.body.position.y),
        player.actor.manager.equipped_slots().to_vec(),
        player.actor.manager.active_ids().iter().cloned().collect(),
        collected,
    )
}

/// Apply a loaded state: move the body, replace the manager lists, then
/// reconcile so hooks fire for the restored active set.
pub fn apply_state(player: &mut PlayerActor, state: &GameState) {
    player.actor.body.position = Vec2::new(state.position.x, state.position.y);
    player
        .actor
        .manager
        .restore_lists(state.equipped.clone(), state.active.iter().cloned().collect());
    let removed = player.actor.reconcile();
    if removed > 0 {
        warn!("dropped {} stale ability ids from save data", removed);
    }
}
