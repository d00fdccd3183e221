use crate::components::{FrameInput, Player, PlayerActor, Position, SolidGeometry};
use crate::core::config::{load_tunables_from_file, AbilityTunables};
use crate::core::geometry::Aabb;
use crate::core::Actor;
use bevy::prelude::*;

/// Default player collider, pixels.
pub const PLAYER_COLLIDER_WIDTH: f32 = 32.0;
pub const PLAYER_COLLIDER_HEIGHT: f32 = 64.0;

/// Tunables file read at startup; missing file falls back to defaults.
pub const TUNABLES_PATH: &str = "config/abilities.json";

/// Plugin for the player actor: spawning, input sampling, and the
/// per-frame ability tick
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameInput>()
            .add_systems(Startup, spawn_player_system)
            .add_systems(
                Update,
                (sample_input_system, drive_actor_system, sync_position_system).chain(),
            );
    }
}

/// Build the actor with the full ability roster and spawn its entity.
pub(crate) fn spawn_player_system(mut commands: Commands) {
    let tunables = match load_tunables_from_file(TUNABLES_PATH) {
        Ok(tunables) => tunables,
        Err(err) => {
            warn!("using default ability tunables: {}", err);
            AbilityTunables::default()
        }
    };

    let spawn = Vec2::new(100.0, 100.0);
    let actor = Actor::new(
        spawn,
        Vec2::new(PLAYER_COLLIDER_WIDTH, PLAYER_COLLIDER_HEIGHT),
        &tunables,
    );
    commands.insert_resource(PlayerActor { actor });
    commands.spawn((Player, Position::new(spawn.x, spawn.y)));
}

/// Translate the keyboard into the engine-independent input snapshot.
fn sample_input_system(keyboard: Res<Input<KeyCode>>, mut input: ResMut<FrameInput>) {
    let mut horizontal = 0.0;
    if keyboard.pressed(KeyCode::Left) || keyboard.pressed(KeyCode::A) {
        horizontal -= 1.0;
    }
    if keyboard.pressed(KeyCode::Right) || keyboard.pressed(KeyCode::D) {
        horizontal += 1.0;
    }
    let mut vertical = 0.0;
    if keyboard.pressed(KeyCode::Up) || keyboard.pressed(KeyCode::W) {
        vertical += 1.0;
    }
    if keyboard.pressed(KeyCode::Down) || keyboard.pressed(KeyCode::S) {
        vertical -= 1.0;
    }

    input.snapshot.horizontal = horizontal;
    input.snapshot.vertical = vertical;
    input.snapshot.jump_pressed = keyboard.just_pressed(KeyCode::Space);
    input.snapshot.jump_held = keyboard.pressed(KeyCode::Space);
    input.snapshot.run_held = keyboard.pressed(KeyCode::ShiftLeft);
    input.snapshot.dash_pressed = keyboard.just_pressed(KeyCode::ControlLeft);
    input.snapshot.flip_pressed = keyboard.just_pressed(KeyCode::F);
}

/// Per-frame ability tick against the level's solid geometry.
fn drive_actor_system(
    time: Res<Time>,
    input: Res<FrameInput>,
    geometry: Query<&SolidGeometry>,
    player: Option<ResMut<PlayerActor>>,
) {
    let Some(mut player) = player else {
        return;
    };
    let surfaces = collect_surfaces(&geometry);
    player
        .actor
        .update(&input.snapshot, &surfaces, time.delta_seconds());
}

/// Mirror the simulated body position onto the player entity.
fn sync_position_system(
    player: Option<Res<PlayerActor>>,
    mut query: Query<&mut Position, With<Player>>,
) {
    let Some(player) = player else {
        return;
    };
    for mut position in query.iter_mut() {
        position.x = player.actor.body.position.x;
        position.y = player.actor.body.position.y;
    }
}

pub(crate) fn collect_surfaces(geometry: &Query<&SolidGeometry>) -> Vec<Aabb> {
    geometry.iter().map(|solid| solid.aabb()).collect()
}
