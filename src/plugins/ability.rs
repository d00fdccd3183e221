use crate::components::{
    AbilityCrystal, CollectedCount, Player, PlayerActor, Position, CRYSTAL_SIZE,
};
use crate::core::geometry::Aabb;
use bevy::prelude::*;
use glam::Vec2 as CoreVec2;

/// Event fired when the player collects an ability crystal
#[derive(Event, Clone, Debug, PartialEq)]
pub struct AbilityCollected {
    pub ability_id: String,
    pub x: f32,
    pub y: f32,
}

/// Plugin for crystal collection and ability granting
pub struct AbilityPlugin;

impl Plugin for AbilityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollectedCount>()
            .add_event::<AbilityCollected>()
            .add_systems(Update, (collect_crystals_system, count_collected_system));
    }
}

/// Detect player/crystal overlap, grant the ability through the manager,
/// and despawn the crystal. A crystal whose id the registry rejects stays
/// in the world.
fn collect_crystals_system(
    mut commands: Commands,
    player: Option<ResMut<PlayerActor>>,
    player_query: Query<&Position, With<Player>>,
    crystal_query: Query<(Entity, &Position, &AbilityCrystal), Without<Player>>,
    mut collected_events: EventWriter<AbilityCollected>,
) {
    let Some(mut player) = player else {
        return;
    };
    let Ok(_) = player_query.get_single() else {
        return;
    };

    let player_box = player.actor.body.collider_aabb();
    for (entity, position, crystal) in crystal_query.iter() {
        let crystal_box = Aabb::from_center(
            CoreVec2::new(position.x, position.y),
            CoreVec2::splat(CRYSTAL_SIZE),
        );
        if !player_box.overlaps(&crystal_box) {
            continue;
        }

        if player.actor.pickup(&crystal.ability_id) {
            info!("collected ability crystal {}", crystal.ability_id);
            collected_events.send(AbilityCollected {
                ability_id: crystal.ability_id.clone(),
                x: position.x,
                y: position.y,
            });
            commands.entity(entity).despawn();
        } else {
            warn!("crystal holds unknown ability id {:?}", crystal.ability_id);
        }
    }
}

/// Tally collection events into the running score.
fn count_collected_system(
    mut events: EventReader<AbilityCollected>,
    mut collected: ResMut<CollectedCount>,
) {
    for _ in events.read() {
        collected.count += 1;
    }
}
