use bevy::prelude::*;
use modular_ability_platformer::plugins::{
    AbilityPlugin, LevelPlugin, PhysicsPlugin, PlayerPlugin, ProgressPlugin,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PlayerPlugin)
        .add_plugins(PhysicsPlugin)
        .add_plugins(AbilityPlugin)
        .add_plugins(LevelPlugin)
        .add_plugins(ProgressPlugin)
        .run();
}
