pub mod ability;
pub mod level;
pub mod physics;
pub mod player;
pub mod progress;

pub use ability::AbilityPlugin;
pub use level::LevelPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;
pub use progress::ProgressPlugin;
