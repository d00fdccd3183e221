pub mod balloon;
pub mod bouncy_ball;
pub mod dash;
pub mod double_jump;
pub mod gravity_flip;
pub mod ice_block;
pub mod iron_block;
pub mod jump;
pub mod movement;
pub mod shrink;

pub use balloon::BalloonAbility;
pub use bouncy_ball::BouncyBallAbility;
pub use dash::DashAbility;
pub use double_jump::DoubleJumpAbility;
pub use gravity_flip::GravityFlipAbility;
pub use ice_block::IceBlockAbility;
pub use iron_block::IronBlockAbility;
pub use jump::JumpAbility;
pub use movement::MovementAbility;
pub use shrink::ShrinkAbility;

use crate::core::body::ActorBody;
use crate::core::config::AbilityTunables;
use crate::core::registry::AbilityRegistry;

/// Canonical ability id tokens.
pub mod ids {
    pub const MOVEMENT: &str = "Movement";
    pub const JUMP: &str = "Jump";
    pub const DOUBLE_JUMP: &str = "DoubleJump";
    pub const DASH: &str = "Dash";
    pub const IRON_BLOCK: &str = "IronBlock";
    pub const BALLOON: &str = "Balloon";
    pub const GRAVITY_FLIP: &str = "GravityFlip";
    pub const ICE_BLOCK: &str = "IceBlock";
    pub const SHRINK: &str = "Shrink";
    pub const BOUNCY_BALL: &str = "BouncyBall";
}

/// Timestamp sentinel meaning "long before the clock started", so freshly
/// constructed timers never satisfy a recency check.
pub(crate) const LONG_AGO: f32 = -1000.0;

/// Vertical speeds slower than this count as "not moving up" for landing
/// detection.
pub(crate) const LANDING_EPSILON: f32 = 0.1;

/// Register the full ability roster in canonical execution order:
/// movement first, then jumps, then the special abilities, so specials can
/// read state the movement pass already wrote this tick.
pub fn register_default_abilities(
    registry: &mut AbilityRegistry,
    body: &ActorBody,
    tunables: &AbilityTunables,
) {
    registry.register(Box::new(MovementAbility::new(tunables.movement)), body);
    registry.register(Box::new(JumpAbility::new(tunables.jump)), body);
    registry.register(Box::new(DoubleJumpAbility::new(tunables.double_jump)), body);
    registry.register(Box::new(DashAbility::new(tunables.dash)), body);
    registry.register(Box::new(IronBlockAbility::new(tunables.iron_block)), body);
    registry.register(Box::new(BalloonAbility::new(tunables.balloon)), body);
    registry.register(
        Box::new(GravityFlipAbility::new(tunables.gravity_flip)),
        body,
    );
    registry.register(Box::new(IceBlockAbility::new(tunables.ice_block)), body);
    registry.register(Box::new(ShrinkAbility::new(tunables.shrink)), body);
    registry.register(Box::new(BouncyBallAbility::new(tunables.bouncy_ball)), body);
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::ability::{ActiveSet, TickContext};
    use crate::core::body::ActorBody;
    use crate::core::geometry::Aabb;
    use crate::core::input::InputSnapshot;
    use glam::Vec2;

    /// A body standing on a wide platform, contacts pre-sensed.
    pub fn grounded_body() -> (ActorBody, Vec<Aabb>) {
        let mut body = ActorBody::new(Vec2::new(100.0, 100.0), Vec2::new(32.0, 64.0));
        let ground = Aabb::new(-500.0, 133.0, 2000.0, 20.0);
        body.sense_contacts(&[ground]);
        assert!(body.is_grounded);
        (body, vec![ground])
    }

    /// A body in midair with no surfaces nearby.
    pub fn airborne_body() -> (ActorBody, Vec<Aabb>) {
        let mut body = ActorBody::new(Vec2::new(100.0, 100.0), Vec2::new(32.0, 64.0));
        body.sense_contacts(&[]);
        (body, Vec::new())
    }

    pub struct TickHarness {
        pub input: InputSnapshot,
        pub active: ActiveSet,
        pub surfaces: Vec<Aabb>,
        pub time: f32,
        pub dt: f32,
    }

    impl TickHarness {
        pub fn new(surfaces: Vec<Aabb>) -> Self {
            Self {
                input: InputSnapshot::default(),
                active: ActiveSet::new(),
                surfaces,
                time: 10.0,
                dt: 1.0 / 60.0,
            }
        }

        pub fn ctx<'a>(&'a self, body: &'a mut ActorBody) -> TickContext<'a> {
            TickContext {
                body,
                input: &self.input,
                active: &self.active,
                surfaces: &self.surfaces,
                time: self.time,
                dt: self.dt,
            }
        }

        pub fn advance(&mut self, dt: f32) {
            self.time += dt;
        }
    }
}
