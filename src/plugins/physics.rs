use crate::components::{FrameInput, PlayerActor, SolidGeometry};
use crate::plugins::player::collect_surfaces;
use bevy::prelude::*;

const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // 60 Hz physics

/// Plugin for the fixed-rate physics step: ability forces, gravity, and
/// integration against the level geometry
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(FIXED_TIMESTEP as f64));
        app.add_systems(FixedUpdate, fixed_step_system);
    }
}

/// Run active abilities' physics pass, then integrate the body.
fn fixed_step_system(
    time: Res<Time<Fixed>>,
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
        .fixed_update(&input.snapshot, &surfaces, time.delta_seconds());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::GRAVITY;
    use crate::core::config::AbilityTunables;
    use crate::core::Actor;

    fn actor_on_nothing() -> PlayerActor {
        PlayerActor {
            actor: Actor::new(
                Vec2::new(100.0, 100.0),
                Vec2::new(32.0, 64.0),
                &AbilityTunables::default(),
            ),
        }
    }

    #[test]
    fn test_fixed_step_applies_gravity_in_freefall() {
        let mut player = actor_on_nothing();
        let input = crate::core::InputSnapshot::default();

        player.actor.fixed_update(&input, &[], FIXED_TIMESTEP);
        let expected = GRAVITY * FIXED_TIMESTEP;
        assert!((player.actor.body.velocity().y - expected).abs() < 0.01);
    }

    #[test]
    fn test_fixed_step_is_deterministic() {
        let run = || {
            let mut player = actor_on_nothing();
            let input = crate::core::InputSnapshot::default();
            for _ in 0..10 {
                player.actor.fixed_update(&input, &[], FIXED_TIMESTEP);
            }
            (player.actor.body.position, player.actor.body.velocity())
        };

        let (pos_a, vel_a) = run();
        let (pos_b, vel_b) = run();
        assert_eq!(pos_a, pos_b);
        assert_eq!(vel_a, vel_b);
    }

    #[test]
    fn test_body_settles_on_solid_geometry() {
        let mut player = actor_on_nothing();
        let input = crate::core::InputSnapshot::default();
        let ground = crate::core::geometry::Aabb::new(0.0, 140.0, 400.0, 20.0);

        for _ in 0..120 {
            player.actor.update(&input, &[ground], FIXED_TIMESTEP);
            player.actor.fixed_update(&input, &[ground], FIXED_TIMESTEP);
        }
        assert!(player.actor.body.is_grounded);
        assert_eq!(player.actor.body.velocity().y, 0.0);
    }
}
