use crate::core::geometry::{probe_solid, Aabb};
use glam::Vec2;

/// Downward acceleration in pixels per second squared at gravity scale 1.0.
/// The y axis grows downward, so upward impulses are negative.
pub const GRAVITY: f32 = 980.0;

/// Probe length for ground and ceiling contact sensing.
pub const CONTACT_CHECK_DISTANCE: f32 = 2.0;

/// Physical quantities captured once when the body is constructed.
///
/// Every ability that overrides a physical property computes its override
/// from this snapshot and restores from it, never from its own previous
/// output, so repeated modify/reset cycles cannot compound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsBaseline {
    pub mass: f32,
    pub gravity_scale: f32,
    pub linear_drag: f32,
    pub surface_friction: f32,
    pub collider_size: Vec2,
    pub collider_offset: Vec2,
    pub scale: Vec2,
}

/// Axis-aligned collision box carried by the body, relative to its position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

/// The shared physical state every ability reads and mutates.
///
/// Exposes the minimal mutation surface of the spec: velocity read/write,
/// impulse application, and the contact flags refreshed once per tick.
#[derive(Clone, Debug)]
pub struct ActorBody {
    pub position: Vec2,
    velocity: Vec2,
    pub mass: f32,
    pub gravity_scale: f32,
    pub linear_drag: f32,
    pub surface_friction: f32,
    pub collider: BodyCollider,
    /// Visual scale; the sign of x mirrors the sprite for facing.
    pub scale: Vec2,
    facing: i32,
    pub is_grounded: bool,
    pub ceiling_clear: bool,
    baseline: PhysicsBaseline,
}

impl ActorBody {
    pub fn new(position: Vec2, collider_size: Vec2) -> Self {
        let collider = BodyCollider {
            size: collider_size,
            offset: Vec2::ZERO,
        };
        let baseline = PhysicsBaseline {
            mass: 1.0,
            gravity_scale: 1.0,
            linear_drag: 0.0,
            surface_friction: 0.4,
            collider_size,
            collider_offset: Vec2::ZERO,
            scale: Vec2::ONE,
        };
        Self {
            position,
            velocity: Vec2::ZERO,
            mass: baseline.mass,
            gravity_scale: baseline.gravity_scale,
            linear_drag: baseline.linear_drag,
            surface_friction: baseline.surface_friction,
            collider,
            scale: baseline.scale,
            facing: 1,
            is_grounded: false,
            ceiling_clear: true,
            baseline,
        }
    }

    /// The snapshot captured at construction time.
    pub fn baseline(&self) -> PhysicsBaseline {
        self.baseline
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, x: f32, y: f32) {
        self.velocity = Vec2::new(x, y);
    }

    /// Instantaneous impulse; the resulting velocity change is divided by
    /// the current mass, so a heavier body gains less speed.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }

    pub fn facing(&self) -> i32 {
        self.facing
    }

    pub fn set_facing(&mut self, facing: i32) {
        if facing != 0 {
            self.facing = facing.signum();
        }
    }

    /// World-space collision box at the current position.
    pub fn collider_aabb(&self) -> Aabb {
        Aabb::from_center(self.position + self.collider.offset, self.collider.size)
    }

    /// Multi-point ground and ceiling probes, run once per tick.
    ///
    /// Two probe points per edge tolerate tile-seam gaps a single center
    /// ray would fall through.
    pub fn sense_contacts(&mut self, surfaces: &[Aabb]) {
        let aabb = self.collider_aabb();
        let down = Vec2::new(0.0, 1.0);
        let up = Vec2::new(0.0, -1.0);

        let bottom_left = Vec2::new(aabb.min().x, aabb.max().y);
        let bottom_right = Vec2::new(aabb.max().x, aabb.max().y);
        self.is_grounded = probe_solid(bottom_left, down, CONTACT_CHECK_DISTANCE, surfaces)
            || probe_solid(bottom_right, down, CONTACT_CHECK_DISTANCE, surfaces);

        let top_left = aabb.min();
        let top_right = Vec2::new(aabb.max().x, aabb.min().y);
        self.ceiling_clear = !probe_solid(top_left, up, CONTACT_CHECK_DISTANCE, surfaces)
            && !probe_solid(top_right, up, CONTACT_CHECK_DISTANCE, surfaces);
    }

    /// Fixed-step integration: gravity, drag, then axis-separated movement
    /// with positional resolution against the solid surfaces.
    pub fn integrate(&mut self, surfaces: &[Aabb], dt: f32) {
        // Standing still on the ground under downward gravity skips the
        // pull; rising, airborne, or inverted-gravity bodies accelerate.
        let resting = self.is_grounded && self.gravity_scale >= 0.0 && self.velocity.y >= 0.0;
        if !resting {
            self.velocity.y += GRAVITY * self.gravity_scale * dt;
        }
        let damping = 1.0 / (1.0 + self.linear_drag * dt);
        self.velocity *= damping;

        self.move_axis(self.velocity.x * dt, 0.0, surfaces);
        self.move_axis(0.0, self.velocity.y * dt, surfaces);
    }

    fn move_axis(&mut self, dx: f32, dy: f32, surfaces: &[Aabb]) {
        self.position.x += dx;
        self.position.y += dy;

        let moving = self.collider_aabb();
        for solid in surfaces {
            if !moving.overlaps(solid) {
                continue;
            }
            if dx > 0.0 {
                self.position.x -= moving.max().x - solid.min().x;
                self.velocity.x = 0.0;
            } else if dx < 0.0 {
                self.position.x += solid.max().x - moving.min().x;
                self.velocity.x = 0.0;
            } else if dy > 0.0 {
                self.position.y -= moving.max().y - solid.min().y;
                self.velocity.y = 0.0;
            } else if dy < 0.0 {
                self.position.y += solid.max().y - moving.min().y;
                self.velocity.y = 0.0;
            }
            return;
        }
    }

    /// Restore every physical property to the construction-time snapshot.
    pub fn restore_baseline(&mut self) {
        self.mass = self.baseline.mass;
        self.gravity_scale = self.baseline.gravity_scale;
        self.linear_drag = self.baseline.linear_drag;
        self.surface_friction = self.baseline.surface_friction;
        self.collider.size = self.baseline.collider_size;
        self.collider.offset = self.baseline.collider_offset;
        self.scale = self.baseline.scale;
    }
}
