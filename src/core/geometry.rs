use glam::Vec2;

/// Axis-aligned solid rectangle, the only collision primitive the core
/// understands. `x`/`y` is the top-left corner (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a center point and full extents.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Short-range directional probe: does a segment from `origin` along
/// `direction` (length `distance`) touch any solid surface?
///
/// This is the core's stand-in for a physics-engine raycast, used by ground
/// sensing, wall checks and bounce detection.
pub fn probe_solid(origin: Vec2, direction: Vec2, distance: f32, surfaces: &[Aabb]) -> bool {
    let end = origin + direction.normalize_or_zero() * distance;
    surfaces
        .iter()
        .any(|aabb| segment_hits_aabb(origin, end, aabb))
}

/// Segment vs AABB intersection (slab method).
fn segment_hits_aabb(start: Vec2, end: Vec2, aabb: &Aabb) -> bool {
    let delta = end - start;
    let mut t_min: f32 = 0.0;
    let mut t_max: f32 = 1.0;

    for axis in 0..2 {
        let (origin, d, lo, hi) = if axis == 0 {
            (start.x, delta.x, aabb.x, aabb.x + aabb.width)
        } else {
            (start.y, delta.y, aabb.y, aabb.y + aabb.height)
        };

        if d.abs() < f32::EPSILON {
            if origin < lo || origin > hi {
                return false;
            }
        } else {
            let mut t1 = (lo - origin) / d;
            let mut t2 = (hi - origin) / d;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return false;
            }
        }
    }

    true
}

/// Frame-rate-independent blend: linear interpolation with the factor
/// clamped to [0, 1] so large `k * dt` products cannot overshoot.
pub fn lerp(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}

/// Hermite smoothstep easing over [0, 1].
pub fn smoothstep(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::new(20.0, 20.0, 4.0, 4.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_probe_hits_surface_below() {
        let ground = Aabb::new(0.0, 100.0, 200.0, 20.0);
        assert!(probe_solid(
            Vec2::new(50.0, 99.0),
            Vec2::new(0.0, 1.0),
            2.0,
            &[ground]
        ));
    }

    #[test]
    fn test_probe_misses_distant_surface() {
        let ground = Aabb::new(0.0, 100.0, 200.0, 20.0);
        assert!(!probe_solid(
            Vec2::new(50.0, 50.0),
            Vec2::new(0.0, 1.0),
            2.0,
            &[ground]
        ));
    }

    #[test]
    fn test_probe_horizontal_wall() {
        let wall = Aabb::new(100.0, 0.0, 20.0, 200.0);
        assert!(probe_solid(
            Vec2::new(99.0, 50.0),
            Vec2::new(1.0, 0.0),
            2.0,
            &[wall]
        ));
        assert!(!probe_solid(
            Vec2::new(99.0, 50.0),
            Vec2::new(-1.0, 0.0),
            2.0,
            &[wall]
        ));
    }

    #[test]
    fn test_lerp_clamps_factor() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
    }

    #[test]
    fn test_smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = smoothstep(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }
}
