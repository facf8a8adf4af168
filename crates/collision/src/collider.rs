//! Axis-aligned wall volumes.

use glam::Vec3;

/// Vertical slack when deciding whether a wall volume applies to the player.
/// The eye-height band a volume blocks is its Y extent widened by this much.
pub const COLLIDER_Y_MARGIN: f32 = 0.35;

/// An axis-aligned box that blocks horizontal player movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallCollider {
    pub min: Vec3,
    pub max: Vec3,
}

impl WallCollider {
    /// Build from opposite corners, normalizing so `min <= max` per axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build from a center point and half extents.
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Grow the volume by a per-axis margin. Wall meshes are registered
    /// slightly larger than their visuals so the player never clips a corner.
    pub fn expanded(&self, margin: Vec3) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Whether a vertical cylinder at `(x, z)` with the given radius and eye
    /// height overlaps this volume. The Y test gates the 2D circle-vs-rect
    /// test: volumes entirely above or below the player's band never block.
    pub fn blocks(&self, x: f32, z: f32, player_y: f32, radius: f32) -> bool {
        if player_y + COLLIDER_Y_MARGIN < self.min.y || player_y - COLLIDER_Y_MARGIN > self.max.y {
            return false;
        }
        let nearest_x = x.clamp(self.min.x, self.max.x);
        let nearest_z = z.clamp(self.min.z, self.max.z);
        let dx = x - nearest_x;
        let dz = z - nearest_z;
        dx * dx + dz * dz < radius * radius
    }
}

/// Whether any collider in the slice blocks the cylinder at `(x, z)`.
pub fn blocked_at(x: f32, z: f32, player_y: f32, radius: f32, colliders: &[WallCollider]) -> bool {
    colliders.iter().any(|c| c.blocks(x, z, player_y, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> WallCollider {
        WallCollider::new(Vec3::new(4.9, 0.0, -5.0), Vec3::new(5.1, 3.0, 5.0))
    }

    #[test]
    fn corners_normalize() {
        let c = WallCollider::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, -3.0));
        assert_eq!(c.min, Vec3::new(-1.0, 0.0, -3.0));
        assert_eq!(c.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn blocks_inside_and_near_face() {
        let c = wall();
        assert!(c.blocks(5.0, 0.0, 1.7, 0.3));
        // 0.2 away from the face, radius 0.3.
        assert!(c.blocks(4.7, 0.0, 1.7, 0.3));
        // 0.4 away, outside the radius.
        assert!(!c.blocks(4.5, 0.0, 1.7, 0.3));
    }

    #[test]
    fn y_band_gates_the_test() {
        let c = wall();
        // Above the wall top plus margin: never blocks.
        assert!(!c.blocks(5.0, 0.0, 3.4, 0.3));
        // Just inside the margin band still blocks.
        assert!(c.blocks(5.0, 0.0, 3.3, 0.3));
        // Below the wall bottom minus margin.
        assert!(!c.blocks(5.0, 0.0, -0.4, 0.3));
    }

    #[test]
    fn corner_distance_is_euclidean() {
        let c = wall();
        // Diagonal from the (4.9, -5.0) corner: 0.25 on each axis is
        // ~0.354 away, outside radius 0.3.
        assert!(!c.blocks(4.65, -5.25, 1.7, 0.3));
        // 0.2 on each axis is ~0.283, inside.
        assert!(c.blocks(4.7, -5.2, 1.7, 0.3));
    }

    #[test]
    fn empty_slice_never_blocks() {
        assert!(!blocked_at(0.0, 0.0, 1.7, 10.0, &[]));
    }

    #[test]
    fn expansion_grows_each_axis() {
        let c = wall().expanded(Vec3::new(0.10, 0.15, 0.10));
        assert!((c.min.x - 4.8).abs() < 1e-6);
        assert!((c.max.y - 3.15).abs() < 1e-6);
        assert!((c.max.z - 5.1).abs() < 1e-6);
    }
}
