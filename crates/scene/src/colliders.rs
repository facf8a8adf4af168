//! Wall collider extraction from the floor plan.

use crate::plan::WallSegment;
use collision::WallCollider;
use glam::Vec3;

/// Registered colliders are slightly larger than the wall visuals so corner
/// grazes cannot tunnel.
pub const WALL_COLLIDER_EXPANSION: Vec3 = Vec3::new(0.10, 0.15, 0.10);

/// Axis-aligned footprint of an oriented wall segment, expanded by the
/// standard margin. Lintel segments keep their elevated Y span, which lets
/// the movement test pass underneath them.
pub fn segment_collider(segment: &WallSegment) -> WallCollider {
    let (sin, cos) = segment.yaw.sin_cos();
    let half_len = segment.length / 2.0;
    let half_thick = segment.thickness / 2.0;
    // World-space half extents of the rotated box footprint.
    let half_x = cos.abs() * half_len + sin.abs() * half_thick;
    let half_z = sin.abs() * half_len + cos.abs() * half_thick;
    let half = Vec3::new(half_x, segment.height / 2.0, half_z);
    WallCollider::from_center_half_extents(segment.center, half).expanded(WALL_COLLIDER_EXPANSION)
}

/// Colliders for every segment of the plan, in plan order.
pub fn extract_wall_colliders(segments: &[WallSegment]) -> Vec<WallCollider> {
    let colliders: Vec<WallCollider> = segments.iter().map(segment_collider).collect();
    log::info!("registered {} wall colliders", colliders.len());
    colliders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{build_wall_segments, WallSpec, DOOR_TARGET_HEIGHT};
    use glam::Vec2;

    #[test]
    fn axis_aligned_segment_matches_footprint_plus_margin() {
        let segments = build_wall_segments(&[WallSpec::solid(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        )]);
        let c = segment_collider(&segments[0]);
        assert!((c.min.x - -0.10).abs() < 1e-4);
        assert!((c.max.x - 10.10).abs() < 1e-4);
        // Thickness 0.12 centered on z=0 plus 0.10 margin each side.
        assert!((c.max.z - 0.16).abs() < 1e-4);
        assert!((c.min.y - -0.15).abs() < 1e-4);
    }

    #[test]
    fn rotated_segment_swaps_extents() {
        let segments = build_wall_segments(&[WallSpec::solid(
            Vec2::new(0.0, -5.0),
            Vec2::new(0.0, 5.0),
        )]);
        let c = segment_collider(&segments[0]);
        assert!(c.max.z - c.min.z > 9.0);
        assert!(c.max.x - c.min.x < 1.0);
    }

    #[test]
    fn lintel_collider_clears_walking_height() {
        let segments = build_wall_segments(&[WallSpec::with_doors(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            vec![5.0],
        )]);
        let lintel = segments.iter().find(|s| s.center.y > 3.0).unwrap();
        let c = segment_collider(lintel);
        // Bottom sits at door height minus the expansion margin; an eye
        // height of 1.7 stays outside even with the collider Y band.
        assert!((c.min.y - (DOOR_TARGET_HEIGHT - 0.15)).abs() < 1e-4);
        assert!(!c.blocks(lintel.center.x, lintel.center.z, 1.7, 0.34));
        assert!(c.blocks(lintel.center.x, lintel.center.z, 2.9, 0.34));
    }
}
