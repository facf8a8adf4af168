//! Rectangular room bounds.

use glam::Vec3;

/// Vertical band the desktop eye height is clamped to, measured from the
/// floor and the ceiling respectively.
pub const EYE_CLAMP_MARGIN: f32 = 0.5;

/// The walkable room envelope: a square footprint centered on the origin.
#[derive(Debug, Clone, Copy)]
pub struct RoomBounds {
    /// Half the side length of the square footprint.
    pub half_size: f32,
    /// Ceiling height above the floor at y = 0.
    pub height: f32,
}

impl RoomBounds {
    pub fn new(size: f32, height: f32) -> Self {
        Self {
            half_size: size / 2.0,
            height,
        }
    }

    /// Clamp a desktop camera position: horizontal inset from the walls plus
    /// the eye-height band.
    pub fn clamp_eye(&self, pos: Vec3, inset: f32) -> Vec3 {
        let h = self.half_size - inset;
        Vec3::new(
            pos.x.clamp(-h, h),
            pos.y.clamp(EYE_CLAMP_MARGIN, self.height - EYE_CLAMP_MARGIN),
            pos.z.clamp(-h, h),
        )
    }

    /// Clamp a VR rig position: horizontal only, the headset owns height.
    pub fn clamp_rig(&self, pos: Vec3, inset: f32) -> Vec3 {
        let h = self.half_size - inset;
        Vec3::new(pos.x.clamp(-h, h), pos.y, pos.z.clamp(-h, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_clamp_keeps_player_inside() {
        let room = RoomBounds::new(100.0, 5.0);
        let p = room.clamp_eye(Vec3::new(60.0, 9.0, -60.0), 0.2);
        assert_eq!(p, Vec3::new(49.8, 4.5, -49.8));
        let q = room.clamp_eye(Vec3::new(0.0, 0.0, 0.0), 0.2);
        assert_eq!(q.y, 0.5);
    }

    #[test]
    fn rig_clamp_leaves_height_alone() {
        let room = RoomBounds::new(100.0, 5.0);
        let p = room.clamp_rig(Vec3::new(-70.0, 12.0, 3.0), 0.5);
        assert_eq!(p, Vec3::new(-49.5, 12.0, 3.0));
    }

    #[test]
    fn interior_points_pass_through() {
        let room = RoomBounds::new(100.0, 5.0);
        let p = Vec3::new(10.0, 1.7, -20.0);
        assert_eq!(room.clamp_eye(p, 0.2), p);
    }
}
