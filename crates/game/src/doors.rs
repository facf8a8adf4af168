//! Door proximity animation.
//!
//! Each door swings open when the player comes near and eases shut when they
//! leave, always swinging away from the side the player approaches from. The
//! side sign is sticky inside a small epsilon band around the wall plane so
//! walking through the opening cannot make the leaf flip mid-swing.

use glam::{Mat4, Vec3};
use scene::{door_leaf_width, DoorPlacement, DOOR_JAMB};

/// Player distance at which a door starts opening.
pub const DOOR_OPEN_DISTANCE: f32 = 2.4;
/// Full swing, radians.
pub const DOOR_OPEN_ANGLE: f32 = 92.0 * std::f32::consts::PI / 180.0;
/// Exponential damping rate for the swing.
pub const DOOR_OPEN_DAMPING: f32 = 8.0;
/// Side projections smaller than this keep the previous side sign.
pub const DOOR_SIDE_EPSILON: f32 = 0.04;

/// Angle probe used to discover which swing direction moves the leaf toward
/// the positive side of the wall normal.
const OPEN_SIGN_PROBE_ANGLE: f32 = 0.12;

#[derive(Debug, Clone)]
pub struct Door {
    pub placement: DoorPlacement,
    /// Current leaf angle relative to the closed pose, radians.
    pub open_amount: f32,
    /// World position of the hinge, on the floor.
    hinge: Vec3,
    leaf_width: f32,
    /// +1 when a positive leaf angle moves the leaf toward +normal.
    positive_open_sign: f32,
    last_side_sign: f32,
}

impl Door {
    pub fn new(placement: DoorPlacement) -> Self {
        let dir = run_direction(placement.yaw);
        let leaf_width = door_leaf_width(placement.opening_width);
        let hinge = Vec3::new(placement.position.x, 0.0, placement.position.y)
            + dir * (DOOR_JAMB - placement.opening_width / 2.0);

        // Probe a small positive rotation and see which way the leaf center
        // moves along the wall normal.
        let center_local = Vec3::new(leaf_width / 2.0, 0.0, 0.0);
        let before = Mat4::from_rotation_y(placement.yaw).transform_point3(center_local);
        let after = Mat4::from_rotation_y(placement.yaw + OPEN_SIGN_PROBE_ANGLE)
            .transform_point3(center_local);
        let displacement = after - before;
        let projected =
            displacement.x * placement.normal.x + displacement.z * placement.normal.y;
        let positive_open_sign = if projected.abs() < 1e-5 || projected >= 0.0 {
            1.0
        } else {
            -1.0
        };

        Self {
            placement,
            open_amount: 0.0,
            hinge,
            leaf_width,
            positive_open_sign,
            last_side_sign: 1.0,
        }
    }

    /// Advance the swing toward its target for this frame. `player` is the
    /// head position in world space.
    pub fn update(&mut self, dt: f32, player: Vec3) {
        let position = Vec3::new(self.placement.position.x, 0.0, self.placement.position.y);
        let distance = position.distance(player);

        let to_player = player - position;
        let side =
            to_player.x * self.placement.normal.x + to_player.z * self.placement.normal.y;
        if side.abs() > DOOR_SIDE_EPSILON {
            self.last_side_sign = if side >= 0.0 { 1.0 } else { -1.0 };
        }

        // Swing away from the player so the leaf accompanies their path.
        let swing_sign = -self.last_side_sign * self.positive_open_sign;
        let target = if distance <= DOOR_OPEN_DISTANCE {
            DOOR_OPEN_ANGLE * swing_sign
        } else {
            0.0
        };
        self.open_amount += (target - self.open_amount) * (1.0 - (-DOOR_OPEN_DAMPING * dt).exp());
    }

    /// Model matrix for the frame mesh (centered on the opening).
    pub fn frame_model(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(
            self.placement.position.x,
            0.0,
            self.placement.position.y,
        )) * Mat4::from_rotation_y(self.placement.yaw)
    }

    /// Model matrix for the leaf mesh (hinge at its local origin).
    pub fn leaf_model(&self) -> Mat4 {
        Mat4::from_translation(self.hinge)
            * Mat4::from_rotation_y(self.placement.yaw + self.open_amount)
    }

    pub fn leaf_width(&self) -> f32 {
        self.leaf_width
    }

    /// World-space center of the leaf at its current angle.
    pub fn leaf_center(&self) -> Vec3 {
        self.leaf_model()
            .transform_point3(Vec3::new(self.leaf_width / 2.0, 0.0, 0.0))
    }
}

pub fn register_doors(placements: &[DoorPlacement]) -> Vec<Door> {
    let doors: Vec<Door> = placements.iter().cloned().map(Door::new).collect();
    log::info!("registered {} animated doors", doors.len());
    doors
}

/// Direction a wall run travels for a given yaw.
fn run_direction(yaw: f32) -> Vec3 {
    Mat4::from_rotation_y(yaw).transform_vector3(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn test_door() -> Door {
        // A door in a wall running along +X at z = 0; normal points +Z.
        Door::new(DoorPlacement {
            position: Vec2::new(5.0, 0.0),
            yaw: 0.0,
            normal: Vec2::new(0.0, 1.0),
            opening_width: 1.81,
        })
    }

    #[test]
    fn opens_without_overshoot_when_player_is_near() {
        let mut door = test_door();
        let player = Vec3::new(5.0, 1.7, 1.0);
        let dt = 1.0 / 72.0;
        let mut previous = 0.0f32;
        for _ in 0..240 {
            door.update(dt, player);
            assert!(door.open_amount.abs() >= previous.abs() - 1e-5);
            assert!(door.open_amount.abs() <= DOOR_OPEN_ANGLE + 1e-4);
            previous = door.open_amount;
        }
        assert!((door.open_amount.abs() - DOOR_OPEN_ANGLE).abs() < 0.05);
    }

    #[test]
    fn closes_when_player_leaves() {
        let mut door = test_door();
        let dt = 1.0 / 72.0;
        for _ in 0..240 {
            door.update(dt, Vec3::new(5.0, 1.7, 1.0));
        }
        for _ in 0..240 {
            door.update(dt, Vec3::new(5.0, 1.7, 20.0));
        }
        assert!(door.open_amount.abs() < 0.05);
    }

    #[test]
    fn swings_away_from_the_player() {
        let mut door = test_door();
        let player = Vec3::new(5.0, 1.7, 1.0); // +normal side
        let dt = 1.0 / 72.0;
        for _ in 0..240 {
            door.update(dt, player);
        }
        let closed = Door::new(door.placement).leaf_center();
        let open = door.leaf_center();
        let along_normal = (open - closed).z;
        assert!(
            along_normal < -0.1,
            "leaf moved {along_normal} along the normal, toward the player"
        );
    }

    #[test]
    fn side_sign_is_sticky_inside_the_epsilon_band() {
        let mut door = test_door();
        let dt = 1.0 / 72.0;
        for _ in 0..120 {
            door.update(dt, Vec3::new(5.0, 1.7, 1.0));
        }
        let sign_before = door.last_side_sign;
        // Standing almost exactly in the plane of the wall.
        for _ in 0..30 {
            door.update(dt, Vec3::new(5.0, 1.7, -0.02));
        }
        assert_eq!(door.last_side_sign, sign_before);
        // Clearly on the other side flips it.
        door.update(dt, Vec3::new(5.0, 1.7, -1.0));
        assert_ne!(door.last_side_sign, sign_before);
    }

    #[test]
    fn hinge_sits_on_the_jamb_side_of_the_opening() {
        let door = test_door();
        let closed_center = door.leaf_center();
        // Leaf center sits half a leaf width from the hinge along the run.
        assert!((closed_center.x - (5.0 - 1.81 / 2.0 + DOOR_JAMB + door.leaf_width() / 2.0))
            .abs()
            < 1e-4);
        assert!(closed_center.z.abs() < 1e-4);
    }
}
