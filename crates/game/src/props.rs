//! Grabbable demo props.
//!
//! A held prop keeps its pose relative to the controller that grabbed it and
//! follows that controller until the trigger is released.

use glam::{Mat4, Quat, Vec3};
use input::Handedness;

#[derive(Debug, Clone, Copy)]
struct Held {
    hand: Handedness,
    local_offset: Vec3,
    local_rotation: Quat,
}

#[derive(Debug, Clone)]
pub struct Prop {
    pub name: &'static str,
    pub position: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
    pub color: [f32; 4],
    /// Set by the hover pass while a ray points at the prop.
    pub hovered: bool,
    held: Option<Held>,
}

impl Prop {
    pub fn new(name: &'static str, position: Vec3, half_extents: Vec3, color: [f32; 4]) -> Self {
        Self {
            name,
            position,
            rotation: Quat::IDENTITY,
            half_extents,
            color,
            hovered: false,
            held: None,
        }
    }

    /// Render color; hovered props get an emissive-style lift.
    pub fn display_color(&self) -> [f32; 4] {
        if self.hovered {
            let [r, g, b, a] = self.color;
            [
                (r + 0.25).min(1.0),
                (g + 0.25).min(1.0),
                (b + 0.25).min(1.0),
                a,
            ]
        } else {
            self.color
        }
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    pub fn held_by(&self) -> Option<Handedness> {
        self.held.map(|h| h.hand)
    }

    /// Attach to a controller, preserving the current relative pose.
    pub fn grab(&mut self, hand: Handedness, controller_pos: Vec3, controller_rot: Quat) {
        let inverse = controller_rot.inverse();
        self.held = Some(Held {
            hand,
            local_offset: inverse * (self.position - controller_pos),
            local_rotation: inverse * self.rotation,
        });
        log::debug!("grabbed {} with {:?} hand", self.name, hand);
    }

    pub fn release(&mut self) {
        self.held = None;
    }

    /// Track the holding controller. No-op while free.
    pub fn follow(&mut self, hand: Handedness, controller_pos: Vec3, controller_rot: Quat) {
        if let Some(held) = self.held {
            if held.hand == hand {
                self.position = controller_pos + controller_rot * held.local_offset;
                self.rotation = controller_rot * held.local_rotation;
            }
        }
    }

    /// Model matrix for the shared unit cube mesh.
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.half_extents * 2.0,
            self.rotation,
            self.position,
        )
    }
}

/// The demo props scattered near the spawn point.
pub fn spawn_props() -> Vec<Prop> {
    vec![
        Prop::new(
            "red cube",
            Vec3::new(1.6, 1.0, 2.5),
            Vec3::splat(0.12),
            [0.85, 0.25, 0.2, 1.0],
        ),
        Prop::new(
            "green cube",
            Vec3::new(-1.4, 1.0, 2.2),
            Vec3::splat(0.12),
            [0.25, 0.7, 0.3, 1.0],
        ),
        Prop::new(
            "blue cube",
            Vec3::new(0.3, 1.0, 3.1),
            Vec3::splat(0.12),
            [0.25, 0.4, 0.85, 1.0],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_lifts_the_render_color() {
        let mut prop = Prop::new("cube", Vec3::ZERO, Vec3::splat(0.1), [0.2, 0.4, 0.9, 1.0]);
        assert_eq!(prop.display_color(), prop.color);
        prop.hovered = true;
        let lifted = prop.display_color();
        assert!(lifted[0] > prop.color[0]);
        assert!(lifted[2] <= 1.0);
        assert_eq!(lifted[3], prop.color[3]);
    }

    #[test]
    fn held_prop_keeps_its_relative_pose() {
        let mut prop = Prop::new("cube", Vec3::new(1.0, 1.0, 0.0), Vec3::splat(0.1), [1.0; 4]);
        let hand_pos = Vec3::new(0.0, 1.0, 0.0);
        let hand_rot = Quat::IDENTITY;
        prop.grab(Handedness::Right, hand_pos, hand_rot);

        // Move the hand and rotate it a quarter turn about Y; the prop should
        // orbit with it.
        let new_pos = Vec3::new(0.0, 1.5, -2.0);
        let new_rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        prop.follow(Handedness::Right, new_pos, new_rot);
        let expected = new_pos + new_rot * Vec3::new(1.0, 0.0, 0.0);
        assert!(prop.position.distance(expected) < 1e-5);
    }

    #[test]
    fn follow_ignores_the_other_hand() {
        let mut prop = Prop::new("cube", Vec3::new(1.0, 1.0, 0.0), Vec3::splat(0.1), [1.0; 4]);
        prop.grab(Handedness::Left, Vec3::ZERO, Quat::IDENTITY);
        prop.follow(Handedness::Right, Vec3::new(5.0, 5.0, 5.0), Quat::IDENTITY);
        assert!(prop.position.distance(Vec3::new(1.0, 1.0, 0.0)) < 1e-6);
    }

    #[test]
    fn release_stops_tracking() {
        let mut prop = Prop::new("cube", Vec3::ZERO, Vec3::splat(0.1), [1.0; 4]);
        prop.grab(Handedness::Right, Vec3::ZERO, Quat::IDENTITY);
        prop.release();
        assert!(!prop.is_held());
        prop.follow(Handedness::Right, Vec3::new(3.0, 0.0, 0.0), Quat::IDENTITY);
        assert_eq!(prop.position, Vec3::ZERO);
    }
}
