//! Player locomotion.
//!
//! Desktop movement drives the camera eye directly; VR movement drives the
//! rig under the headset. Both resolve their horizontal displacement through
//! the wall colliders and clamp the result to the room envelope.

use collision::{resolve_step, RoomBounds, WallCollider, PLAYER_COLLISION_RADIUS};
use glam::{Vec2, Vec3};
use input::{Handedness, InputState, VrSession};
use renderer::Camera;

pub const WALK_SPEED: f32 = 7.5;
pub const RUN_SPEED: f32 = 12.5;
/// Vertical (fly) speed as a fraction of the horizontal speed.
pub const VERTICAL_SPEED_FACTOR: f32 = 0.45;
pub const VR_TRANSLATE_SPEED: f32 = 5.0;
/// Smooth-turn rate, radians per second at full stick deflection.
pub const VR_ROTATE_SPEED: f32 = 1.5;
/// Horizontal inset from the walls for the desktop eye.
pub const DESKTOP_CLAMP_INSET: f32 = 0.2;
/// Horizontal inset from the walls for the VR rig.
pub const RIG_CLAMP_INSET: f32 = 0.5;

/// Project a look direction onto the ground plane. Falls back to -Z when the
/// camera points straight up or down.
pub fn flat_forward(forward: Vec3) -> Vec3 {
    let flat = Vec3::new(forward.x, 0.0, forward.z);
    if flat.length_squared() < 1e-6 {
        Vec3::NEG_Z
    } else {
        flat.normalize()
    }
}

/// Limit the planar input to unit magnitude so diagonals are not faster,
/// without touching analog values already inside the unit circle.
pub fn clamp_axes(axes: Vec2) -> Vec2 {
    let len = axes.length();
    if len > 1.0 {
        axes / len
    } else {
        axes
    }
}

/// Keyboard-driven movement. Only active while the cursor is locked.
pub fn desktop_movement(
    camera: &mut Camera,
    input: &InputState,
    colliders: &[WallCollider],
    bounds: &RoomBounds,
    dt: f32,
) {
    if !input.is_cursor_locked() {
        return;
    }
    let axes = clamp_axes(input.movement_axes());
    let vertical = input.vertical_axis();
    if axes == Vec2::ZERO && vertical == 0.0 {
        return;
    }

    let speed = if input.is_running() {
        RUN_SPEED
    } else {
        WALK_SPEED
    };
    let forward = flat_forward(camera.forward());
    let right = forward.cross(Vec3::Y).normalize();
    let wish = right * axes.x + forward * axes.y;

    let pos = camera.transform.position;
    let delta = Vec2::new(wish.x, wish.z) * speed * dt;
    let planar = resolve_step(
        Vec2::new(pos.x, pos.z),
        delta,
        pos.y,
        PLAYER_COLLISION_RADIUS,
        colliders,
    );
    let y = pos.y + vertical * speed * VERTICAL_SPEED_FACTOR * dt;
    camera.transform.position =
        bounds.clamp_eye(Vec3::new(planar.x, y, planar.y), DESKTOP_CLAMP_INSET);
}

/// Thumbstick-driven movement of the VR rig. Left stick translates along the
/// flattened gaze, right stick smooth-turns the rig. Only active while a
/// headset session is presenting.
pub fn vr_movement(
    camera: &mut Camera,
    vr: &VrSession,
    colliders: &[WallCollider],
    bounds: &RoomBounds,
    dt: f32,
) {
    if !vr.presenting {
        return;
    }

    let turn = vr.sample(Handedness::Right).planar_axes();
    if turn.x != 0.0 {
        camera.rig_yaw -= turn.x * VR_ROTATE_SPEED * dt;
    }

    let stick = vr.sample(Handedness::Left).planar_axes();
    if stick == Vec2::ZERO {
        return;
    }

    let forward = flat_forward(camera.forward());
    let right = forward.cross(Vec3::Y).normalize();
    // Stick up is -y; pushing forward should move along the gaze.
    let wish = right * stick.x + forward * -stick.y;

    // Collide with the head position, then apply the allowed displacement to
    // the rig so the headset offset inside the playspace is preserved.
    let head = camera.position();
    let delta = Vec2::new(wish.x, wish.z) * VR_TRANSLATE_SPEED * dt;
    let planar = resolve_step(
        Vec2::new(head.x, head.z),
        delta,
        head.y,
        PLAYER_COLLISION_RADIUS,
        colliders,
    );
    let allowed = Vec3::new(planar.x - head.x, 0.0, planar.y - head.z);
    camera.rig_position = bounds.clamp_rig(camera.rig_position + allowed, RIG_CLAMP_INSET);
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::{ControllerSample, ElementState, KeyCode};

    fn room() -> RoomBounds {
        RoomBounds::new(100.0, 5.0)
    }

    fn locked_input() -> InputState {
        let mut input = InputState::new();
        input.set_cursor_locked(true);
        input
    }

    #[test]
    fn diagonal_input_is_not_faster() {
        let clamped = clamp_axes(Vec2::new(1.0, 1.0));
        assert!((clamped.length() - 1.0).abs() < 1e-6);
        // Analog input inside the unit circle is untouched.
        let analog = clamp_axes(Vec2::new(0.3, 0.4));
        assert_eq!(analog, Vec2::new(0.3, 0.4));
    }

    #[test]
    fn flat_forward_falls_back_when_looking_straight_down() {
        assert_eq!(flat_forward(Vec3::NEG_Y), Vec3::NEG_Z);
        let f = flat_forward(Vec3::new(0.6, -0.8, 0.0));
        assert!((f - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn walking_forward_moves_along_the_gaze() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        desktop_movement(&mut camera, &input, &[], &room(), 0.1);
        // Default camera looks down -Z.
        assert!(camera.transform.position.z < -0.5);
        assert!(camera.transform.position.x.abs() < 1e-4);
        assert!((camera.transform.position.y - 1.7).abs() < 1e-5);
    }

    #[test]
    fn unlocked_cursor_freezes_the_player() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        desktop_movement(&mut camera, &input, &[], &room(), 0.1);
        assert_eq!(camera.transform.position, Vec3::new(0.0, 1.7, 0.0));
    }

    #[test]
    fn running_is_faster_than_walking() {
        let mut walk = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        desktop_movement(&mut walk, &input, &[], &room(), 0.1);

        let mut run = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        input.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        desktop_movement(&mut run, &input, &[], &room(), 0.1);
        assert!(run.transform.position.z < walk.transform.position.z);
    }

    #[test]
    fn walls_stop_the_walk() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut input = locked_input();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        let wall = WallCollider::new(Vec3::new(-5.0, 0.0, -2.0), Vec3::new(5.0, 3.0, -1.8));
        for _ in 0..60 {
            desktop_movement(&mut camera, &input, &[wall], &room(), 1.0 / 72.0);
        }
        assert!(camera.transform.position.z > -2.0);
    }

    #[test]
    fn eye_height_stays_inside_the_band() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut input = locked_input();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        for _ in 0..600 {
            desktop_movement(&mut camera, &input, &[], &room(), 1.0 / 72.0);
        }
        assert!((camera.transform.position.y - 4.5).abs() < 1e-4);
    }

    #[test]
    fn vr_stick_translates_the_rig() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut vr = VrSession::new();
        vr.presenting = true;
        let mut sample = ControllerSample::new(Handedness::Left);
        sample.axes = [0.0, 0.0, 0.0, -1.0]; // stick forward
        vr.submit_sample(sample);
        vr_movement(&mut camera, &vr, &[], &room(), 0.1);
        assert!(camera.rig_position.z < -0.3);
    }

    #[test]
    fn vr_movement_requires_a_presenting_session() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut vr = VrSession::new();
        let mut sample = ControllerSample::new(Handedness::Left);
        sample.axes = [0.0, 0.0, 0.0, -1.0];
        vr.submit_sample(sample);
        vr_movement(&mut camera, &vr, &[], &room(), 0.1);
        assert_eq!(camera.rig_position, Vec3::ZERO);
    }

    #[test]
    fn right_stick_turns_the_rig() {
        let mut camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let mut vr = VrSession::new();
        vr.presenting = true;
        let mut sample = ControllerSample::new(Handedness::Right);
        sample.axes = [0.0, 0.0, 1.0, 0.0];
        vr.submit_sample(sample);
        vr_movement(&mut camera, &vr, &[], &room(), 0.5);
        assert!((camera.rig_yaw - -0.75).abs() < 1e-5);
    }
}
