//! VR controller state.
//!
//! The session object carries what the frame loop needs from a VR runtime:
//! whether a headset is presenting, per-hand controller samples (pose,
//! thumbstick axes, select button), and a queue of outgoing haptic pulses.
//! The device backend fills samples in; the game reads them out.

use glam::{Quat, Vec2, Vec3};

/// Thumbstick deadzone applied per channel.
pub const AXIS_DEADZONE: f32 = 0.15;

/// Which hand a controller belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Zero an axis value inside the deadzone.
pub fn apply_deadzone(value: f32) -> f32 {
    if value.abs() < AXIS_DEADZONE {
        0.0
    } else {
        value
    }
}

/// One haptic pulse to play on a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    /// Intensity in [0, 1].
    pub intensity: f32,
    /// Pulse length in milliseconds.
    pub duration_ms: u32,
}

/// A snapshot of one controller for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct ControllerSample {
    pub hand: Handedness,
    /// Grip position in world space.
    pub position: Vec3,
    /// Grip orientation; the pointing ray runs along -Z.
    pub orientation: Quat,
    /// Analog axis report. Modern runtimes put the thumbstick at [2], [3];
    /// older ones report it at [0], [1].
    pub axes: [f32; 4],
    /// Select (trigger) held this frame.
    pub select_held: bool,
}

impl ControllerSample {
    pub fn new(hand: Handedness) -> Self {
        Self {
            hand,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            axes: [0.0; 4],
            select_held: false,
        }
    }

    /// Thumbstick (x, y) with deadzone applied, preferring the [2], [3]
    /// layout and falling back to the legacy [0], [1] pair when the
    /// preferred pair reads all zero.
    pub fn planar_axes(&self) -> Vec2 {
        let (raw_x, raw_y) = if self.axes[2] != 0.0 || self.axes[3] != 0.0 {
            (self.axes[2], self.axes[3])
        } else {
            (self.axes[0], self.axes[1])
        };
        Vec2::new(apply_deadzone(raw_x), apply_deadzone(raw_y))
    }

    /// Pointing ray origin and direction.
    pub fn ray(&self) -> (Vec3, Vec3) {
        (self.position, self.orientation * -Vec3::Z)
    }
}

/// Per-hand state tracked across frames.
#[derive(Debug, Clone)]
struct HandState {
    sample: ControllerSample,
    select_was_held: bool,
    pending_haptics: Vec<HapticPulse>,
}

impl HandState {
    fn new(hand: Handedness) -> Self {
        Self {
            sample: ControllerSample::new(hand),
            select_was_held: false,
            pending_haptics: Vec::new(),
        }
    }
}

/// VR session state shared between the device backend and the game loop.
#[derive(Debug, Clone)]
pub struct VrSession {
    /// True while a headset session is active and rendering.
    pub presenting: bool,
    left: HandState,
    right: HandState,
}

impl Default for VrSession {
    fn default() -> Self {
        Self::new()
    }
}

impl VrSession {
    pub fn new() -> Self {
        Self {
            presenting: false,
            left: HandState::new(Handedness::Left),
            right: HandState::new(Handedness::Right),
        }
    }

    fn hand(&self, hand: Handedness) -> &HandState {
        match hand {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }

    fn hand_mut(&mut self, hand: Handedness) -> &mut HandState {
        match hand {
            Handedness::Left => &mut self.left,
            Handedness::Right => &mut self.right,
        }
    }

    /// Record the select edge baseline, then store the new sample. Call once
    /// per hand per frame, before querying edges.
    pub fn submit_sample(&mut self, sample: ControllerSample) {
        let state = self.hand_mut(sample.hand);
        state.select_was_held = state.sample.select_held;
        state.sample = sample;
    }

    /// Current sample for a hand.
    pub fn sample(&self, hand: Handedness) -> &ControllerSample {
        &self.hand(hand).sample
    }

    /// Select went down this frame.
    pub fn select_started(&self, hand: Handedness) -> bool {
        let s = self.hand(hand);
        s.sample.select_held && !s.select_was_held
    }

    /// Select went up this frame.
    pub fn select_ended(&self, hand: Handedness) -> bool {
        let s = self.hand(hand);
        !s.sample.select_held && s.select_was_held
    }

    /// Queue a haptic pulse for a hand.
    pub fn queue_haptic(&mut self, hand: Handedness, intensity: f32, duration_ms: u32) {
        self.hand_mut(hand).pending_haptics.push(HapticPulse {
            intensity,
            duration_ms,
        });
    }

    /// Drain queued pulses for the device backend to play.
    pub fn drain_haptics(&mut self, hand: Handedness) -> Vec<HapticPulse> {
        std::mem::take(&mut self.hand_mut(hand).pending_haptics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadzone_zeroes_small_values() {
        assert_eq!(apply_deadzone(0.1), 0.0);
        assert_eq!(apply_deadzone(-0.14), 0.0);
        assert_eq!(apply_deadzone(0.2), 0.2);
        assert_eq!(apply_deadzone(-0.9), -0.9);
    }

    #[test]
    fn planar_axes_prefer_modern_layout() {
        let mut c = ControllerSample::new(Handedness::Left);
        c.axes = [0.8, 0.8, 0.5, -0.5];
        assert_eq!(c.planar_axes(), Vec2::new(0.5, -0.5));
    }

    #[test]
    fn planar_axes_fall_back_to_legacy_layout() {
        let mut c = ControllerSample::new(Handedness::Left);
        c.axes = [0.6, -0.3, 0.0, 0.0];
        assert_eq!(c.planar_axes(), Vec2::new(0.6, -0.3));
    }

    #[test]
    fn modern_layout_wins_even_one_sided() {
        // A single non-zero modern channel selects the modern pair.
        let mut c = ControllerSample::new(Handedness::Right);
        c.axes = [0.9, 0.9, 0.0, 0.4];
        assert_eq!(c.planar_axes(), Vec2::new(0.0, 0.4));
    }

    #[test]
    fn select_edges_fire_once() {
        let mut session = VrSession::new();
        let mut sample = ControllerSample::new(Handedness::Right);

        sample.select_held = true;
        session.submit_sample(sample);
        assert!(session.select_started(Handedness::Right));
        assert!(!session.select_ended(Handedness::Right));

        session.submit_sample(sample);
        assert!(!session.select_started(Handedness::Right));

        sample.select_held = false;
        session.submit_sample(sample);
        assert!(session.select_ended(Handedness::Right));
        assert!(!session.select_started(Handedness::Right));
    }

    #[test]
    fn haptics_queue_and_drain() {
        let mut session = VrSession::new();
        session.queue_haptic(Handedness::Left, 0.5, 100);
        session.queue_haptic(Handedness::Left, 0.2, 50);
        let pulses = session.drain_haptics(Handedness::Left);
        assert_eq!(pulses.len(), 2);
        assert_eq!(
            pulses[0],
            HapticPulse {
                intensity: 0.5,
                duration_ms: 100
            }
        );
        assert!(session.drain_haptics(Handedness::Left).is_empty());
        assert!(session.drain_haptics(Handedness::Right).is_empty());
    }

    #[test]
    fn controller_ray_points_along_negative_z() {
        let mut c = ControllerSample::new(Handedness::Right);
        c.position = Vec3::new(1.0, 1.5, 2.0);
        c.orientation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let (origin, dir) = c.ray();
        assert_eq!(origin, c.position);
        assert!((dir - (-Vec3::X)).length() < 1e-5);
    }
}
