//! Desktop input state (keyboard + mouse).

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Manages desktop input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta (for when cursor is locked).
    accumulated_delta: Vec2,

    /// Whether the cursor is captured/locked.
    cursor_locked: bool,
    /// One-shot flag: eat the next pointer-lock request. Set when a click
    /// lands on a dialogue control so the same click does not also capture
    /// the cursor.
    suppress_lock_once: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Get the mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Check if the cursor is locked.
    pub fn is_cursor_locked(&self) -> bool {
        self.cursor_locked
    }

    /// Set cursor lock state.
    pub fn set_cursor_locked(&mut self, locked: bool) {
        self.cursor_locked = locked;
    }

    /// Eat the next pointer-lock request (dialogue click).
    pub fn suppress_next_lock(&mut self) {
        self.suppress_lock_once = true;
    }

    /// Whether a lock request should go ahead; consumes the one-shot
    /// suppression flag if set.
    pub fn take_lock_permission(&mut self) -> bool {
        if self.suppress_lock_once {
            self.suppress_lock_once = false;
            false
        } else {
            true
        }
    }

    /// Raw movement flags as forward/strafe axes in [-1, 1]. Deliberately
    /// not normalized here: the locomotion driver only scales the vector
    /// down when its magnitude exceeds 1.
    pub fn movement_axes(&self) -> Vec2 {
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if self.is_key_held(KeyCode::KeyW) || self.is_key_held(KeyCode::ArrowUp) {
            forward += 1.0;
        }
        if self.is_key_held(KeyCode::KeyS) || self.is_key_held(KeyCode::ArrowDown) {
            forward -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyA) || self.is_key_held(KeyCode::ArrowLeft) {
            strafe -= 1.0;
        }
        if self.is_key_held(KeyCode::KeyD) || self.is_key_held(KeyCode::ArrowRight) {
            strafe += 1.0;
        }
        Vec2::new(strafe, forward)
    }

    /// Vertical fly axis: Space up, C down.
    pub fn vertical_axis(&self) -> f32 {
        let mut v = 0.0;
        if self.is_key_held(KeyCode::Space) {
            v += 1.0;
        }
        if self.is_key_held(KeyCode::KeyC) {
            v -= 1.0;
        }
        v
    }

    /// Check if run is held (Shift).
    pub fn is_running(&self) -> bool {
        self.is_key_held(KeyCode::ShiftLeft) || self.is_key_held(KeyCode::ShiftRight)
    }

    /// Check if interact was pressed (E).
    pub fn is_interact_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyE)
    }

    /// Check if the dialogue close key was pressed (Escape).
    pub fn is_close_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Check if the start key was pressed (Enter).
    pub fn is_start_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Enter)
    }

    /// Dialogue option picked via number row this frame, zero-based. Keys
    /// 1-9 map to options 0-8 and 0 wraps around to option 9.
    pub fn digit_option_pressed(&self) -> Option<usize> {
        const DIGITS: [KeyCode; 10] = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
            KeyCode::Digit0,
        ];
        DIGITS.iter().position(|&d| self.is_key_pressed(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_edges() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_held(KeyCode::KeyW));

        input.begin_frame();
        assert!(!input.is_key_pressed(KeyCode::KeyW));
        assert!(input.is_key_held(KeyCode::KeyW));

        // Key repeat must not re-fire the pressed edge.
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(!input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn movement_axes_are_raw_flag_sums() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        // Diagonal stays at (1, 1); the driver decides about clamping.
        assert_eq!(input.movement_axes(), Vec2::new(1.0, 1.0));

        input.process_keyboard(KeyCode::ArrowDown, ElementState::Pressed);
        assert_eq!(input.movement_axes(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn lock_suppression_is_one_shot() {
        let mut input = InputState::new();
        assert!(input.take_lock_permission());
        input.suppress_next_lock();
        assert!(!input.take_lock_permission());
        assert!(input.take_lock_permission());
    }

    #[test]
    fn digit_options_are_zero_based() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Digit3, ElementState::Pressed);
        assert_eq!(input.digit_option_pressed(), Some(2));
        input.begin_frame();
        assert_eq!(input.digit_option_pressed(), None);

        // The zero key wraps around to the tenth option.
        input.process_keyboard(KeyCode::Digit0, ElementState::Pressed);
        assert_eq!(input.digit_option_pressed(), Some(9));
    }

    #[test]
    fn mouse_delta_accumulates_until_frame_start() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -1.0));
        input.process_mouse_motion((2.0, 2.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(5.0, 1.0));
        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }
}
