//! Input handling for keyboard, mouse, and VR controllers.

pub mod desktop;
pub mod vr;

pub use desktop::*;
pub use vr::*;

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;
