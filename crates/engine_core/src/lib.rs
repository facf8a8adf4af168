//! Core types shared by every OpenTour system.
//!
//! This crate provides the foundational pieces used across the tour:
//! - Transform for spatial positioning
//! - Time management for the frame loop

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
