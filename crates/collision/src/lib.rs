//! Player-versus-wall collision for OpenTour.
//!
//! The player is a vertical cylinder tested against axis-aligned wall
//! volumes on the horizontal plane. Movement is resolved in sub-steps with
//! wall sliding, so fast frames cannot tunnel through thin partitions.

pub mod bounds;
pub mod collider;
pub mod resolve;

pub use bounds::*;
pub use collider::*;
pub use resolve::*;
