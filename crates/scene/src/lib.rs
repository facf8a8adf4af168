//! World construction: the office floor plan, wall colliders, door
//! placements, placeholder character meshes, and the threaded model
//! provider.

pub mod colliders;
pub mod models;
pub mod placeholder;
pub mod plan;

pub use colliders::*;
pub use models::*;
pub use placeholder::*;
pub use plan::*;
