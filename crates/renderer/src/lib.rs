//! Rendering system using wgpu for OpenTour.

pub mod camera;
pub mod mesh;
pub mod paint;
pub mod pipeline;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use camera::*;
pub use mesh::*;
pub use paint::*;
pub use pipeline::*;
pub use renderer::*;
pub use texture::*;
pub use vertex::*;
