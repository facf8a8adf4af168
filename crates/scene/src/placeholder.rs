//! Procedural meshes: a fallback humanoid for characters whose model fails
//! to load, door frames and leaves, and the floating NPC indicator.

use crate::plan::{DOOR_TARGET_HEIGHT, WALL_THICKNESS};
use glam::Vec3;
use renderer::MeshData;

const SKIN: [f32; 4] = [0.85, 0.70, 0.58, 1.0];
const SHIRT: [f32; 4] = [0.25, 0.42, 0.62, 1.0];
const TROUSERS: [f32; 4] = [0.22, 0.24, 0.30, 1.0];
const FRAME_COLOR: [f32; 4] = [0.42, 0.27, 0.16, 1.0];
const LEAF_COLOR: [f32; 4] = [0.55, 0.37, 0.23, 1.0];
const GLASS_COLOR: [f32; 4] = [0.55, 0.72, 0.84, 1.0];
const INDICATOR_COLOR: [f32; 4] = [1.0, 0.85, 0.25, 1.0];

/// A minimal humanoid standing on the origin, about 1.75 m tall. Substituted
/// for any character whose model fails to load so dialogue keeps working.
pub fn placeholder_humanoid() -> MeshData {
    let mut data = MeshData::new();
    // Legs
    for x in [-0.11f32, 0.11] {
        data.push_cuboid(
            Vec3::new(x, 0.42, 0.0),
            Vec3::new(0.09, 0.42, 0.09),
            TROUSERS,
        );
    }
    // Torso
    data.push_cuboid(
        Vec3::new(0.0, 1.13, 0.0),
        Vec3::new(0.24, 0.29, 0.13),
        SHIRT,
    );
    // Arms
    for x in [-0.32f32, 0.32] {
        data.push_cuboid(Vec3::new(x, 1.10, 0.0), Vec3::new(0.07, 0.30, 0.07), SHIRT);
    }
    // Head
    data.push_sphere(Vec3::new(0.0, 1.58, 0.0), 0.14, 12, 8, SKIN);
    data
}

/// Door frame (two jambs and a top bar) sized to the opening. Centered on
/// the opening in X, standing on the floor.
pub fn door_frame_mesh(opening_width: f32) -> MeshData {
    let mut data = MeshData::new();
    let half = opening_width / 2.0;
    let jamb = DOOR_JAMB;
    let depth = WALL_THICKNESS / 2.0;
    for x in [-half + jamb, half - jamb] {
        data.push_cuboid(
            Vec3::new(x, DOOR_TARGET_HEIGHT / 2.0, 0.0),
            Vec3::new(jamb, DOOR_TARGET_HEIGHT / 2.0, depth),
            FRAME_COLOR,
        );
    }
    data.push_cuboid(
        Vec3::new(0.0, DOOR_TARGET_HEIGHT - 0.05, 0.0),
        Vec3::new(half, 0.05, depth),
        FRAME_COLOR,
    );
    data
}

/// Jamb thickness on each side of the opening.
pub const DOOR_JAMB: f32 = 0.05;

/// Leaf width for a given opening: the opening minus both jambs and a small
/// fit margin so the swing never scrapes the frame.
pub fn door_leaf_width(opening_width: f32) -> f32 {
    let fit_margin = 0.03;
    (opening_width - 2.0 * DOOR_JAMB - fit_margin).max(0.6)
}

/// Door leaf with the hinge edge at the local origin, spanning local +X.
/// Rotating the instance about Y swings it open.
pub fn door_leaf_mesh(opening_width: f32) -> MeshData {
    let width = door_leaf_width(opening_width);
    let height = DOOR_TARGET_HEIGHT - 0.12;
    let mut data = MeshData::new();
    data.push_cuboid(
        Vec3::new(width / 2.0, height / 2.0, 0.0),
        Vec3::new(width / 2.0, height / 2.0, 0.035),
        LEAF_COLOR,
    );
    // Small window pane in the upper half.
    data.push_cuboid(
        Vec3::new(width / 2.0, height * 0.72, 0.037),
        Vec3::new(width * 0.28, height * 0.14, 0.01),
        GLASS_COLOR,
    );
    data
}

/// The floating marker rendered above non-interacting NPCs.
pub fn indicator_mesh() -> MeshData {
    let mut data = MeshData::new();
    data.push_sphere(Vec3::ZERO, 0.09, 10, 8, INDICATOR_COLOR);
    data
}
