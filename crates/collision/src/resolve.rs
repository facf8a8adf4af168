//! Sub-stepped movement resolution with wall sliding.

use crate::{blocked_at, WallCollider};
use glam::Vec2;

/// Horizontal radius of the player's collision cylinder.
pub const PLAYER_COLLISION_RADIUS: f32 = 0.34;

/// Maximum length of one collision sub-step. Per-frame deltas longer than
/// this are split so the player cannot tunnel through a thin wall.
pub const MOVEMENT_COLLISION_STEP: f32 = 0.18;

/// Resolve a horizontal movement delta against wall volumes.
///
/// `pos` is the player's XZ position and `delta` the desired XZ displacement
/// this frame. The move is split into sub-steps no longer than
/// [`MOVEMENT_COLLISION_STEP`]; each sub-step tries the full move, then the
/// X component alone, then the Z component alone (wall slide), and stops at
/// the first sub-step where all three are blocked. Returns the final
/// position. Non-finite deltas leave the position untouched.
pub fn resolve_step(
    pos: Vec2,
    delta: Vec2,
    player_y: f32,
    radius: f32,
    colliders: &[WallCollider],
) -> Vec2 {
    if !delta.x.is_finite() || !delta.y.is_finite() {
        return pos;
    }
    let dist = delta.length();
    if dist == 0.0 {
        return pos;
    }
    let steps = ((dist / MOVEMENT_COLLISION_STEP).ceil() as u32).max(1);
    let step = delta / steps as f32;

    let mut x = pos.x;
    let mut z = pos.y;
    for _ in 0..steps {
        let nx = x + step.x;
        let nz = z + step.y;
        if !blocked_at(nx, nz, player_y, radius, colliders) {
            x = nx;
            z = nz;
            continue;
        }
        if !blocked_at(nx, z, player_y, radius, colliders) {
            x = nx;
            continue;
        }
        if !blocked_at(x, nz, player_y, radius, colliders) {
            z = nz;
            continue;
        }
        break;
    }
    Vec2::new(x, z)
}
