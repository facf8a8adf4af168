//! Non-player characters: placement, proximity behavior, and the floating
//! dialogue panel anchor.

use crate::dialogue::{DialogueFsm, DialogueScript, ADMISSIONS_SCRIPT, LAB_SCRIPT};
use glam::{Quat, Vec3};

/// Base interaction radius. Facing and auto-exit distances derive from it.
pub const NPC_INTERACTION_RADIUS: f32 = 4.0;
/// Within this multiple of the radius the character turns toward the player.
pub const NPC_FACING_FACTOR: f32 = 2.0;
/// Beyond this multiple of the radius an open conversation auto-closes.
pub const NPC_AUTO_EXIT_FACTOR: f32 = 1.5;
/// Interact-key fallback reaches this multiple of the radius.
pub const NPC_INTERACT_FALLBACK_FACTOR: f32 = 1.35;

/// Dialogue panel anchor relative to the character's base position.
pub const PANEL_OFFSET: Vec3 = Vec3::new(1.8, 1.5, 0.5);

const INDICATOR_BOB_SPEED: f32 = 2.0;
const INDICATOR_BOB_AMPLITUDE: f32 = 0.1;
/// Indicator rest height above the character's base.
const INDICATOR_HEIGHT: f32 = 2.5;

/// Ray-targeting volume around the character, a vertical cylinder.
#[derive(Debug, Clone, Copy)]
pub struct HitCylinder {
    pub radius: f32,
    pub height: f32,
    /// Cylinder center height above the character's base position.
    pub offset_y: f32,
}

impl HitCylinder {
    pub fn y_range(&self, base_y: f32) -> (f32, f32) {
        let center = base_y + self.offset_y;
        (center - self.height / 2.0, center + self.height / 2.0)
    }
}

pub struct Npc {
    pub name: &'static str,
    pub role: &'static str,
    /// Id the model provider resolves, also the model file stem.
    pub model_id: &'static str,
    pub position: Vec3,
    pub yaw: f32,
    /// When set, the character is pinned here every frame regardless of what
    /// its animation or model import did to the transform.
    pub fixed_anchor: Option<Vec3>,
    pub interaction_radius: f32,
    pub hitbox: HitCylinder,
    pub script: DialogueScript,
    pub fsm: DialogueFsm,
    pub interacting: bool,
    /// Billboard rotation for the dialogue panel, refreshed while talking.
    pub panel_rotation: Quat,
    /// The panel raster needs redrawing (screen or hover changed).
    pub panel_dirty: bool,
    /// Hovered option index baked into the current raster.
    pub hover_option: Option<usize>,
}

impl Npc {
    pub fn new(
        name: &'static str,
        role: &'static str,
        model_id: &'static str,
        position: Vec3,
        script: DialogueScript,
    ) -> Self {
        Self {
            name,
            role,
            model_id,
            position,
            yaw: 0.0,
            fixed_anchor: None,
            interaction_radius: NPC_INTERACTION_RADIUS,
            hitbox: HitCylinder {
                radius: 0.70,
                height: 2.99,
                offset_y: 1.99,
            },
            script,
            fsm: DialogueFsm::new(),
            interacting: false,
            panel_rotation: Quat::IDENTITY,
            panel_dirty: false,
            hover_option: None,
        }
    }

    pub fn with_fixed_anchor(mut self, anchor: Vec3) -> Self {
        self.position = anchor;
        self.fixed_anchor = Some(anchor);
        self
    }

    pub fn panel_position(&self) -> Vec3 {
        self.position + PANEL_OFFSET
    }

    /// Indicator position at a given elapsed time, bobbing above the head.
    pub fn indicator_position(&self, elapsed: f32) -> Vec3 {
        self.position
            + Vec3::new(
                0.0,
                INDICATOR_HEIGHT + (elapsed * INDICATOR_BOB_SPEED).sin() * INDICATOR_BOB_AMPLITUDE,
                0.0,
            )
    }

    /// Per-frame proximity behavior. Returns true when an open conversation
    /// should auto-close because the player walked away.
    pub fn update(&mut self, player: Vec3, camera_rotation: Quat) -> bool {
        if let Some(anchor) = self.fixed_anchor {
            self.position = anchor;
        }

        let distance = self.position.distance(player);
        if distance < self.interaction_radius * NPC_FACING_FACTOR {
            let to_player = player - self.position;
            if to_player.x.abs() > 1e-6 || to_player.z.abs() > 1e-6 {
                self.yaw = to_player.x.atan2(to_player.z);
            }
        }

        if self.interacting {
            self.panel_rotation = camera_rotation;
            if distance > self.interaction_radius * NPC_AUTO_EXIT_FACTOR {
                return true;
            }
        }
        false
    }

    pub fn set_hover_option(&mut self, hover: Option<usize>) {
        if self.hover_option != hover {
            self.hover_option = hover;
            self.panel_dirty = true;
        }
    }
}

/// The two characters of the tour.
pub fn spawn_npcs() -> Vec<Npc> {
    vec![
        Npc::new(
            "Maya",
            "Admissions Assistant",
            "maya",
            Vec3::new(0.0, 0.90, -4.0),
            ADMISSIONS_SCRIPT,
        ),
        Npc::new(
            "Leo",
            "Lab Assistant",
            "leo",
            Vec3::ZERO,
            LAB_SCRIPT,
        )
        .with_fixed_anchor(Vec3::new(-16.91, 0.90, -19.76)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_the_player_only_when_close() {
        let mut npc = Npc::new("Test", "Guide", "test", Vec3::ZERO, ADMISSIONS_SCRIPT);
        npc.update(Vec3::new(20.0, 1.7, 0.0), Quat::IDENTITY);
        assert_eq!(npc.yaw, 0.0);

        npc.update(Vec3::new(3.0, 1.7, 0.0), Quat::IDENTITY);
        // Model forward is +Z, so facing +X is a quarter turn.
        assert!((npc.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn requests_auto_exit_past_the_leash() {
        let mut npc = Npc::new("Test", "Guide", "test", Vec3::ZERO, ADMISSIONS_SCRIPT);
        npc.interacting = true;
        assert!(!npc.update(Vec3::new(5.0, 1.7, 0.0), Quat::IDENTITY));
        assert!(npc.update(Vec3::new(7.0, 1.7, 0.0), Quat::IDENTITY));
    }

    #[test]
    fn fixed_anchor_pins_the_position() {
        let anchor = Vec3::new(-16.91, 0.90, -19.76);
        let mut npc = Npc::new("Test", "Guide", "test", Vec3::ZERO, LAB_SCRIPT)
            .with_fixed_anchor(anchor);
        npc.position = Vec3::new(1.0, 2.0, 3.0);
        npc.update(Vec3::new(50.0, 1.7, 50.0), Quat::IDENTITY);
        assert_eq!(npc.position, anchor);
    }

    #[test]
    fn indicator_bobs_around_its_rest_height() {
        let npc = Npc::new("Test", "Guide", "test", Vec3::ZERO, LAB_SCRIPT);
        let rest = npc.position.y + 2.5;
        let high = npc.indicator_position(std::f32::consts::FRAC_PI_4).y;
        assert!(high > rest && high <= rest + 0.1 + 1e-5);
    }

    #[test]
    fn hover_change_marks_the_panel_dirty() {
        let mut npc = Npc::new("Test", "Guide", "test", Vec3::ZERO, LAB_SCRIPT);
        npc.set_hover_option(Some(2));
        assert!(npc.panel_dirty);
        npc.panel_dirty = false;
        npc.set_hover_option(Some(2));
        assert!(!npc.panel_dirty);
    }
}
