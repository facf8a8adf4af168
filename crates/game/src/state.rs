//! World state: the built floor plan, its colliders and doors, the
//! characters, the props, and the single-conversation arbitration.

use crate::doors::{register_doors, Door};
use crate::npc::{spawn_npcs, Npc};
use crate::props::{spawn_props, Prop};
use collision::{RoomBounds, WallCollider};
use glam::{Quat, Vec3};
use scene::{
    build_door_placements, build_wall_segments, extract_wall_colliders, office_plan,
    perimeter_walls, WallSegment, ROOM_HEIGHT, ROOM_SIZE,
};

pub struct World {
    pub bounds: RoomBounds,
    pub segments: Vec<WallSegment>,
    pub colliders: Vec<WallCollider>,
    pub doors: Vec<Door>,
    pub npcs: Vec<Npc>,
    pub props: Vec<Prop>,
    /// Index of the character whose conversation is open, if any.
    pub current_interaction: Option<usize>,
    /// Set once the player has clicked through the start screen.
    pub experience_started: bool,
}

impl World {
    pub fn new() -> Self {
        let mut specs = perimeter_walls();
        specs.extend(office_plan());
        let segments = build_wall_segments(&specs);
        let colliders = extract_wall_colliders(&segments);
        let doors = register_doors(&build_door_placements(&specs));

        Self {
            bounds: RoomBounds::new(ROOM_SIZE, ROOM_HEIGHT),
            segments,
            colliders,
            doors,
            npcs: spawn_npcs(),
            props: spawn_props(),
            current_interaction: None,
            experience_started: false,
        }
    }

    /// Open a conversation. Refused while another one is already open; the
    /// caller has to close that one first. Always starts at the greeting.
    pub fn start_interaction(&mut self, npc: usize) -> bool {
        if self.current_interaction.is_some() || npc >= self.npcs.len() {
            return false;
        }
        let character = &mut self.npcs[npc];
        character.fsm.reset();
        character.interacting = true;
        character.panel_dirty = true;
        character.hover_option = None;
        self.current_interaction = Some(npc);
        log::info!("started conversation with {}", character.name);
        true
    }

    pub fn close_interaction(&mut self) {
        if let Some(i) = self.current_interaction.take() {
            let character = &mut self.npcs[i];
            character.interacting = false;
            character.hover_option = None;
            log::info!("closed conversation with {}", character.name);
        }
    }

    /// Route a selected option index to the open conversation.
    pub fn handle_option(&mut self, option: usize) {
        if let Some(i) = self.current_interaction {
            let character = &mut self.npcs[i];
            let faq_count = character.script.faqs.len();
            if character.fsm.handle_option(faq_count, option) {
                character.panel_dirty = true;
                character.hover_option = None;
            }
        }
    }

    /// Hover feedback from the highlight pass; at most one prop lights up.
    pub fn set_prop_hover(&mut self, target: Option<usize>) {
        for (i, prop) in self.props.iter_mut().enumerate() {
            prop.hovered = target == Some(i);
        }
    }

    /// Per-frame world update: doors swing, characters face the player and
    /// leash their conversation.
    pub fn update(&mut self, dt: f32, player: Vec3, camera_rotation: Quat) {
        for door in &mut self.doors {
            door.update(dt, player);
        }

        let mut auto_exit = false;
        for npc in &mut self.npcs {
            if npc.update(player, camera_rotation) {
                auto_exit = true;
            }
        }
        if auto_exit {
            log::info!("player walked away, conversation auto-closed");
            self.close_interaction();
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueState;

    #[test]
    fn builds_a_populated_world() {
        let world = World::new();
        assert!(!world.segments.is_empty());
        assert_eq!(world.colliders.len(), world.segments.len());
        assert!(!world.doors.is_empty());
        assert_eq!(world.npcs.len(), 2);
        assert!(!world.props.is_empty());
    }

    #[test]
    fn only_one_conversation_at_a_time() {
        let mut world = World::new();
        assert!(world.start_interaction(0));
        assert!(!world.start_interaction(1));
        assert_eq!(world.current_interaction, Some(0));

        world.close_interaction();
        assert!(world.start_interaction(1));
        assert_eq!(world.current_interaction, Some(1));
    }

    #[test]
    fn conversations_always_reopen_at_the_greeting() {
        let mut world = World::new();
        world.start_interaction(0);
        world.handle_option(0);
        assert_eq!(
            world.npcs[0].fsm.state(),
            DialogueState::Questions { page: 0 }
        );
        world.close_interaction();
        world.start_interaction(0);
        assert_eq!(world.npcs[0].fsm.state(), DialogueState::Greeting);
    }

    #[test]
    fn walking_away_auto_closes() {
        let mut world = World::new();
        world.start_interaction(0);
        let near = world.npcs[0].position + Vec3::new(1.0, 0.8, 0.0);
        world.update(0.016, near, Quat::IDENTITY);
        assert_eq!(world.current_interaction, Some(0));

        let far = world.npcs[0].position + Vec3::new(10.0, 0.8, 0.0);
        world.update(0.016, far, Quat::IDENTITY);
        assert_eq!(world.current_interaction, None);
        assert!(!world.npcs[0].interacting);
    }

    #[test]
    fn prop_hover_is_exclusive_and_clearable() {
        let mut world = World::new();
        world.set_prop_hover(Some(1));
        assert!(!world.props[0].hovered);
        assert!(world.props[1].hovered);

        world.set_prop_hover(Some(2));
        assert!(!world.props[1].hovered);
        assert!(world.props[2].hovered);

        world.set_prop_hover(None);
        assert!(world.props.iter().all(|p| !p.hovered));
    }

    #[test]
    fn options_route_to_the_open_conversation_only() {
        let mut world = World::new();
        world.handle_option(0); // no-op without a conversation
        world.start_interaction(1);
        world.handle_option(0);
        assert_eq!(
            world.npcs[1].fsm.state(),
            DialogueState::Questions { page: 0 }
        );
        assert_eq!(world.npcs[0].fsm.state(), DialogueState::Greeting);
    }
}
