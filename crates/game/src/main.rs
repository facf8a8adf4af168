//! OpenTour: an interactive campus tour with desktop and VR input paths.
//!
//! The frame loop mirrors the tour's two phases. Before the start gate the
//! player only sees the loading readout while character models resolve on
//! worker threads. Afterwards each frame runs movement (both input paths),
//! door and character updates, the throttled hover highlight, and finally
//! one render pass stack: world, panels, overlay.

mod config;
mod dialogue;
mod doors;
mod movement;
mod npc;
mod panel;
mod props;
mod state;
mod targeting;

use anyhow::Result;
use engine_core::Time;
use glam::{Mat4, Vec2, Vec3};
use input::{Handedness, InputState, KeyCode, MouseButton, VrSession};
use npc::NPC_INTERACT_FALLBACK_FACTOR;
use panel::{render_dialogue_panel, PanelLayout, PANEL_WORLD_SIZE};
use renderer::{Camera, InstanceData, Mesh, OverlayTextBuilder, PanelSurface, Renderer};
use scene::{
    door_frame_mesh, door_leaf_mesh, indicator_mesh, placeholder_humanoid, ModelProvider,
    ROOM_SIZE,
};
use state::World;
use std::path::PathBuf;
use std::sync::Arc;
use targeting::{nearest_npc_within_reach, RayTarget};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

/// Spawn eye position, a few meters back from the admissions assistant.
const SPAWN_EYE: Vec3 = Vec3::new(0.0, 1.7, 8.0);

/// Hover highlight refresh interval, one eye rendered per frame.
const HIGHLIGHT_INTERVAL_FLAT: f32 = 0.033;
/// Hover highlight refresh interval while a headset is presenting.
const HIGHLIGHT_INTERVAL_STEREO: f32 = 0.022;
/// Debug readout refresh interval.
const DEBUG_READOUT_INTERVAL: f32 = 0.120;

const WALL_COLOR: [f32; 4] = [0.78, 0.80, 0.84, 1.0];
const FLOOR_COLOR: [f32; 4] = [0.45, 0.47, 0.50, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// GPU-side state per character: the body mesh once its load resolves, and
/// the dialogue panel raster while a conversation is showing.
struct NpcVisual {
    mesh: Option<Mesh>,
    panel_surface: Option<PanelSurface>,
    layout: Option<PanelLayout>,
}

struct GameState {
    config: config::GameConfig,
    time: Time,
    input: InputState,
    vr: VrSession,
    renderer: Renderer,
    camera: Camera,
    world: World,
    provider: ModelProvider,
    assets_ready: bool,

    floor_mesh: Mesh,
    wall_mesh: Mesh,
    prop_mesh: Mesh,
    indicator_mesh: Mesh,
    /// Frame and leaf mesh per door, in door order.
    door_meshes: Vec<(Mesh, Mesh)>,
    npc_visuals: Vec<NpcVisual>,
    wall_instances: Vec<InstanceData>,

    highlight_clock: f32,
    debug_clock: f32,
    debug_text: String,
    running: bool,
}

impl GameState {
    async fn new(window: Arc<Window>, config: config::GameConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync).await?;
        let mut camera = Camera::new(SPAWN_EYE);
        camera.sensitivity = 0.002 * config.sensitivity;
        camera.set_aspect(renderer.size.width, renderer.size.height);

        let world = World::new();

        let mut provider = ModelProvider::new();
        let models_dir = PathBuf::from(&config.asset_dir).join("models");
        for character in &world.npcs {
            provider.request(
                character.model_id,
                models_dir.join(format!("{}.glb", character.model_id)),
            );
        }

        let device = &renderer.device;
        let floor_mesh = Mesh::plane(device, ROOM_SIZE);
        let wall_mesh = Mesh::cube(device);
        let prop_mesh = Mesh::cube(device);
        let indicator = indicator_mesh().upload(device);
        let door_meshes = world
            .doors
            .iter()
            .map(|door| {
                (
                    door_frame_mesh(door.placement.opening_width).upload(device),
                    door_leaf_mesh(door.placement.opening_width).upload(device),
                )
            })
            .collect();
        let npc_visuals = world
            .npcs
            .iter()
            .map(|_| NpcVisual {
                mesh: None,
                panel_surface: None,
                layout: None,
            })
            .collect();

        let wall_instances = world
            .segments
            .iter()
            .map(|segment| {
                let model = Mat4::from_translation(segment.center)
                    * Mat4::from_rotation_y(segment.yaw)
                    * Mat4::from_scale(Vec3::new(
                        segment.length,
                        segment.height,
                        segment.thickness,
                    ));
                InstanceData::new(model.to_cols_array_2d(), WALL_COLOR)
            })
            .collect();

        log::info!(
            "world ready: {} wall segments, {} doors, {} characters",
            world.segments.len(),
            world.doors.len(),
            world.npcs.len()
        );

        Ok(Self {
            config,
            time: Time::new(),
            input: InputState::new(),
            vr: VrSession::new(),
            renderer,
            camera,
            world,
            provider,
            assets_ready: false,
            floor_mesh,
            wall_mesh,
            prop_mesh,
            indicator_mesh: indicator,
            door_meshes,
            npc_visuals,
            wall_instances,
            highlight_clock: 0.0,
            debug_clock: 0.0,
            debug_text: String::new(),
            running: true,
        })
    }

    /// Returns true when the application should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.input.process_keyboard(code, event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
            }
            WindowEvent::Focused(false) => self.release_cursor(),
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(err) = self.render() {
                    if let Some(wgpu::SurfaceError::OutOfMemory) =
                        err.downcast_ref::<wgpu::SurfaceError>()
                    {
                        log::error!("out of GPU memory, shutting down");
                        self.running = false;
                    } else {
                        // Lost or outdated surface; reconfigure and retry
                        // next frame.
                        log::warn!("frame skipped: {err}");
                        self.renderer.resize(self.renderer.size);
                    }
                }
                self.input.begin_frame();
                self.renderer.window.request_redraw();
            }
            _ => {}
        }
        false
    }

    fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.is_cursor_locked() {
                self.camera.process_mouse(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn update(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds();

        self.poll_models();

        if !self.world.experience_started {
            let wants_start =
                self.input.is_start_pressed() || self.input.is_mouse_pressed(MouseButton::Left);
            if self.assets_ready && wants_start {
                self.world.experience_started = true;
                self.grab_cursor();
                log::info!("experience started");
            }
        } else {
            self.update_interactions();
            movement::desktop_movement(
                &mut self.camera,
                &self.input,
                &self.world.colliders,
                &self.world.bounds,
                dt,
            );
            movement::vr_movement(
                &mut self.camera,
                &self.vr,
                &self.world.colliders,
                &self.world.bounds,
                dt,
            );

            let head = self.camera.position();
            self.world.update(dt, head, self.camera.world_rotation());
            self.update_held_props();
            self.update_hover(dt);
            if let Some(i) = self.world.current_interaction {
                self.refresh_panel(i);
            }
        }

        self.update_debug_readout(dt);
    }

    /// Collect resolved model loads and close the start gate once every
    /// request has reported back. A failed load gets the placeholder body so
    /// its dialogue keeps working.
    fn poll_models(&mut self) {
        for loaded in self.provider.poll() {
            let Some(i) = self
                .world
                .npcs
                .iter()
                .position(|n| n.model_id == loaded.id)
            else {
                continue;
            };
            let data = match loaded.result {
                Ok(data) => data,
                Err(_) => {
                    log::warn!("using placeholder body for {}", self.world.npcs[i].name);
                    placeholder_humanoid()
                }
            };
            self.npc_visuals[i].mesh = Some(data.upload(&self.renderer.device));
        }
        if !self.assets_ready && self.provider.all_resolved() {
            self.assets_ready = true;
            log::info!("all character models resolved");
        }
    }

    fn update_interactions(&mut self) {
        // Number keys route to the open conversation; 1 selects option 0.
        if self.world.current_interaction.is_some() {
            if let Some(option) = self.input.digit_option_pressed() {
                self.world.handle_option(option);
            }
            if self.input.is_key_pressed(KeyCode::KeyX) {
                self.world.close_interaction();
            }
        }
        if self.input.is_close_pressed() {
            if self.world.current_interaction.is_some() {
                self.world.close_interaction();
            } else if self.input.is_cursor_locked() {
                self.release_cursor();
            }
        }

        // Interact key: crosshair ray first, then the proximity fallback so
        // a character standing right beside the player still responds.
        if self.input.is_interact_pressed() && self.world.current_interaction.is_none() {
            let (origin, dir) = self.camera.crosshair_ray();
            match self.resolve(origin, dir) {
                Some(RayTarget::Npc { npc }) => {
                    self.world.start_interaction(npc);
                }
                _ => {
                    if let Some(npc) = nearest_npc_within_reach(
                        &self.world.npcs,
                        self.camera.position(),
                        NPC_INTERACT_FALLBACK_FACTOR,
                    ) {
                        self.world.start_interaction(npc);
                    }
                }
            }
        }

        if self.input.is_mouse_pressed(MouseButton::Left) {
            self.handle_click();
        }

        self.handle_vr_selects();
    }

    fn handle_click(&mut self) {
        let (origin, dir) = if self.input.is_cursor_locked() {
            self.camera.crosshair_ray()
        } else {
            self.camera.ndc_ray(self.mouse_ndc())
        };

        let mut consumed_by_dialogue = false;
        match self.resolve(origin, dir) {
            Some(RayTarget::DialogueClose { .. }) => {
                self.world.close_interaction();
                consumed_by_dialogue = true;
            }
            Some(RayTarget::DialogueOption { option, .. }) => {
                self.world.handle_option(option);
                consumed_by_dialogue = true;
            }
            Some(RayTarget::DialoguePanel { .. }) => {
                consumed_by_dialogue = true;
            }
            Some(RayTarget::Npc { npc }) => {
                self.world.start_interaction(npc);
            }
            Some(RayTarget::Prop { .. }) | None => {}
        }

        // A click that operated the dialogue must not also re-lock the
        // cursor, or the next panel click would land on the crosshair.
        if consumed_by_dialogue {
            self.input.suppress_next_lock();
        }
        if !self.input.is_cursor_locked() && self.input.take_lock_permission() {
            self.grab_cursor();
        }
    }

    fn handle_vr_selects(&mut self) {
        for hand in [Handedness::Left, Handedness::Right] {
            if self.vr.select_started(hand) {
                let (origin, dir) = self.vr.sample(hand).ray();
                match self.resolve(origin, dir) {
                    Some(RayTarget::DialogueClose { .. }) => {
                        self.vr.queue_haptic(hand, 0.5, 100);
                        self.world.close_interaction();
                    }
                    Some(RayTarget::DialogueOption { option, .. }) => {
                        self.vr.queue_haptic(hand, 0.5, 100);
                        self.world.handle_option(option);
                    }
                    Some(RayTarget::DialoguePanel { .. }) => {}
                    Some(RayTarget::Npc { npc }) => {
                        if self.world.start_interaction(npc) {
                            self.vr.queue_haptic(hand, 0.3, 100);
                        }
                    }
                    Some(RayTarget::Prop { prop }) => {
                        let sample = self.vr.sample(hand);
                        let (pos, rot) = (sample.position, sample.orientation);
                        self.world.props[prop].grab(hand, pos, rot);
                        self.vr.queue_haptic(hand, 0.2, 50);
                    }
                    None => {}
                }
            }
            if self.vr.select_ended(hand) {
                for prop in &mut self.world.props {
                    if prop.held_by() == Some(hand) {
                        prop.release();
                        self.vr.queue_haptic(hand, 0.2, 50);
                    }
                }
            }
        }
    }

    fn update_held_props(&mut self) {
        for hand in [Handedness::Left, Handedness::Right] {
            let sample = self.vr.sample(hand);
            let (pos, rot) = (sample.position, sample.orientation);
            for prop in &mut self.world.props {
                prop.follow(hand, pos, rot);
            }
        }
    }

    /// Throttled hover pass: option rows of the open panel plus grabbable
    /// props. Re-rastering the panel is the expensive part, so the ray test
    /// runs at a capped rate rather than every frame.
    fn update_hover(&mut self, dt: f32) {
        self.highlight_clock += dt;
        let interval = if self.vr.presenting {
            HIGHLIGHT_INTERVAL_STEREO
        } else {
            HIGHLIGHT_INTERVAL_FLAT
        };
        if self.highlight_clock < interval {
            return;
        }
        self.highlight_clock = 0.0;

        // One ray per pass: the right controller stands in as the primary
        // hand in VR so props are not highlighted twice per frame.
        let (origin, dir) = if self.vr.presenting {
            self.vr.sample(Handedness::Right).ray()
        } else if self.input.is_cursor_locked() {
            self.camera.crosshair_ray()
        } else {
            self.camera.ndc_ray(self.mouse_ndc())
        };
        let target = self.resolve(origin, dir);

        if let Some(i) = self.world.current_interaction {
            let hover = match target {
                Some(RayTarget::DialogueOption { option, .. }) => Some(option),
                _ => None,
            };
            self.world.npcs[i].set_hover_option(hover);
        }
        let prop_hover = match target {
            Some(RayTarget::Prop { prop }) => Some(prop),
            _ => None,
        };
        self.world.set_prop_hover(prop_hover);
    }

    fn update_debug_readout(&mut self, dt: f32) {
        self.debug_clock += dt;
        if self.debug_clock < DEBUG_READOUT_INTERVAL {
            return;
        }
        self.debug_clock = 0.0;
        if !self.config.debug_readout {
            self.debug_text.clear();
            return;
        }
        let head = self.camera.position();
        let rig = self.camera.rig_position;
        let mode = if self.vr.presenting { "VR" } else { "PC" };
        let lock = if self.input.is_cursor_locked() {
            "LOCK"
        } else {
            "FREE"
        };
        let yaw_degrees = (self.camera.yaw() + self.camera.rig_yaw).to_degrees();
        self.debug_text = format!(
            "{mode} {lock} | pos {:.2} {:.2} {:.2} | rig {:.2} {:.2} {:.2} | yaw {:.0}",
            head.x, head.y, head.z, rig.x, rig.y, rig.z, yaw_degrees
        );
    }

    fn resolve(&self, origin: Vec3, dir: Vec3) -> Option<RayTarget> {
        let layouts: Vec<Option<&PanelLayout>> =
            self.npc_visuals.iter().map(|v| v.layout.as_ref()).collect();
        targeting::resolve_target(
            origin,
            dir,
            &self.world.npcs,
            &layouts,
            &self.world.props,
            self.world.current_interaction,
        )
    }

    /// Re-rasterize a character's panel if its screen or hover changed.
    fn refresh_panel(&mut self, i: usize) {
        let character = &mut self.world.npcs[i];
        if !character.panel_dirty && self.npc_visuals[i].layout.is_some() {
            return;
        }
        let content = dialogue::panel_content(&character.script, &character.fsm);
        let layout = match render_dialogue_panel(
            character.name,
            character.role,
            &content,
            character.hover_option,
        ) {
            Ok(layout) => layout,
            Err(err) => {
                log::error!("panel raster failed: {err}");
                return;
            }
        };
        match &self.npc_visuals[i].panel_surface {
            Some(surface) => self.renderer.update_panel_surface(surface, &layout.canvas),
            None => {
                self.npc_visuals[i].panel_surface =
                    Some(self.renderer.create_panel_surface(&layout.canvas, "dialogue panel"));
            }
        }
        self.npc_visuals[i].layout = Some(layout);
        character.panel_dirty = false;
    }

    fn render(&mut self) -> Result<()> {
        self.renderer.update_camera(&self.camera);
        let (output, mut encoder) = self.renderer.begin_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // The floor draw clears color and depth; everything else loads.
        let floor = [InstanceData::new(Mat4::IDENTITY.to_cols_array_2d(), FLOOR_COLOR)];
        self.renderer
            .render_instanced(&mut encoder, &view, &self.floor_mesh, &floor);
        self.renderer.render_instanced_load(
            &mut encoder,
            &view,
            &self.wall_mesh,
            &self.wall_instances,
        );

        for (door, (frame, leaf)) in self.world.doors.iter().zip(&self.door_meshes) {
            let frame_instance =
                [InstanceData::new(door.frame_model().to_cols_array_2d(), WHITE)];
            self.renderer
                .render_instanced_load(&mut encoder, &view, frame, &frame_instance);
            let leaf_instance = [InstanceData::new(door.leaf_model().to_cols_array_2d(), WHITE)];
            self.renderer
                .render_instanced_load(&mut encoder, &view, leaf, &leaf_instance);
        }

        // Characters stand on the floor; their base position carries the
        // authored height used by the interaction math.
        for (character, visual) in self.world.npcs.iter().zip(&self.npc_visuals) {
            if let Some(mesh) = &visual.mesh {
                let model = Mat4::from_translation(Vec3::new(
                    character.position.x,
                    0.0,
                    character.position.z,
                )) * Mat4::from_rotation_y(character.yaw);
                let instance = [InstanceData::new(model.to_cols_array_2d(), WHITE)];
                self.renderer
                    .render_instanced_load(&mut encoder, &view, mesh, &instance);
            }
        }

        let prop_instances: Vec<InstanceData> = self
            .world
            .props
            .iter()
            .map(|prop| InstanceData::new(prop.model().to_cols_array_2d(), prop.display_color()))
            .collect();
        self.renderer
            .render_instanced_load(&mut encoder, &view, &self.prop_mesh, &prop_instances);

        if self.world.experience_started {
            let elapsed = self.time.elapsed_seconds();
            let indicators: Vec<InstanceData> = self
                .world
                .npcs
                .iter()
                .filter(|character| !character.interacting)
                .map(|character| {
                    let model = Mat4::from_translation(character.indicator_position(elapsed));
                    InstanceData::new(model.to_cols_array_2d(), WHITE)
                })
                .collect();
            self.renderer.render_instanced_load(
                &mut encoder,
                &view,
                &self.indicator_mesh,
                &indicators,
            );
        }

        if let Some(i) = self.world.current_interaction {
            if let Some(surface) = &self.npc_visuals[i].panel_surface {
                let character = &self.world.npcs[i];
                let model = Mat4::from_translation(character.panel_position())
                    * Mat4::from_quat(character.panel_rotation)
                    * Mat4::from_scale(Vec3::new(PANEL_WORLD_SIZE, PANEL_WORLD_SIZE, 1.0));
                let panels = [(
                    surface,
                    InstanceData::new(model.to_cols_array_2d(), WHITE),
                )];
                self.renderer.render_panels(&mut encoder, &view, &panels);
            }
        }

        self.render_overlay_pass(&mut encoder, &view);
        self.renderer.end_frame(encoder, output);
        Ok(())
    }

    fn render_overlay_pass(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let width = self.renderer.size.width as f32;
        let height = self.renderer.size.height as f32;
        let mut overlay = OverlayTextBuilder::new(width, height);

        if !self.world.experience_started {
            let text = if self.assets_ready {
                "click or press Enter to start".to_owned()
            } else {
                format!(
                    "loading experience {:.0}%",
                    self.provider.progress() * 100.0
                )
            };
            let scale = 2.0;
            let text_width = text.len() as f32 * renderer::GLYPH_PX_W * scale;
            overlay.add_text_with_bg(
                (width - text_width) / 2.0,
                height / 2.0,
                &text,
                scale,
                [1.0, 1.0, 1.0, 1.0],
                [0.0, 0.0, 0.0, 0.6],
            );
        } else if self.input.is_cursor_locked() {
            // Crosshair.
            overlay.add_rect(width / 2.0 - 1.0, height / 2.0 - 6.0, 2.0, 12.0, WHITE);
            overlay.add_rect(width / 2.0 - 6.0, height / 2.0 - 1.0, 12.0, 2.0, WHITE);
        }

        if !self.debug_text.is_empty() {
            overlay.add_text_with_bg(
                8.0,
                8.0,
                &self.debug_text,
                1.5,
                [0.8, 1.0, 0.8, 1.0],
                [0.0, 0.0, 0.0, 0.5],
            );
        }

        self.renderer
            .render_overlay(encoder, view, &overlay.vertices, &overlay.indices);
    }

    fn mouse_ndc(&self) -> Vec2 {
        let pos = self.input.mouse_position();
        let width = self.renderer.size.width.max(1) as f32;
        let height = self.renderer.size.height.max(1) as f32;
        Vec2::new(pos.x / width * 2.0 - 1.0, 1.0 - pos.y / height * 2.0)
    }

    fn grab_cursor(&mut self) {
        let window = &self.renderer.window;
        let _ = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        window.set_cursor_visible(false);
        self.input.set_cursor_locked(true);
    }

    fn release_cursor(&mut self) {
        let _ = self.renderer.window.set_cursor_grab(CursorGrabMode::None);
        self.renderer.window.set_cursor_visible(true);
        self.input.set_cursor_locked(false);
    }
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = config::GameConfig::load();
            let fullscreen = config.fullscreen.then(|| Fullscreen::Borderless(None));
            let window_attrs = Window::default_attributes()
                .with_title("OpenTour")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ))
                .with_fullscreen(fullscreen);

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(GameState::new(window.clone(), config)) {
                Ok(state) => {
                    self.state = Some(state);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                         OpenTour                          ║");
    println!("╠══════════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                                ║");
    println!("║    WASD/Arrows - Move          │  Mouse  - Look around    ║");
    println!("║    Shift       - Run           │  Space/C - Fly up/down   ║");
    println!("║    E           - Talk          │  1-9    - Pick an option ║");
    println!("║    Left Click  - Select        │  X/Esc  - Close dialogue ║");
    println!("║    Enter       - Start the tour                           ║");
    println!("║  VR:                                                      ║");
    println!("║    Left stick  - Move          │  Right stick - Turn      ║");
    println!("║    Trigger     - Point and select, grab props             ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    log::info!("Starting OpenTour");

    let event_loop = EventLoop::new()?;
    // Poll continuously so input latency stays low; Wait would delay
    // RedrawRequested until the next OS event.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
