//! Dialogue panel rasterization.
//!
//! Each conversation screen is painted into a CPU canvas that gets uploaded
//! as the panel texture. Alongside the raster we record a hit zone per
//! option plus the close button, in panel-local world coordinates, which is
//! what the ray targeting tests against.

use crate::dialogue::PanelContent;
use glam::Vec2;
use renderer::{wrap_text, Canvas, PaintError};

/// World size of the square dialogue panel.
pub const PANEL_WORLD_SIZE: f32 = 3.5;
/// The raster covers this fraction of the panel quad.
pub const TEXT_PLANE_SCALE: f32 = 0.96;
/// Square raster side in pixels.
pub const PANEL_CANVAS_SIZE: u32 = 1024;

const PADDING: i32 = 36;
const BODY_SCALE: u32 = 3;
const BODY_LINE_HEIGHT: i32 = 34;
const BLANK_LINE_HEIGHT: i32 = 18;
const OPTION_HEIGHT: i32 = 64;
const OPTION_GAP: i32 = 12;
const CLOSE_SIZE: i32 = 64;

const BACKGROUND: [u8; 4] = [18, 22, 32, 235];
const TEXT: [u8; 4] = [235, 238, 245, 255];
const MUTED: [u8; 4] = [150, 158, 175, 255];
const ACCENT: [u8; 4] = [90, 140, 220, 255];
const OPTION_BG: [u8; 4] = [45, 55, 75, 255];
const OPTION_BG_HOVER: [u8; 4] = [80, 105, 160, 255];
const CLOSE_BG: [u8; 4] = [70, 34, 34, 255];

/// Axis-aligned rectangle in panel-local world units, origin at the panel
/// center, +y up.
#[derive(Debug, Clone, Copy)]
pub struct PanelZone {
    pub center: Vec2,
    pub half: Vec2,
}

impl PanelZone {
    pub fn contains(&self, local: Vec2) -> bool {
        (local.x - self.center.x).abs() <= self.half.x
            && (local.y - self.center.y).abs() <= self.half.y
    }
}

/// A painted screen: the raster plus where its buttons live on the panel.
pub struct PanelLayout {
    pub canvas: Canvas,
    pub options: Vec<PanelZone>,
    pub close: PanelZone,
}

/// Map a canvas-pixel rectangle to a panel-local zone.
fn zone_from_pixels(x: i32, y: i32, w: i32, h: i32) -> PanelZone {
    let plane = PANEL_WORLD_SIZE * TEXT_PLANE_SCALE;
    let size = PANEL_CANVAS_SIZE as f32;
    let cx = (x as f32 + w as f32 / 2.0) / size;
    let cy = (y as f32 + h as f32 / 2.0) / size;
    PanelZone {
        center: Vec2::new((cx - 0.5) * plane, (0.5 - cy) * plane),
        half: Vec2::new(w as f32 / 2.0 / size * plane, h as f32 / 2.0 / size * plane),
    }
}

fn body_wrap_chars() -> usize {
    let usable = PANEL_CANVAS_SIZE as i32 - 2 * PADDING;
    (usable / (6 * BODY_SCALE as i32)) as usize
}

/// Paint one conversation screen. `hover` brightens that option row.
pub fn render_dialogue_panel(
    name: &str,
    role: &str,
    content: &PanelContent,
    hover: Option<usize>,
) -> Result<PanelLayout, PaintError> {
    let mut canvas = Canvas::new(PANEL_CANVAS_SIZE, PANEL_CANVAS_SIZE)?;
    let side = PANEL_CANVAS_SIZE as i32;
    canvas.fill([0, 0, 0, 0]);
    canvas.fill_rounded_rect(0, 0, PANEL_CANVAS_SIZE, PANEL_CANVAS_SIZE, 24, BACKGROUND);

    // Header: name, role, separator, close button.
    canvas.draw_text(PADDING, 40, name, 5, TEXT);
    canvas.draw_text(PADDING, 92, role, 2, MUTED);
    canvas.fill_rect(PADDING, 128, (side - 2 * PADDING) as u32, 2, ACCENT);

    let close_x = side - PADDING - CLOSE_SIZE;
    let close_y = PADDING;
    canvas.fill_rounded_rect(
        close_x,
        close_y,
        CLOSE_SIZE as u32,
        CLOSE_SIZE as u32,
        10,
        CLOSE_BG,
    );
    canvas.draw_text(close_x + 14, close_y + 8, "X", 6, TEXT);
    let close = zone_from_pixels(close_x, close_y, CLOSE_SIZE, CLOSE_SIZE);

    // Body lines, wrapped to the panel width. The body may not run into the
    // option rows or the footer; overflow is cut with an ellipsis line.
    let wrap = body_wrap_chars();
    let reserved =
        content.options.len() as i32 * (OPTION_HEIGHT + OPTION_GAP) + PADDING + 40 + 24;
    let body_limit = side - reserved - BODY_LINE_HEIGHT;
    let mut y = 160;
    let mut truncated = false;
    'body: for line in &content.lines {
        if line.is_empty() {
            y += BLANK_LINE_HEIGHT;
            continue;
        }
        for wrapped in wrap_text(line, wrap) {
            if y > body_limit {
                truncated = true;
                break 'body;
            }
            canvas.draw_text(PADDING, y, &wrapped, BODY_SCALE, TEXT);
            y += BODY_LINE_HEIGHT;
        }
    }
    if truncated {
        canvas.draw_text(PADDING, y, "...", BODY_SCALE, MUTED);
        y += BODY_LINE_HEIGHT;
    }
    y += 24;

    // Option rows.
    let mut options = Vec::with_capacity(content.options.len());
    for (index, option) in content.options.iter().enumerate() {
        let bg = if hover == Some(index) {
            OPTION_BG_HOVER
        } else {
            OPTION_BG
        };
        let width = side - 2 * PADDING;
        canvas.fill_rounded_rect(PADDING, y, width as u32, OPTION_HEIGHT as u32, 10, bg);
        let label = format!("{}. {}", index + 1, option);
        let label = renderer::ellipsize(&label, wrap.saturating_sub(2));
        canvas.draw_text(PADDING + 16, y + 20, &label, BODY_SCALE, TEXT);
        options.push(zone_from_pixels(PADDING, y, width, OPTION_HEIGHT));
        y += OPTION_HEIGHT + OPTION_GAP;
    }

    // Footer hint.
    canvas.draw_text(
        PADDING,
        side - PADDING - 16,
        "VR: point + trigger | PC: click or keys 1-9 | X to close",
        2,
        MUTED,
    );

    Ok(PanelLayout {
        canvas,
        options,
        close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{panel_content, DialogueFsm, ADMISSIONS_SCRIPT};

    fn sample_content() -> PanelContent {
        let mut fsm = DialogueFsm::new();
        fsm.handle_option(ADMISSIONS_SCRIPT.faqs.len(), 0);
        panel_content(&ADMISSIONS_SCRIPT, &fsm)
    }

    #[test]
    fn one_zone_per_option() {
        let content = sample_content();
        let layout = render_dialogue_panel("Maya", "Admissions", &content, None).unwrap();
        assert_eq!(layout.options.len(), content.options.len());
    }

    #[test]
    fn zones_stay_inside_the_text_plane() {
        let content = sample_content();
        let layout = render_dialogue_panel("Maya", "Admissions", &content, None).unwrap();
        let half_plane = PANEL_WORLD_SIZE * TEXT_PLANE_SCALE / 2.0;
        for zone in layout.options.iter().chain(std::iter::once(&layout.close)) {
            assert!(zone.center.x.abs() + zone.half.x <= half_plane + 1e-4);
            assert!(zone.center.y.abs() + zone.half.y <= half_plane + 1e-4);
        }
    }

    #[test]
    fn close_zone_sits_top_right() {
        let content = sample_content();
        let layout = render_dialogue_panel("Maya", "Admissions", &content, None).unwrap();
        assert!(layout.close.center.x > 0.0);
        assert!(layout.close.center.y > 0.0);
    }

    #[test]
    fn option_zones_descend_in_order() {
        let content = sample_content();
        let layout = render_dialogue_panel("Maya", "Admissions", &content, None).unwrap();
        for pair in layout.options.windows(2) {
            assert!(pair[0].center.y > pair[1].center.y);
        }
    }

    #[test]
    fn centered_pixels_map_to_the_panel_center() {
        let side = PANEL_CANVAS_SIZE as i32;
        let zone = zone_from_pixels(side / 2 - 10, side / 2 - 10, 20, 20);
        assert!(zone.center.length() < 1e-4);
        assert!(zone.contains(Vec2::ZERO));
        assert!(!zone.contains(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn overlong_bodies_are_cut_before_the_options() {
        let long_line = "lorem ipsum dolor sit amet consectetur adipiscing elit".repeat(6);
        let content = PanelContent {
            lines: vec![long_line; 20],
            options: vec!["Back".to_string()],
        };
        let layout = render_dialogue_panel("Maya", "Admissions", &content, None).unwrap();
        let half_plane = PANEL_WORLD_SIZE * TEXT_PLANE_SCALE / 2.0;
        let zone = layout.options[0];
        assert!(zone.center.y.abs() + zone.half.y <= half_plane + 1e-4);
    }

    #[test]
    fn hover_changes_the_raster() {
        let content = sample_content();
        let plain = render_dialogue_panel("Maya", "Admissions", &content, None).unwrap();
        let hovered = render_dialogue_panel("Maya", "Admissions", &content, Some(0)).unwrap();
        assert_ne!(plain.canvas.pixels(), hovered.canvas.pixels());
    }
}
