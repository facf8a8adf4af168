//! CPU rasterization for dialogue panel textures.
//!
//! Panels are drawn into an RGBA8 buffer with the same bitmap font the
//! screen overlay uses, then uploaded as a texture. The font is monospace
//! (6x8 pixel cells), which keeps measurement and word wrap exact.

use crate::vertex::glyph_rows;
use thiserror::Error;

/// Largest allowed canvas side, to catch bogus dimensions before the
/// allocation.
const MAX_CANVAS_SIDE: u32 = 4096;

/// Failure to create a panel raster store.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("cannot allocate a {0}x{1} canvas")]
    NoBackingStore(u32, u32),
}

/// An RGBA8 pixel buffer with simple 2D drawing operations.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, PaintError> {
        if width == 0 || height == 0 || width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(PaintError::NoBackingStore(width, height));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn put(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color);
    }

    /// Fill the whole canvas.
    pub fn fill(&mut self, color: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: [u8; 4]) {
        for py in y..y + h as i32 {
            for px in x..x + w as i32 {
                self.put(px, py, color);
            }
        }
    }

    /// Fill a rectangle with rounded corners (used for option buttons).
    pub fn fill_rounded_rect(&mut self, x: i32, y: i32, w: u32, h: u32, r: u32, color: [u8; 4]) {
        let r = r.min(w / 2).min(h / 2) as i32;
        for py in y..y + h as i32 {
            for px in x..x + w as i32 {
                let dx = (px - x).min(x + w as i32 - 1 - px);
                let dy = (py - y).min(y + h as i32 - 1 - py);
                if dx < r && dy < r {
                    let cx = r - 1 - dx;
                    let cy = r - 1 - dy;
                    if cx * cx + cy * cy > r * r {
                        continue;
                    }
                }
                self.put(px, py, color);
            }
        }
    }

    /// Draw a one-pixel-wide rectangle outline (scaled by `thickness`).
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: u32, h: u32, thickness: u32, color: [u8; 4]) {
        self.fill_rect(x, y, w, thickness, color);
        self.fill_rect(x, y + h as i32 - thickness as i32, w, thickness, color);
        self.fill_rect(x, y, thickness, h, color);
        self.fill_rect(x + w as i32 - thickness as i32, y, thickness, h, color);
    }

    /// Draw text with the 5x7 bitmap font. `scale` multiplies the 6x8 cell.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: [u8; 4]) {
        let scale = scale.max(1) as i32;
        let mut cx = x;
        for ch in text.chars() {
            let rows = glyph_rows(ch);
            for (gy, bits) in rows.iter().enumerate() {
                for gx in 0..5 {
                    if (bits >> (4 - gx)) & 1 != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.put(
                                    cx + gx as i32 * scale + sx,
                                    y + gy as i32 * scale + sy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cx += 6 * scale;
        }
    }
}

/// Width in pixels of `text` at the given scale (monospace cells).
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * 6 * scale.max(1)
}

/// Word-wrap `text` to lines of at most `max_chars` characters. Words longer
/// than a line are split hard. Empty input yields no lines.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current.chars().count() + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if word_len > max_chars {
            // Hard-split an oversized word.
            let mut rest: Vec<char> = word.chars().collect();
            while rest.len() > max_chars {
                let tail = rest.split_off(max_chars);
                lines.push(rest.iter().collect());
                rest = tail;
            }
            current = rest.iter().collect();
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Truncate `text` to `max_chars`, appending an ellipsis when it was cut.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Canvas::new(0, 100).is_err());
        assert!(Canvas::new(100, 0).is_err());
        assert!(Canvas::new(100_000, 4).is_err());
        assert!(Canvas::new(512, 512).is_ok());
    }

    #[test]
    fn fill_rect_clips_at_edges() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.fill_rect(-2, -2, 4, 4, [255, 0, 0, 255]);
        // (1, 1) painted, (2, 2) not.
        let at = |x: u32, y: u32| {
            let i = ((y * 8 + x) * 4) as usize;
            canvas.pixels()[i]
        };
        assert_eq!(at(1, 1), 255);
        assert_eq!(at(2, 2), 0);
    }

    #[test]
    fn draw_text_marks_pixels() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.draw_text(0, 0, "A", 1, [255, 255, 255, 255]);
        assert!(canvas.pixels().iter().any(|&p| p == 255));
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap_text("what are the opening hours of the library", 14);
        assert!(lines.iter().all(|l| l.chars().count() <= 14));
        assert_eq!(lines.join(" "), "what are the opening hours of the library");
    }

    #[test]
    fn wrap_splits_oversized_words() {
        let lines = wrap_text("antidisestablishmentarianism", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.concat(), "antidisestablishmentarianism");
    }

    #[test]
    fn ellipsize_only_when_needed() {
        assert_eq!(ellipsize("short", 10), "short");
        assert_eq!(ellipsize("a very long string", 7), "a ve...");
    }

    #[test]
    fn text_width_is_monospace() {
        assert_eq!(text_width("abcd", 1), 24);
        assert_eq!(text_width("abcd", 2), 48);
    }
}
