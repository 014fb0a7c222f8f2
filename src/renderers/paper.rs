//! Scrolling paper window
//!
//! The logical page is unbounded; what the machine keeps is one
//! window-sized raster of baked ink. Writes stamp a glyph slug with the
//! small mechanical imperfections of a real machine - offset and
//! rotation jitter, uneven ink transfer, the occasional double-strike
//! ghost. When the write position runs past the bottom margin the
//! window content is blitted upward and the rows above the shift are
//! gone for good: history survives only as baked pixels, and only the
//! document retains replayable state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::models::core::Document;
use crate::models::position::Position;
use crate::renderers::glyphs::{self, GLYPH_COLS, GLYPH_ROWS};
use crate::renderers::raster::Raster;

// Ink deposit level before opacity variance is applied
const INK_LEVEL: f32 = 215.0;

// Jitter bounds emulating mechanical imprecision
const JITTER_PX: f32 = 1.5;
const JITTER_RAD: f32 = 0.05;

// Per-glyph ink transfer variance
const MIN_OPACITY: f32 = 0.62;

// Chance of a faint duplicate offset by one pixel
const GHOST_CHANCE: f32 = 0.07;

// Speckle noise baked into a cleared surface
const SPECKLE_DENSITY: usize = 96; // one speckle per this many pixels
const SPECKLE_MAX: u8 = 12;

/// Tunables for the paper window.
///
/// The scroll shift and the bottom margin (which doubles as where the
/// pen comes to rest after a scroll) are tuned values, not invariants.
#[derive(Clone, Copy, Debug)]
pub struct PaperConfig {
    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,

    /// Advance width of one glyph box
    pub char_width: f32,

    /// Vertical distance between consecutive baselines
    pub line_height: f32,

    /// Rows discarded per scroll, in line heights
    pub scroll_shift_lines: f32,

    /// Crossing this distance from the bottom edge triggers a scroll
    pub bottom_margin: f32,
}

impl PaperConfig {
    /// Config with the tuned scroll defaults
    pub fn new(width: u32, height: u32, char_width: f32, line_height: f32) -> Self {
        Self {
            width,
            height,
            char_width,
            line_height,
            scroll_shift_lines: 2.0,
            bottom_margin: line_height,
        }
    }
}

/// The visible window of the page, as baked ink.
///
/// Writes are append-only from the caller's side: the buffer never
/// redraws historical characters individually.
#[derive(Debug)]
pub struct PaperBuffer {
    cfg: PaperConfig,
    raster: Raster,
    /// Last write position, window space. Always inside the window.
    pen: Position,
    /// Page-space y mapped to window row 0; grows with every scroll
    scroll_top: f32,
    rng: SmallRng,
    dirty: bool,
}

impl PaperBuffer {
    pub fn new(cfg: PaperConfig) -> Self {
        Self::build(cfg, SmallRng::from_entropy())
    }

    /// Seeded constructor for reproducible surfaces in tests.
    pub fn with_seed(cfg: PaperConfig, seed: u64) -> Self {
        Self::build(cfg, SmallRng::seed_from_u64(seed))
    }

    fn build(cfg: PaperConfig, rng: SmallRng) -> Self {
        let mut paper = Self {
            raster: Raster::new(cfg.width, cfg.height),
            pen: Position::new(0.0, cfg.line_height),
            scroll_top: 0.0,
            rng,
            dirty: true,
            cfg,
        };
        paper.clear();
        paper
    }

    pub fn config(&self) -> &PaperConfig {
        &self.cfg
    }

    pub fn width(&self) -> u32 {
        self.cfg.width
    }

    pub fn height(&self) -> u32 {
        self.cfg.height
    }

    /// Raw window bytes, row-major, one ink byte per pixel
    pub fn pixels(&self) -> &[u8] {
        self.raster.as_bytes()
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Page-space y currently mapped to the top of the window
    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    /// Last write position in window space
    pub fn pen(&self) -> Position {
        self.pen
    }

    /// True once anything changed since the last take; reading resets it
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Repaint the full background (base plus speckle) and reset the
    /// write position to the top of the page.
    pub fn clear(&mut self) {
        self.raster.fill(0);
        self.speckle_band(0, self.cfg.height);
        self.pen = Position::new(0.0, self.cfg.line_height);
        self.scroll_top = 0.0;
        self.dirty = true;
    }

    /// Bake one glyph mark at a page-space baseline position.
    ///
    /// Scrolls first if the position runs past the bottom margin.
    /// Returns whether a scroll happened. Whitespace moves the pen but
    /// deposits nothing.
    pub fn write(&mut self, grapheme: &str, page_pos: Position) -> bool {
        let scrolled = self.scroll_if_needed(page_pos.y);
        let wx = page_pos.x;
        let wy = page_pos.y - self.scroll_top;
        self.pen = Position::new(wx, wy);

        let Some(rows) = glyphs::rows_for(grapheme) else {
            return scrolled;
        };

        let dx = self.rng.gen_range(-JITTER_PX..=JITTER_PX);
        let dy = self.rng.gen_range(-JITTER_PX..=JITTER_PX);
        let rot = self.rng.gen_range(-JITTER_RAD..=JITTER_RAD);
        let opacity = self.rng.gen_range(MIN_OPACITY..=1.0);

        self.stamp(&rows, wx + dx, wy + dy, rot, opacity);
        if self.rng.gen::<f32>() < GHOST_CHANCE {
            self.stamp(&rows, wx + dx + 1.0, wy + dy, rot, opacity * 0.35);
        }

        self.dirty = true;
        scrolled
    }

    /// Shift the window when the mapped write row crosses the bottom
    /// margin: surviving rows are blitted into a fresh cleared surface
    /// at the top, the discarded rows are gone exactly, and the freshly
    /// exposed band gets its own speckle.
    pub fn scroll_if_needed(&mut self, page_y: f32) -> bool {
        let shift = (self.cfg.scroll_shift_lines * self.cfg.line_height)
            .round()
            .max(1.0) as u32;
        let limit = self.cfg.height as f32 - self.cfg.bottom_margin;
        let mut scrolled = false;

        while page_y - self.scroll_top > limit {
            let kept = self.cfg.height.saturating_sub(shift);
            let mut fresh = Raster::new(self.cfg.width, self.cfg.height);
            fresh.blit_rows(&self.raster, shift, 0, kept);
            self.raster = fresh;
            self.speckle_band(kept, self.cfg.height);
            self.scroll_top += shift as f32;
            self.pen.y -= shift as f32;
            scrolled = true;
        }

        if scrolled {
            self.dirty = true;
        }
        scrolled
    }

    /// Rebuild the window from the document after a geometry change.
    ///
    /// Jitter is sampled fresh, so the pixels are equivalent, not
    /// identical - exact historical ink is not re-derivable by design.
    pub fn redraw(&mut self, document: &Document) {
        self.clear();
        for placed in &document.chars {
            self.write(&placed.s, Position::new(placed.x, placed.y));
        }
    }

    /// Swap in a new window size and start from a clean page.
    pub fn resize(&mut self, cfg: PaperConfig) {
        self.cfg = cfg;
        self.raster = Raster::new(cfg.width, cfg.height);
        self.clear();
    }

    fn speckle_band(&mut self, from_row: u32, to_row: u32) {
        if from_row >= to_row {
            return;
        }
        let band_px = (self.cfg.width as usize) * ((to_row - from_row) as usize);
        for _ in 0..band_px / SPECKLE_DENSITY {
            let x = self.rng.gen_range(0..self.cfg.width) as i32;
            let y = self.rng.gen_range(from_row..to_row) as i32;
            let v = self.rng.gen_range(3..=SPECKLE_MAX);
            self.raster.put(x, y, v);
        }
    }

    /// Stamp a slug bitmap scaled to the glyph box, rotated about its
    /// center, anchored with its bottom edge on the baseline.
    fn stamp(&mut self, rows: &[u8; 7], x: f32, baseline: f32, rot: f32, opacity: f32) {
        let gw = self.cfg.char_width * 0.85;
        let gh = self.cfg.line_height * 0.6;
        let cx = x + gw / 2.0;
        let cy = baseline - gh / 2.0;
        let (sin, cos) = rot.sin_cos();

        let reach = (gw.max(gh)) / 2.0 + 2.0;
        let x0 = (cx - reach).floor() as i32;
        let x1 = (cx + reach).ceil() as i32;
        let y0 = (cy - reach).floor() as i32;
        let y1 = (cy + reach).ceil() as i32;

        for py in y0..=y1 {
            for px in x0..=x1 {
                // Map the destination pixel back through the rotation
                // into slug grid coordinates
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let ux = cos * dx + sin * dy + gw / 2.0;
                let uy = -sin * dx + cos * dy + gh / 2.0;
                if ux < 0.0 || uy < 0.0 || ux >= gw || uy >= gh {
                    continue;
                }
                let col = (ux / gw * GLYPH_COLS as f32) as u32;
                let row = (uy / gh * GLYPH_ROWS as f32) as u32;
                if rows[row as usize] >> (GLYPH_COLS - 1 - col) & 1 == 1 {
                    let v = INK_LEVEL * opacity * self.rng.gen_range(0.8..1.0);
                    self.raster.deposit(px, py, v as u8);
                }
            }
        }
    }
}
