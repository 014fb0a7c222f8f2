//! Typing session
//!
//! The explicitly constructed object that ties one machine together:
//! the document, the cursor/margin engine, the paper window, and the
//! strike sequencer. The WASM API layer owns one of these behind its
//! mutex; nothing in here knows about that global, so multiple sessions
//! are just multiple constructions.

use crate::animation::sequencer::{FrameUpdate, Sequencer, SoundCue};
use crate::models::core::{Document, ImportError, PlacedChar};
use crate::models::cursor::Cursor;
use crate::models::position::{Direction, PageMetrics, Position};
use crate::renderers::paper::{PaperBuffer, PaperConfig};
use crate::utils::grapheme;

/// Columns from the line-end margin at which the bell rings
const BELL_CHARS: f32 = 5.0;

/// Resize bursts settle for this long before the reflow runs
const REFLOW_DEBOUNCE_MS: f64 = 150.0;

#[derive(Clone, Copy, Debug)]
struct PendingReflow {
    due_ms: f64,
    width: u32,
    height: u32,
}

/// One typewriter: document, cursor, paper, and animation state.
pub struct TypingSession {
    document: Document,
    cursor: Cursor,
    paper: PaperBuffer,
    sequencer: Sequencer,
    bell_rung: bool,
    pending_reflow: Option<PendingReflow>,
}

impl TypingSession {
    /// Build a session for a viewport-sized paper window.
    pub fn new(width: u32, height: u32, char_width: f32, line_height: f32) -> Self {
        let metrics = PageMetrics::from_viewport(width as f32, char_width, line_height);
        Self::with_paper(
            metrics,
            PaperBuffer::new(PaperConfig::new(width, height, char_width, line_height)),
        )
    }

    /// Seeded variant for reproducible paper surfaces in tests.
    pub fn with_seed(width: u32, height: u32, char_width: f32, line_height: f32, seed: u64) -> Self {
        let metrics = PageMetrics::from_viewport(width as f32, char_width, line_height);
        Self::with_paper(
            metrics,
            PaperBuffer::with_seed(PaperConfig::new(width, height, char_width, line_height), seed),
        )
    }

    fn with_paper(metrics: PageMetrics, paper: PaperBuffer) -> Self {
        Self {
            document: Document::new(),
            cursor: Cursor::new(metrics),
            sequencer: Sequencer::new(metrics.line_width()),
            paper,
            bell_rung: false,
            pending_reflow: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn paper(&self) -> &PaperBuffer {
        &self.paper
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Type a string: one placement, one document append, and one
    /// strike timeline per grapheme cluster. The append is synchronous;
    /// only the ink waits for the strike timer.
    pub fn add_text(&mut self, text: &str, now: f64) {
        for cluster in grapheme::graphemes(text) {
            let line_y = self.cursor.position().y;
            let placed_at = self.cursor.advance(cluster);
            let placed = PlacedChar::new(cluster, placed_at.x, placed_at.y);

            self.document.push(placed.clone());
            self.sequencer.strike(
                placed,
                self.cursor.metrics().char_width,
                now,
                &mut self.paper,
            );

            if self.cursor.position().y > line_y {
                // Stepping past the margin wrapped the line
                self.line_returned();
            }
            self.maybe_ring_bell();
        }
    }

    /// Place one character at exact coordinates (import replay).
    /// Ink lands immediately; no strike timeline is scheduled.
    pub fn add_char_at(&mut self, s: &str, x: f32, y: f32) {
        let pos = Position::new(x, y);
        self.cursor.place_at(s, pos);
        self.document.push(PlacedChar::new(s, x, y));
        self.paper.write(s, pos);
    }

    /// Carriage return plus line feed.
    pub fn handle_newline(&mut self) {
        self.cursor.newline();
        self.line_returned();
    }

    /// Step the carriage back one character; the next strike overtypes.
    /// The document is append-only, so nothing is deleted.
    pub fn backspace(&mut self) {
        self.cursor.step_back();
        let char_width = self.cursor.metrics().char_width;
        self.sequencer.carriage_mut().nudge(char_width);
        self.sequencer.cue(SoundCue::KeyDip);
    }

    /// Serialize the document to its transport string.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        self.document.export()
    }

    /// Replace the session contents with an exported document.
    ///
    /// Fails closed: the payload is parsed in full before anything is
    /// touched, so a malformed string leaves the current document,
    /// cursor, and paper exactly as they were.
    pub fn import(&mut self, data: &str) -> Result<(), ImportError> {
        let records = Document::parse_export(data)?;
        self.reset();
        let count = records.len();
        for record in records {
            self.add_char_at(&record.s, record.x, record.y);
        }
        log::info!("imported {} characters", count);
        Ok(())
    }

    /// New page: empty document, home cursor, clean paper. Safe
    /// mid-animation; in-flight strike timers are invalidated.
    pub fn reset(&mut self) {
        self.document.clear();
        self.cursor.reset();
        self.paper.clear();
        self.sequencer.invalidate();
        self.bell_rung = false;
        self.pending_reflow = None;
    }

    /// Note a viewport resize. Bursts coalesce: the reflow runs once,
    /// with the latest size, after the debounce delay.
    pub fn resize(&mut self, width: u32, height: u32, now: f64) {
        self.pending_reflow = Some(PendingReflow {
            due_ms: now + REFLOW_DEBOUNCE_MS,
            width,
            height,
        });
    }

    /// Advance the animation clock one frame.
    pub fn tick(&mut self, now: f64) -> FrameUpdate {
        if let Some(reflow) = self.pending_reflow {
            if now >= reflow.due_ms {
                self.pending_reflow = None;
                self.apply_reflow(reflow.width, reflow.height);
            }
        }
        self.sequencer.tick(now, &mut self.paper)
    }

    /// Characters typed so far
    pub fn character_count(&self) -> usize {
        self.document.len()
    }

    fn apply_reflow(&mut self, width: u32, height: u32) {
        let old = *self.paper.config();
        let metrics =
            PageMetrics::from_viewport(width as f32, old.char_width, old.line_height);
        self.cursor.set_metrics(metrics);

        let mut cfg = PaperConfig::new(width, height, old.char_width, old.line_height);
        cfg.scroll_shift_lines = old.scroll_shift_lines;
        cfg.bottom_margin = old.bottom_margin;
        self.paper.resize(cfg);

        // Baked pixels are invalid after a geometry change; the vector
        // document is not
        self.paper.redraw(&self.document);
        self.sequencer.carriage_mut().set_travel(metrics.line_width());

        log::debug!("reflowed to {}x{}", width, height);
    }

    fn line_returned(&mut self) {
        self.bell_rung = false;
        self.sequencer.carriage_mut().return_home();
        self.sequencer.cue(SoundCue::CarriageReturn);
    }

    fn maybe_ring_bell(&mut self) {
        if self.bell_rung {
            return;
        }
        let m = *self.cursor.metrics();
        let x = self.cursor.position().x;
        let zone = BELL_CHARS * m.char_width;
        let near_line_end = match self.cursor.direction() {
            Direction::Ltr => x >= m.right_margin - zone,
            Direction::Rtl => x <= m.left_margin + zone,
        };
        if near_line_end {
            self.sequencer.cue(SoundCue::Bell);
            self.bell_rung = true;
        }
    }
}
