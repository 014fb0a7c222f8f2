//! Cursor and margin engine
//!
//! Tracks the insertion point in page space and decides where each typed
//! grapheme lands: incremental advance, direction switching for Hebrew
//! input, and line wraps at the margins. The engine is pure positional
//! logic; it never touches the document or the paper.

use serde::{Deserialize, Serialize};

use crate::models::position::{Direction, PageMetrics, Position};
use crate::utils::script;

/// How close (in character widths) the cursor must be to the margin it
/// is leaving before a direction switch snaps it to the opposite margin.
/// Without the snap, mixed-direction runs overlap at the seam.
const SEAM_SNAP_CHARS: f32 = 2.0;

/// The insertion point: position, direction mode, and the metrics that
/// bound it. Invariant: `left_margin <= position.x <= right_margin`
/// after every operation; a step past a margin wraps to a new line.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Cursor {
    position: Position,
    direction: Direction,
    metrics: PageMetrics,
}

impl Cursor {
    /// Create a cursor at the home position of a fresh page.
    pub fn new(metrics: PageMetrics) -> Self {
        Self {
            position: metrics.origin(),
            direction: Direction::Ltr,
            metrics,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn metrics(&self) -> &PageMetrics {
        &self.metrics
    }

    /// Swap in new metrics after a reflow.
    ///
    /// A reflow is not a typing event, so this is the one place the
    /// position is pulled inside the margins instead of wrapped.
    pub fn set_metrics(&mut self, metrics: PageMetrics) {
        self.metrics = metrics;
        self.position.x = self
            .position
            .x
            .clamp(metrics.left_margin, metrics.right_margin);
    }

    /// Return to the home position and direction.
    pub fn reset(&mut self) {
        self.position = self.metrics.origin();
        self.direction = Direction::Ltr;
    }

    /// Place one grapheme cluster and step the cursor past it.
    ///
    /// Returns the placement position. Switching script direction close
    /// to the margin being left snaps the cursor to the opposite margin
    /// first; otherwise movement is one character width in the current
    /// direction, wrapping at the margin.
    pub fn advance(&mut self, grapheme: &str) -> Position {
        let incoming = if script::is_rtl(grapheme) {
            Direction::Rtl
        } else {
            Direction::Ltr
        };
        if incoming != self.direction {
            self.switch_direction(incoming);
        }
        let placed = self.position;
        self.step_past();
        placed
    }

    /// Start a fresh line for the current direction mode.
    ///
    /// Returns the new position: the direction's home margin, one line
    /// height down.
    pub fn newline(&mut self) -> Position {
        self.position.y += self.metrics.line_height;
        self.position.x = match self.direction {
            Direction::Ltr => self.metrics.left_margin,
            Direction::Rtl => self.metrics.right_margin,
        };
        self.position
    }

    /// Track a programmatic placement (import replay).
    ///
    /// The grapheme is placed at exactly `pos`, bypassing the
    /// direction-switch snap, and the cursor steps past it so typed
    /// input continues from the correct spot.
    pub fn place_at(&mut self, grapheme: &str, pos: Position) {
        self.direction = if script::is_rtl(grapheme) {
            Direction::Rtl
        } else {
            Direction::Ltr
        };
        self.position = pos;
        self.step_past();
    }

    /// Step one character back toward the line start, stopping at the
    /// margin. Used by backspace; the next strike overtypes.
    pub fn step_back(&mut self) {
        let m = self.metrics;
        self.position.x = match self.direction {
            Direction::Ltr => (self.position.x - m.char_width).max(m.left_margin),
            Direction::Rtl => (self.position.x + m.char_width).min(m.right_margin),
        };
    }

    fn step_past(&mut self) {
        let m = self.metrics;
        match self.direction {
            Direction::Ltr => {
                self.position.x += m.char_width;
                if self.position.x > m.right_margin {
                    self.newline();
                }
            }
            Direction::Rtl => {
                self.position.x -= m.char_width;
                if self.position.x < m.left_margin {
                    self.newline();
                }
            }
        }
    }

    fn switch_direction(&mut self, incoming: Direction) {
        let m = self.metrics;
        let snap_zone = SEAM_SNAP_CHARS * m.char_width;
        match incoming {
            Direction::Rtl if self.position.x <= m.left_margin + snap_zone => {
                self.position.x = m.right_margin;
            }
            Direction::Ltr if self.position.x >= m.right_margin - snap_zone => {
                self.position.x = m.left_margin;
            }
            _ => {}
        }
        self.direction = incoming;
    }
}
