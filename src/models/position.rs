//! Page-space geometry for the typing engine
//!
//! Positions live in page space, which is unbounded on both axes; only
//! the paper window is finite. All placement decisions are made against
//! the metrics derived from the viewport and the active font.

use serde::{Deserialize, Serialize};

// Horizontal page inset, matching the front end's layout constant
const MARGIN_PX: f32 = 60.0;

/// A 2D coordinate in page space.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Whether the cursor currently advances left-to-right or right-to-left.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Font and viewport derived metrics the placement logic runs against.
///
/// The margins are page-space boundaries: stepping past one triggers a
/// wrap, never a clamp.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PageMetrics {
    /// Advance width of one glyph box
    pub char_width: f32,

    /// Vertical distance between consecutive lines
    pub line_height: f32,

    /// Leftmost insertion x
    pub left_margin: f32,

    /// Rightmost insertion x
    pub right_margin: f32,
}

impl PageMetrics {
    /// Derive metrics from the viewport width and the active font box.
    pub fn from_viewport(viewport_width: f32, char_width: f32, line_height: f32) -> Self {
        // Narrow viewports get a proportional inset so the margins
        // never cross each other
        let inset = MARGIN_PX.min(viewport_width / 4.0);
        Self {
            char_width,
            line_height,
            left_margin: inset,
            right_margin: (viewport_width - inset).max(inset),
        }
    }

    /// Usable line width between the margins
    pub fn line_width(&self) -> f32 {
        self.right_margin - self.left_margin
    }

    /// The home position of a fresh page: left margin, first line down
    pub fn origin(&self) -> Position {
        Position::new(self.left_margin, self.line_height)
    }
}
