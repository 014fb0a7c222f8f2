//! Type-bar animation state
//!
//! One bar per distinct glyph key, created on first strike and kept for
//! the session. The timed state transitions live in the sequencer; the
//! bar only knows its guard, its stage, and the angles the renderer
//! eases between.

use std::collections::HashMap;

/// Where a bar is in its swing. The ink lands at the striking to
/// returning transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrikeStage {
    #[default]
    Resting,
    Striking,
    Returning,
}

/// Animated state of one type bar.
#[derive(Clone, Debug)]
pub struct TypeBar {
    /// Glyph key this bar strikes (case-folded)
    pub key: String,

    /// Guard: a bar mid-swing drops repeat visuals, never the print
    pub is_animating: bool,

    pub stage: StrikeStage,

    /// Deflection the bar is converging toward, radians
    pub target_angle: f32,

    /// Deflection rendered this frame, radians
    pub current_angle: f32,
}

impl TypeBar {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            is_animating: false,
            stage: StrikeStage::Resting,
            target_angle: 0.0,
            current_angle: 0.0,
        }
    }

    /// One smoothing step toward the target. Recomputed from current
    /// state every tick, so skipped frames self-correct.
    pub fn ease(&mut self, k: f32) {
        self.current_angle += (self.target_angle - self.current_angle) * k;
        if (self.target_angle - self.current_angle).abs() < 1e-4 {
            self.current_angle = self.target_angle;
        }
    }

    /// True when the bar has visually settled at rest
    pub fn at_rest(&self) -> bool {
        self.stage == StrikeStage::Resting
            && self.target_angle == 0.0
            && self.current_angle == 0.0
    }
}

/// Registry of every bar the session has struck so far.
#[derive(Debug, Default)]
pub struct TypeBarSet {
    bars: HashMap<String, TypeBar>,
}

impl TypeBarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bar for a key, created at rest on first use
    pub fn bar_mut(&mut self, key: &str) -> &mut TypeBar {
        self.bars
            .entry(key.to_string())
            .or_insert_with(|| TypeBar::new(key))
    }

    pub fn get(&self, key: &str) -> Option<&TypeBar> {
        self.bars.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeBar> {
        self.bars.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TypeBar> {
        self.bars.values_mut()
    }

    /// Drop every bar back to rest (session reset)
    pub fn rest_all(&mut self) {
        for bar in self.bars.values_mut() {
            bar.is_animating = false;
            bar.stage = StrikeStage::Resting;
            bar.target_angle = 0.0;
            bar.current_angle = 0.0;
        }
    }
}
