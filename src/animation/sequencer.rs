//! Keystroke timeline sequencer
//!
//! Fans one logical "type a character" event out into timed side
//! effects: the bar swings on a fixed delay, the ink lands while the
//! captured position is still the right one, the guard releases after
//! the swing home. Timers are due-time entries drained by `tick`, which
//! the front end calls once per rendered frame; the visual angles and
//! the carriage chase their targets by exponential smoothing every
//! tick, decoupled from the timed transitions.
//!
//! A generation counter makes a mid-animation reset safe: entries
//! scheduled before the reset carry a stale generation and no-op
//! instead of inking the fresh page.

use serde::Serialize;

use crate::animation::carriage::Carriage;
use crate::animation::typebar::{StrikeStage, TypeBarSet};
use crate::models::core::PlacedChar;
use crate::models::position::Position;
use crate::renderers::paper::PaperBuffer;

/// Delay between the key dip and the ink landing
pub const STRIKE_MS: f64 = 70.0;

/// Delay after the imprint before the bar's guard releases
pub const RETURN_MS: f64 = 110.0;

// Exponential smoothing factor applied per tick
const SMOOTHING: f32 = 0.25;

// Full deflection of a striking bar, radians
const STRIKE_ANGLE: f32 = 1.15;

/// Playback cues for the front end's audio collaborator.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    KeyDip,
    Imprint,
    Bell,
    CarriageReturn,
    PaperFeed,
}

/// One bar the renderer needs to move this frame.
#[derive(Serialize, Clone, Debug)]
pub struct BarFrame {
    pub key: String,
    pub angle: f32,
}

/// Per-frame snapshot handed back to the front end.
#[derive(Serialize, Clone, Debug, Default)]
pub struct FrameUpdate {
    /// Bars not at rest, with their smoothed deflection
    pub bars: Vec<BarFrame>,

    /// Smoothed carriage offset
    pub carriage_x: f32,

    /// Whether the paper raster changed since the last frame
    pub paper_dirty: bool,

    /// Sound cues accumulated since the last frame, in order
    pub cues: Vec<SoundCue>,
}

// Work captured at schedule time. The imprint carries the full placed
// character so a late firing never reads live cursor state.
#[derive(Clone, Debug)]
enum Action {
    Imprint { key: String, glyph: PlacedChar },
    Settle { key: String },
}

#[derive(Clone, Debug)]
struct Scheduled {
    due_ms: f64,
    generation: u64,
    action: Action,
}

/// The strike timeline engine.
pub struct Sequencer {
    pending: Vec<Scheduled>,
    generation: u64,
    bars: TypeBarSet,
    carriage: Carriage,
    cues: Vec<SoundCue>,
}

impl Sequencer {
    /// `travel` bounds the carriage range; usually the line width.
    pub fn new(travel: f32) -> Self {
        Self {
            pending: Vec::new(),
            generation: 0,
            bars: TypeBarSet::new(),
            carriage: Carriage::new(travel),
            cues: Vec::new(),
        }
    }

    pub fn bars(&self) -> &TypeBarSet {
        &self.bars
    }

    pub fn carriage(&self) -> &Carriage {
        &self.carriage
    }

    pub fn carriage_mut(&mut self) -> &mut Carriage {
        &mut self.carriage
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queue a cue for the next frame
    pub fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Invalidate every in-flight timer and drop the moving parts back
    /// to rest. Stale entries stay queued and no-op when they fire.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.bars.rest_all();
        self.carriage.reset();
        self.cues.clear();
    }

    /// Begin the strike timeline for one typed character.
    ///
    /// The per-bar guard only drops the visual motion: a repeat strike
    /// of a bar mid-swing still inks the paper immediately, so text
    /// placement is never blocked by animation.
    pub fn strike(
        &mut self,
        glyph: PlacedChar,
        char_width: f32,
        now: f64,
        paper: &mut PaperBuffer,
    ) {
        self.cues.push(SoundCue::KeyDip);
        self.carriage.nudge(-char_width);

        // The space bar moves the carriage without swinging a bar
        if glyph.s.chars().next().map_or(true, char::is_whitespace) {
            return;
        }

        let key = bar_key(&glyph.s);
        let bar = self.bars.bar_mut(&key);
        if bar.is_animating {
            let scrolled = paper.write(&glyph.s, Position::new(glyph.x, glyph.y));
            self.cues.push(SoundCue::Imprint);
            if scrolled {
                self.cues.push(SoundCue::PaperFeed);
            }
            return;
        }

        bar.is_animating = true;
        bar.stage = StrikeStage::Striking;
        bar.target_angle = STRIKE_ANGLE;

        self.pending.push(Scheduled {
            due_ms: now + STRIKE_MS,
            generation: self.generation,
            action: Action::Imprint {
                key: key.clone(),
                glyph,
            },
        });
        self.pending.push(Scheduled {
            due_ms: now + STRIKE_MS + RETURN_MS,
            generation: self.generation,
            action: Action::Settle { key },
        });
    }

    /// Fire every due timer in due order, then smooth the moving parts
    /// one step. Safe to call at any rate; a skipped frame just means a
    /// bigger step next time.
    pub fn tick(&mut self, now: f64, paper: &mut PaperBuffer) -> FrameUpdate {
        let mut pending = std::mem::take(&mut self.pending);
        pending.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for entry in pending {
            if entry.due_ms > now {
                self.pending.push(entry);
                continue;
            }
            if entry.generation != self.generation {
                continue; // cancelled by a reset while in flight
            }
            match entry.action {
                Action::Imprint { key, glyph } => {
                    let scrolled = paper.write(&glyph.s, Position::new(glyph.x, glyph.y));
                    let bar = self.bars.bar_mut(&key);
                    bar.stage = StrikeStage::Returning;
                    bar.target_angle = 0.0;
                    self.cues.push(SoundCue::Imprint);
                    if scrolled {
                        self.cues.push(SoundCue::PaperFeed);
                    }
                }
                Action::Settle { key } => {
                    let bar = self.bars.bar_mut(&key);
                    bar.is_animating = false;
                    bar.stage = StrikeStage::Resting;
                }
            }
        }

        for bar in self.bars.iter_mut() {
            bar.ease(SMOOTHING);
        }
        self.carriage.ease(SMOOTHING);

        FrameUpdate {
            bars: self
                .bars
                .iter()
                .filter(|bar| !bar.at_rest())
                .map(|bar| BarFrame {
                    key: bar.key.clone(),
                    angle: bar.current_angle,
                })
                .collect(),
            carriage_x: self.carriage.current(),
            paper_dirty: paper.take_dirty(),
            cues: std::mem::take(&mut self.cues),
        }
    }
}

// A bar serves every case of its glyph, like the physical slug would
fn bar_key(grapheme: &str) -> String {
    grapheme.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderers::paper::PaperConfig;

    fn test_paper() -> PaperBuffer {
        PaperBuffer::with_seed(PaperConfig::new(200, 120, 12.0, 24.0), 3)
    }

    fn placed(s: &str) -> PlacedChar {
        PlacedChar::new(s, 60.0, 24.0)
    }

    #[test]
    fn test_strike_schedules_imprint_and_settle() {
        let mut seq = Sequencer::new(100.0);
        let mut paper = test_paper();
        paper.take_dirty(); // drain the construction repaint

        seq.strike(placed("a"), 12.0, 0.0, &mut paper);
        assert_eq!(seq.pending_len(), 2);
        assert!(seq.bars().get("A").unwrap().is_animating);

        // Before the strike delay nothing has landed
        let frame = seq.tick(STRIKE_MS / 2.0, &mut paper);
        assert!(!frame.paper_dirty);

        // The imprint fires at the strike delay
        let frame = seq.tick(STRIKE_MS + 1.0, &mut paper);
        assert!(frame.paper_dirty);
        assert!(frame.cues.contains(&SoundCue::Imprint));

        // The guard releases after the return delay
        let frame = seq.tick(STRIKE_MS + RETURN_MS + 1.0, &mut paper);
        assert!(!seq.bars().get("A").unwrap().is_animating);
        assert!(!frame.cues.contains(&SoundCue::Imprint));
        assert_eq!(seq.pending_len(), 0);
    }

    #[test]
    fn test_repeat_strike_prints_without_retrigger() {
        let mut seq = Sequencer::new(100.0);
        let mut paper = test_paper();
        paper.take_dirty();

        seq.strike(placed("a"), 12.0, 0.0, &mut paper);
        seq.strike(placed("a"), 12.0, 5.0, &mut paper);

        // The second strike inked immediately instead of queueing
        assert_eq!(seq.pending_len(), 2);
        assert!(paper.take_dirty());
        assert!(seq.bars().get("A").unwrap().is_animating);
    }

    #[test]
    fn test_different_keys_animate_independently() {
        let mut seq = Sequencer::new(100.0);
        let mut paper = test_paper();

        seq.strike(placed("a"), 12.0, 0.0, &mut paper);
        seq.strike(placed("b"), 12.0, 0.0, &mut paper);

        assert_eq!(seq.pending_len(), 4);
        assert!(seq.bars().get("A").unwrap().is_animating);
        assert!(seq.bars().get("B").unwrap().is_animating);
    }

    #[test]
    fn test_stale_timers_noop_after_invalidate() {
        let mut seq = Sequencer::new(100.0);
        let mut paper = test_paper();

        seq.strike(placed("a"), 12.0, 0.0, &mut paper);
        seq.invalidate();
        paper.clear();
        paper.take_dirty();

        let frame = seq.tick(STRIKE_MS + RETURN_MS + 1.0, &mut paper);
        assert!(!frame.paper_dirty, "stale imprint must not ink the fresh page");
        assert_eq!(seq.pending_len(), 0);
    }

    #[test]
    fn test_smoothing_converges_between_timers() {
        let mut seq = Sequencer::new(100.0);
        let mut paper = test_paper();

        seq.strike(placed("a"), 12.0, 0.0, &mut paper);
        let first = seq.tick(1.0, &mut paper);
        let second = seq.tick(2.0, &mut paper);

        let a1 = first.bars[0].angle;
        let a2 = second.bars[0].angle;
        assert!(a1 > 0.0);
        assert!(a2 > a1, "angle keeps chasing the strike target");
    }

    #[test]
    fn test_carriage_follows_prints_and_returns() {
        let mut seq = Sequencer::new(100.0);
        let mut paper = test_paper();

        seq.strike(placed("a"), 12.0, 0.0, &mut paper);
        assert_eq!(seq.carriage().target(), -12.0);

        seq.carriage_mut().return_home();
        assert_eq!(seq.carriage().target(), 0.0);
    }
}
