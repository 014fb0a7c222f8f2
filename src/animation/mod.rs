//! Animation module for the typewriter simulator
//!
//! The strike timeline: per-glyph type bars, the carriage spring, and
//! the sequencer that fans one keystroke out into timed side effects.

pub mod carriage;
pub mod sequencer;
pub mod typebar;

pub use carriage::Carriage;
pub use sequencer::{FrameUpdate, Sequencer, SoundCue};
pub use typebar::{StrikeStage, TypeBar, TypeBarSet};
