//! Mechanical Typewriter Simulator WASM Module
//!
//! This is the main WASM module for the typewriter simulator.
//! It owns the typing state machine: cursor/margin tracking, the
//! character document, the baked-ink paper window, and the strike
//! animation timeline. The browser front end captures keystrokes,
//! blits the paper raster, and plays back the returned sound cues.

pub mod models;
pub mod renderers;
pub mod animation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use models::core::*;
pub use models::position::*;
pub use models::cursor::Cursor;
pub use models::session::TypingSession;
pub use animation::sequencer::{FrameUpdate, SoundCue};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Typewriter simulator WASM module initialized");
}
