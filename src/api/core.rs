//! WASM API for the typing state machine
//!
//! This module provides the JavaScript-facing API for typing, the
//! animation clock, and the paper raster. The session lives behind a
//! mutex as the WASM-owned source of truth; the front end never holds
//! typewriter state of its own.

use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use crate::api::helpers::{self, serialize};
use crate::models::TypingSession;
use crate::{wasm_info, wasm_log};

// WASM-owned session storage (canonical source of truth)
lazy_static! {
    static ref SESSION: Mutex<Option<TypingSession>> = Mutex::new(None);
}

/// Lock the session storage, converting a poisoned lock into a JS error
pub(crate) fn lock_session() -> Result<MutexGuard<'static, Option<TypingSession>>, JsValue> {
    SESSION
        .lock()
        .map_err(|e| JsValue::from_str(&format!("Session lock poisoned: {}", e)))
}

// Fetch the live session or explain that there is none yet
fn with_session<T>(
    f: impl FnOnce(&mut TypingSession) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let mut guard = lock_session()?;
    let session = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("No session initialized - call initSession first"))?;
    f(session)
}

/// Create (or replace) the session for a paper window of the given
/// pixel size and glyph box.
#[wasm_bindgen(js_name = initSession)]
pub fn init_session(
    width: u32,
    height: u32,
    char_width: f32,
    line_height: f32,
) -> Result<(), JsValue> {
    wasm_info!(
        "initSession called: window {}x{}, glyph box {}x{}",
        width,
        height,
        char_width,
        line_height
    );
    let mut guard = lock_session()?;
    *guard = Some(TypingSession::new(width, height, char_width, line_height));
    Ok(())
}

/// Type text at the cursor, or place a single character at explicit
/// page coordinates when both are supplied (replay path).
#[wasm_bindgen(js_name = addCharacter)]
pub fn add_character(text: &str, x: Option<f32>, y: Option<f32>) -> Result<(), JsValue> {
    let now = helpers::now_ms();
    with_session(|session| {
        match (x, y) {
            (Some(x), Some(y)) => session.add_char_at(text, x, y),
            _ => session.add_text(text, now),
        }
        Ok(())
    })
}

/// Carriage return plus line feed
#[wasm_bindgen(js_name = handleNewline)]
pub fn handle_newline() -> Result<(), JsValue> {
    with_session(|session| {
        session.handle_newline();
        Ok(())
    })
}

/// Step the carriage back one character (overtype correction)
#[wasm_bindgen(js_name = backspace)]
pub fn backspace() -> Result<(), JsValue> {
    with_session(|session| {
        session.backspace();
        Ok(())
    })
}

/// Fresh page: clears the document, the cursor, and the paper.
/// Safe to call mid-animation.
#[wasm_bindgen(js_name = reset)]
pub fn reset() -> Result<(), JsValue> {
    wasm_info!("reset called");
    with_session(|session| {
        session.reset();
        Ok(())
    })
}

/// Advance the animation clock. Call once per rendered frame with the
/// performance-clock timestamp; returns the frame's bar angles,
/// carriage offset, paper dirty flag, and sound cues.
#[wasm_bindgen(js_name = tick)]
pub fn tick(now: f64) -> Result<JsValue, JsValue> {
    with_session(|session| {
        let frame = session.tick(now);
        serialize(&frame, "Frame serialization error")
    })
}

/// Note a viewport resize; the reflow itself is debounced and runs on a
/// later tick
#[wasm_bindgen(js_name = resize)]
pub fn resize(width: u32, height: u32) -> Result<(), JsValue> {
    let now = helpers::now_ms();
    wasm_log!("resize noted: {}x{}", width, height);
    with_session(|session| {
        session.resize(width, height, now);
        Ok(())
    })
}

/// The paper window's ink bytes, row-major, one byte per pixel.
/// Read-only: the image-export collaborator and the canvas blit both
/// consume this.
#[wasm_bindgen(js_name = paperPixels)]
pub fn paper_pixels() -> Result<Vec<u8>, JsValue> {
    with_session(|session| Ok(session.paper().pixels().to_vec()))
}

#[wasm_bindgen(js_name = paperWidth)]
pub fn paper_width() -> Result<u32, JsValue> {
    with_session(|session| Ok(session.paper().width()))
}

#[wasm_bindgen(js_name = paperHeight)]
pub fn paper_height() -> Result<u32, JsValue> {
    with_session(|session| Ok(session.paper().height()))
}

/// Characters typed so far (for the front end's UI chrome)
#[wasm_bindgen(js_name = characterCount)]
pub fn character_count() -> Result<usize, JsValue> {
    with_session(|session| Ok(session.character_count()))
}
