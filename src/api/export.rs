//! Export and import operations for the WASM API
//!
//! The save/list collaborator stores whatever `exportDocument` returns
//! and hands it back verbatim; the format is the ordered array of
//! `{x, y, s}` records the document model serializes.

use wasm_bindgen::prelude::*;

use crate::api::core::lock_session;
use crate::{wasm_info, wasm_warn};

/// Serialize the current document to its transport string.
///
/// Deterministic and round-trip exact: importing the result reproduces
/// the same characters and the same export string.
#[wasm_bindgen(js_name = exportDocument)]
pub fn export_document() -> Result<String, JsValue> {
    let guard = lock_session()?;
    let session = guard
        .as_ref()
        .ok_or_else(|| JsValue::from_str("No session initialized"))?;

    let data = session
        .export()
        .map_err(|e| JsValue::from_str(&format!("Export error: {}", e)))?;

    wasm_info!("exportDocument: {} characters, {} bytes", session.character_count(), data.len());
    Ok(data)
}

/// Replace the document with a previously exported string.
///
/// Fails soft: a malformed payload is logged and reported as `false`,
/// and the current page is left exactly as it was.
#[wasm_bindgen(js_name = importDocument)]
pub fn import_document(data: &str) -> bool {
    let mut guard = match lock_session() {
        Ok(guard) => guard,
        Err(_) => return false,
    };
    let Some(session) = guard.as_mut() else {
        wasm_warn!("importDocument called before initSession");
        return false;
    };

    match session.import(data) {
        Ok(()) => {
            wasm_info!("importDocument: {} characters", session.character_count());
            true
        }
        Err(e) => {
            wasm_warn!("importDocument rejected: {}", e);
            false
        }
    }
}
