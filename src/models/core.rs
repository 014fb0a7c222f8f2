//! Core data structures for the typewriter document
//!
//! The document is the replayable record of a session: an
//! insertion-ordered sequence of struck characters with their page-space
//! positions. Baked paper pixels cannot be recovered after a scroll;
//! this sequence is the only exact state that survives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One struck character, immutable once created.
///
/// The machine never edits in place: corrections are overtyped and undo
/// is a reset. Owned exclusively by [`Document`]; the paper buffer only
/// reads it to bake an ink mark.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlacedChar {
    /// Page-space x of the glyph box
    pub x: f32,

    /// Page-space y of the glyph box
    pub y: f32,

    /// The grapheme cluster that was struck
    pub s: String,
}

impl PlacedChar {
    /// Create a new placed character
    pub fn new(s: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            s: s.into(),
        }
    }
}

/// Insertion-ordered sequence of struck characters.
///
/// Order is typed order, not spatial order: once right-to-left runs are
/// mixed in, later entries can sit to the left of earlier ones.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub chars: Vec<PlacedChar>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a struck character
    pub fn push(&mut self, placed: PlacedChar) {
        self.chars.push(placed);
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Drop every character
    pub fn clear(&mut self) {
        self.chars.clear();
    }

    /// Serialize the sequence to the `[{x, y, s}, ...]` transport
    /// format. Deterministic: re-importing and exporting again yields
    /// the identical string.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.chars)
    }

    /// Parse a transport string into placed characters.
    ///
    /// Rejects anything whose root is not an array before touching the
    /// entries, so a caller can fail closed without partial state.
    pub fn parse_export(data: &str) -> Result<Vec<PlacedChar>, ImportError> {
        let value: serde_json::Value = serde_json::from_str(data)?;
        if !value.is_array() {
            return Err(ImportError::NotAnArray);
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Why an import was refused. The current document is left untouched in
/// every case.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The payload did not parse, or an entry was missing a field
    #[error("malformed document payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload parsed but its root is not an array of characters
    #[error("document payload root must be an array")]
    NotAnArray,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.export().unwrap(), "[]");
    }

    #[test]
    fn test_export_parse_round_trip() {
        let mut doc = Document::new();
        doc.push(PlacedChar::new("a", 60.0, 24.0));
        doc.push(PlacedChar::new("א", 740.0, 24.0));

        let data = doc.export().unwrap();
        let parsed = Document::parse_export(&data).unwrap();
        assert_eq!(parsed, doc.chars);
    }

    #[test]
    fn test_parse_rejects_non_array_root() {
        assert!(matches!(
            Document::parse_export("{\"x\":1}"),
            Err(ImportError::NotAnArray)
        ));
        assert!(matches!(
            Document::parse_export("42"),
            Err(ImportError::NotAnArray)
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Document::parse_export("not json"),
            Err(ImportError::Malformed(_))
        ));
        assert!(matches!(
            Document::parse_export("[{\"x\": 1.0}]"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_wire_field_names() {
        let mut doc = Document::new();
        doc.push(PlacedChar::new("q", 1.5, 2.5));
        let data = doc.export().unwrap();
        assert_eq!(data, "[{\"x\":1.5,\"y\":2.5,\"s\":\"q\"}]");
    }
}
