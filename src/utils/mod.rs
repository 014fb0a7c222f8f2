//! Utility modules for the typewriter simulator
//!
//! Small pure helpers shared by the typing engine and the renderers.

pub mod grapheme;
pub mod script;

pub use grapheme::graphemes;
pub use script::{is_rtl, is_rtl_char};
