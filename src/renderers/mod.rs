//! Renderers module for the typewriter simulator
//!
//! Everything that turns placed characters into baked ink: the
//! backend-independent raster surface, the built-in glyph slugs, and
//! the scrolling paper window.

pub mod glyphs;
pub mod paper;
pub mod raster;

pub use paper::{PaperBuffer, PaperConfig};
pub use raster::Raster;
