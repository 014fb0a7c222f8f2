//! WASM API for the typewriter simulator
//!
//! The JavaScript-facing surface. The front end feeds raw keyboard and
//! paste events in, drives the animation clock, and reads the paper
//! raster back out for its canvas blit.

pub mod core;
pub mod export;
pub mod helpers;
