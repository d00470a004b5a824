//! Bitmap font re-export from the shared `slate-types::bitmap_font` module.
//!
//! Glyph data and lookup live in the shared crate so every backend renders
//! identical text.

pub use slate_types::bitmap_font::*;
