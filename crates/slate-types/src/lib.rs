//! Foundation types and traits for SLATE_OS.
//!
//! This crate contains the platform-agnostic core types shared by all
//! SLATE_OS crates: colors, input events, backend trait definitions,
//! configuration, and error types.

pub mod backend;
pub mod bitmap_font;
pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod input;
