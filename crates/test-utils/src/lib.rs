//! Shared test utilities for the raster-coverage workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A deterministic mock overlay engine for axis-aligned rectangles
//! - Grid and geometry generators with predictable layouts
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{unit_grid, RectCoverageEngine};
//! ```

pub mod engine;
pub mod generators;

// Re-export commonly used items at the crate root
pub use engine::*;
pub use generators::*;
