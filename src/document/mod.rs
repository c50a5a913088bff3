//! Configuration documents and the merge that composes them.
//!
//! This module handles:
//! - The `Document`/`Value` model for nested build settings
//! - Construction from TOML and JSON with structural validation
//! - Base + overlay merging

pub mod format;
pub mod merge;
pub mod value;

pub use format::Format;
pub use merge::{compose, merge, merge_with};
pub use value::{Document, MAX_DEPTH, Value};
