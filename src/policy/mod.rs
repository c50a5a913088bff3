//! Sequence merge policy for layercfg.
//!
//! This module handles:
//! - Strategies for combining two sequences (append, prepend, replace)
//! - Regex rules selecting a strategy by dotted key path

pub mod matcher;
pub mod strategy;

pub use matcher::{CompiledRule, MergePolicy};
pub use strategy::ArrayStrategy;
