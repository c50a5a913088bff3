//! layercfg - compose build configurations from a shared base and
//! mode-specific overlays.
//!
//! This library provides the core functionality for layercfg, including:
//! - The `Document` model for nested build settings
//! - Deterministic base + overlay merging with a per-path sequence policy
//! - Project manifest discovery, mode resolution and layer loading
//!
//! # Example
//!
//! ```
//! use layercfg::document::{Document, Value, merge};
//!
//! let common = Document::new()
//!     .with("output", Document::new().with("path", "dist"))
//!     .with("plugins", vec!["html"]);
//! let prod = Document::new()
//!     .with("output", Document::new().with("publicPath", "/"))
//!     .with("plugins", vec!["aot"]);
//!
//! let merged = merge(&common, &prod);
//! assert_eq!(merged.get_path("output.path"), Some(&Value::from("dist")));
//! assert_eq!(merged.get("plugins"), Some(&Value::from(vec!["html", "aot"])));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod policy;

pub use error::{LayerError, Malformed, Result};
