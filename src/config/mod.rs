//! Project manifest and layer loading for layercfg.
//!
//! This module handles:
//! - `layercfg.toml` parsing and validation
//! - Manifest discovery up the directory tree
//! - Build mode resolution
//! - Layer loading with `extends` chains

pub mod discovery;
pub mod loader;
pub mod mode;
pub mod parser;
pub mod template;
pub mod types;

pub use discovery::{MANIFEST_FILE_NAME, discover_manifest, find_manifest};
pub use loader::{Composition, EXTENDS_KEY, compose_mode, load_layer, read_layer};
pub use mode::{ModeSource, resolve_mode, resolve_mode_with};
pub use parser::{parse_manifest_file, parse_manifest_str};
pub use template::generate_init_template;
pub use types::{LoadedManifest, Manifest, ModeSpec, PolicyRule};
