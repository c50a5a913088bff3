use crate::config::parser::parse_manifest_file;
use crate::config::types::LoadedManifest;
use crate::error::{LayerError, Result};
use std::path::{Path, PathBuf};

/// File name of the project manifest.
pub const MANIFEST_FILE_NAME: &str = "layercfg.toml";

/// Find the nearest manifest, starting at `start_dir` and walking up to the
/// filesystem root.
pub fn find_manifest(start_dir: &Path) -> Option<PathBuf> {
	start_dir
		.ancestors()
		.map(|dir| dir.join(MANIFEST_FILE_NAME))
		.find(|candidate| candidate.is_file())
}

/// Find and parse the nearest manifest.
pub fn discover_manifest(start_dir: &Path) -> Result<LoadedManifest> {
	let path = find_manifest(start_dir).ok_or_else(|| LayerError::ManifestNotFound {
		start: start_dir.to_path_buf(),
	})?;

	tracing::debug!(path = %path.display(), "Found manifest");
	let manifest = parse_manifest_file(&path)?;

	Ok(LoadedManifest { manifest, path })
}
