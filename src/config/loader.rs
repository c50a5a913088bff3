use crate::config::types::LoadedManifest;
use crate::document::{Document, Format, Value, merge_with};
use crate::error::{LayerError, Malformed, Result};
use crate::policy::MergePolicy;
use std::path::{Path, PathBuf};

/// Top-level key naming a parent layer.
pub const EXTENDS_KEY: &str = "extends";

/// Read and validate a single layer file, without following `extends`.
pub fn read_layer(path: &Path) -> Result<Document> {
	let format = Format::from_path(path)?;
	let content = std::fs::read_to_string(path).map_err(|source| LayerError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	tracing::debug!(path = %path.display(), format = format.as_str(), "Reading layer");
	format.parse(&content, &path.display().to_string())
}

/// Load a layer, resolving its `extends` chain.
///
/// The parent is loaded first and the layer merged on top of it with
/// `policy`. `extends` paths are relative to the file declaring them. A
/// chain that revisits a file fails with `MalformedConfig`.
pub fn load_layer(path: &Path, policy: &MergePolicy) -> Result<Document> {
	let mut chain = Vec::new();
	load_chain(path, policy, &mut chain)
}

fn load_chain(path: &Path, policy: &MergePolicy, chain: &mut Vec<PathBuf>) -> Result<Document> {
	let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

	if chain.contains(&key) {
		let mut names: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
		names.push(key.display().to_string());
		return Err(LayerError::malformed(
			path.display().to_string(),
			Malformed::Cycle { chain: names },
		));
	}

	let (extends, layer) = read_layer(path)?.split_off(EXTENDS_KEY);

	let parent_path = match extends {
		None => return Ok(layer),
		Some(Value::String(relative)) => path
			.parent()
			.unwrap_or_else(|| Path::new("."))
			.join(relative),
		Some(_) => {
			return Err(LayerError::malformed(
				path.display().to_string(),
				Malformed::InvalidExtends {
					path: EXTENDS_KEY.to_string(),
				},
			));
		}
	};

	tracing::debug!(
		layer = %path.display(),
		parent = %parent_path.display(),
		"Following extends"
	);

	chain.push(key);
	let parent = load_chain(&parent_path, policy, chain)?;
	chain.pop();

	Ok(merge_with(&parent, &layer, policy))
}

/// The effective configuration for one mode.
#[derive(Debug, Clone)]
pub struct Composition {
	/// The mode that was composed.
	pub mode: String,

	/// Base and overlay paths, in merge order.
	pub layers: Vec<PathBuf>,

	/// The merged document.
	pub document: Document,
}

/// Compose the base layer with the overlay of `mode`.
pub fn compose_mode(loaded: &LoadedManifest, mode: &str) -> Result<Composition> {
	let spec = loaded
		.manifest
		.modes
		.get(mode)
		.ok_or_else(|| LayerError::UnknownMode {
			mode: mode.to_string(),
			known: loaded.manifest.mode_names(),
		})?;

	let policy = MergePolicy::compile(&loaded.policy_rules(spec))?;
	let base_path = loaded.base_path();
	let overlay_path = loaded.overlay_path(spec);

	let base = load_layer(&base_path, &policy)?;
	let overlay = load_layer(&overlay_path, &policy)?;
	let document = merge_with(&base, &overlay, &policy);

	tracing::info!(
		mode,
		base = %base_path.display(),
		overlay = %overlay_path.display(),
		keys = document.len(),
		"Composed configuration"
	);

	Ok(Composition {
		mode: mode.to_string(),
		layers: vec![base_path, overlay_path],
		document,
	})
}
