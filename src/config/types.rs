use crate::error::LayerError;
use crate::policy::ArrayStrategy;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level project manifest from a `layercfg.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Manifest {
	/// Shared base layer, relative to the manifest's directory.
	pub base: PathBuf,

	/// Mode used when none is given on the command line or via environment.
	#[serde(default)]
	pub default_mode: Option<String>,

	/// Environment variable that selects the mode when `--mode` is absent.
	#[serde(default)]
	pub mode_env_var: Option<String>,

	/// Mode-specific overlays, keyed by mode name.
	#[serde(default)]
	pub modes: IndexMap<String, ModeSpec>,

	/// Sequence merge rules applied to every mode.
	#[serde(default)]
	pub policy: Vec<PolicyRule>,
}

/// An overlay for one build mode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModeSpec {
	/// Overlay layer, relative to the manifest's directory.
	pub overlay: PathBuf,

	/// Extra rules for this mode; checked before the manifest-wide rules.
	#[serde(default)]
	pub policy: Vec<PolicyRule>,
}

/// Picks a sequence strategy for key paths matching `path`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyRule {
	/// Regex matched against dotted key paths such as `module.rules`.
	pub path: String,

	pub strategy: ArrayStrategy,
}

/// A loaded manifest with its source path.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
	/// The parsed manifest.
	pub manifest: Manifest,

	/// The path this manifest was loaded from.
	pub path: PathBuf,
}

impl LoadedManifest {
	/// Directory that layer paths are relative to.
	pub fn dir(&self) -> &Path {
		self.path.parent().unwrap_or_else(|| Path::new("."))
	}

	pub fn base_path(&self) -> PathBuf {
		self.dir().join(&self.manifest.base)
	}

	pub fn overlay_path(&self, mode: &ModeSpec) -> PathBuf {
		self.dir().join(&mode.overlay)
	}

	/// Rules for `mode`: mode-specific first, then manifest-wide.
	pub fn policy_rules(&self, mode: &ModeSpec) -> Vec<PolicyRule> {
		mode.policy
			.iter()
			.chain(&self.manifest.policy)
			.cloned()
			.collect()
	}
}

impl Manifest {
	/// Check structural constraints that serde cannot express.
	pub fn validate(&self, path: &Path) -> Result<(), LayerError> {
		let invalid = |message: String| LayerError::InvalidManifest {
			path: path.to_path_buf(),
			message,
		};

		if self.base.as_os_str().is_empty() {
			return Err(invalid("`base` must not be empty".to_string()));
		}

		for (name, mode) in &self.modes {
			if name.trim().is_empty() {
				return Err(invalid("mode names must not be empty".to_string()));
			}
			if mode.overlay.as_os_str().is_empty() {
				return Err(invalid(format!("mode `{name}` has an empty `overlay`")));
			}
		}

		if let Some(ref default_mode) = self.default_mode
			&& !self.modes.contains_key(default_mode)
		{
			return Err(invalid(format!(
				"`default-mode` names unknown mode `{default_mode}`"
			)));
		}

		Ok(())
	}

	pub fn mode_names(&self) -> Vec<String> {
		self.modes.keys().cloned().collect()
	}
}
