use crate::config::types::Manifest;
use crate::error::{LayerError, Result};
use crate::policy::MergePolicy;
use std::path::Path;

/// Parse a manifest file from the given path.
pub fn parse_manifest_file(path: &Path) -> Result<Manifest> {
	let content = std::fs::read_to_string(path).map_err(|source| LayerError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_manifest_str(&content, path)
}

/// Parse a manifest from a string (useful for testing).
pub fn parse_manifest_str(content: &str, path: &Path) -> Result<Manifest> {
	let manifest: Manifest =
		toml::from_str(content).map_err(|source| LayerError::TomlParseError {
			source_name: path.display().to_string(),
			source,
		})?;

	manifest.validate(path)?;

	// Reject bad patterns up front rather than at compose time
	MergePolicy::compile(&manifest.policy)?;
	for mode in manifest.modes.values() {
		MergePolicy::compile(&mode.policy)?;
	}

	Ok(manifest)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::policy::ArrayStrategy;
	use std::path::PathBuf;

	#[test]
	fn test_parse_minimal_manifest() {
		let path = PathBuf::from("layercfg.toml");
		let manifest = parse_manifest_str(r#"base = "common.toml""#, &path).unwrap();

		assert_eq!(manifest.base, PathBuf::from("common.toml"));
		assert!(manifest.modes.is_empty());
		assert!(manifest.policy.is_empty());
		assert!(manifest.default_mode.is_none());
		assert!(manifest.mode_env_var.is_none());
	}

	#[test]
	fn test_parse_full_manifest() {
		let content = r#"
base = "config/common.toml"
default-mode = "development"
mode-env-var = "ENV"

[modes.development]
overlay = "config/dev.toml"

[modes.production]
overlay = "config/prod.toml"

[[modes.production.policy]]
path = "^plugins$"
strategy = "replace"

[[policy]]
path = '^module\.rules$'
strategy = "prepend"
"#;
		let path = PathBuf::from("layercfg.toml");
		let manifest = parse_manifest_str(content, &path).unwrap();

		assert_eq!(manifest.default_mode.as_deref(), Some("development"));
		assert_eq!(manifest.mode_env_var.as_deref(), Some("ENV"));
		assert_eq!(manifest.mode_names(), vec!["development", "production"]);

		let prod = &manifest.modes["production"];
		assert_eq!(prod.overlay, PathBuf::from("config/prod.toml"));
		assert_eq!(prod.policy.len(), 1);
		assert_eq!(prod.policy[0].strategy, ArrayStrategy::Replace);

		assert_eq!(manifest.policy[0].path, r"^module\.rules$");
		assert_eq!(manifest.policy[0].strategy, ArrayStrategy::Prepend);
	}

	#[test]
	fn test_missing_base_is_parse_error() {
		let path = PathBuf::from("layercfg.toml");
		let result = parse_manifest_str("default-mode = \"dev\"", &path);
		assert!(matches!(result, Err(LayerError::TomlParseError { .. })));
	}

	#[test]
	fn test_unknown_strategy_is_parse_error() {
		let content = r#"
base = "common.toml"

[[policy]]
path = "plugins"
strategy = "smart"
"#;
		let path = PathBuf::from("layercfg.toml");
		let result = parse_manifest_str(content, &path);
		assert!(matches!(result, Err(LayerError::TomlParseError { .. })));
	}

	#[test]
	fn test_unknown_default_mode_is_invalid() {
		let content = r#"
base = "common.toml"
default-mode = "staging"

[modes.development]
overlay = "dev.toml"
"#;
		let path = PathBuf::from("layercfg.toml");
		match parse_manifest_str(content, &path).unwrap_err() {
			LayerError::InvalidManifest { message, .. } => {
				assert!(message.contains("staging"));
			}
			other => panic!("Expected InvalidManifest error, got {other:?}"),
		}
	}

	#[test]
	fn test_invalid_policy_pattern_rejected() {
		let content = r#"
base = "common.toml"

[[policy]]
path = "[invalid"
strategy = "replace"
"#;
		let path = PathBuf::from("layercfg.toml");
		let result = parse_manifest_str(content, &path);
		assert!(matches!(result, Err(LayerError::InvalidPattern { .. })));
	}
}
