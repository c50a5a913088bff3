use crate::config::types::Manifest;
use crate::error::{LayerError, Result};

/// Where the selected mode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
	Explicit,
	Environment,
	Default,
}

/// Resolve the build mode from the process environment.
///
/// Order: `explicit` (the `--mode` flag), then the manifest's
/// `mode-env-var`, then `default-mode`.
pub fn resolve_mode(explicit: Option<&str>, manifest: &Manifest) -> Result<(String, ModeSource)> {
	resolve_mode_with(explicit, manifest, |name| std::env::var(name).ok())
}

/// Same as [`resolve_mode`] with an injectable environment lookup.
pub fn resolve_mode_with<F>(
	explicit: Option<&str>,
	manifest: &Manifest,
	env_lookup: F,
) -> Result<(String, ModeSource)>
where
	F: Fn(&str) -> Option<String>,
{
	let (mode, source) = if let Some(mode) = explicit {
		(mode.to_string(), ModeSource::Explicit)
	} else if let Some(mode) = manifest
		.mode_env_var
		.as_deref()
		.and_then(&env_lookup)
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
	{
		(mode, ModeSource::Environment)
	} else if let Some(ref mode) = manifest.default_mode {
		(mode.clone(), ModeSource::Default)
	} else {
		return Err(LayerError::ModeNotSpecified);
	};

	if !manifest.modes.contains_key(&mode) {
		return Err(LayerError::UnknownMode {
			mode,
			known: manifest.mode_names(),
		});
	}

	Ok((mode, source))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::ModeSpec;
	use std::path::PathBuf;

	fn manifest() -> Manifest {
		let mut manifest = Manifest {
			base: PathBuf::from("common.toml"),
			default_mode: Some("development".to_string()),
			mode_env_var: Some("ENV".to_string()),
			..Default::default()
		};
		for name in ["development", "production"] {
			manifest.modes.insert(
				name.to_string(),
				ModeSpec {
					overlay: PathBuf::from(format!("{name}.toml")),
					policy: Vec::new(),
				},
			);
		}
		manifest
	}

	fn env_with(value: &'static str) -> impl Fn(&str) -> Option<String> {
		move |name: &str| (name == "ENV").then(|| value.to_string())
	}

	fn no_env(_: &str) -> Option<String> {
		None
	}

	#[test]
	fn test_explicit_mode_wins() {
		let (mode, source) =
			resolve_mode_with(Some("development"), &manifest(), env_with("production")).unwrap();
		assert_eq!(mode, "development");
		assert_eq!(source, ModeSource::Explicit);
	}

	#[test]
	fn test_env_var_beats_default() {
		let (mode, source) = resolve_mode_with(None, &manifest(), env_with("production")).unwrap();
		assert_eq!(mode, "production");
		assert_eq!(source, ModeSource::Environment);
	}

	#[test]
	fn test_blank_env_var_falls_back_to_default() {
		let (mode, source) = resolve_mode_with(None, &manifest(), env_with("  ")).unwrap();
		assert_eq!(mode, "development");
		assert_eq!(source, ModeSource::Default);
	}

	#[test]
	fn test_no_mode_anywhere() {
		let mut manifest = manifest();
		manifest.default_mode = None;
		let err = resolve_mode_with(None, &manifest, no_env).unwrap_err();
		assert!(matches!(err, LayerError::ModeNotSpecified));
	}

	#[test]
	fn test_unknown_mode_lists_known() {
		match resolve_mode_with(Some("staging"), &manifest(), no_env).unwrap_err() {
			LayerError::UnknownMode { mode, known } => {
				assert_eq!(mode, "staging");
				assert_eq!(known, vec!["development", "production"]);
			}
			other => panic!("Expected UnknownMode error, got {other:?}"),
		}
	}
}
