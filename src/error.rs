use std::path::PathBuf;

/// Why a configuration document was rejected during construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
	#[error("reference cycle: {}", chain.join(" -> "))]
	Cycle { chain: Vec<String> },

	#[error("unsupported {kind} value at `{path}`")]
	UnsupportedValue { path: String, kind: &'static str },

	#[error("nesting at `{path}` exceeds the depth limit of {limit}")]
	TooDeep { path: String, limit: usize },

	#[error("`extends` at `{path}` must be a string")]
	InvalidExtends { path: String },
}

/// Library-level structured errors for layercfg.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
	#[error("Malformed configuration in {source_name}: {reason}")]
	MalformedConfig {
		source_name: String,
		reason: Malformed,
	},

	#[error("No layercfg.toml found in {start} or any parent directory")]
	ManifestNotFound { start: PathBuf },

	#[error("Failed to read config file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse TOML: {source_name}")]
	TomlParseError {
		source_name: String,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to parse JSON: {source_name}")]
	JsonParseError {
		source_name: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("Unsupported layer format (expected .toml or .json): {path}")]
	UnsupportedFormat { path: PathBuf },

	#[error("Invalid regex pattern in policy: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid manifest {path}: {message}")]
	InvalidManifest { path: PathBuf, message: String },

	#[error("Unknown mode `{mode}` (known modes: {})", known.join(", "))]
	UnknownMode { mode: String, known: Vec<String> },

	#[error("No mode given: pass --mode, set the mode environment variable, or declare default-mode")]
	ModeNotSpecified,

	#[error("Failed to serialize document as {format}: {message}")]
	SerializeError {
		format: &'static str,
		message: String,
	},
}

impl LayerError {
	/// Shorthand for a `MalformedConfig` error.
	pub fn malformed(source_name: impl Into<String>, reason: Malformed) -> Self {
		LayerError::MalformedConfig {
			source_name: source_name.into(),
			reason,
		}
	}

	/// The structural reason, if this is a `MalformedConfig` error.
	pub fn malformed_reason(&self) -> Option<&Malformed> {
		match self {
			LayerError::MalformedConfig { reason, .. } => Some(reason),
			_ => None,
		}
	}
}

/// Result type alias using LayerError.
pub type Result<T> = std::result::Result<T, LayerError>;
