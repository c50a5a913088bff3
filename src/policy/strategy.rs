use crate::document::Value;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How two sequences at the same key path are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayStrategy {
	/// Base items, then overlay items.
	#[default]
	Append,
	/// Overlay items, then base items.
	Prepend,
	/// Overlay items only.
	Replace,
}

impl ArrayStrategy {
	pub fn as_str(&self) -> &'static str {
		match self {
			ArrayStrategy::Append => "append",
			ArrayStrategy::Prepend => "prepend",
			ArrayStrategy::Replace => "replace",
		}
	}

	/// Combine `base` and `overlay` into a new sequence.
	pub fn combine(&self, base: &[Value], overlay: &[Value]) -> Vec<Value> {
		match self {
			ArrayStrategy::Append => base.iter().chain(overlay).cloned().collect(),
			ArrayStrategy::Prepend => overlay.iter().chain(base).cloned().collect(),
			ArrayStrategy::Replace => overlay.to_vec(),
		}
	}
}

impl fmt::Display for ArrayStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ArrayStrategy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"append" => Ok(ArrayStrategy::Append),
			"prepend" => Ok(ArrayStrategy::Prepend),
			"replace" => Ok(ArrayStrategy::Replace),
			other => Err(format!(
				"unknown strategy `{other}` (expected append, prepend or replace)"
			)),
		}
	}
}
