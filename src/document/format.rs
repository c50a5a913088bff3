use crate::document::value::{Document, MAX_DEPTH, Value};
use crate::error::{LayerError, Malformed, Result};
use indexmap::IndexMap;
use std::path::Path;

/// On-disk representation of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	Toml,
	Json,
}

impl Format {
	/// Pick the format from a file extension.
	pub fn from_path(path: &Path) -> Result<Self> {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => Ok(Format::Toml),
			Some("json") => Ok(Format::Json),
			_ => Err(LayerError::UnsupportedFormat {
				path: path.to_path_buf(),
			}),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Format::Toml => "toml",
			Format::Json => "json",
		}
	}

	/// Parse `content` into a validated document.
	///
	/// `source_name` only labels errors.
	pub fn parse(&self, content: &str, source_name: &str) -> Result<Document> {
		match self {
			Format::Toml => {
				let table: toml::Table =
					toml::from_str(content).map_err(|source| LayerError::TomlParseError {
						source_name: source_name.to_string(),
						source,
					})?;
				Builder::new(source_name).toml_table(&table, "", 0)
			}
			Format::Json => {
				let value: serde_json::Value =
					serde_json::from_str(content).map_err(|source| LayerError::JsonParseError {
						source_name: source_name.to_string(),
						source,
					})?;
				match value {
					serde_json::Value::Object(map) => Builder::new(source_name).json_object(&map, "", 0),
					other => Err(LayerError::malformed(
						source_name,
						Malformed::UnsupportedValue {
							path: "<root>".to_string(),
							kind: json_kind(&other),
						},
					)),
				}
			}
		}
	}

	/// Render a document in this format.
	pub fn render(&self, doc: &Document) -> Result<String> {
		match self {
			Format::Toml => toml::to_string_pretty(doc).map_err(|err| LayerError::SerializeError {
				format: "toml",
				message: err.to_string(),
			}),
			Format::Json => {
				let mut out =
					serde_json::to_string_pretty(doc).map_err(|err| LayerError::SerializeError {
						format: "json",
						message: err.to_string(),
					})?;
				out.push('\n');
				Ok(out)
			}
		}
	}
}

/// Converts parsed input trees into documents, rejecting values the model
/// cannot represent and nesting beyond `MAX_DEPTH`.
struct Builder<'a> {
	source_name: &'a str,
}

impl<'a> Builder<'a> {
	fn new(source_name: &'a str) -> Self {
		Self { source_name }
	}

	fn unsupported(&self, path: &str, kind: &'static str) -> LayerError {
		LayerError::malformed(
			self.source_name,
			Malformed::UnsupportedValue {
				path: display_path(path),
				kind,
			},
		)
	}

	fn check_depth(&self, path: &str, depth: usize) -> Result<()> {
		if depth > MAX_DEPTH {
			return Err(LayerError::malformed(
				self.source_name,
				Malformed::TooDeep {
					path: display_path(path),
					limit: MAX_DEPTH,
				},
			));
		}
		Ok(())
	}

	fn toml_table(&self, table: &toml::Table, path: &str, depth: usize) -> Result<Document> {
		self.check_depth(path, depth)?;
		let mut entries = IndexMap::with_capacity(table.len());
		for (key, value) in table {
			let child = key_path(path, key);
			entries.insert(key.clone(), self.toml_value(value, &child, depth + 1)?);
		}
		Ok(Document::from_entries(entries))
	}

	fn toml_value(&self, value: &toml::Value, path: &str, depth: usize) -> Result<Value> {
		Ok(match value {
			toml::Value::String(s) => Value::String(s.clone()),
			toml::Value::Integer(i) => Value::Integer(*i),
			toml::Value::Float(f) if f.is_finite() => Value::Float(*f),
			toml::Value::Float(_) => return Err(self.unsupported(path, "non-finite float")),
			toml::Value::Boolean(b) => Value::Bool(*b),
			toml::Value::Datetime(_) => return Err(self.unsupported(path, "datetime")),
			toml::Value::Array(items) => {
				self.check_depth(path, depth)?;
				let mut out = Vec::with_capacity(items.len());
				for (i, item) in items.iter().enumerate() {
					out.push(self.toml_value(item, &index_path(path, i), depth + 1)?);
				}
				Value::Sequence(out)
			}
			toml::Value::Table(table) => Value::Mapping(self.toml_table(table, path, depth)?),
		})
	}

	fn json_object(
		&self,
		map: &serde_json::Map<String, serde_json::Value>,
		path: &str,
		depth: usize,
	) -> Result<Document> {
		self.check_depth(path, depth)?;
		let mut entries = IndexMap::with_capacity(map.len());
		for (key, value) in map {
			let child = key_path(path, key);
			entries.insert(key.clone(), self.json_value(value, &child, depth + 1)?);
		}
		Ok(Document::from_entries(entries))
	}

	fn json_value(&self, value: &serde_json::Value, path: &str, depth: usize) -> Result<Value> {
		Ok(match value {
			serde_json::Value::Null => return Err(self.unsupported(path, "null")),
			serde_json::Value::Bool(b) => Value::Bool(*b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Value::Integer(i)
				} else if n.is_f64() {
					// is_f64 guarantees as_f64 succeeds
					Value::Float(n.as_f64().unwrap_or_default())
				} else {
					return Err(self.unsupported(path, "out-of-range integer"));
				}
			}
			serde_json::Value::String(s) => Value::String(s.clone()),
			serde_json::Value::Array(items) => {
				self.check_depth(path, depth)?;
				let mut out = Vec::with_capacity(items.len());
				for (i, item) in items.iter().enumerate() {
					out.push(self.json_value(item, &index_path(path, i), depth + 1)?);
				}
				Value::Sequence(out)
			}
			serde_json::Value::Object(map) => Value::Mapping(self.json_object(map, path, depth)?),
		})
	}
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "bool",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

/// Join a mapping key onto a dotted path.
pub(crate) fn key_path(parent: &str, key: &str) -> String {
	if parent.is_empty() {
		key.to_string()
	} else {
		format!("{parent}.{key}")
	}
}

fn index_path(parent: &str, index: usize) -> String {
	format!("{parent}[{index}]")
}

fn display_path(path: &str) -> String {
	if path.is_empty() {
		"<root>".to_string()
	} else {
		path.to_string()
	}
}
