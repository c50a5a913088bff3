use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Serialize;

/// Maximum nesting depth accepted when constructing a document from input.
pub const MAX_DEPTH: usize = 128;

/// A single configuration value.
///
/// Plugin options and loader chains in build configs are free-form, so the
/// value type is a tagged variant rather than a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Sequence(Vec<Value>),
	Mapping(Document),
}

impl Value {
	pub fn as_sequence(&self) -> Option<&[Value]> {
		match self {
			Value::Sequence(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_mapping(&self) -> Option<&Document> {
		match self {
			Value::Mapping(doc) => Some(doc),
			_ => None,
		}
	}

	/// Nesting depth of this value; scalars are 0.
	pub fn depth(&self) -> usize {
		match self {
			Value::Sequence(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
			Value::Mapping(doc) => 1 + doc.depth(),
			_ => 0,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Integer(value.into())
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<Document> for Value {
	fn from(value: Document) -> Self {
		Value::Mapping(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(values: Vec<T>) -> Self {
		Value::Sequence(values.into_iter().map(Into::into).collect())
	}
}

/// An immutable configuration document: string keys mapped to values.
///
/// Key order is kept so rendered output follows the input, but it does not
/// take part in equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
	entries: IndexMap<String, Value>,
}

impl Document {
	/// An empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insertion used to assemble literal documents.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.entries.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	/// Look up a value by dotted key path, e.g. `output.publicPath`.
	pub fn get_path(&self, path: &str) -> Option<&Value> {
		let mut segments = path.split('.');
		let first = segments.next()?;
		let mut current = self.get(first)?;
		for segment in segments {
			current = current.as_mapping()?.get(segment)?;
		}
		Some(current)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> Iter<'_, String, Value> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Nesting depth of the document's values; an all-scalar document is 0.
	pub fn depth(&self) -> usize {
		self.entries.values().map(Value::depth).max().unwrap_or(0)
	}

	/// Split `key` out of the document, returning its value and the remainder.
	pub(crate) fn split_off(mut self, key: &str) -> (Option<Value>, Document) {
		let value = self.entries.shift_remove(key);
		(value, self)
	}

	pub(crate) fn from_entries(entries: IndexMap<String, Value>) -> Self {
		Self { entries }
	}

	pub(crate) fn entries(&self) -> &IndexMap<String, Value> {
		&self.entries
	}
}

impl<'a> IntoIterator for &'a Document {
	type Item = (&'a String, &'a Value);
	type IntoIter = Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
