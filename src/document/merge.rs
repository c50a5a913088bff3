use crate::document::format::key_path;
use crate::document::value::{Document, Value};
use crate::policy::MergePolicy;

/// Merge `overlay` on top of `base` with the default (additive) policy.
///
/// - keys present in only one input are copied
/// - two mappings merge recursively
/// - two sequences concatenate, base first
/// - anything else: the overlay value wins
///
/// Neither input is modified; the result is a fresh document.
pub fn merge(base: &Document, overlay: &Document) -> Document {
	merge_with(base, overlay, &MergePolicy::default())
}

/// Merge `overlay` on top of `base`, letting `policy` pick how each pair of
/// sequences is combined based on its dotted key path.
pub fn merge_with(base: &Document, overlay: &Document, policy: &MergePolicy) -> Document {
	merge_at(base, overlay, policy, "")
}

/// Fold `layers` left to right, starting from the empty document.
pub fn compose<'a, I>(layers: I, policy: &MergePolicy) -> Document
where
	I: IntoIterator<Item = &'a Document>,
{
	layers
		.into_iter()
		.fold(Document::new(), |acc, layer| merge_with(&acc, layer, policy))
}

fn merge_at(base: &Document, overlay: &Document, policy: &MergePolicy, prefix: &str) -> Document {
	// Base keys keep their position; overlay-only keys are appended.
	let mut entries = base.entries().clone();

	for (key, overlay_value) in overlay {
		let merged = match base.get(key) {
			Some(base_value) => {
				merge_values(base_value, overlay_value, policy, &key_path(prefix, key))
			}
			None => overlay_value.clone(),
		};
		entries.insert(key.clone(), merged);
	}

	Document::from_entries(entries)
}

fn merge_values(base: &Value, overlay: &Value, policy: &MergePolicy, path: &str) -> Value {
	match (base, overlay) {
		(Value::Mapping(b), Value::Mapping(o)) => Value::Mapping(merge_at(b, o, policy, path)),
		(Value::Sequence(b), Value::Sequence(o)) => {
			Value::Sequence(policy.strategy_for(path).combine(b, o))
		}
		_ => overlay.clone(),
	}
}
