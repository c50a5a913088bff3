//! Algebraic properties of the document merge.

use layercfg::config::PolicyRule;
use layercfg::document::{Document, Value, merge, merge_with};
use layercfg::policy::{ArrayStrategy, MergePolicy};
use proptest::prelude::*;

/// Every finite float, including subnormals and both zeros; the parsers
/// reject NaN and infinities.
fn finite_float() -> impl Strategy<Value = f64> {
	prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn scalar() -> impl Strategy<Value = Value> {
	prop_oneof![
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::Integer),
		finite_float().prop_map(Value::Float),
		"[a-z./\\[\\]]{0,8}".prop_map(Value::String),
	]
}

fn value() -> impl Strategy<Value = Value> {
	scalar().prop_recursive(3, 24, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
			prop::collection::vec(("[a-e]", inner), 0..4)
				.prop_map(|entries| Value::Mapping(entries.into_iter().collect())),
		]
	})
}

fn document() -> impl Strategy<Value = Document> {
	prop::collection::vec(("[a-e]", value()), 0..5).prop_map(|entries| entries.into_iter().collect())
}

proptest! {
	#[test]
	fn merge_is_deterministic(base in document(), overlay in document()) {
		prop_assert_eq!(merge(&base, &overlay), merge(&base, &overlay));
	}

	#[test]
	fn empty_overlay_is_identity(base in document()) {
		prop_assert_eq!(merge(&base, &Document::new()), base);
	}

	#[test]
	fn empty_base_is_identity(overlay in document()) {
		prop_assert_eq!(merge(&Document::new(), &overlay), overlay);
	}

	#[test]
	fn merge_leaves_inputs_untouched(base in document(), overlay in document()) {
		let (base_before, overlay_before) = (base.clone(), overlay.clone());
		let _ = merge(&base, &overlay);
		prop_assert_eq!(base, base_before);
		prop_assert_eq!(overlay, overlay_before);
	}

	#[test]
	fn result_keys_are_the_union(base in document(), overlay in document()) {
		let merged = merge(&base, &overlay);
		for key in base.keys().chain(overlay.keys()) {
			prop_assert!(merged.contains_key(key));
		}
		prop_assert!(merged.len() <= base.len() + overlay.len());
	}

	#[test]
	fn overlay_scalars_win(base in document(), key in "[a-e]", scalar in scalar()) {
		let overlay = Document::new().with(key.clone(), scalar.clone());
		let merged = merge(&base, &overlay);
		prop_assert_eq!(merged.get(&key), Some(&scalar));
	}

	#[test]
	fn sequences_append_then_replace(
		first in prop::collection::vec(scalar(), 0..5),
		second in prop::collection::vec(scalar(), 0..5),
	) {
		let base = Document::new().with("plugins", Value::Sequence(first.clone()));
		let overlay = Document::new().with("plugins", Value::Sequence(second.clone()));

		let appended: Vec<Value> = first.iter().chain(&second).cloned().collect();
		let merged = merge(&base, &overlay);
		prop_assert_eq!(
			merged.get("plugins"),
			Some(&Value::Sequence(appended))
		);

		let replace = MergePolicy::compile(&[PolicyRule {
			path: "^plugins$".to_string(),
			strategy: ArrayStrategy::Replace,
		}])
		.unwrap();
		let replaced = merge_with(&base, &overlay, &replace);
		prop_assert_eq!(
			replaced.get("plugins"),
			Some(&Value::Sequence(second))
		);
	}
}
