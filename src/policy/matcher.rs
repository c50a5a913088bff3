use crate::config::types::PolicyRule;
use crate::error::{LayerError, Result};
use crate::policy::strategy::ArrayStrategy;
use regex::Regex;

/// A policy rule with its path pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: PolicyRule,

	/// Compiled key path pattern.
	pub path_regex: Regex,
}

impl CompiledRule {
	pub fn from_rule(rule: &PolicyRule) -> Result<Self> {
		Ok(CompiledRule {
			rule: rule.clone(),
			path_regex: compile_regex(&rule.path)?,
		})
	}

	/// Check if this rule applies to a dotted key path.
	pub fn matches(&self, path: &str) -> bool {
		self.path_regex.is_match(path)
	}
}

/// Sequence merge policy: ordered rules, first match wins, `Append` otherwise.
///
/// Paths are dotted mapping keys from the document root (`module.rules`).
/// Sequences are never descended into, so paths carry no indices. Keys are
/// joined verbatim: a quoted key `"module.rules"` and the nested
/// `module` → `rules` produce the same path and match the same rules.
#[derive(Debug, Clone, Default)]
pub struct MergePolicy {
	rules: Vec<CompiledRule>,
}

impl MergePolicy {
	/// Compile rules in order.
	pub fn compile(rules: &[PolicyRule]) -> Result<Self> {
		let rules = rules
			.iter()
			.map(CompiledRule::from_rule)
			.collect::<Result<Vec<_>>>()?;
		Ok(MergePolicy { rules })
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Find the first rule matching `path`.
	pub fn find_rule(&self, path: &str) -> Option<&CompiledRule> {
		self.rules.iter().find(|rule| rule.matches(path))
	}

	/// Strategy for the sequence at `path`.
	pub fn strategy_for(&self, path: &str) -> ArrayStrategy {
		self.find_rule(path)
			.map(|rule| rule.rule.strategy)
			.unwrap_or_default()
	}
}

fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| LayerError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}
