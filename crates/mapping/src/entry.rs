use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::token::TokenKind;

/// A single name/value pair published by the mapping store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
	/// Name referenced by placeholders.
	pub key: String,
	/// Raw value, which may itself contain placeholders.
	pub value: String,
	/// Which environment supplied the entry. Only environment entries carry one.
	#[serde(default, alias = "sourceEnv", skip_serializing_if = "Option::is_none")]
	pub source_label: Option<String>,
}

impl MappingEntry {
	/// Creates a plain variable entry.
	pub fn variable(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
			source_label: None,
		}
	}

	/// Creates an environment entry labelled with its source.
	pub fn environment(key: impl Into<String>, value: impl Into<String>, source: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
			source_label: Some(source.into()),
		}
	}
}

/// Which family of mapping a snapshot holds.
///
/// Selects both the placeholder grammar and whether tooltips carry a source label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
	/// Aggregated environments; placeholders are `<<name>>`.
	Environment,
	/// Flat request variables; placeholders are `{{name}}`.
	Variable,
}

impl MappingKind {
	/// Returns the placeholder grammar active for this kind.
	pub fn token_kind(self) -> TokenKind {
		match self {
			Self::Environment => TokenKind::EnvironmentRef,
			Self::Variable => TokenKind::VariableRef,
		}
	}
}

/// Immutable point-in-time view of the mapping.
///
/// Lookups return the first entry with a matching key; later duplicates are
/// shadowed.
#[derive(Debug, Clone)]
pub struct Snapshot {
	kind: MappingKind,
	entries: Vec<MappingEntry>,
	index: FxHashMap<String, usize>,
}

impl Snapshot {
	/// Creates a snapshot of `entries` tagged with `kind`.
	pub fn new(kind: MappingKind, entries: Vec<MappingEntry>) -> Self {
		let mut index = FxHashMap::default();
		for (i, entry) in entries.iter().enumerate() {
			index.entry(entry.key.clone()).or_insert(i);
		}
		Self { kind, entries, index }
	}

	/// Creates an environment-style snapshot.
	pub fn environment(entries: Vec<MappingEntry>) -> Self {
		Self::new(MappingKind::Environment, entries)
	}

	/// Creates a variable-style snapshot.
	pub fn variables(entries: Vec<MappingEntry>) -> Self {
		Self::new(MappingKind::Variable, entries)
	}

	/// Creates an empty snapshot of the given kind.
	pub fn empty(kind: MappingKind) -> Self {
		Self::new(kind, Vec::new())
	}

	pub fn kind(&self) -> MappingKind {
		self.kind
	}

	pub fn entries(&self) -> &[MappingEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the first entry whose key equals `key`.
	pub fn get(&self, key: &str) -> Option<&MappingEntry> {
		self.index.get(key).map(|&i| &self.entries[i])
	}

	/// Existence check used for highlight classification.
	pub fn contains(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Returns the source label of the first entry named `key`, if it has one.
	pub fn source_label(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(|e| e.source_label.as_deref())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_first_duplicate_wins() {
		let snap = Snapshot::variables(vec![MappingEntry::variable("a", "1"), MappingEntry::variable("a", "2")]);
		assert_eq!(snap.get("a").map(|e| e.value.as_str()), Some("1"));
		assert_eq!(snap.len(), 2);
	}

	#[test]
	fn test_source_label_lookup() {
		let snap = Snapshot::environment(vec![
			MappingEntry::environment("host", "srv", "Prod"),
			MappingEntry::variable("plain", "x"),
		]);
		assert_eq!(snap.source_label("host"), Some("Prod"));
		assert_eq!(snap.source_label("plain"), None);
		assert_eq!(snap.source_label("missing"), None);
		assert!(snap.contains("plain"));
	}

	#[test]
	fn test_deserialize_store_payload() {
		let entries: Vec<MappingEntry> = serde_json::from_str(
			r#"[
				{ "key": "host", "value": "srv", "sourceEnv": "Prod" },
				{ "key": "token", "value": "abc", "sourceLabel": "Global" },
				{ "key": "base", "value": "https://api.com" }
			]"#,
		)
		.unwrap();
		assert_eq!(
			entries,
			vec![
				MappingEntry::environment("host", "srv", "Prod"),
				MappingEntry::environment("token", "abc", "Global"),
				MappingEntry::variable("base", "https://api.com"),
			]
		);
	}

	#[test]
	fn test_serialize_omits_missing_label() {
		let json = serde_json::to_string(&MappingEntry::variable("a", "1")).unwrap();
		assert_eq!(json, r#"{"key":"a","value":"1"}"#);
	}
}
