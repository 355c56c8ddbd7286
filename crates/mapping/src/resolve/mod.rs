//! Name lookup and display resolution.
//!
//! Resolution never fails outright: a missing name or a broken expansion is
//! reported through [`ResolutionStatus`] together with fixed display text, so
//! callers can render it without error plumbing.

use std::fmt;
use std::sync::Arc;

use crate::entry::{MappingKind, Snapshot};
use crate::template::{DEFAULT_MAX_DEPTH, PlaceholderTemplate, TemplateExpander};

/// Display text for a name absent from the snapshot.
pub const NOT_FOUND_TEXT: &str = "not found";
/// Display text for a value whose expansion failed.
pub const ERROR_TEXT: &str = "error";
/// Label shown for environment lookups with no associated source.
pub const DEFAULT_UNKNOWN_LABEL: &str = "choose an environment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
	Found,
	NotFound,
	/// The name exists but its value could not be expanded.
	ExpansionError,
}

/// Outcome of resolving one name for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	pub status: ResolutionStatus,
	pub display_value: String,
	/// Present for environment snapshots only.
	pub source_label: Option<String>,
}

impl Resolution {
	/// Returns true if the name exists in the snapshot, whether or not its
	/// value expanded.
	pub fn is_found(&self) -> bool {
		self.status != ResolutionStatus::NotFound
	}
}

/// Resolves names against one snapshot.
///
/// Cheap to clone; the snapshot and expander are shared.
#[derive(Clone)]
pub struct Resolver {
	snapshot: Arc<Snapshot>,
	expander: Arc<dyn TemplateExpander>,
	max_depth: usize,
	unknown_label: Arc<str>,
}

impl fmt::Debug for Resolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Resolver")
			.field("kind", &self.snapshot.kind())
			.field("entries", &self.snapshot.len())
			.field("max_depth", &self.max_depth)
			.field("unknown_label", &self.unknown_label)
			.finish()
	}
}

impl Resolver {
	/// Creates a resolver using [`PlaceholderTemplate`] and default limits.
	pub fn new(snapshot: Arc<Snapshot>) -> Self {
		Self {
			snapshot,
			expander: Arc::new(PlaceholderTemplate),
			max_depth: DEFAULT_MAX_DEPTH,
			unknown_label: Arc::from(DEFAULT_UNKNOWN_LABEL),
		}
	}

	/// Replaces the template expander.
	pub fn with_expander(mut self, expander: Arc<dyn TemplateExpander>) -> Self {
		self.expander = expander;
		self
	}

	/// Sets the expansion nesting limit.
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Sets the label used when an environment lookup finds no source.
	pub fn with_unknown_label(mut self, label: impl Into<Arc<str>>) -> Self {
		self.unknown_label = label.into();
		self
	}

	pub fn snapshot(&self) -> &Arc<Snapshot> {
		&self.snapshot
	}

	/// Existence-only lookup. Does not expand, so it cannot fail.
	pub fn exists(&self, name: &str) -> bool {
		self.snapshot.contains(name)
	}

	/// Resolves `name` to its fully expanded display value.
	pub fn resolve(&self, name: &str) -> Resolution {
		let source_label = match self.snapshot.kind() {
			MappingKind::Environment => Some(
				self.snapshot
					.source_label(name)
					.unwrap_or(&*self.unknown_label)
					.to_owned(),
			),
			MappingKind::Variable => None,
		};

		let Some(entry) = self.snapshot.get(name) else {
			return Resolution {
				status: ResolutionStatus::NotFound,
				display_value: NOT_FOUND_TEXT.to_owned(),
				source_label,
			};
		};

		match self.expander.expand(&entry.value, &self.snapshot, self.max_depth) {
			Ok(display_value) => Resolution {
				status: ResolutionStatus::Found,
				display_value,
				source_label,
			},
			Err(error) => {
				tracing::debug!(name, %error, "Placeholder value failed to expand");
				Resolution {
					status: ResolutionStatus::ExpansionError,
					display_value: ERROR_TEXT.to_owned(),
					source_label,
				}
			}
		}
	}
}
