//! Recursive placeholder expansion.
//!
//! Values published by the mapping store may reference other entries using
//! the snapshot's grammar. Expansion substitutes each placeholder with the
//! referenced value, itself expanded, until no placeholders remain.
//!
//! # Invariants
//!
//! - Every recursive call increments an explicit depth counter; exceeding
//!   the limit is [`ExpandError::DepthExceeded`], never a stack overflow.
//! - A name already being expanded on the current path is
//!   [`ExpandError::Cycle`].
//! - An opening delimiter with no closing delimiter after it is literal text.

use envlens_primitives::is_word_char;
use thiserror::Error;

use crate::entry::Snapshot;

/// Default nesting limit for placeholder expansion.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Reason a value could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
	/// A nested placeholder names an entry missing from the snapshot.
	#[error("unresolved placeholder `{name}`")]
	Unresolved { name: String },
	/// A delimited placeholder whose content is not a valid name.
	#[error("malformed placeholder at byte {offset}")]
	Malformed { offset: usize },
	/// The name is already being expanded further up the chain.
	#[error("circular reference through `{name}`")]
	Cycle { name: String },
	/// Nesting went deeper than the configured limit.
	#[error("expansion exceeded depth limit {limit}")]
	DepthExceeded { limit: usize },
}

/// Expands placeholders inside a raw value against a snapshot.
pub trait TemplateExpander: Send + Sync {
	fn expand(&self, template: &str, snapshot: &Snapshot, max_depth: usize) -> Result<String, ExpandError>;
}

/// Default expander using the snapshot's own placeholder grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTemplate;

impl TemplateExpander for PlaceholderTemplate {
	fn expand(&self, template: &str, snapshot: &Snapshot, max_depth: usize) -> Result<String, ExpandError> {
		let mut path = Vec::new();
		expand_at(template, snapshot, 0, max_depth, &mut path)
	}
}

fn expand_at<'a>(
	template: &'a str,
	snapshot: &'a Snapshot,
	depth: usize,
	max_depth: usize,
	path: &mut Vec<&'a str>,
) -> Result<String, ExpandError> {
	if depth > max_depth {
		return Err(ExpandError::DepthExceeded { limit: max_depth });
	}

	let kind = snapshot.kind().token_kind();
	let (open, close) = (kind.open(), kind.close());

	let mut out = String::with_capacity(template.len());
	let mut rest = template;
	let mut consumed = 0;

	while let Some(start) = rest.find(open) {
		let inner = &rest[start + open.len()..];
		let Some(end) = inner.find(close) else {
			break;
		};
		let name = &inner[..end];
		if name.is_empty() || !name.chars().all(is_word_char) {
			return Err(ExpandError::Malformed {
				offset: consumed + start,
			});
		}

		let entry = snapshot.get(name).ok_or_else(|| ExpandError::Unresolved { name: name.to_owned() })?;
		if path.contains(&name) {
			return Err(ExpandError::Cycle { name: name.to_owned() });
		}

		path.push(name);
		let value = expand_at(&entry.value, snapshot, depth + 1, max_depth, path)?;
		path.pop();

		out.push_str(&rest[..start]);
		out.push_str(&value);

		let step = start + open.len() + end + close.len();
		consumed += step;
		rest = &rest[step..];
	}

	out.push_str(rest);
	Ok(out)
}

#[cfg(test)]
mod tests;
