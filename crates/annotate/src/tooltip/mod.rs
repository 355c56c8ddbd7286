//! Hover tooltip resolution.
//!
//! A hover query names a document position and the side the pointer
//! approached from. The provider expands to the word under the position,
//! checks that the word is wrapped in the active grammar's delimiters, and
//! resolves the name into tooltip content.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use envlens_mapping::{Resolution, ResolutionStatus, Resolver, TokenKind};
use envlens_primitives::{CharIdx, Range, RopeSlice, is_word_char, line_bounds};

use crate::config::TooltipOptions;

/// Side of the position the hover approached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
	/// Pointer is on the character before the position.
	Before,
	#[default]
	Neutral,
	/// Pointer is on the character after the position.
	After,
}

impl From<i8> for Side {
	fn from(side: i8) -> Self {
		match side {
			s if s < 0 => Self::Before,
			0 => Self::Neutral,
			_ => Self::After,
		}
	}
}

/// Literal tooltip text. Never interpreted as markup by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipContent {
	/// Source environment, shown before the value. Environment snapshots only.
	pub source_label: Option<String>,
	pub value: String,
}

impl fmt::Display for TooltipContent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.source_label {
			Some(label) => write!(f, "{label} {}", self.value),
			None => f.write_str(&self.value),
		}
	}
}

/// Tooltip descriptor handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
	/// Start of the hovered name.
	pub anchor: CharIdx,
	/// End of the hovered line.
	pub end: CharIdx,
	/// Full placeholder extent including delimiters.
	pub token: Range,
	pub above: bool,
	pub arrow: bool,
	pub hover_delay: Duration,
	pub class: Arc<str>,
	pub status: ResolutionStatus,
	pub content: TooltipContent,
}

/// Answers hover queries against one snapshot.
#[derive(Debug, Clone)]
pub struct TooltipProvider {
	kind: TokenKind,
	resolver: Resolver,
	options: Arc<TooltipOptions>,
	class: Arc<str>,
}

impl TooltipProvider {
	pub fn new(resolver: Resolver, options: TooltipOptions) -> Self {
		Self {
			kind: resolver.snapshot().kind().token_kind(),
			class: Arc::from(options.class.as_str()),
			options: Arc::new(options),
			resolver,
		}
	}

	pub fn resolver(&self) -> &Resolver {
		&self.resolver
	}

	pub fn options(&self) -> &TooltipOptions {
		&self.options
	}

	/// Returns the placeholder name under `pos`, if any.
	///
	/// Returns `None` when the position only touches the word from outside:
	/// at its start while approaching from before, or at its end while
	/// approaching from after.
	pub fn name_at(&self, doc: RopeSlice, pos: CharIdx, side: Side) -> Option<(Range, String)> {
		if pos > doc.len_chars() {
			return None;
		}
		let line = line_bounds(doc, pos);

		let mut start = pos;
		while start > line.from && is_word_char(doc.char(start - 1)) {
			start -= 1;
		}
		let mut end = pos;
		while end < line.to && is_word_char(doc.char(end)) {
			end += 1;
		}

		if (start == pos && side == Side::Before) || (end == pos && side == Side::After) {
			return None;
		}

		let word = Range::new(start, end);
		if !self.kind.encloses(doc, line, word) {
			return None;
		}
		Some((word, doc.slice(start..end).to_string()))
	}

	/// Resolves the tooltip for a hover at `pos`.
	pub fn query(&self, doc: RopeSlice, pos: CharIdx, side: Side) -> Option<Tooltip> {
		let (word, name) = self.name_at(doc, pos, side)?;
		let line = line_bounds(doc, pos);
		let Resolution {
			status,
			display_value,
			source_label,
		} = self.resolver.resolve(&name);

		Some(Tooltip {
			anchor: word.from,
			end: line.to,
			token: Range::new(word.from - 2, word.to + 2),
			above: self.options.above,
			arrow: self.options.arrow,
			hover_delay: self.options.hover_delay(),
			class: self.class.clone(),
			status,
			content: TooltipContent {
				source_label,
				value: display_value,
			},
		})
	}
}
