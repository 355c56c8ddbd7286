//! Incrementally maintained highlight spans.
//!
//! # Role
//!
//! Derives one highlight per placeholder token in the document, classified
//! by whether its name exists in the active snapshot. Classification is an
//! existence check only; expansion failures never change a span's colour.
//!
//! # Invariants
//!
//! - Spans are sorted by position and never overlap.
//! - After [`DecorationMaintainer::apply_change`], the span set equals what a
//!   full scan of the post-edit document would produce.
//! - Tokens never cross a line break, so an edit can only affect tokens on
//!   the lines it touches. Only those lines are rescanned.

use std::sync::Arc;

use envlens_mapping::{Resolver, Token, TokenMatcher};
use envlens_primitives::{Change, Range, RopeSlice, lines_covering};

use crate::config::HighlightClasses;

/// Highlight state of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightStyle {
	/// The name exists in the snapshot.
	Found,
	/// The name is missing; rendered as a warning.
	NotFound,
}

/// A highlight span handed to the host renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	/// Token extent including delimiters.
	pub range: Range,
	pub name: String,
	pub style: HighlightStyle,
	/// Full CSS class string (base class plus state class).
	pub class: Arc<str>,
}

/// Maintains the highlight spans of one document against one snapshot.
#[derive(Debug, Clone)]
pub struct DecorationMaintainer {
	matcher: TokenMatcher,
	resolver: Resolver,
	found_class: Arc<str>,
	not_found_class: Arc<str>,
	spans: Vec<Decoration>,
	generation: u64,
}

impl DecorationMaintainer {
	/// Builds the span set with a full scan of `doc`.
	pub fn new(resolver: Resolver, classes: &HighlightClasses, doc: RopeSlice) -> Self {
		let mut this = Self {
			matcher: TokenMatcher::for_snapshot(resolver.snapshot()),
			resolver,
			found_class: classes.class_for(HighlightStyle::Found).into(),
			not_found_class: classes.class_for(HighlightStyle::NotFound).into(),
			spans: Vec::new(),
			generation: 0,
		};
		this.rescan(doc);
		this
	}

	pub(crate) fn with_generation(mut self, generation: u64) -> Self {
		self.generation = generation;
		self
	}

	pub(crate) fn set_generation(&mut self, generation: u64) {
		self.generation = generation;
	}

	/// Generation of the extension this span set was built from.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn resolver(&self) -> &Resolver {
		&self.resolver
	}

	/// All spans, sorted by position.
	pub fn decorations(&self) -> &[Decoration] {
		&self.spans
	}

	/// Spans overlapping `range`, for painting a viewport.
	pub fn decorations_in(&self, range: Range) -> &[Decoration] {
		let start = self.spans.partition_point(|d| d.range.to <= range.from);
		let end = self.spans.partition_point(|d| d.range.from < range.to);
		&self.spans[start..end.max(start)]
	}

	pub fn len(&self) -> usize {
		self.spans.len()
	}

	pub fn is_empty(&self) -> bool {
		self.spans.is_empty()
	}

	/// Discards all spans and rescans the whole document.
	pub fn rescan(&mut self, doc: RopeSlice) {
		self.spans = self.matcher.find_all(doc).into_iter().map(|t| self.classify(t)).collect();
		tracing::trace!(spans = self.spans.len(), "Full decoration scan");
	}

	/// Switches to a new snapshot. Every classification may be stale, so
	/// this always rescans the whole document.
	pub fn rebind(&mut self, resolver: Resolver, classes: &HighlightClasses, doc: RopeSlice) {
		self.matcher = TokenMatcher::for_snapshot(resolver.snapshot());
		self.resolver = resolver;
		self.found_class = classes.class_for(HighlightStyle::Found).into();
		self.not_found_class = classes.class_for(HighlightStyle::NotFound).into();
		self.rescan(doc);
	}

	/// Updates spans after `change` was applied, producing `doc`.
	///
	/// Spans before the edit are kept, spans after it are shifted, and the
	/// lines spanned by the edit in the new document are rescanned.
	pub fn apply_change(&mut self, doc: RopeSlice, change: &Change) {
		if change.is_noop() {
			return;
		}

		let edit = change.range();

		let first_touched = self.spans.partition_point(|d| d.range.to < edit.from);
		let first_after = self.spans.partition_point(|d| d.range.from <= edit.to);
		let tail: Vec<Decoration> = self
			.spans
			.drain(first_after..)
			.filter_map(|d| change.map_untouched(d.range).map(|range| Decoration { range, ..d }))
			.collect();
		self.spans.truncate(first_touched);

		let region = lines_covering(doc, change.inserted_range());
		while self.spans.last().is_some_and(|d| d.range.to > region.from) {
			self.spans.pop();
		}

		let fresh: Vec<Decoration> = self.matcher.find_in(doc, region).into_iter().map(|t| self.classify(t)).collect();
		let rescanned = fresh.len();
		self.spans.extend(fresh);
		self.spans.extend(tail.into_iter().filter(|d| d.range.from >= region.to));

		tracing::trace!(
			edit_from = edit.from,
			edit_to = edit.to,
			region_from = region.from,
			region_to = region.to,
			rescanned,
			"Incremental decoration update"
		);
	}

	fn classify(&self, token: Token) -> Decoration {
		let (style, class) = if self.resolver.exists(&token.name) {
			(HighlightStyle::Found, self.found_class.clone())
		} else {
			(HighlightStyle::NotFound, self.not_found_class.clone())
		};
		Decoration {
			range: token.range,
			name: token.name,
			style,
			class,
		}
	}
}
