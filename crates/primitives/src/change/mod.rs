//! Single-range document changes.
//!
//! A [`Change`] replaces `[from, to)` of the pre-edit document with new text.
//! It is the unit the host editor reports on every edit, and the unit the
//! decoration maintainer uses to decide which region to rescan.

use thiserror::Error;

use crate::range::{CharIdx, CharLen, Range};
use crate::{Rope, RopeSlice};

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// Failure to apply a change to a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
	/// The replaced range extends past the end of the document.
	#[error("change range {from}..{to} exceeds document length {len}")]
	OutOfBounds {
		/// Start of the rejected range.
		from: CharIdx,
		/// End of the rejected range.
		to: CharIdx,
		/// Document length in characters.
		len: CharLen,
	},
}

/// Replacement of the range `[from, to)` with `insert`.
///
/// Fields are private to keep the cached insertion length in sync with the
/// text. Construct via [`Change::new`], [`Change::insert`] or [`Change::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
	range: Range,
	insert: String,
	insert_len: CharLen,
}

impl Change {
	/// Creates a change replacing `[from, to)` with `insert`.
	pub fn new(from: CharIdx, to: CharIdx, insert: impl Into<String>) -> Self {
		let insert = insert.into();
		let insert_len = insert.chars().count();
		Self {
			range: Range::new(from, to),
			insert,
			insert_len,
		}
	}

	/// Creates a pure insertion at `pos`.
	pub fn insert(pos: CharIdx, text: impl Into<String>) -> Self {
		Self::new(pos, pos, text)
	}

	/// Creates a pure deletion of `range`.
	pub fn delete(range: Range) -> Self {
		Self::new(range.from, range.to, String::new())
	}

	/// Returns the replaced range in pre-edit coordinates.
	#[inline]
	pub fn range(&self) -> Range {
		self.range
	}

	/// Returns the inserted text.
	#[inline]
	pub fn text(&self) -> &str {
		&self.insert
	}

	/// Returns the range covered by the inserted text in post-edit coordinates.
	pub fn inserted_range(&self) -> Range {
		Range::new(self.range.from, self.range.from + self.insert_len)
	}

	/// Returns true if the change neither deletes nor inserts anything.
	pub fn is_noop(&self) -> bool {
		self.range.is_empty() && self.insert_len == 0
	}

	/// Returns the signed change in document length.
	pub fn delta(&self) -> isize {
		self.insert_len as isize - self.range.len() as isize
	}

	/// Checks that the change fits inside `doc`.
	pub fn validate(&self, doc: RopeSlice) -> Result<(), ChangeError> {
		let len = doc.len_chars();
		if self.range.to > len {
			return Err(ChangeError::OutOfBounds {
				from: self.range.from,
				to: self.range.to,
				len,
			});
		}
		Ok(())
	}

	/// Applies this change to a document, modifying it in place.
	pub fn apply(&self, doc: &mut Rope) -> Result<(), ChangeError> {
		self.validate(doc.slice(..))?;
		if !self.range.is_empty() {
			doc.remove(self.range.from..self.range.to);
		}
		if self.insert_len > 0 {
			doc.insert(self.range.from, &self.insert);
		}
		Ok(())
	}

	/// Maps a pre-edit position into the post-edit document.
	///
	/// Positions inside the replaced range collapse onto the insertion,
	/// before it with [`Bias::Left`] and after it with [`Bias::Right`].
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		let Range { from, to } = self.range;
		if pos < from {
			pos
		} else if pos > to {
			pos - (to - from) + self.insert_len
		} else {
			match bias {
				Bias::Left => from,
				Bias::Right => from + self.insert_len,
			}
		}
	}

	/// Maps a range lying entirely outside the replaced region.
	///
	/// Returns `None` when the range touches the replaced region, since its
	/// contents may have been altered.
	pub fn map_untouched(&self, range: Range) -> Option<Range> {
		if range.touches(&self.range) {
			return None;
		}
		Some(range.map(|pos| self.map_pos(pos, Bias::Left)))
	}
}
