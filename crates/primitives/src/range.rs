/// A position in the text, measured in characters (not bytes).
///
/// This is the canonical coordinate space for every annotation type.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// A half-open text range `[from, to)`.
///
/// Unlike a selection, a span has no direction: construction orders the
/// endpoints so that `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
	/// Start of the range (inclusive).
	pub from: CharIdx,
	/// End of the range (exclusive).
	pub to: CharIdx,
}

impl Range {
	/// Creates a new range, swapping the endpoints if given in reverse.
	pub fn new(from: CharIdx, to: CharIdx) -> Self {
		if to < from { Self { from: to, to: from } } else { Self { from, to } }
	}

	/// Returns the length of the range in characters.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.to - self.from
	}

	/// Returns true if the range is zero-width.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.from == self.to
	}

	/// Returns true if the ranges overlap or meet at an endpoint.
	///
	/// A span touching an edit boundary may have been split or extended by
	/// it, so this is the test used to invalidate spans.
	pub fn touches(&self, other: &Range) -> bool {
		self.from <= other.to && other.from <= self.to
	}

	/// Returns the smallest range covering both.
	pub fn merge(&self, other: &Range) -> Self {
		Self {
			from: self.from.min(other.from),
			to: self.to.max(other.to),
		}
	}

	/// Applies a function to both endpoints.
	pub fn map(self, mut f: impl FnMut(CharIdx) -> CharIdx) -> Self {
		Self::new(f(self.from), f(self.to))
	}

	/// Offsets both endpoints by `base`.
	pub fn offset(self, base: CharIdx) -> Self {
		Self {
			from: self.from + base,
			to: self.to + base,
		}
	}

	/// Clamps both endpoints to `[0, max_char]`.
	pub fn clamp(self, max_char: CharIdx) -> Self {
		Self {
			from: self.from.min(max_char),
			to: self.to.min(max_char),
		}
	}
}

impl From<std::ops::Range<CharIdx>> for Range {
	fn from(r: std::ops::Range<CharIdx>) -> Self {
		Self::new(r.start, r.end)
	}
}

impl From<Range> for std::ops::Range<CharIdx> {
	fn from(r: Range) -> Self {
		r.from..r.to
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_range_basics() {
		let r = Range::new(5, 10);
		assert_eq!(r.from, 5);
		assert_eq!(r.to, 10);
		assert_eq!(r.len(), 5);
		assert!(!r.is_empty());
	}

	#[test]
	fn test_range_reversed_is_normalized() {
		let r = Range::new(10, 5);
		assert_eq!(r, Range::new(5, 10));
	}

	#[test]
	fn test_range_touches_adjacent() {
		let r1 = Range::new(5, 10);
		assert!(r1.touches(&Range::new(10, 15)));
		assert!(r1.touches(&Range::new(5, 5)));
		assert!(!r1.touches(&Range::new(11, 15)));
	}

	#[test]
	fn test_range_merge() {
		let merged = Range::new(5, 10).merge(&Range::new(8, 15));
		assert_eq!(merged, Range::new(5, 15));
	}

	#[test]
	fn test_range_offset_and_clamp() {
		assert_eq!(Range::new(1, 3).offset(10), Range::new(11, 13));
		assert_eq!(Range::new(4, 30).clamp(10), Range::new(4, 10));
		assert_eq!(Range::new(12, 30).clamp(10), Range::new(10, 10));
	}

	#[test]
	fn test_range_map_renormalizes() {
		assert_eq!(Range::new(2, 6).map(|p| 10 - p), Range::new(4, 8));
	}
}
