//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::{CharIdx, Range};

/// Word character predicate for placeholder names: ASCII alphanumeric or underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}

/// Returns the bounds of the line containing `pos`, excluding its line ending.
///
/// `pos` is clamped to the document length, so the end of the document maps
/// to the final (possibly empty) line.
pub fn line_bounds(text: RopeSlice, pos: CharIdx) -> Range {
	let pos = pos.min(text.len_chars());
	let line_idx = text.char_to_line(pos);
	let start = text.line_to_char(line_idx);
	let line = text.line(line_idx);
	let mut len = line.len_chars();
	if len > 0 && line.char(len - 1) == '\n' {
		len -= 1;
		if len > 0 && line.char(len - 1) == '\r' {
			len -= 1;
		}
	}
	Range::new(start, start + len)
}

/// Returns the smallest run of whole lines covering `range`.
pub fn lines_covering(text: RopeSlice, range: Range) -> Range {
	let first = line_bounds(text, range.from);
	let last = line_bounds(text, range.to);
	first.merge(&last)
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn test_line_bounds_middle_line() {
		let text = Rope::from("hello\nworld\nagain");
		assert_eq!(line_bounds(text.slice(..), 8), Range::new(6, 11));
	}

	#[test]
	fn test_line_bounds_at_newline() {
		let text = Rope::from("hello\nworld");
		assert_eq!(line_bounds(text.slice(..), 5), Range::new(0, 5));
	}

	#[test]
	fn test_line_bounds_crlf() {
		let text = Rope::from("ab\r\ncd");
		assert_eq!(line_bounds(text.slice(..), 1), Range::new(0, 2));
		assert_eq!(line_bounds(text.slice(..), 4), Range::new(4, 6));
	}

	#[test]
	fn test_line_bounds_trailing_empty_line() {
		let text = Rope::from("hello\n");
		assert_eq!(line_bounds(text.slice(..), 6), Range::new(6, 6));
		assert_eq!(line_bounds(text.slice(..), 99), Range::new(6, 6));
	}

	#[test]
	fn test_line_bounds_empty() {
		let text = Rope::from("");
		assert_eq!(line_bounds(text.slice(..), 0), Range::new(0, 0));
	}

	#[test]
	fn test_lines_covering_spans_multiple_lines() {
		let text = Rope::from("one\ntwo\nthree");
		assert_eq!(lines_covering(text.slice(..), Range::new(2, 5)), Range::new(0, 7));
	}

	#[test]
	fn test_is_word_char_ascii_only() {
		assert!(is_word_char('a'));
		assert!(is_word_char('Z'));
		assert!(is_word_char('7'));
		assert!(is_word_char('_'));
		assert!(!is_word_char('-'));
		assert!(!is_word_char('é'));
	}
}
