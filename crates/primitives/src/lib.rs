//! Core text types shared by the annotation crates: ranges, changes, and rope helpers.

/// Single-range document changes and position mapping.
pub mod change;
/// Text range types measured in characters.
pub mod range;
/// Rope utilities: line bounds and word characters.
pub mod rope;

pub use change::{Bias, Change, ChangeError};
pub use range::{CharIdx, CharLen, Range};
pub use rope::{is_word_char, line_bounds, lines_covering};
pub use ropey::{Rope, RopeSlice};
