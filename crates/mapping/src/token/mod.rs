//! Placeholder grammars and regex scanning.
//!
//! Two grammars exist and exactly one is active per snapshot:
//!
//! - environment references: `<<name>>`
//! - variable references: `{{name}}`
//!
//! Names are one or more ASCII letters, digits or underscores. Since a name
//! can never contain a line break, no token spans more than one line.

use std::sync::LazyLock;

use envlens_primitives::{CharIdx, Range, RopeSlice, is_word_char};
use regex::Regex;

use crate::entry::Snapshot;

static ENVIRONMENT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<<([0-9A-Za-z_]+)>>").expect("environment grammar is valid"));
static VARIABLE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{\{([0-9A-Za-z_]+)\}\}").expect("variable grammar is valid"));

/// Which placeholder grammar produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// `<<name>>`
	EnvironmentRef,
	/// `{{name}}`
	VariableRef,
}

impl TokenKind {
	/// Opening delimiter.
	pub fn open(self) -> &'static str {
		match self {
			Self::EnvironmentRef => "<<",
			Self::VariableRef => "{{",
		}
	}

	/// Closing delimiter.
	pub fn close(self) -> &'static str {
		match self {
			Self::EnvironmentRef => ">>",
			Self::VariableRef => "}}",
		}
	}

	/// Compiled grammar; group 1 captures the name.
	pub fn regex(self) -> &'static Regex {
		match self {
			Self::EnvironmentRef => &ENVIRONMENT_RE,
			Self::VariableRef => &VARIABLE_RE,
		}
	}

	/// Returns true if the word `[word.from, word.to)` is wrapped by this
	/// grammar's delimiters without leaving `line`.
	///
	/// `word` must be a maximal run of word characters; under that condition
	/// this is equivalent to the grammar matching the two-character-widened
	/// window around it.
	pub fn encloses(self, text: RopeSlice, line: Range, word: Range) -> bool {
		if word.is_empty() || word.from < line.from + 2 || word.to + 2 > line.to {
			return false;
		}
		if !text.slice(word.from..word.to).chars().all(is_word_char) {
			return false;
		}
		text.slice(word.from - 2..word.from).chars().eq(self.open().chars())
			&& text.slice(word.to..word.to + 2).chars().eq(self.close().chars())
	}
}

/// A placeholder occurrence in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
	/// Full extent including delimiters.
	pub range: Range,
	/// Name with delimiters stripped.
	pub name: String,
	pub kind: TokenKind,
}

/// Scanner for one placeholder grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatcher {
	kind: TokenKind,
}

impl TokenMatcher {
	pub fn new(kind: TokenKind) -> Self {
		Self { kind }
	}

	/// Creates a matcher for the grammar selected by the snapshot's kind.
	pub fn for_snapshot(snapshot: &Snapshot) -> Self {
		Self::new(snapshot.kind().token_kind())
	}

	pub fn kind(&self) -> TokenKind {
		self.kind
	}

	/// Finds all tokens in `text`, left to right and non-overlapping.
	///
	/// Ranges are char offsets into `text`.
	pub fn find_in_str(&self, text: &str) -> Vec<Token> {
		let mut tokens = Vec::new();
		let mut byte_cursor = 0;
		let mut char_cursor: CharIdx = 0;

		for caps in self.kind.regex().captures_iter(text) {
			let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
				continue;
			};
			char_cursor += text[byte_cursor..whole.start()].chars().count();
			let start = char_cursor;
			// The grammar is pure ASCII, so byte length equals char length.
			let end = start + whole.len();
			byte_cursor = whole.end();
			char_cursor = end;

			tokens.push(Token {
				range: Range::new(start, end),
				name: name.as_str().to_owned(),
				kind: self.kind,
			});
		}

		tokens
	}

	/// Finds all tokens inside `range` of a rope, reported in document coordinates.
	pub fn find_in(&self, text: RopeSlice, range: Range) -> Vec<Token> {
		let range = range.clamp(text.len_chars());
		let chunk: String = text.slice(range.from..range.to).chars().collect();
		let mut tokens = self.find_in_str(&chunk);
		for token in &mut tokens {
			token.range = token.range.offset(range.from);
		}
		tokens
	}

	/// Finds all tokens in the whole document.
	pub fn find_all(&self, text: RopeSlice) -> Vec<Token> {
		self.find_in(text, Range::new(0, text.len_chars()))
	}
}

/// Finds all tokens of `kind` in `text`.
pub fn find_tokens(text: &str, kind: TokenKind) -> Vec<Token> {
	TokenMatcher::new(kind).find_in_str(text)
}

#[cfg(test)]
mod tests;
