//! Mapping snapshots and the resolution side of placeholder annotation.
//!
//! A [`Snapshot`] is an immutable, ordered list of name/value entries tagged
//! with the [`MappingKind`] that selects the placeholder grammar. The
//! [`TokenMatcher`] finds placeholders in text, and the [`Resolver`] looks
//! names up and expands nested placeholders inside their values.

/// Mapping entries and snapshots.
pub mod entry;
/// Name lookup and display resolution.
pub mod resolve;
/// Recursive placeholder expansion.
pub mod template;
/// Placeholder grammars and scanning.
pub mod token;

pub use entry::{MappingEntry, MappingKind, Snapshot};
pub use resolve::{DEFAULT_UNKNOWN_LABEL, ERROR_TEXT, NOT_FOUND_TEXT, Resolution, ResolutionStatus, Resolver};
pub use template::{DEFAULT_MAX_DEPTH, ExpandError, PlaceholderTemplate, TemplateExpander};
pub use token::{Token, TokenKind, TokenMatcher, find_tokens};
