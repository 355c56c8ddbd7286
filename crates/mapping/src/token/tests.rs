use envlens_primitives::{Rope, line_bounds};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[test]
fn test_variable_token_in_url() {
	let tokens = find_tokens("{{base}}/v1", TokenKind::VariableRef);
	assert_eq!(
		tokens,
		vec![Token {
			range: Range::new(0, 8),
			name: "base".into(),
			kind: TokenKind::VariableRef,
		}]
	);
}

#[test]
fn test_environment_tokens_left_to_right() {
	let tokens = find_tokens("<<a>>/<<b_2>>?x=<<c>>", TokenKind::EnvironmentRef);
	let names: Vec<_> = tokens.iter().map(|t| t.name.as_str()).collect();
	assert_eq!(names, vec!["a", "b_2", "c"]);
	assert_eq!(tokens[1].range, Range::new(6, 13));
}

#[test]
fn test_grammars_are_exclusive() {
	let text = "<<env>> {{var}}";
	assert_eq!(find_tokens(text, TokenKind::EnvironmentRef).len(), 1);
	assert_eq!(find_tokens(text, TokenKind::VariableRef).len(), 1);
	assert_eq!(find_tokens(text, TokenKind::EnvironmentRef)[0].name, "env");
	assert_eq!(find_tokens(text, TokenKind::VariableRef)[0].name, "var");
}

#[rstest]
#[case("<<>>")]
#[case("<< a >>")]
#[case("<<a-b>>")]
#[case("<a>")]
#[case("<<a>")]
#[case("<<é>>")]
#[case("<<a\nb>>")]
fn test_rejects_malformed_environment_refs(#[case] text: &str) {
	assert!(find_tokens(text, TokenKind::EnvironmentRef).is_empty(), "{text:?}");
}

#[test]
fn test_nested_delimiters_match_innermost() {
	let tokens = find_tokens("<<<a>>>", TokenKind::EnvironmentRef);
	assert_eq!(tokens.len(), 1);
	assert_eq!(tokens[0].range, Range::new(1, 6));
}

#[test]
fn test_char_offsets_after_multibyte_text() {
	let tokens = find_tokens("héllo {{x}} wörld {{y}}", TokenKind::VariableRef);
	assert_eq!(tokens[0].range, Range::new(6, 11));
	assert_eq!(tokens[1].range, Range::new(18, 23));
}

#[test]
fn test_find_in_reports_document_coordinates() {
	let doc = Rope::from("line one\n{{a}} and {{b}}\n");
	let line = line_bounds(doc.slice(..), 10);
	let tokens = TokenMatcher::new(TokenKind::VariableRef).find_in(doc.slice(..), line);
	let ranges: Vec<_> = tokens.iter().map(|t| t.range).collect();
	assert_eq!(ranges, vec![Range::new(9, 14), Range::new(19, 24)]);
	let names: Vec<_> = tokens.iter().map(|t| t.name.as_str()).collect();
	assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_find_in_clamps_range_past_end() {
	let doc = Rope::from("{{a}} {{b}}");
	let tokens = TokenMatcher::new(TokenKind::VariableRef).find_in(doc.slice(..), Range::new(6, 99));
	assert_eq!(tokens.len(), 1);
	assert_eq!(tokens[0].range, Range::new(6, 11));
	assert_eq!(tokens[0].name, "b");

	assert!(TokenMatcher::new(TokenKind::VariableRef).find_in(doc.slice(..), Range::new(40, 99)).is_empty());
}

#[rstest]
#[case("x <<host>> y", 4, 8, TokenKind::EnvironmentRef, true)]
#[case("x <<host>> y", 4, 8, TokenKind::VariableRef, false)]
#[case("<host>>", 1, 5, TokenKind::EnvironmentRef, false)]
#[case("<<host>", 2, 6, TokenKind::EnvironmentRef, false)]
#[case("{{a}}", 2, 3, TokenKind::VariableRef, true)]
#[case("{{}}", 2, 2, TokenKind::VariableRef, false)]
fn test_encloses(
	#[case] text: &str,
	#[case] from: usize,
	#[case] to: usize,
	#[case] kind: TokenKind,
	#[case] expected: bool,
) {
	let doc = Rope::from(text);
	let line = line_bounds(doc.slice(..), from);
	assert_eq!(kind.encloses(doc.slice(..), line, Range::new(from, to)), expected);
}

#[test]
fn test_encloses_does_not_cross_lines() {
	let doc = Rope::from("<<\nname\n>>");
	let line = line_bounds(doc.slice(..), 4);
	assert!(!TokenKind::EnvironmentRef.encloses(doc.slice(..), line, Range::new(3, 7)));
}

proptest! {
	#[test]
	fn prop_environment_matches_are_disjoint_and_well_formed(text in "[<>a-z_ \\n{}]{0,60}") {
		let tokens = find_tokens(&text, TokenKind::EnvironmentRef);
		let chars: Vec<char> = text.chars().collect();
		for pair in tokens.windows(2) {
			prop_assert!(pair[0].range.to <= pair[1].range.from);
		}
		for token in &tokens {
			let raw: String = chars[token.range.from..token.range.to].iter().collect();
			prop_assert!(raw.starts_with("<<") && raw.ends_with(">>"));
			prop_assert!(!token.name.is_empty());
			prop_assert!(token.name.chars().all(is_word_char));
			prop_assert_eq!(raw, format!("<<{}>>", token.name));
		}
	}
}
