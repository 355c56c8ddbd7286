use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::entry::MappingEntry;

fn vars(pairs: &[(&str, &str)]) -> Snapshot {
	Snapshot::variables(pairs.iter().map(|(k, v)| MappingEntry::variable(*k, *v)).collect())
}

fn expand(template: &str, snapshot: &Snapshot) -> Result<String, ExpandError> {
	PlaceholderTemplate.expand(template, snapshot, DEFAULT_MAX_DEPTH)
}

#[test]
fn test_plain_text_is_unchanged() {
	assert_eq!(expand("https://api.com", &vars(&[])), Ok("https://api.com".into()));
}

#[test]
fn test_nested_expansion() {
	let snap = vars(&[("base", "{{scheme}}://{{host}}"), ("scheme", "https"), ("host", "{{sub}}.api.com"), ("sub", "eu")]);
	assert_eq!(expand("{{base}}/v1", &snap), Ok("https://eu.api.com/v1".into()));
}

#[test]
fn test_environment_grammar_leaves_braces_literal() {
	let snap = Snapshot::environment(vec![
		MappingEntry::environment("host", "srv", "Prod"),
		MappingEntry::environment("url", "http://<<host>>/{{path}}", "Prod"),
	]);
	assert_eq!(expand("<<url>>", &snap), Ok("http://srv/{{path}}".into()));
}

#[test]
fn test_unclosed_delimiter_is_literal() {
	assert_eq!(expand("a {{b", &vars(&[("b", "x")])), Ok("a {{b".into()));
}

#[test]
fn test_unresolved_nested_name() {
	assert_eq!(
		expand("{{a}}", &vars(&[("a", "{{nope}}")])),
		Err(ExpandError::Unresolved { name: "nope".into() })
	);
}

#[rstest]
#[case("{{}}", 0)]
#[case("ok {{a b}}", 3)]
#[case("{{x}}{{a-b}}", 5)]
fn test_malformed(#[case] template: &str, #[case] offset: usize) {
	let snap = vars(&[("x", "1")]);
	assert_eq!(expand(template, &snap), Err(ExpandError::Malformed { offset }));
}

#[test]
fn test_direct_self_reference_is_cycle() {
	let snap = vars(&[("a", "{{a}}")]);
	assert_eq!(expand("{{a}}", &snap), Err(ExpandError::Cycle { name: "a".into() }));
}

#[test]
fn test_mutual_reference_is_cycle() {
	let snap = vars(&[("a", "x{{b}}"), ("b", "y{{a}}")]);
	assert_eq!(expand("{{a}}", &snap), Err(ExpandError::Cycle { name: "a".into() }));
}

#[test]
fn test_repeated_reference_is_not_a_cycle() {
	let snap = vars(&[("a", "{{b}}-{{b}}"), ("b", "1")]);
	assert_eq!(expand("{{a}}", &snap), Ok("1-1".into()));
}

#[test]
fn test_depth_limit() {
	let snap = vars(&[("a", "{{b}}"), ("b", "{{c}}"), ("c", "{{d}}"), ("d", "end")]);
	assert_eq!(PlaceholderTemplate.expand("{{a}}", &snap, 4), Ok("end".into()));
	assert_eq!(
		PlaceholderTemplate.expand("{{a}}", &snap, 3),
		Err(ExpandError::DepthExceeded { limit: 3 })
	);
}
