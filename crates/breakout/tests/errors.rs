//! Tests for error messages and typo suggestions.

use breakout::RenderError;
use breakout::escape::EscapeError;
use breakout::interpreter::compute_suggestions;

#[test]
fn suggestions_short_names_allow_one_edit() {
    let names = ["js", "css", "url", "html"];
    assert_eq!(compute_suggestions("jz", names), vec!["js"]);
    assert_eq!(compute_suggestions("xyz", names), Vec::<String>::new());
}

#[test]
fn suggestions_long_names_allow_two_edits() {
    let names = ["html", "htmlattr", "url"];
    assert_eq!(compute_suggestions("htmlatr", names), vec!["htmlattr"]);
    assert_eq!(compute_suggestions("hmtl", names), vec!["html"]);
}

#[test]
fn suggestions_exclude_exact_match_and_cap_at_three() {
    let names = ["aaaa", "aaab", "aabb", "abbb", "aaac", "bbbb"];
    let suggestions = compute_suggestions("aaaa", names);
    assert_eq!(suggestions.len(), 3);
    assert!(!suggestions.contains(&"aaaa".to_string()));
    assert_eq!(suggestions[0], "aaab");
}

#[test]
fn render_error_messages() {
    let cases: Vec<(RenderError, &str)> = vec![
        (
            RenderError::VariableNotFound {
                path: "users".into(),
            },
            "variable 'users' not found for use in for loop",
        ),
        (
            RenderError::NotIterable {
                path: "n".into(),
                found: "number",
            },
            "cannot iterate over 'n': found number",
        ),
        (
            RenderError::UnknownEscapeContext {
                name: "jss".into(),
                suggestions: vec!["js".into(), "css".into()],
            },
            "unknown escape context 'jss', did you mean: js, css?",
        ),
        (
            RenderError::InvalidEscapeInput(EscapeError {
                context: "css".into(),
                found: "map",
            }),
            "cannot escape a map value in the 'css' context",
        ),
        (
            RenderError::SpanOutOfBounds {
                start: 4,
                end: 9,
                len: 6,
            },
            "span 4..9 out of bounds for document of length 6",
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}
