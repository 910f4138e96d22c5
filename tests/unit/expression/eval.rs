use super::*;
use crate::expression::error::ExprErrorKind;

fn vars() -> HashMap<String, f64> {
    HashMap::from([
        ("speed".to_owned(), 1.0),
        ("index".to_owned(), 2.0),
        ("count".to_owned(), 4.0),
    ])
}

#[test]
fn evaluates_delimited_formula() {
    let v = evaluate("{{speed*2.0+index*0.25}}", &vars()).unwrap();
    assert!((v - 2.5).abs() < 1e-12);
}

#[test]
fn delimiters_are_optional_and_whitespace_tolerant() {
    assert_eq!(evaluate("  {{ index / count }} ", &vars()).unwrap(), 0.5);
    assert_eq!(evaluate("index / count", &vars()).unwrap(), 0.5);
}

#[test]
fn follows_precedence_and_grouping() {
    let v = vars();
    assert_eq!(evaluate("1 + 2 * 3", &v).unwrap(), 7.0);
    assert_eq!(evaluate("(1 + 2) * 3", &v).unwrap(), 9.0);
    assert_eq!(evaluate("8 / 4 / 2", &v).unwrap(), 1.0);
    assert_eq!(evaluate("10 - 4 - 3", &v).unwrap(), 3.0);
    assert_eq!(evaluate("-index * -2", &v).unwrap(), 4.0);
}

#[test]
fn division_by_zero_fails() {
    let err = evaluate("{{1 / (index - 2)}}", &vars()).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::DivisionByZero);
    assert_eq!(err.offset, 2);

    let err = evaluate("0/0", &vars()).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::DivisionByZero);
}

#[test]
fn unknown_identifier_fails() {
    let err = evaluate("speed + wobble", &vars()).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::UnknownVariable);
    assert_eq!(err.offset, 8);
    assert!(err.message.contains("wobble"));
}

#[test]
fn identifiers_are_case_sensitive() {
    let err = evaluate("Speed", &vars()).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::UnknownVariable);
}

#[test]
fn array_lookup_works() {
    let v = [("amplitudeScale", 0.5), ("index", 3.0)];
    assert_eq!(evaluate("amplitudeScale * index", &v).unwrap(), 1.5);
}

#[test]
fn strip_delimiters_requires_both_ends() {
    assert_eq!(strip_delimiters("{{ a }}"), Some("a"));
    assert_eq!(strip_delimiters("{{ a"), None);
    assert_eq!(strip_delimiters("a }}"), None);
}
