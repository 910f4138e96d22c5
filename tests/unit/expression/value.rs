use super::*;
use crate::expression::error::ExprErrorKind;

fn vars() -> [(&'static str, f64); 2] {
    [("speed", 2.0), ("index", 1.0)]
}

#[test]
fn literal_comes_back_unchanged() {
    for n in [0.0, -3.25, 1e9, f64::MIN_POSITIVE] {
        assert_eq!(resolve_value(&ParamValue::Literal(n), &vars()).unwrap(), n);
    }
}

#[test]
fn delimited_formula_is_evaluated() {
    let v = ParamValue::from("{{speed*2.0+index*0.25}}");
    assert_eq!(resolve_value(&v, &vars()).unwrap(), 4.25);
}

#[test]
fn plain_numeric_string_resolves_directly() {
    assert_eq!(resolve_value(&ParamValue::from(" 0.75 "), &vars()).unwrap(), 0.75);
}

#[test]
fn undelimited_non_numeric_string_is_a_syntax_error() {
    let err = resolve_value(&ParamValue::from("speed*2"), &vars()).unwrap_err();
    assert_eq!(err.kind, ExprErrorKind::Syntax);
}

#[test]
fn list_in_scalar_position_is_rejected() {
    let v = ParamValue::List(vec![ParamValue::Literal(1.0), ParamValue::Literal(2.0)]);
    assert!(resolve_value(&v, &vars()).is_err());
}

#[test]
fn resolve_into_flattens_nested_lists_in_order() {
    let v = ParamValue::List(vec![
        ParamValue::Literal(1.0),
        ParamValue::List(vec!["{{speed}}".into(), "3".into()]),
        "{{index + 10}}".into(),
    ]);
    let mut out = Vec::new();
    v.resolve_into(&vars(), &mut out).unwrap();
    assert_eq!(out, vec![1.0, 2.0, 3.0, 11.0]);
}

#[test]
fn json_maps_to_variants() {
    let v: ParamValue = serde_json::from_str("3").unwrap();
    assert_eq!(v, ParamValue::Literal(3.0));
    let v: ParamValue = serde_json::from_str(r#""{{speed}}""#).unwrap();
    assert_eq!(v.formula(), Some("{{speed}}"));
    let v: ParamValue = serde_json::from_str(r#"[0, "{{index}}"]"#).unwrap();
    assert!(matches!(v, ParamValue::List(ref items) if items.len() == 2));
}

#[test]
fn param_map_keeps_document_order() {
    let m: ParamMap =
        serde_json::from_str(r#"{"zeta": 1, "alpha": "{{speed}}", "mid": [2, 3]}"#).unwrap();
    let keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

    let back = serde_json::to_string(&m).unwrap();
    assert_eq!(back, r#"{"zeta":1.0,"alpha":"{{speed}}","mid":[2.0,3.0]}"#);
}

#[test]
fn param_map_insert_replaces_in_place() {
    let mut m: ParamMap = [("a", 1.0), ("b", 2.0)].into_iter().collect();
    m.insert("a", 5.0);
    let pairs: Vec<(&str, &ParamValue)> = m.iter().collect();
    assert_eq!(pairs[0], ("a", &ParamValue::Literal(5.0)));
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("b"), Some(&ParamValue::Literal(2.0)));
}
