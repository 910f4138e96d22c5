use super::*;
use crate::expression::error::{ExprError, ExprErrorKind};

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KinemaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KinemaError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        KinemaError::unknown_primitive("warp").to_string(),
        "unknown primitive 'warp'"
    );
}

#[test]
fn expression_errors_carry_context() {
    let err = KinemaError::expression(
        "part_rules[0].params.amp",
        ExprError::division_by_zero(4),
    );
    let s = err.to_string();
    assert!(s.contains("part_rules[0].params.amp"));
    assert!(s.contains("division by zero"));
    match err {
        KinemaError::Expression { source, .. } => {
            assert_eq!(source.kind, ExprErrorKind::DivisionByZero)
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KinemaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
