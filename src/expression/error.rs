use std::fmt;

/// Failure class of an expression error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprErrorKind {
    /// Malformed input: bad token, missing operand, unbalanced parentheses.
    Syntax,
    /// An identifier that is not in the supplied variable map.
    UnknownVariable,
    /// Division by exactly zero.
    DivisionByZero,
}

/// Error raised while lexing, parsing or evaluating a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprError {
    /// Failure class.
    pub kind: ExprErrorKind,
    /// Byte offset into the formula body.
    pub offset: usize,
    /// Human-readable detail.
    pub message: String,
}

impl ExprError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ExprErrorKind::Syntax,
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn unknown_variable(offset: usize, name: &str) -> Self {
        Self {
            kind: ExprErrorKind::UnknownVariable,
            offset,
            message: format!("unknown variable '{name}'"),
        }
    }

    pub(crate) fn division_by_zero(offset: usize) -> Self {
        Self {
            kind: ExprErrorKind::DivisionByZero,
            offset,
            message: "division by zero".to_owned(),
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expr error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ExprError {}
