use std::collections::{BTreeMap, HashMap};

use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::error::ExprError;
use crate::expression::parser::parse_expr;

/// Opening delimiter of a formula string.
pub const FORMULA_OPEN: &str = "{{";
/// Closing delimiter of a formula string.
pub const FORMULA_CLOSE: &str = "}}";

/// Read-only variable lookup used while evaluating formulas.
pub trait Variables {
    /// Return the value bound to `name`, if any.
    fn get_var(&self, name: &str) -> Option<f64>;
}

impl Variables for HashMap<String, f64> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Variables for BTreeMap<String, f64> {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Variables for [(&str, f64)] {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> Variables for [(&str, f64); N] {
    fn get_var(&self, name: &str) -> Option<f64> {
        self.as_slice().get_var(name)
    }
}

/// Strip `{{ ... }}` delimiters, returning the trimmed body, or `None` if `s` is not delimited.
pub fn strip_delimiters(s: &str) -> Option<&str> {
    s.trim()
        .strip_prefix(FORMULA_OPEN)
        .and_then(|rest| rest.strip_suffix(FORMULA_CLOSE))
        .map(str::trim)
}

/// Evaluate an arithmetic formula against `vars`.
///
/// The grammar is closed: numbers, identifiers bound in `vars`, `+ - * /`, unary minus and
/// parentheses. Delimiters (`{{ }}`) are optional.
pub fn evaluate<V: Variables + ?Sized>(expression: &str, vars: &V) -> Result<f64, ExprError> {
    let body = strip_delimiters(expression).unwrap_or(expression);
    let expr = parse_expr(body)?;
    eval_expr(&expr, vars)
}

pub(crate) fn eval_expr<V: Variables + ?Sized>(expr: &Expr, vars: &V) -> Result<f64, ExprError> {
    match expr {
        Expr::Num(v) => Ok(*v),
        Expr::Var { name, offset } => vars
            .get_var(name)
            .ok_or_else(|| ExprError::unknown_variable(*offset, name)),
        Expr::Neg(inner) => Ok(-eval_expr(inner, vars)?),
        Expr::Binary {
            op,
            left,
            right,
            offset,
        } => {
            let l = eval_expr(left, vars)?;
            let r = eval_expr(right, vars)?;
            match op {
                BinaryOp::Add => Ok(l + r),
                BinaryOp::Sub => Ok(l - r),
                BinaryOp::Mul => Ok(l * r),
                BinaryOp::Div => {
                    if r == 0.0 {
                        return Err(ExprError::division_by_zero(*offset));
                    }
                    Ok(l / r)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
