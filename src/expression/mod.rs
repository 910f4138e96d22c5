//! Closed arithmetic formulas over runtime variables.
//!
//! Formulas support numbers, identifiers, `+ - * /`, unary minus and parentheses. There are no
//! function calls and nothing reaches a host interpreter, so evaluation is side-effect free and
//! linear in the formula length.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod value;
