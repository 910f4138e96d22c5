use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Deepest allowed nesting of parentheses and unary minus.
const MAX_DEPTH: usize = 256;
/// Most binary operators allowed in one formula.
const MAX_OPERATORS: usize = 1024;

/// Parse a formula body (delimiters already stripped).
pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
        operators: 0,
    };
    if p.peek().kind == TokenKind::Eof {
        return Err(ExprError::syntax(0, "empty expression"));
    }
    let expr = p.parse_addsub()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        // Eof is sticky.
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::syntax(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn enter(&mut self, offset: usize) -> Result<(), ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::syntax(offset, "expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    fn count_operator(&mut self, offset: usize) -> Result<(), ExprError> {
        if self.operators >= MAX_OPERATORS {
            return Err(ExprError::syntax(offset, "expression has too many operators"));
        }
        self.operators += 1;
        Ok(())
    }

    fn parse_addsub(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_muldiv()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let offset = self.bump().span.start;
            self.count_operator(offset)?;
            let r = self.parse_muldiv()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
                offset,
            };
        }
        Ok(e)
    }

    fn parse_muldiv(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            let offset = self.bump().span.start;
            self.count_operator(offset)?;
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
                offset,
            };
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.peek().kind == TokenKind::Minus {
            let offset = self.bump().span.start;
            self.enter(offset)?;
            let e = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Neg(Box::new(e)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Num(v)),
            TokenKind::Ident(name) => {
                if self.peek().kind == TokenKind::LParen {
                    return Err(ExprError::syntax(
                        t.span.start,
                        format!("function calls are not supported ('{name}(...)')"),
                    ));
                }
                Ok(Expr::Var {
                    name,
                    offset: t.span.start,
                })
            }
            TokenKind::LParen => {
                self.enter(t.span.start)?;
                let e = self.parse_addsub()?;
                self.expect(TokenKind::RParen)?;
                self.depth -= 1;
                Ok(e)
            }
            TokenKind::Eof => Err(ExprError::syntax(
                t.span.start,
                "unexpected end of expression",
            )),
            other => Err(ExprError::syntax(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
