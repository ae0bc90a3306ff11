//! Recursive descent parser for expressions.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr    := postfix ( "|" IDENT ( "(" args? ")" )? )*
//! postfix := primary ( "." IDENT | "[" expr "]" )*
//! primary := literal | "-" number | IDENT | "[" args? "]" | "(" expr ")"
//! args    := expr ( "," expr )* ","?
//! ```

use weave_ir::stack::ensure_sufficient_stack;
use weave_ir::{Name, Span, Value};

use crate::ast::Expr;
use crate::error::ParseError;
use crate::lexer::{lex, Token, TokenKind};

/// Parse a complete expression. Trailing tokens are an error.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser { tokens, pos: 0 };

    if parser.check(&TokenKind::Eof) {
        return Err(ParseError::invalid_expression(
            "expected an expression",
            parser.current().span,
        ));
    }

    let expr = parser.parse_expr()?;
    parser.expect(&TokenKind::Eof)?;
    Ok(expr)
}

/// Parser state over a token list ending in `Eof`.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    #[inline]
    fn current(&self) -> &Token {
        // `lex` always terminates the list with Eof, and `advance` never
        // moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            return Ok(self.advance().span);
        }
        let found = self.current();
        Err(ParseError::invalid_expression(
            format!("expected {}, found {}", kind.describe(), found.kind.describe()),
            found.span,
        ))
    }

    fn expect_ident(&mut self) -> Result<Name, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Name::from(name))
            }
            other => Err(ParseError::invalid_expression(
                format!("expected a name, found {}", other.describe()),
                token.span,
            )),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut expr = self.parse_postfix()?;
            while self.eat(&TokenKind::Pipe) {
                let name = self.expect_ident()?;
                let args = if self.eat(&TokenKind::LParen) {
                    self.parse_args(&TokenKind::RParen)?
                } else {
                    Vec::new()
                };
                expr = Expr::Filter {
                    base: Box::new(expr),
                    name,
                    args,
                };
            }
            Ok(expr)
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let name = self.expect_ident()?;
                expr = Expr::Attr {
                    base: Box::new(expr),
                    name,
                };
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RBracket)?;
                expr = Expr::Index {
                    base: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::True => Ok(Expr::Literal(Value::Bool(true))),
            TokenKind::False => Ok(Expr::Literal(Value::Bool(false))),
            TokenKind::None => Ok(Expr::Literal(Value::None)),
            TokenKind::Int(i) => Ok(Expr::Literal(Value::Int(i))),
            TokenKind::Float(x) => Ok(Expr::Literal(Value::Float(x))),
            TokenKind::Str(s) => Ok(Expr::Literal(Value::from(s))),
            TokenKind::Ident(name) => Ok(Expr::Var(Name::from(name))),
            TokenKind::Minus => {
                let number = self.advance();
                match number.kind {
                    TokenKind::Int(i) => Ok(Expr::Literal(Value::Int(-i))),
                    TokenKind::Float(x) => Ok(Expr::Literal(Value::Float(-x))),
                    other => Err(ParseError::invalid_expression(
                        format!("expected a number after `-`, found {}", other.describe()),
                        number.span,
                    )),
                }
            }
            TokenKind::LBracket => Ok(Expr::List(self.parse_args(&TokenKind::RBracket)?)),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            other => Err(ParseError::invalid_expression(
                format!("expected an expression, found {}", other.describe()),
                token.span,
            )),
        }
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_args(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }
}
