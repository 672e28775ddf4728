//! Recursive descent parser for calculator expressions.
//!
//! Grammar:
//! ```text
//! expression ::= term (('+' | '-') term)*
//! term       ::= juxt (('*' | '/' | '%') juxt)*
//! juxt       ::= factor factor*              // implicit multiplication
//! factor     ::= base ('^' factor)?          // right associative
//! base       ::= '-' base | primary
//! primary    ::= NUMBER | IDENT | IDENT '(' expression ')'
//!              | '(' expression ')'
//! ```
//!
//! The `juxt` production is what makes keypad spellings like `5x`,
//! `2(x+1)`, and `(x)(x)` parse as products without any string
//! rewriting.

use crate::error::{CalcError, CalcResult};
use crate::expr::ast::{constant, BinaryOp, Expr, Function};
use crate::expr::token::{Token, Tokenizer};

/// Recursive descent parser over a token stream
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    variable: Option<&'a str>,
}

impl<'a> Parser<'a> {
    /// Parses an expression with one free variable (e.g. `"x"`, `"t"`,
    /// `"theta"`). Any other bare identifier is rejected.
    pub fn parse(input: &str, variable: Option<&'a str>) -> CalcResult<Expr> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        if tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let mut parser = Self {
            tokens,
            pos: 0,
            variable,
        };
        let expr = parser.parse_expression()?;

        if parser.pos < parser.tokens.len() {
            return Err(CalcError::InvalidExpression(format!(
                "Unexpected token at position {}",
                parser.pos
            )));
        }

        Ok(expr)
    }

    /// Parses a variable-free expression
    pub fn parse_const(input: &str) -> CalcResult<Expr> {
        Self::parse(input, None)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_term()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Op(BinaryOp::Add) => BinaryOp::Add,
                Token::Op(BinaryOp::Sub) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_juxt()?;

        while let Some(token) = self.current() {
            let op = match token {
                Token::Op(BinaryOp::Mul) => BinaryOp::Mul,
                Token::Op(BinaryOp::Div) => BinaryOp::Div,
                Token::Op(BinaryOp::Mod) => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_juxt()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    /// Adjacent value-starting tokens multiply: `5x`, `2(x+1)`, `)x`
    fn parse_juxt(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_factor()?;

        while self.current().is_some_and(Token::starts_value) {
            let right = self.parse_factor()?;
            left = Expr::binary(left, BinaryOp::Mul, right);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> CalcResult<Expr> {
        let base = self.parse_base()?;

        // Power is right-associative
        if matches!(self.current(), Some(Token::Op(BinaryOp::Pow))) {
            self.advance();
            let exponent = self.parse_factor()?;
            return Ok(Expr::binary(base, BinaryOp::Pow, exponent));
        }

        Ok(base)
    }

    fn parse_base(&mut self) -> CalcResult<Expr> {
        if matches!(self.current(), Some(Token::Op(BinaryOp::Sub))) {
            self.advance();
            let inner = self.parse_base()?;
            return Ok(Expr::negate(inner));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> CalcResult<Expr> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::InvalidExpression("Unexpected end of expression".into()))?
            .clone();

        match token {
            Token::Number(n) => Ok(Expr::number(n)),
            Token::Ident(name) => self.resolve_ident(&name),
            Token::LParen => {
                let expr = self.parse_expression()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            _ => Err(CalcError::InvalidExpression(format!(
                "Unexpected token: {token:?}"
            ))),
        }
    }

    fn resolve_ident(&mut self, name: &str) -> CalcResult<Expr> {
        if self.variable == Some(name) {
            return Ok(Expr::Variable);
        }
        if let Some(value) = constant(name) {
            return Ok(Expr::number(value));
        }
        if let Some(func) = Function::from_name(name) {
            if !matches!(self.current(), Some(Token::LParen)) {
                return Err(CalcError::InvalidExpression(format!(
                    "Expected '(' after function '{name}'"
                )));
            }
            self.advance();
            let arg = self.parse_expression()?;
            self.expect_rparen()?;
            return Ok(Expr::call(func, arg));
        }
        Err(CalcError::InvalidExpression(format!(
            "Unknown identifier: '{name}'"
        )))
    }

    fn expect_rparen(&mut self) -> CalcResult<()> {
        match self.advance() {
            Some(Token::RParen) => Ok(()),
            Some(t) => Err(CalcError::InvalidExpression(format!(
                "Expected ')' but found {t:?}"
            ))),
            None => Err(CalcError::InvalidExpression("Unclosed parenthesis".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_x(input: &str, x: f64) -> f64 {
        Parser::parse(input, Some("x")).unwrap().eval(x)
    }

    fn eval_const(input: &str) -> f64 {
        Parser::parse_const(input).unwrap().eval_const()
    }

    // ===== Structure tests =====

    #[test]
    fn test_parse_single_number() {
        let expr = Parser::parse_const("42").unwrap();
        assert_eq!(expr, Expr::Number(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = Parser::parse("x", Some("x")).unwrap();
        assert_eq!(expr, Expr::Variable);
    }

    #[test]
    fn test_parse_constant_folds() {
        let expr = Parser::parse_const("pi").unwrap();
        assert_eq!(expr, Expr::Number(std::f64::consts::PI));
    }

    #[test]
    fn test_parse_unicode_pi_folds() {
        let expr = Parser::parse_const("π").unwrap();
        assert_eq!(expr, Expr::Number(std::f64::consts::PI));
    }

    #[test]
    fn test_parse_function_call() {
        let expr = Parser::parse("sin(x)", Some("x")).unwrap();
        assert_eq!(expr, Expr::call(Function::Sin, Expr::Variable));
    }

    #[test]
    fn test_parse_power_right_associative() {
        // 2 ^ 3 ^ 2 = 2 ^ (3 ^ 2) = 512
        assert_eq!(eval_const("2 ^ 3 ^ 2"), 512.0);
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(eval_const("2 + 3 * 4"), 14.0);
        assert_eq!(eval_const("(2 + 3) * 4"), 20.0);
        assert_eq!(eval_const("2 * 3 ^ 2"), 18.0);
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(eval_const("-5"), -5.0);
        assert_eq!(eval_const("3 + -2"), 1.0);
        assert_eq!(eval_const("--5"), 5.0);
    }

    #[test]
    fn test_parse_modulo() {
        assert_eq!(eval_const("17 % 5"), 2.0);
    }

    // ===== Implicit multiplication tests =====

    #[test]
    fn test_implicit_coefficient() {
        assert_eq!(eval_x("5x", 3.0), 15.0);
    }

    #[test]
    fn test_implicit_before_paren() {
        assert_eq!(eval_x("2(x+1)", 3.0), 8.0);
    }

    #[test]
    fn test_implicit_after_paren() {
        assert_eq!(eval_x("(x+1)2", 3.0), 8.0);
        assert_eq!(eval_x("(x+1)x", 3.0), 12.0);
    }

    #[test]
    fn test_implicit_paren_paren() {
        assert_eq!(eval_x("(x)(x)", 4.0), 16.0);
    }

    #[test]
    fn test_implicit_binds_tighter_than_division() {
        // 1 / 2x must parse as 1 / (2*x), matching hand-written math
        assert_eq!(eval_x("1/2x", 4.0), 0.125);
    }

    #[test]
    fn test_implicit_with_power() {
        // 5x^2 = 5 * (x^2)
        assert_eq!(eval_x("5x^2", 3.0), 45.0);
    }

    #[test]
    fn test_implicit_constant_coefficient() {
        let v = eval_x("2pi", 0.0);
        assert!((v - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    // ===== Variable handling tests =====

    #[test]
    fn test_theta_variable() {
        let expr = Parser::parse("2θ", Some("theta")).unwrap();
        assert_eq!(expr.eval(1.5), 3.0);
    }

    #[test]
    fn test_t_variable() {
        assert_eq!(
            Parser::parse("t^2", Some("t")).unwrap().eval(3.0),
            9.0
        );
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        let result = Parser::parse("y + 1", Some("x"));
        assert!(matches!(result, Err(CalcError::InvalidExpression(_))));
    }

    #[test]
    fn test_variable_rejected_in_const_context() {
        assert!(Parser::parse_const("x + 1").is_err());
    }

    // ===== Whole-expression tests =====

    #[test]
    fn test_nested_functions() {
        let v = eval_x("sqrt(abs(x))", -16.0);
        assert_eq!(v, 4.0);
    }

    #[test]
    fn test_sin_pi_near_zero() {
        assert!(eval_x("sin(pi)", 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_ln() {
        assert_eq!(eval_const("log(1000)"), 3.0);
        assert!((eval_const("ln(e)") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quadratic() {
        // x^2 - 4x + 4 at x = 2 is 0
        assert_eq!(eval_x("x^2 - 4x + 4", 2.0), 0.0);
    }

    // ===== Error tests =====

    #[test]
    fn test_empty_expression() {
        assert!(matches!(
            Parser::parse_const(""),
            Err(CalcError::EmptyExpression)
        ));
        assert!(matches!(
            Parser::parse_const("   "),
            Err(CalcError::EmptyExpression)
        ));
    }

    #[test]
    fn test_unclosed_paren() {
        assert!(Parser::parse_const("(2 + 3").is_err());
    }

    #[test]
    fn test_extra_close_paren() {
        assert!(Parser::parse_const("2 + 3)").is_err());
    }

    #[test]
    fn test_dangling_operator() {
        assert!(Parser::parse_const("2 +").is_err());
    }

    #[test]
    fn test_consecutive_operators() {
        assert!(Parser::parse_const("2 + * 3").is_err());
    }

    #[test]
    fn test_function_without_parens() {
        assert!(Parser::parse("sin x", Some("x")).is_err());
    }
}
