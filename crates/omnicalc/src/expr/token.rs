//! Lexical analysis for calculator expressions.

use crate::error::{CalcError, CalcResult};
use crate::expr::ast::BinaryOp;

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Identifier: a variable, constant, or function name
    Ident(String),
    /// Binary operator
    Op(BinaryOp),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

impl Token {
    /// Returns true if this token can begin a value (and therefore
    /// participate in implicit multiplication when adjacent to one).
    #[must_use]
    pub const fn starts_value(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Ident(_) | Self::LParen)
    }
}

/// Cursor-based tokenizer for expression strings.
///
/// Accepts the ASCII operator set plus the unicode spellings the keypad
/// emits: `×`, `÷`, `π`, and `θ`.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' => self.read_ident(),
            'π' => {
                self.advance();
                Token::Ident("pi".to_string())
            }
            'θ' => {
                self.advance();
                Token::Ident("theta".to_string())
            }
            '+' => {
                self.advance();
                Token::Op(BinaryOp::Add)
            }
            '-' => {
                self.advance();
                Token::Op(BinaryOp::Sub)
            }
            '*' | '×' => {
                self.advance();
                Token::Op(BinaryOp::Mul)
            }
            '/' | '÷' => {
                self.advance();
                Token::Op(BinaryOp::Div)
            }
            '%' => {
                self.advance();
                Token::Op(BinaryOp::Mod)
            }
            '^' => {
                self.advance();
                Token::Op(BinaryOp::Pow)
            }
            '(' => {
                self.advance();
                Token::LParen
            }
            ')' => {
                self.advance();
                Token::RParen
            }
            _ => {
                return Err(CalcError::InvalidExpression(format!(
                    "Unexpected character: '{ch}'"
                )));
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::InvalidExpression(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_ident(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphabetic() {
                self.advance();
            } else {
                break;
            }
        }
        Token::Ident(self.input[start..self.pos].to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_decimal() {
        let tokens = Tokenizer::new("3.14").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(3.14)]);
    }

    #[test]
    fn test_tokenize_leading_dot() {
        let tokens = Tokenizer::new(".5").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(0.5)]);
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Tokenizer::new("+ - * / % ^").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Op(BinaryOp::Add),
                Token::Op(BinaryOp::Sub),
                Token::Op(BinaryOp::Mul),
                Token::Op(BinaryOp::Div),
                Token::Op(BinaryOp::Mod),
                Token::Op(BinaryOp::Pow),
            ]
        );
    }

    #[test]
    fn test_tokenize_unicode_operators() {
        let tokens = Tokenizer::new("6×7÷2").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(6.0),
                Token::Op(BinaryOp::Mul),
                Token::Number(7.0),
                Token::Op(BinaryOp::Div),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_ident() {
        let tokens = Tokenizer::new("sin(x)").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("sin".to_string()),
                Token::LParen,
                Token::Ident("x".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_pi_symbol() {
        let tokens = Tokenizer::new("π").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Ident("pi".to_string())]);
    }

    #[test]
    fn test_tokenize_theta_symbol() {
        let tokens = Tokenizer::new("2θ").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(2.0), Token::Ident("theta".to_string())]
        );
    }

    #[test]
    fn test_tokenize_uppercase_normalized() {
        let tokens = Tokenizer::new("SIN(X)").tokenize().unwrap();
        assert_eq!(tokens[0], Token::Ident("sin".to_string()));
        assert_eq!(tokens[2], Token::Ident("x".to_string()));
    }

    #[test]
    fn test_tokenize_adjacent_number_ident() {
        // Implicit multiplication is the parser's job; the lexer just
        // splits "5x" into two tokens.
        let tokens = Tokenizer::new("5x").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(5.0), Token::Ident("x".to_string())]
        );
    }

    #[test]
    fn test_tokenize_invalid_char() {
        let result = Tokenizer::new("2 @ 3").tokenize();
        assert!(matches!(result, Err(CalcError::InvalidExpression(_))));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::new("").tokenize().unwrap().is_empty());
        assert!(Tokenizer::new("   ").tokenize().unwrap().is_empty());
    }

    #[test]
    fn test_starts_value() {
        assert!(Token::Number(1.0).starts_value());
        assert!(Token::Ident("x".into()).starts_value());
        assert!(Token::LParen.starts_value());
        assert!(!Token::RParen.starts_value());
        assert!(!Token::Op(BinaryOp::Add).starts_value());
    }
}
