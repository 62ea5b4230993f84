//! Parser for regex patterns
//!
//! This module provides a recursive descent parser that converts
//! tokens into an Abstract Syntax Tree (AST).
//!
//! Grammar (in order of precedence, lowest to highest):
//!   regex       := alternation
//!   alternation := sequence ( '|' sequence )*
//!   sequence    := quantified*
//!   quantified  := atom ( quantifier '?'? )*
//!   quantifier  := '*' | '+' | '?' | '{' number ( ',' number? )? '}'
//!   atom        := literal | escape | class | '.' | '^' | '$' | group | flags
//!   group       := '(' alternation ')'
//!                | '(?P<' name '>' alternation ')'
//!                | '(?<' name '>' alternation ')'
//!                | '(?' flags ':' alternation ')'
//!   flags       := '(?' flags ')'
//!
//! Class contents and escapes other than single characters are opaque here;
//! the engine validates them when the pattern is compiled.

use crate::ast::{Expr, Quantifier};
use crate::error::{ParseError, RegexError};
use crate::lexer::{Lexer, Token};

/// Parser for regex patterns
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input string
    pub fn new(input: &'a str) -> Result<Self, RegexError> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    /// Advance to the next token
    fn advance(&mut self) -> Result<(), RegexError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Parse the entire input and return the AST
    pub fn parse(&mut self) -> Result<Expr, RegexError> {
        let expr = self.parse_alternation()?;

        match self.current_token {
            Token::Eof => Ok(expr),
            Token::RightParen => Err(ParseError::UnopenedGroup.into()),
            _ => Err(ParseError::UnexpectedToken {
                expected: "EOF".to_string(),
                found: self.current_token.to_string(),
            }
            .into()),
        }
    }

    /// Parse alternation (lowest precedence)
    /// alternation := sequence ( '|' sequence )*
    fn parse_alternation(&mut self) -> Result<Expr, RegexError> {
        let mut alternatives = vec![self.parse_sequence()?];

        while self.current_token == Token::Pipe {
            self.advance()?; // consume '|'
            alternatives.push(self.parse_sequence()?);
        }

        Ok(Expr::alternation(alternatives))
    }

    /// Parse a sequence (concatenation)
    /// sequence := quantified*
    fn parse_sequence(&mut self) -> Result<Expr, RegexError> {
        let mut expressions = Vec::new();

        while !self.is_sequence_end() {
            expressions.push(self.parse_quantified()?);
        }

        Ok(Expr::concat(expressions))
    }

    /// Check if we've reached the end of a sequence
    fn is_sequence_end(&self) -> bool {
        matches!(
            self.current_token,
            Token::Eof | Token::RightParen | Token::Pipe
        )
    }

    /// Parse a quantified expression
    /// quantified := atom ( quantifier '?'? )*
    fn parse_quantified(&mut self) -> Result<Expr, RegexError> {
        let mut expr = self.parse_atom()?;

        while let Some(quantifier) = self.parse_quantifier()? {
            let lazy = if self.current_token == Token::Question {
                self.advance()?;
                true
            } else {
                false
            };
            expr = Expr::Quantified {
                expr: Box::new(expr),
                quantifier,
                lazy,
            };
        }

        Ok(expr)
    }

    /// Parse a quantifier if present
    fn parse_quantifier(&mut self) -> Result<Option<Quantifier>, RegexError> {
        let quantifier = match &self.current_token {
            Token::Star => Quantifier::ZeroOrMore,
            Token::Plus => Quantifier::OneOrMore,
            Token::Question => Quantifier::Optional,
            Token::Counted(q) => *q,
            _ => return Ok(None),
        };
        self.advance()?;
        Ok(Some(quantifier))
    }

    /// Parse an atomic expression
    fn parse_atom(&mut self) -> Result<Expr, RegexError> {
        let expr = match &self.current_token {
            Token::Literal(c) => Expr::literal(*c),
            Token::EscapedLiteral { value, raw } => Expr::escaped(*value, raw.clone()),
            Token::Dot => Expr::Any,
            Token::Caret => Expr::StartAnchor,
            Token::Dollar => Expr::EndAnchor,
            Token::Class(raw) => Expr::Class(raw.clone()),
            Token::Shorthand(raw) => Expr::Shorthand(raw.clone()),
            Token::SetFlags(flags) => Expr::SetFlags(flags.clone()),
            Token::LeftParen => {
                let pattern = self.parse_group_body()?;
                return Ok(Expr::Group(Box::new(pattern)));
            }
            Token::NamedGroupStart(name) => {
                let name = name.clone();
                let pattern = self.parse_group_body()?;
                return Ok(Expr::NamedGroup {
                    name,
                    pattern: Box::new(pattern),
                });
            }
            Token::NonCapturing(flags) => {
                let flags = flags.clone();
                let pattern = self.parse_group_body()?;
                return Ok(Expr::NonCapturingGroup {
                    flags,
                    pattern: Box::new(pattern),
                });
            }
            Token::Star | Token::Plus | Token::Question | Token::Counted(_) => {
                return Err(ParseError::MissingRepetitionTarget.into());
            }
            Token::Eof => return Err(ParseError::UnexpectedEof.into()),
            Token::RightParen | Token::Pipe => {
                return Err(ParseError::UnexpectedToken {
                    expected: "expression".to_string(),
                    found: self.current_token.to_string(),
                }
                .into());
            }
        };
        self.advance()?;
        Ok(expr)
    }

    /// Parse the inside of a group whose opening token is current, up to and
    /// including the closing `)`
    fn parse_group_body(&mut self) -> Result<Expr, RegexError> {
        self.advance()?; // consume the opening token
        let pattern = self.parse_alternation()?;

        match self.current_token {
            Token::RightParen => {
                self.advance()?;
                Ok(pattern)
            }
            Token::Eof => Err(ParseError::UnclosedGroup.into()),
            _ => Err(ParseError::UnexpectedToken {
                expected: "`)`".to_string(),
                found: self.current_token.to_string(),
            }
            .into()),
        }
    }
}

/// Parse a pattern into an AST
pub fn parse(input: &str) -> Result<Expr, RegexError> {
    Parser::new(input)?.parse()
}
