//! Lexer for tokenizing regex patterns
//!
//! This module converts a Perl-style pattern string (the syntax accepted by
//! the `regex` crate) into a stream of tokens for parsing. Only structure is
//! interpreted here: group openings, alternation, repetition and literals.
//! Bracket classes and non-literal escapes are kept as raw source text so
//! they can be handed back to the engine unchanged.
//!
//! The `x` flag is tracked per group: while it is set, unescaped whitespace
//! and `#` comments outside classes produce no tokens.

use std::fmt;

use crate::ast::Quantifier;
use crate::error::{LexerErrorKind, ParseError, RegexError};

/// Flags accepted inside `(?flags)` and `(?flags:...)`
const FLAGS: &str = "imsUuxR";

/// A token in a regex pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left parenthesis `(` opening a positional capturing group
    LeftParen,
    /// `(?P<name>` or `(?<name>`
    NamedGroupStart(String),
    /// `(?:` or `(?flags:`, holding the flags (possibly empty)
    NonCapturing(String),
    /// A flag directive `(?flags)`
    SetFlags(String),
    /// Right parenthesis `)`
    RightParen,
    /// Pipe `|` (alternation)
    Pipe,
    /// Caret `^` (start anchor)
    Caret,
    /// Dollar `$` (end anchor)
    Dollar,
    /// Dot `.` (any character)
    Dot,
    /// Star `*` (zero or more)
    Star,
    /// Plus `+` (one or more)
    Plus,
    /// Question `?` (optional, or lazy marker after a quantifier)
    Question,
    /// A counted repetition `{n}`, `{n,}` or `{n,m}`
    Counted(Quantifier),
    /// A bracket class, raw source including the brackets
    Class(String),
    /// An escape that stands for a single character, e.g. `\.` or `\x41`
    EscapedLiteral {
        /// The character matched
        value: char,
        /// The escape as written
        raw: String,
    },
    /// Any other escape (`\d`, `\pL`, `\b`, ...), raw source text
    Shorthand(String),
    /// A literal character
    Literal(char),
    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParen => write!(f, "`(`"),
            Token::NamedGroupStart(name) => write!(f, "named group `{}`", name),
            Token::NonCapturing(flags) => write!(f, "`(?{}:`", flags),
            Token::SetFlags(flags) => write!(f, "flags `(?{})`", flags),
            Token::RightParen => write!(f, "`)`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Caret => write!(f, "`^`"),
            Token::Dollar => write!(f, "`$`"),
            Token::Dot => write!(f, "`.`"),
            Token::Star => write!(f, "`*`"),
            Token::Plus => write!(f, "`+`"),
            Token::Question => write!(f, "`?`"),
            Token::Counted(q) => write!(f, "repetition `{}`", q),
            Token::Class(raw) => write!(f, "class `{}`", raw),
            Token::EscapedLiteral { raw, .. } => write!(f, "escape `{}`", raw),
            Token::Shorthand(raw) => write!(f, "escape `{}`", raw),
            Token::Literal(c) => write!(f, "literal `{}`", c),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Lexer for tokenizing regex patterns
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of `current_char`
    position: usize,
    current_char: Option<char>,
    /// Whether the `x` flag is set in the current group
    verbose: bool,
    /// `verbose` as it was outside each open group
    saved: Vec<bool>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input string
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            current_char: input.chars().next(),
            verbose: false,
            saved: Vec::new(),
        }
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance to the next character
    fn advance(&mut self) {
        if let Some(c) = self.current_char {
            self.position += c.len_utf8();
            self.current_char = self.input[self.position..].chars().next();
        }
    }

    /// Turn `x` on or off as `flags` says; flags after `-` are cleared
    fn apply_flags(&mut self, flags: &str) {
        let mut enable = true;
        for c in flags.chars() {
            match c {
                '-' => enable = false,
                'x' => self.verbose = enable,
                _ => {}
            }
        }
    }

    /// Skip whitespace and `#` comments up to the end of the line
    fn skip_insignificant(&mut self) {
        while let Some(c) = self.current_char {
            if c.is_whitespace() {
                self.advance();
            } else if c == '#' {
                while let Some(c) = self.current_char {
                    self.advance();
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn error(position: usize, kind: LexerErrorKind) -> RegexError {
        RegexError::Lexer { position, kind }
    }

    /// Check if a character may appear in a group name after the first one
    fn is_identifier_char(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']')
    }

    /// Read a group name up to `>` (the opening `<` is already consumed)
    fn read_group_name(&mut self) -> Result<Token, RegexError> {
        let start = self.position;
        while let Some(c) = self.current_char {
            if c == '>' {
                break;
            }
            self.advance();
        }
        if self.current_char.is_none() {
            return Err(Self::error(start, LexerErrorKind::UnclosedGroupName));
        }
        let name = &self.input[start..self.position];
        self.advance(); // consume '>'

        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_alphabetic() || first == '_') && chars.all(Self::is_identifier_char)
            }
            None => false,
        };
        if !valid {
            return Err(Self::error(
                start,
                LexerErrorKind::InvalidGroupName(name.to_string()),
            ));
        }
        Ok(Token::NamedGroupStart(name.to_string()))
    }

    /// Read `flags)` or `flags:` after `(?`
    fn read_flags(&mut self) -> Result<Token, RegexError> {
        let start = self.position;
        loop {
            match self.current_char {
                Some(':') => {
                    let flags = self.input[start..self.position].to_string();
                    self.advance();
                    self.saved.push(self.verbose);
                    self.apply_flags(&flags);
                    return Ok(Token::NonCapturing(flags));
                }
                Some(')') => {
                    let flags = self.input[start..self.position].to_string();
                    self.advance();
                    self.apply_flags(&flags);
                    return Ok(Token::SetFlags(flags));
                }
                Some(c) if c == '-' || FLAGS.contains(c) => self.advance(),
                Some(c) => return Err(Self::error(self.position, LexerErrorKind::InvalidFlag(c))),
                None => return Err(ParseError::UnexpectedEof.into()),
            }
        }
    }

    /// Read a number made of ASCII digits, if any
    fn read_number(&mut self) -> Option<u32> {
        let start = self.position;
        while let Some(c) = self.current_char {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.position].parse().ok()
    }

    /// Read a counted repetition (the opening `{` is already consumed)
    fn read_counted(&mut self, start: usize) -> Result<Token, RegexError> {
        let invalid = || Self::error(start, LexerErrorKind::InvalidRepetition);

        let min = self.read_number().ok_or_else(invalid)?;
        let quantifier = if self.current_char == Some(',') {
            self.advance();
            match self.read_number() {
                Some(max) => Quantifier::Between(min, max),
                None => Quantifier::AtLeast(min),
            }
        } else {
            Quantifier::Exactly(min)
        };

        if self.current_char != Some('}') {
            return Err(invalid());
        }
        self.advance();
        Ok(Token::Counted(quantifier))
    }

    /// Read a bracket class (the opening `[` is already consumed)
    fn read_class(&mut self, start: usize) -> Result<Token, RegexError> {
        let mut depth = 1;
        self.skip_class_prefix();

        while let Some(c) = self.current_char {
            self.advance();
            match c {
                '\\' => self.advance(),
                '[' => {
                    depth += 1;
                    self.skip_class_prefix();
                }
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Token::Class(self.input[start..self.position].to_string()));
                    }
                }
                _ => {}
            }
        }

        Err(Self::error(start, LexerErrorKind::UnclosedCharacterClass))
    }

    /// A class may open with `^`, and a `]` right after the opening is literal
    fn skip_class_prefix(&mut self) {
        if self.current_char == Some('^') {
            self.advance();
        }
        if self.current_char == Some(']') {
            self.advance();
        }
    }

    /// Read `n` hex digits, or a braced hex number, after `\x`, `\u` or `\U`
    fn read_hex(&mut self, digits: usize) -> Option<char> {
        let start = self.position;
        let text = if self.current_char == Some('{') {
            self.advance();
            let inner = self.position;
            while let Some(c) = self.current_char {
                if c == '}' {
                    break;
                }
                self.advance();
            }
            self.current_char?;
            let text = &self.input[inner..self.position];
            self.advance(); // consume '}'
            text
        } else {
            for _ in 0..digits {
                match self.current_char {
                    Some(c) if c.is_ascii_hexdigit() => self.advance(),
                    _ => return None,
                }
            }
            &self.input[start..self.position]
        };
        u32::from_str_radix(text, 16).ok().and_then(char::from_u32)
    }

    /// Skip a `{...}` block following `\p`, `\P`, `\b` or `\B`
    fn skip_braced(&mut self) {
        if self.current_char != Some('{') {
            return;
        }
        while let Some(c) = self.current_char {
            self.advance();
            if c == '}' {
                break;
            }
        }
    }

    /// Read an escape sequence (the backslash at `start` is already consumed)
    ///
    /// Escapes that do not decode to a single character are returned as raw
    /// text; malformed ones are left for the engine to reject.
    fn read_escape(&mut self, start: usize) -> Result<Token, RegexError> {
        let Some(c) = self.current_char else {
            return Err(Self::error(start, LexerErrorKind::DanglingEscape));
        };
        self.advance();

        let value = match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'f' => Some('\x0C'),
            'v' => Some('\x0B'),
            'a' => Some('\x07'),
            'x' => self.read_hex(2),
            'u' => self.read_hex(4),
            'U' => self.read_hex(8),
            'p' | 'P' => {
                if self.current_char == Some('{') {
                    self.skip_braced();
                } else {
                    self.advance();
                }
                None
            }
            'b' | 'B' => {
                self.skip_braced();
                None
            }
            // `\<` and `\>` are word boundaries
            '<' | '>' => None,
            c if c.is_ascii_punctuation() || c == ' ' => Some(c),
            _ => None,
        };

        let raw = self.input[start..self.position].to_string();
        Ok(match value {
            Some(value) => Token::EscapedLiteral { value, raw },
            None => Token::Shorthand(raw),
        })
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token, RegexError> {
        if self.verbose {
            self.skip_insignificant();
        }
        let start = self.position;
        let Some(c) = self.current_char else {
            return Ok(Token::Eof);
        };
        self.advance();

        let token = match c {
            '\\' => return self.read_escape(start),
            '(' => {
                if self.current_char != Some('?') {
                    self.saved.push(self.verbose);
                    return Ok(Token::LeftParen);
                }
                self.advance(); // consume '?'
                match self.current_char {
                    Some('P') => {
                        self.advance();
                        match self.current_char {
                            Some('<') => {
                                self.advance();
                                self.saved.push(self.verbose);
                                return self.read_group_name();
                            }
                            Some(c) => {
                                return Err(Self::error(
                                    self.position,
                                    LexerErrorKind::UnexpectedChar(c),
                                ));
                            }
                            None => return Err(ParseError::UnexpectedEof.into()),
                        }
                    }
                    Some('<') => {
                        self.advance();
                        self.saved.push(self.verbose);
                        return self.read_group_name();
                    }
                    _ => return self.read_flags(),
                }
            }
            '[' => return self.read_class(start),
            '{' => return self.read_counted(start),
            ')' => {
                if let Some(verbose) = self.saved.pop() {
                    self.verbose = verbose;
                }
                Token::RightParen
            }
            '|' => Token::Pipe,
            '^' => Token::Caret,
            '$' => Token::Dollar,
            '.' => Token::Dot,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Question,
            c => Token::Literal(c),
        };
        Ok(token)
    }

    /// Tokenize the entire input and return a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, RegexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}
