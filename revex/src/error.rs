//! Error types for reverse regular expressions
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by the stage that raises them: lexing, parsing and
//! engine compilation of a pattern, translation of a brace template, and
//! reversion of a compiled pattern.

use thiserror::Error;

/// Errors raised while compiling a pattern or a brace template
#[derive(Error, Debug, Clone)]
pub enum RegexError {
    /// Errors that occur during lexing/tokenization
    #[error("lexer error at position {position}: {kind}")]
    Lexer {
        /// Byte offset in the pattern where the error occurred
        position: usize,
        /// The specific kind of lexer error
        kind: LexerErrorKind,
    },

    /// Errors that occur while building the syntax tree
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The forward matcher rejected the pattern
    #[error("syntax error: {0}")]
    Syntax(#[from] regex::Error),

    /// The engine numbered the capture groups differently than the parser
    #[error("capture group mismatch: parsed {parsed} groups, engine reports {engine}")]
    GroupCount {
        /// Groups counted by the parser
        parsed: usize,
        /// Groups reported by the compiled engine
        engine: usize,
    },

    /// The brace template could not be translated
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

impl RegexError {
    /// Whether the pattern text itself is not a valid regular expression
    pub fn is_syntax(&self) -> bool {
        !matches!(self, RegexError::Template(_))
    }
}

/// Specific kinds of lexer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerErrorKind {
    /// Encountered an unexpected character
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// Unclosed character class (e.g., `[abc` without `]`)
    #[error("unclosed character class")]
    UnclosedCharacterClass,

    /// A backslash at the very end of the pattern
    #[error("dangling escape at end of pattern")]
    DanglingEscape,

    /// `(?P<name` without the closing `>`
    #[error("unclosed group name")]
    UnclosedGroupName,

    /// Invalid group name
    #[error("invalid group name '{0}'")]
    InvalidGroupName(String),

    /// A character that is not a flag inside `(?...)`
    #[error("invalid flag '{0}'")]
    InvalidFlag(char),

    /// A malformed counted repetition such as `{3,x}`
    #[error("invalid counted repetition")]
    InvalidRepetition,
}

/// Errors that occur during parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token encountered
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        /// What was expected
        expected: String,
        /// What was actually found
        found: String,
    },

    /// Unexpected end of input
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A repetition operator with nothing to repeat
    #[error("repetition operator missing expression")]
    MissingRepetitionTarget,

    /// A group opened with `(` that is never closed
    #[error("unclosed group")]
    UnclosedGroup,

    /// A `)` without a matching `(`
    #[error("unopened group")]
    UnopenedGroup,
}

/// Errors raised while translating a brace template into a regex
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{` and `}` do not pair up
    #[error("unbalanced braces in {0:?}")]
    UnbalancedBraces(String),

    /// A `{...}` region with an empty name or an empty pattern
    #[error("missing name or pattern in {0:?}")]
    MalformedPlaceholder(String),
}

/// Errors raised while building a string from a compiled pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevertError {
    /// No value left for one of the groups
    #[error("missing key {key:?} to revert the regexp (expected a total of {total} variables)")]
    MissingVariable {
        /// The group name, empty for positional groups
        key: String,
        /// How many values the pattern needs in total
        total: usize,
    },

    /// The reverted string does not match the pattern it came from
    #[error("resulting string doesn't match the regexp: {0:?}")]
    Mismatch(String),
}

/// Result type alias for compile operations
pub type Result<T> = std::result::Result<T, RegexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_error_display() {
        let err = RegexError::Lexer {
            position: 5,
            kind: LexerErrorKind::UnexpectedChar('!'),
        };
        assert_eq!(
            err.to_string(),
            "lexer error at position 5: unexpected character '!'"
        );
    }

    #[test]
    fn test_parse_error_unexpected_token() {
        let err = ParseError::UnexpectedToken {
            expected: "`)`".to_string(),
            found: "EOF".to_string(),
        };
        assert_eq!(err.to_string(), "expected `)`, found EOF");
    }

    #[test]
    fn test_regex_error_from_parse_error() {
        let regex_err: RegexError = ParseError::UnclosedGroup.into();
        assert_eq!(regex_err.to_string(), "parse error: unclosed group");
        assert!(regex_err.is_syntax());
    }

    #[test]
    fn test_template_error_is_not_syntax() {
        let err: RegexError = TemplateError::UnbalancedBraces("{a".to_string()).into();
        assert!(!err.is_syntax());
        assert_eq!(err.to_string(), "template error: unbalanced braces in \"{a\"");
    }

    #[test]
    fn test_missing_variable_display() {
        let err = RevertError::MissingVariable {
            key: "foo".to_string(),
            total: 3,
        };
        assert_eq!(
            err.to_string(),
            "missing key \"foo\" to revert the regexp (expected a total of 3 variables)"
        );
    }

    #[test]
    fn test_mismatch_display() {
        let err = RevertError::Mismatch("1a3".to_string());
        assert_eq!(
            err.to_string(),
            "resulting string doesn't match the regexp: \"1a3\""
        );
    }
}
