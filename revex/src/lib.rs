//! Revex Core Library
//!
//! Reversible regular expressions: compile a pattern once, then use it both
//! to match strings and to build strings from the values of its outermost
//! capturing groups.
//!
//! ```
//! use revex::{ValueBag, compile};
//!
//! let re = compile(r"^/users/(?P<id>\d+)/(\w+)$").unwrap();
//! let mut values: ValueBag = [("id", "42"), ("", "posts")].into_iter().collect();
//! assert_eq!(re.revert_valid(&mut values).unwrap(), "/users/42/posts");
//! ```

pub mod ast;
pub mod brace;
pub mod error;
pub mod groups;
pub mod lexer;
pub mod parser;
pub mod reverse;
pub mod template;
pub mod values;

pub use ast::Expr;
pub use brace::{BracePattern, TemplateMode, brace_indices, translate};
pub use error::{LexerErrorKind, ParseError, RegexError, Result, RevertError, TemplateError};
pub use groups::{GroupCollector, GroupSpec};
pub use lexer::{Lexer, Token};
pub use parser::{Parser, parse};
pub use reverse::ReverseRegex;
pub use template::{ReverseTemplate, Segment};
pub use values::ValueBag;

/// Compile a pattern into a reversible regex
///
/// This is the main entry point for compiling patterns.
pub fn compile(pattern: &str) -> Result<ReverseRegex> {
    ReverseRegex::new(pattern)
}

/// Translate a brace template and compile the result
///
/// Use [`BracePattern`] to keep the template and its mode alongside the
/// compiled regex.
pub fn compile_template(
    template: &str,
    mode: TemplateMode,
    strict_slash: bool,
) -> Result<ReverseRegex> {
    let source = translate(template, mode, strict_slash)?;
    ReverseRegex::new(&source)
}
