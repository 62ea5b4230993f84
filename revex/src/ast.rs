//! Abstract Syntax Tree (AST) for regex patterns
//!
//! The tree keeps the structure the reverse template needs (literals,
//! concatenation, capturing groups and the constructs that hide them) and
//! stores everything else as raw source text. Re-emitting a tree reproduces
//! a pattern the `regex` crate compiles to the same capture numbering.

use std::fmt;

/// An expression in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Empty expression (matches empty string)
    Empty,

    /// A literal character, plain or escaped
    Literal(Literal),

    /// Any character (dot)
    Any,

    /// Start anchor (^)
    StartAnchor,

    /// End anchor ($)
    EndAnchor,

    /// A bracket class, raw source including the brackets
    Class(String),

    /// An escape that is not a single character (`\d`, `\b`, `\pL`, ...)
    Shorthand(String),

    /// A sequence of expressions (concatenation)
    Concat(Vec<Expr>),

    /// Alternation (e.g., a|b|c)
    Alternation(Vec<Expr>),

    /// Quantified expression (e.g., a*, a+?, a{3,5})
    Quantified {
        /// The expression being quantified
        expr: Box<Expr>,
        /// The quantifier
        quantifier: Quantifier,
        /// Whether the quantifier is followed by `?`
        lazy: bool,
    },

    /// A positional capturing group: (...)
    Group(Box<Expr>),

    /// A named capturing group: (?P<name>...)
    NamedGroup {
        /// The name of the group
        name: String,
        /// The pattern inside the group
        pattern: Box<Expr>,
    },

    /// A non-capturing group, optionally setting flags: (?:...) or (?i:...)
    NonCapturingGroup {
        /// Flags as written, empty for a plain `(?:`
        flags: String,
        /// The pattern inside the group
        pattern: Box<Expr>,
    },

    /// A flag directive: (?i)
    SetFlags(String),
}

/// A literal character
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The character matched
    pub value: char,
    /// The escape sequence as written, if the literal was escaped
    pub escape: Option<String>,
}

/// A quantifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantifier {
    /// Zero or more (*)
    ZeroOrMore,
    /// One or more (+)
    OneOrMore,
    /// Zero or one (?)
    Optional,
    /// Exactly n times ({n})
    Exactly(u32),
    /// At least n times ({n,})
    AtLeast(u32),
    /// Between n and m times ({n,m})
    Between(u32, u32),
}

impl Expr {
    /// Create an empty expression
    pub fn empty() -> Self {
        Expr::Empty
    }

    /// Create a plain literal expression
    pub fn literal(c: char) -> Self {
        Expr::Literal(Literal {
            value: c,
            escape: None,
        })
    }

    /// Create an escaped literal expression
    pub fn escaped(c: char, escape: impl Into<String>) -> Self {
        Expr::Literal(Literal {
            value: c,
            escape: Some(escape.into()),
        })
    }

    /// Create a sequence from a vector of expressions
    pub fn concat(exprs: Vec<Expr>) -> Self {
        match exprs.len() {
            0 => Expr::Empty,
            1 => exprs.into_iter().next().unwrap_or(Expr::Empty),
            _ => Expr::Concat(exprs),
        }
    }

    /// Create an alternation from a vector of expressions
    pub fn alternation(exprs: Vec<Expr>) -> Self {
        match exprs.len() {
            0 => Expr::Empty,
            1 => exprs.into_iter().next().unwrap_or(Expr::Empty),
            _ => Expr::Alternation(exprs),
        }
    }

    /// Create a greedy quantified expression
    pub fn quantified(expr: Expr, quantifier: Quantifier) -> Self {
        Expr::Quantified {
            expr: Box::new(expr),
            quantifier,
            lazy: false,
        }
    }

    /// Create a positional capturing group
    pub fn group(expr: Expr) -> Self {
        Expr::Group(Box::new(expr))
    }

    /// Create a named group expression
    pub fn named_group(name: impl Into<String>, pattern: Expr) -> Self {
        Expr::NamedGroup {
            name: name.into(),
            pattern: Box::new(pattern),
        }
    }

    /// Create a non-capturing group
    pub fn non_capturing_group(flags: impl Into<String>, pattern: Expr) -> Self {
        Expr::NonCapturingGroup {
            flags: flags.into(),
            pattern: Box::new(pattern),
        }
    }

    /// Total number of capturing groups, nested or not
    pub fn capture_count(&self) -> usize {
        match self {
            Expr::Concat(exprs) | Expr::Alternation(exprs) => {
                exprs.iter().map(Expr::capture_count).sum()
            }
            Expr::Quantified { expr, .. } => expr.capture_count(),
            Expr::NonCapturingGroup { pattern, .. } => pattern.capture_count(),
            Expr::Group(pattern) | Expr::NamedGroup { pattern, .. } => 1 + pattern.capture_count(),
            _ => 0,
        }
    }

    /// Convert the AST back to pattern text
    pub fn to_regex_string(&self) -> String {
        let mut out = String::new();
        self.write_regex(&mut out, true);
        out
    }

    /// Convert the AST back to pattern text with every capture name removed
    ///
    /// Group numbering is unchanged, so the result can be compiled by an engine
    /// that rejects duplicate names and still be read by index.
    pub fn to_positional_string(&self) -> String {
        let mut out = String::new();
        self.write_regex(&mut out, false);
        out
    }

    fn write_regex(&self, out: &mut String, names: bool) {
        match self {
            Expr::Empty => {}
            Expr::SetFlags(flags) => {
                out.push_str("(?");
                out.push_str(flags);
                out.push(')');
            }
            Expr::Literal(lit) => match &lit.escape {
                Some(escape) => out.push_str(escape),
                None => out.push(lit.value),
            },
            Expr::Any => out.push('.'),
            Expr::StartAnchor => out.push('^'),
            Expr::EndAnchor => out.push('$'),
            Expr::Class(raw) | Expr::Shorthand(raw) => out.push_str(raw),
            Expr::Concat(exprs) => {
                for expr in exprs {
                    if matches!(expr, Expr::Alternation(_)) {
                        out.push_str("(?:");
                        expr.write_regex(out, names);
                        out.push(')');
                    } else {
                        expr.write_regex(out, names);
                    }
                }
            }
            Expr::Alternation(exprs) => {
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    expr.write_regex(out, names);
                }
            }
            Expr::Quantified {
                expr,
                quantifier,
                lazy,
            } => {
                let needs_parens = matches!(
                    expr.as_ref(),
                    Expr::Concat(_) | Expr::Alternation(_) | Expr::Quantified { .. }
                );
                if needs_parens {
                    out.push_str("(?:");
                    expr.write_regex(out, names);
                    out.push(')');
                } else {
                    expr.write_regex(out, names);
                }
                out.push_str(&quantifier.to_string());
                if *lazy {
                    out.push('?');
                }
            }
            Expr::Group(pattern) => {
                out.push('(');
                pattern.write_regex(out, names);
                out.push(')');
            }
            Expr::NamedGroup { name, pattern } => {
                if names {
                    out.push_str("(?P<");
                    out.push_str(name);
                    out.push('>');
                } else {
                    out.push('(');
                }
                pattern.write_regex(out, names);
                out.push(')');
            }
            Expr::NonCapturingGroup { flags, pattern } => {
                out.push_str("(?");
                out.push_str(flags);
                out.push(':');
                pattern.write_regex(out, names);
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_regex_string())
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::ZeroOrMore => write!(f, "*"),
            Quantifier::OneOrMore => write!(f, "+"),
            Quantifier::Optional => write!(f, "?"),
            Quantifier::Exactly(n) => write!(f, "{{{}}}", n),
            Quantifier::AtLeast(n) => write!(f, "{{{},}}", n),
            Quantifier::Between(n, m) => write!(f, "{{{},{}}}", n, m),
        }
    }
}
