//! Reverse templates
//!
//! A reverse template is the literal text of a pattern with one placeholder
//! per outermost capturing group. It renders by plain concatenation, so a
//! value is never checked against the sub-pattern it replaces.
//!
//! The textual form writes each placeholder as `{}` and doubles literal
//! braces, so `a{{b{}` is the literal `a{b` followed by one placeholder.

use std::fmt;
use std::str::FromStr;

use crate::error::TemplateError;

/// A part of a reverse template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// A slot filled by one value
    Placeholder,
}

/// A parsed reverse template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseTemplate {
    segments: Vec<Segment>,
}

impl ReverseTemplate {
    /// Create an empty template
    pub fn new() -> Self {
        ReverseTemplate::default()
    }

    /// Append a literal character, extending the trailing literal if any
    pub fn push_char(&mut self, c: char) {
        match self.segments.last_mut() {
            Some(Segment::Literal(text)) => text.push(c),
            _ => self.segments.push(Segment::Literal(c.to_string())),
        }
    }

    /// Append literal text
    pub fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push_char(c);
        }
    }

    /// Append a placeholder
    pub fn push_placeholder(&mut self) {
        self.segments.push(Segment::Placeholder);
    }

    /// Get the segments of the template
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of values needed to render the template
    pub fn placeholders(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder))
            .count()
    }

    /// Fill the placeholders, in order, with the given values
    ///
    /// Returns `None` unless exactly [`placeholders`](Self::placeholders)
    /// values are supplied.
    pub fn render<I, S>(&self, values: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = values.into_iter();
        let mut result = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Placeholder => result.push_str(values.next()?.as_ref()),
            }
        }

        if values.next().is_some() {
            return None;
        }
        Some(result)
    }
}

impl fmt::Display for ReverseTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    for c in text.chars() {
                        match c {
                            '{' => f.write_str("{{")?,
                            '}' => f.write_str("}}")?,
                            c => write!(f, "{}", c)?,
                        }
                    }
                }
                Segment::Placeholder => f.write_str("{}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for ReverseTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut template = ReverseTemplate::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, chars.peek().copied()) {
                ('{', Some('{')) | ('}', Some('}')) => {
                    chars.next();
                    template.push_char(c);
                }
                ('{', Some('}')) => {
                    chars.next();
                    template.push_placeholder();
                }
                ('{', _) | ('}', _) => return Err(TemplateError::UnbalancedBraces(s.to_string())),
                (c, _) => template.push_char(c),
            }
        }

        Ok(template)
    }
}
