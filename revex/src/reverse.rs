//! Reversible regular expressions
//!
//! A [`ReverseRegex`] couples a compiled forward matcher with the reverse
//! template built from the same pattern. It can test strings, extract the
//! values of its outermost groups, and build a string back from values.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use crate::error::{RegexError, Result, RevertError};
use crate::groups::{GroupCollector, GroupSpec};
use crate::parser::parse;
use crate::template::ReverseTemplate;
use crate::values::ValueBag;

/// A compiled pattern that can be matched forward and reverted
#[derive(Debug, Clone)]
pub struct ReverseRegex {
    pattern: String,
    compiled: Regex,
    groups: Vec<GroupSpec>,
    template: ReverseTemplate,
}

impl ReverseRegex {
    /// Compile a pattern
    ///
    /// The pattern is parsed once to find its outermost groups, then compiled
    /// by the `regex` crate with every group name removed. Numbering is
    /// unchanged by that rewrite, so duplicate names are accepted.
    pub fn new(pattern: &str) -> Result<Self> {
        let expr = parse(pattern)?;
        let compiled = Regex::new(&expr.to_positional_string())?;

        let parsed = expr.capture_count();
        let engine = compiled.captures_len() - 1;
        if parsed != engine {
            return Err(RegexError::GroupCount { parsed, engine });
        }

        let (groups, template) = GroupCollector::collect(&expr);
        tracing::debug!(
            pattern,
            groups = groups.len(),
            template = %template,
            "compiled reverse regex"
        );

        Ok(ReverseRegex {
            pattern: pattern.to_string(),
            compiled,
            groups,
            template,
        })
    }

    /// The pattern as given
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The forward matcher
    ///
    /// Its groups are unnamed; read them by [`GroupSpec::index`].
    pub fn compiled(&self) -> &Regex {
        &self.compiled
    }

    /// The reverse template
    pub fn template(&self) -> &ReverseTemplate {
        &self.template
    }

    /// The outermost capturing groups, in order
    pub fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    /// Names of the outermost groups, empty for positional ones
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Indices of the outermost groups
    ///
    /// Nested groups are skipped, so the sequence may have gaps.
    pub fn indices(&self) -> Vec<usize> {
        self.groups.iter().map(|g| g.index).collect()
    }

    /// Whether the pattern matches anywhere in `s`
    pub fn is_match(&self, s: &str) -> bool {
        self.compiled.is_match(s)
    }

    /// Match `s` and collect one value per outermost group
    ///
    /// Positional values are stored under the empty key. A group that did
    /// not take part in the match yields an empty string. Returns `None`
    /// when `s` does not match.
    pub fn values(&self, s: &str) -> Option<ValueBag> {
        let caps = self.compiled.captures(s)?;
        let mut bag = ValueBag::new();
        for group in &self.groups {
            let value = caps.get(group.index).map_or("", |m| m.as_str());
            bag.add(group.name.as_str(), value);
        }
        Some(bag)
    }

    /// Build a string by filling each outermost group with a value
    ///
    /// Each group takes the front value of its key, in group order. On
    /// success the used values are removed from `values` and the rest are
    /// left in place. On error `values` is not modified.
    ///
    /// Values are not checked against the groups they replace; see
    /// [`revert_valid`](Self::revert_valid).
    pub fn revert(&self, values: &mut ValueBag) -> std::result::Result<String, RevertError> {
        let total = self.groups.len();
        let missing = |key: &str| RevertError::MissingVariable {
            key: key.to_string(),
            total,
        };

        let mut needed: HashMap<&str, usize> = HashMap::new();
        for group in &self.groups {
            let count = needed.entry(group.name.as_str()).or_insert(0);
            *count += 1;
            if *count > values.remaining(&group.name) {
                return Err(missing(&group.name));
            }
        }

        let mut vars = Vec::with_capacity(total);
        for group in &self.groups {
            vars.push(values.pop_front(&group.name).ok_or_else(|| missing(&group.name))?);
        }

        // One placeholder per group, so rendering cannot run short.
        let reverted = self
            .template
            .render(&vars)
            .ok_or_else(|| missing(""))?;
        tracing::trace!(pattern = %self.pattern, reverted = %reverted, "reverted");
        Ok(reverted)
    }

    /// Same as [`revert`](Self::revert), and check that the result matches
    ///
    /// Values are consumed even when the check fails.
    pub fn revert_valid(&self, values: &mut ValueBag) -> std::result::Result<String, RevertError> {
        let reverted = self.revert(values)?;
        if !self.compiled.is_match(&reverted) {
            return Err(RevertError::Mismatch(reverted));
        }
        Ok(reverted)
    }
}

impl fmt::Display for ReverseRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl std::str::FromStr for ReverseRegex {
    type Err = RegexError;

    fn from_str(s: &str) -> Result<Self> {
        ReverseRegex::new(s)
    }
}
