//! Brace templates
//!
//! This module translates the brace placeholder syntax used for URL hosts
//! and paths, `{name}` or `{name:pattern}`, into an anchored regex with one
//! named group per placeholder.
//!
//! # Example
//! ```
//! use revex::{TemplateMode, translate};
//!
//! let source = translate("/users/{id:[0-9]+}", TemplateMode::Path, false).unwrap();
//! assert_eq!(source, "^/users/(?P<id>[0-9]+)$");
//! ```

use std::fmt;
use std::ops::Deref;

use crate::error::{Result, TemplateError};
use crate::reverse::ReverseRegex;

/// Pattern used for `{name}` in path templates
pub const DEFAULT_PATH_PATTERN: &str = "[^/]+";

/// Pattern used for `{name}` in host templates
pub const DEFAULT_HOST_PATTERN: &str = "[^.]+";

/// What a brace template is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateMode {
    /// A host name, anchored at both ends
    Host,
    /// A full path, anchored at both ends
    #[default]
    Path,
    /// The start of a path
    PathPrefix,
}

impl TemplateMode {
    fn default_pattern(self) -> &'static str {
        match self {
            TemplateMode::Host => DEFAULT_HOST_PATTERN,
            TemplateMode::Path | TemplateMode::PathPrefix => DEFAULT_PATH_PATTERN,
        }
    }

    /// Short lowercase name of the mode
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateMode::Host => "host",
            TemplateMode::Path => "path",
            TemplateMode::PathPrefix => "prefix",
        }
    }
}

impl fmt::Display for TemplateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the top level brace regions of a template
///
/// Each region is returned as `(start, end)`, where `start` is the offset of
/// the opening `{` and `end` is one past the matching `}`. Braces nested in a
/// region belong to it.
pub fn brace_indices(s: &str) -> std::result::Result<Vec<(usize, usize)>, TemplateError> {
    let unbalanced = || TemplateError::UnbalancedBraces(s.to_string());
    let mut regions = Vec::new();
    let mut level = 0usize;
    let mut start = 0;

    for (i, b) in s.bytes().enumerate() {
        match b {
            b'{' => {
                if level == 0 {
                    start = i;
                }
                level += 1;
            }
            b'}' => {
                level = level.checked_sub(1).ok_or_else(unbalanced)?;
                if level == 0 {
                    regions.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    if level != 0 {
        return Err(unbalanced());
    }
    Ok(regions)
}

/// Translate a brace template into regex source
///
/// Text outside the braces is escaped. Host mode turns off `strict_slash`,
/// and so does prefix mode. With `strict_slash`, one trailing `/` is dropped
/// from the template and an optional slash is matched instead.
pub fn translate(
    template: &str,
    mode: TemplateMode,
    strict_slash: bool,
) -> std::result::Result<String, TemplateError> {
    let strict_slash = strict_slash && mode == TemplateMode::Path;
    let template = if strict_slash {
        template.strip_suffix('/').unwrap_or(template)
    } else {
        template
    };

    let regions = brace_indices(template)?;
    let mut pattern = String::from("^");
    let mut end = 0;

    for (start, region_end) in regions {
        let raw = &template[end..start];
        end = region_end;
        let region = &template[start..end];
        let inner = &region[1..region.len() - 1];

        let (name, sub) = match inner.split_once(':') {
            Some((name, sub)) => (name, sub),
            None => (inner, mode.default_pattern()),
        };
        if name.is_empty() || sub.is_empty() {
            return Err(TemplateError::MalformedPlaceholder(region.to_string()));
        }

        pattern.push_str(&regex::escape(raw));
        pattern.push_str("(?P<");
        pattern.push_str(name);
        pattern.push('>');
        pattern.push_str(sub);
        pattern.push(')');
    }

    pattern.push_str(&regex::escape(&template[end..]));
    if strict_slash {
        pattern.push_str("[/]?");
    }
    if mode != TemplateMode::PathPrefix {
        pattern.push('$');
    }
    Ok(pattern)
}

/// A compiled brace template
///
/// Dereferences to the [`ReverseRegex`] compiled from the translated source,
/// and remembers how it was translated.
#[derive(Debug, Clone)]
pub struct BracePattern {
    template: String,
    mode: TemplateMode,
    strict_slash: bool,
    regex: ReverseRegex,
}

impl BracePattern {
    /// Translate and compile a brace template
    pub fn new(template: &str, mode: TemplateMode, strict_slash: bool) -> Result<Self> {
        let source = translate(template, mode, strict_slash)?;
        let regex = ReverseRegex::new(&source)?;
        tracing::debug!(template, %mode, strict_slash, source = %source, "compiled brace template");

        Ok(BracePattern {
            template: template.to_string(),
            mode,
            strict_slash: strict_slash && mode == TemplateMode::Path,
            regex,
        })
    }

    /// Compile a host template
    pub fn host(template: &str) -> Result<Self> {
        BracePattern::new(template, TemplateMode::Host, false)
    }

    /// Compile a path template
    pub fn path(template: &str, strict_slash: bool) -> Result<Self> {
        BracePattern::new(template, TemplateMode::Path, strict_slash)
    }

    /// Compile a path prefix template
    pub fn path_prefix(template: &str) -> Result<Self> {
        BracePattern::new(template, TemplateMode::PathPrefix, false)
    }

    /// The brace template as given
    pub fn template_str(&self) -> &str {
        &self.template
    }

    /// The mode the template was translated for
    pub fn mode(&self) -> TemplateMode {
        self.mode
    }

    /// Whether a trailing slash is optional when matching
    ///
    /// Always false for host and prefix templates.
    pub fn strict_slash(&self) -> bool {
        self.strict_slash
    }

    /// The canonical form of a matching path whose trailing slash differs
    /// from the template's
    ///
    /// Returns `None` for templates without strict slash, for paths that do
    /// not match, and for paths that are already canonical.
    pub fn redirect_path(&self, path: &str) -> Option<String> {
        if !self.strict_slash || !self.regex.is_match(path) {
            return None;
        }

        match (self.template.ends_with('/'), path.strip_suffix('/')) {
            (true, None) => Some(format!("{path}/")),
            (false, Some(stripped)) => Some(stripped.to_string()),
            _ => None,
        }
    }
}

impl Deref for BracePattern {
    type Target = ReverseRegex;

    fn deref(&self) -> &ReverseRegex {
        &self.regex
    }
}

impl fmt::Display for BracePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
