//! Outermost capture groups and the reverse template
//!
//! A single depth-first walk over the AST records every outermost capturing
//! group (one not nested in another capturing group) and builds the reverse
//! template at the same time:
//! - literal text outside any group is copied into the template
//! - each outermost group becomes exactly one placeholder
//! - nested groups, and literals inside groups, are invisible
//!
//! Repetitions and alternations are opaque: groups inside them are numbered
//! but never become placeholders, and their literals are not copied.

use crate::ast::Expr;
use crate::template::ReverseTemplate;

/// Information about an outermost capture group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    /// The group name, empty for positional groups
    pub name: String,
    /// The index of the group within the whole pattern (1-based, counting
    /// nested groups as the engine does)
    pub index: usize,
}

impl GroupSpec {
    /// Whether this is a positional (unnamed) group
    pub fn is_positional(&self) -> bool {
        self.name.is_empty()
    }
}

/// A visitor that collects outermost groups and the reverse template
#[derive(Debug, Default)]
pub struct GroupCollector {
    groups: Vec<GroupSpec>,
    template: ReverseTemplate,
    /// Index of the last capturing group seen
    index: usize,
    /// Current nesting level; 0 is outside any group or opaque subtree
    level: usize,
}

impl GroupCollector {
    /// Collect the outermost groups and the reverse template of an expression
    pub fn collect(expr: &Expr) -> (Vec<GroupSpec>, ReverseTemplate) {
        let mut collector = GroupCollector::default();
        collector.visit_expr(expr);
        (collector.groups, collector.template)
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Empty
            | Expr::Any
            | Expr::StartAnchor
            | Expr::EndAnchor
            | Expr::Class(_)
            | Expr::Shorthand(_)
            | Expr::SetFlags(_) => {}

            Expr::Literal(lit) => {
                if self.level == 0 {
                    self.template.push_char(lit.value);
                }
            }

            Expr::Concat(exprs) => {
                for expr in exprs {
                    self.visit_expr(expr);
                }
            }

            Expr::NonCapturingGroup { pattern, .. } => self.visit_expr(pattern),

            Expr::Group(pattern) => self.visit_capture("", pattern),

            Expr::NamedGroup { name, pattern } => self.visit_capture(name, pattern),

            Expr::Alternation(exprs) => {
                self.level += 1;
                for expr in exprs {
                    self.visit_expr(expr);
                }
                self.level -= 1;
            }

            Expr::Quantified { expr, .. } => {
                self.level += 1;
                self.visit_expr(expr);
                self.level -= 1;
            }
        }
    }

    fn visit_capture(&mut self, name: &str, pattern: &Expr) {
        self.index += 1;
        if self.level == 0 {
            self.groups.push(GroupSpec {
                name: name.to_string(),
                index: self.index,
            });
            self.template.push_placeholder();
        }
        self.level += 1;
        self.visit_expr(pattern);
        self.level -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn collect(pattern: &str) -> (Vec<GroupSpec>, ReverseTemplate) {
        GroupCollector::collect(&parse(pattern).unwrap())
    }

    fn names_and_indices(groups: &[GroupSpec]) -> (Vec<&str>, Vec<usize>) {
        (
            groups.iter().map(|g| g.name.as_str()).collect(),
            groups.iter().map(|g| g.index).collect(),
        )
    }

    #[test]
    fn test_single_positional_group() {
        let (groups, template) = collect(r"^1(\d+)3$");
        assert_eq!(names_and_indices(&groups), (vec![""], vec![1]));
        assert_eq!(template.to_string(), "1{}3");
    }

    #[test]
    fn test_nested_groups_are_skipped() {
        let (groups, template) = collect(
            r"^1(\d+([a-z]+)(\d+([a-z]+)))(?P<foo>\d+)3([a-z]+(\d+))(?P<bar>\d+)$",
        );
        assert_eq!(
            names_and_indices(&groups),
            (vec!["", "foo", "", "bar"], vec![1, 5, 6, 8])
        );
        assert_eq!(template.to_string(), "1{}{}3{}{}");
    }

    #[test]
    fn test_literals_inside_group_are_skipped() {
        let (groups, template) = collect("a(bc)d");
        assert_eq!(groups.len(), 1);
        assert_eq!(template.to_string(), "a{}d");
    }

    #[test]
    fn test_escaped_literals_are_unescaped() {
        let (_, template) = collect(r"^/files/(\w+)\.txt$");
        assert_eq!(template.to_string(), "/files/{}.txt");
    }

    #[test]
    fn test_non_capturing_group_literals_are_kept() {
        let (groups, template) = collect(r"(?:ab)(\d)(?i:c)");
        assert_eq!(names_and_indices(&groups), (vec![""], vec![1]));
        assert_eq!(template.to_string(), "ab{}c");
    }

    #[test]
    fn test_opaque_subtrees_still_advance_the_index() {
        let (groups, template) = collect(r"x(?:(a)|b)(c)+(?P<d>\d)");
        assert_eq!(names_and_indices(&groups), (vec!["d"], vec![3]));
        assert_eq!(template.to_string(), "x{}");
    }

    #[test]
    fn test_quantified_literal_is_dropped() {
        let (_, template) = collect("ab+c");
        assert_eq!(template.to_string(), "ac");
    }

    #[test]
    fn test_placeholders_match_groups() {
        for pattern in [
            r"(?P<foo>\d)(\d)(?P<foo>\d)",
            r"^7(?P<foo>\d)(\d)0$",
            r"()",
            r"no groups at all",
        ] {
            let (groups, template) = collect(pattern);
            assert_eq!(groups.len(), template.placeholders(), "pattern {pattern}");
        }
    }

    #[test]
    fn test_is_positional() {
        let (groups, _) = collect(r"(?P<foo>a)(b)");
        assert!(!groups[0].is_positional());
        assert!(groups[1].is_positional());
    }

    #[test]
    fn test_verbose_flag_drops_whitespace_and_comments() {
        let (groups, template) = collect("(?x) ^ /users/ (\\d+) # id (digits)\n $");
        assert_eq!(names_and_indices(&groups), (vec![""], vec![1]));
        assert_eq!(template.to_string(), "/users/{}");
    }

    #[test]
    fn test_scoped_verbose_flag() {
        let (_, template) = collect("(?x: a b )c d(?x) e");
        assert_eq!(template.to_string(), "abc de");
    }
}
