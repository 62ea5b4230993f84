//! Reversion test suite
//!
//! Match, extract and revert behavior of compiled patterns, including the
//! reference table of patterns that every revert implementation must agree
//! on.

use revex::{ReverseRegex, RevertError, ValueBag, compile};

fn bag(pairs: &[(&str, &str)]) -> ValueBag {
    pairs.iter().copied().collect()
}

mod reference_table {
    use super::*;

    struct Case {
        pattern: &'static str,
        values: &'static [(&'static str, &'static str)],
        result: &'static str,
        valid: bool,
    }

    const CASES: &[Case] = &[
        Case {
            pattern: r"^1(\d+)3$",
            values: &[("", "2")],
            result: "123",
            valid: true,
        },
        Case {
            pattern: r"^1(\d+)3$",
            values: &[("", "a")],
            result: "1a3",
            valid: false,
        },
        Case {
            pattern: r"^4(?P<foo>\d+)6$",
            values: &[("foo", "5")],
            result: "456",
            valid: true,
        },
        Case {
            pattern: r"^4(?P<foo>\d+)6$",
            values: &[("foo", "b")],
            result: "4b6",
            valid: false,
        },
        Case {
            pattern: r"^7(?P<foo>\d)(\d)0$",
            values: &[("", "9"), ("foo", "8")],
            result: "7890",
            valid: true,
        },
        Case {
            pattern: r"^7(?P<foo>\d)(\d)0$",
            values: &[("", "d"), ("foo", "c")],
            result: "7cd0",
            valid: false,
        },
        Case {
            pattern: r"(?P<foo>\d)(\d)(?P<foo>\d)",
            values: &[("", "2"), ("foo", "1"), ("foo", "3")],
            result: "123",
            valid: true,
        },
        Case {
            pattern: r"(?P<foo>\d)(\d)(?P<foo>\d)",
            values: &[("", "b"), ("foo", "a"), ("foo", "c")],
            result: "abc",
            valid: false,
        },
    ];

    #[test]
    fn test_is_match() {
        for case in CASES {
            let re = compile(case.pattern).unwrap();
            assert_eq!(re.is_match(case.result), case.valid, "pattern {}", case.pattern);
        }
    }

    #[test]
    fn test_values_then_revert() {
        for case in CASES.iter().filter(|c| c.valid) {
            let re = compile(case.pattern).unwrap();
            let mut values = re.values(case.result).unwrap();
            assert_eq!(re.revert(&mut values).unwrap(), case.result, "pattern {}", case.pattern);
        }
    }

    #[test]
    fn test_revert() {
        for case in CASES {
            let re = compile(case.pattern).unwrap();
            let mut values = bag(case.values);
            assert_eq!(re.revert(&mut values).unwrap(), case.result, "pattern {}", case.pattern);
            assert!(values.is_empty());
        }
    }

    #[test]
    fn test_revert_valid() {
        for case in CASES {
            let re = compile(case.pattern).unwrap();
            let result = re.revert_valid(&mut bag(case.values));
            if case.valid {
                assert_eq!(result.unwrap(), case.result, "pattern {}", case.pattern);
            } else {
                assert_eq!(
                    result,
                    Err(RevertError::Mismatch(case.result.to_string())),
                    "pattern {}",
                    case.pattern
                );
            }
        }
    }
}

mod groups {
    use super::*;

    #[test]
    fn test_single_group() {
        let re = compile(r"^1(\d+)3$").unwrap();
        assert_eq!(re.group_names(), vec![""]);
        assert_eq!(re.indices(), vec![1]);
    }

    #[test]
    fn test_nested_groups() {
        let re = compile(r"^1(\d+([a-z]+)(\d+([a-z]+)))(?P<foo>\d+)3([a-z]+(\d+))(?P<bar>\d+)$")
            .unwrap();
        assert_eq!(re.group_names(), vec!["", "foo", "", "bar"]);
        assert_eq!(re.indices(), vec![1, 5, 6, 8]);
    }

    #[test]
    fn test_indices_agree_with_engine() {
        let re = compile(r"^(a(b))(?P<c>c)(d(e(f)))$").unwrap();
        let caps = re.compiled().captures("abcdef").unwrap();
        let outer: Vec<&str> = re
            .indices()
            .into_iter()
            .filter_map(|i| caps.get(i).map(|m| m.as_str()))
            .collect();
        assert_eq!(outer, vec!["ab", "c", "def"]);
    }

    #[test]
    fn test_template_text() {
        let re = compile(r"^/files/(?P<dir>\w+)/(\w+)\.txt$").unwrap();
        assert_eq!(re.template().to_string(), "/files/{}/{}.txt");
        assert_eq!(re.template().placeholders(), re.groups().len());
    }

    #[test]
    fn test_template_braces_are_doubled() {
        let re = compile(r"^\{(\w+)\}$").unwrap();
        assert_eq!(re.template().to_string(), "{{{}}}");
        assert_eq!(re.revert(&mut bag(&[("", "x")])).unwrap(), "{x}");
    }
}

mod extraction {
    use super::*;

    #[test]
    fn test_no_match_is_none() {
        let re = compile(r"^/users/(\d+)$").unwrap();
        assert!(re.values("/users/abc").is_none());
        assert!(!re.is_match("/users/abc"));
    }

    #[test]
    fn test_unanchored_match() {
        let re = compile(r"id=(?P<id>\d+)").unwrap();
        let values = re.values("?page=2&id=17&x=1").unwrap();
        assert_eq!(values.get("id"), Some("17"));
    }

    #[test]
    fn test_positional_values_in_order() {
        let re = compile(r"^(\w)-(\w)-(\w)$").unwrap();
        let values = re.values("a-b-c").unwrap();
        assert_eq!(values.get_all(""), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_group_value() {
        let re = compile(r"^a(\d*)b$").unwrap();
        let mut values = re.values("ab").unwrap();
        assert_eq!(values.get(""), Some(""));
        assert_eq!(re.revert_valid(&mut values).unwrap(), "ab");
    }
}

mod reversion {
    use super::*;

    #[test]
    fn test_missing_variable() {
        let re = compile(r"^/(?P<a>\w+)/(?P<b>\w+)$").unwrap();
        let mut values = bag(&[("a", "x")]);
        assert_eq!(
            re.revert(&mut values),
            Err(RevertError::MissingVariable {
                key: "b".to_string(),
                total: 2,
            })
        );
        assert_eq!(values, bag(&[("a", "x")]));
    }

    #[test]
    fn test_missing_positional_variable() {
        let re = compile(r"^(\d)(\d)$").unwrap();
        let err = re.revert_valid(&mut bag(&[("", "1")])).unwrap_err();
        assert_eq!(
            err,
            RevertError::MissingVariable {
                key: String::new(),
                total: 2,
            }
        );
    }

    #[test]
    fn test_one_bag_across_patterns() {
        let host = compile(r"^(?P<sub>[^.]+)\.example\.com$").unwrap();
        let path = compile(r"^/(?P<sub>\w+)/(\d+)$").unwrap();
        let mut values = bag(&[("sub", "www"), ("sub", "docs"), ("", "3"), ("lang", "en")]);

        assert_eq!(host.revert_valid(&mut values).unwrap(), "www.example.com");
        assert_eq!(path.revert_valid(&mut values).unwrap(), "/docs/3");
        assert_eq!(values, bag(&[("lang", "en")]));
    }

    #[test]
    fn test_extracted_bags_merge() {
        let host = compile(r"^(?P<sub>[^.]+)\.example\.com$").unwrap();
        let path = compile(r"^/items/(\d+)$").unwrap();

        let mut values = host.values("api.example.com").unwrap();
        values.merge(path.values("/items/9").unwrap());

        assert_eq!(host.revert(&mut values).unwrap(), "api.example.com");
        assert_eq!(path.revert(&mut values).unwrap(), "/items/9");
        assert!(values.is_empty());
    }

    #[test]
    fn test_values_are_not_escaped() {
        let re = compile(r"^/search/(.+)$").unwrap();
        let mut values = bag(&[("", "a b/c?d")]);
        assert_eq!(re.revert_valid(&mut values).unwrap(), "/search/a b/c?d");
    }
}

mod compile_errors {
    use super::*;
    use revex::RegexError;

    #[test]
    fn test_invalid_patterns() {
        for pattern in ["(", ")", "[a", "*", "a|?", r"\", "(?P<>a)", "(?P<1a>a)", "(?z)"] {
            let err = ReverseRegex::new(pattern).unwrap_err();
            assert!(err.is_syntax(), "pattern {pattern:?}: {err}");
        }
    }

    #[test]
    fn test_engine_errors_pass_through() {
        assert!(matches!(compile(r"[z-a]"), Err(RegexError::Syntax(_))));
        assert!(matches!(compile(r"\p{Nope}"), Err(RegexError::Syntax(_))));
    }
}

mod verbose_flag {
    use super::*;

    #[test]
    fn test_whitespace_round_trip() {
        let re = compile(r"(?x) ^ /users/ (\d+) $").unwrap();
        assert_eq!(re.template().to_string(), "/users/{}");
        let mut values = re.values("/users/42").unwrap();
        assert_eq!(re.revert_valid(&mut values).unwrap(), "/users/42");
    }

    #[test]
    fn test_parentheses_in_comments_are_not_groups() {
        let re = compile("(?x)^a(\\d) # a (comment)\n$").unwrap();
        assert_eq!(re.indices(), vec![1]);
        let mut values = re.values("a7").unwrap();
        assert_eq!(re.revert_valid(&mut values).unwrap(), "a7");
    }

    #[test]
    fn test_flag_cleared_in_group() {
        let re = compile(r"(?x)^ a (?-x: b c) $").unwrap();
        assert!(re.is_match("a b c"));
        assert_eq!(re.revert(&mut ValueBag::new()).unwrap(), "a b c");
    }
}
