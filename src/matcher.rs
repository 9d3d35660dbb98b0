use crate::errors::{Error, Result};
use crate::ruleset::Rule;
use regex::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;

/// The result of applying one rule to one input string.
///
/// `content` borrows the input when nothing matched, so a no-op rule costs
/// no allocation.
pub struct MatchOutcome<'a> {
    /// The fully substituted content.
    pub content: Cow<'a, str>,
    /// The number of non-overlapping matches substituted, left to right.
    pub count: usize,
}

/// A single rule compiled for the run's matching mode.
///
/// Matchers are built once per rule when the [`RuleSet`](crate::ruleset::RuleSet)
/// is constructed, so an invalid pattern is reported before any file is read.
#[derive(Debug)]
pub enum RuleMatcher {
    /// Case-sensitive literal mode: exact substring replacement.
    Exact { search: String, replace: String },
    /// Case-insensitive literal mode: the search text is regex-escaped and
    /// matched with the case-insensitive flag, while the replacement is
    /// inserted verbatim (never case-adapted, never capture-expanded).
    CaselessLiteral { regex: Regex, replace: String },
    /// Regex mode: the search text is a pattern; the replacement may
    /// reference capture groups with `$1`, `${name}` and friends.
    Pattern { regex: Regex, replace: String },
}

impl RuleMatcher {
    /// Compiles `rule` for the given matching mode.
    pub fn compile(rule: &Rule, case_sensitive: bool, use_regex: bool) -> Result<Self> {
        if use_regex {
            let regex = RegexBuilder::new(&rule.search)
                .case_insensitive(!case_sensitive)
                .build()
                .map_err(|source| Error::Pattern {
                    pattern: rule.search.clone(),
                    source,
                })?;
            return Ok(RuleMatcher::Pattern {
                regex,
                replace: rule.replace.clone(),
            });
        }

        if case_sensitive {
            return Ok(RuleMatcher::Exact {
                search: rule.search.clone(),
                replace: rule.replace.clone(),
            });
        }

        // Escaping guarantees literal semantics even when the search text
        // contains regex metacharacters.
        let regex = RegexBuilder::new(&regex::escape(&rule.search))
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::Pattern {
                pattern: rule.search.clone(),
                source,
            })?;
        Ok(RuleMatcher::CaselessLiteral {
            regex,
            replace: rule.replace.clone(),
        })
    }

    /// Applies the rule to `input`, substituting every non-overlapping match
    /// in a single left-to-right pass.
    pub fn apply<'a>(&self, input: &'a str) -> MatchOutcome<'a> {
        match self {
            RuleMatcher::Exact { search, replace } => {
                let count = input.matches(search.as_str()).count();
                if count == 0 {
                    MatchOutcome {
                        content: Cow::Borrowed(input),
                        count: 0,
                    }
                } else {
                    MatchOutcome {
                        content: Cow::Owned(input.replace(search.as_str(), replace)),
                        count,
                    }
                }
            }
            RuleMatcher::CaselessLiteral { regex, replace } => {
                let count = regex.find_iter(input).count();
                if count == 0 {
                    MatchOutcome {
                        content: Cow::Borrowed(input),
                        count: 0,
                    }
                } else {
                    // NoExpand keeps `$` in the replacement verbatim: literal
                    // mode never expands capture references.
                    MatchOutcome {
                        content: regex.replace_all(input, NoExpand(replace)),
                        count,
                    }
                }
            }
            RuleMatcher::Pattern { regex, replace } => {
                let count = regex.find_iter(input).count();
                if count == 0 {
                    MatchOutcome {
                        content: Cow::Borrowed(input),
                        count: 0,
                    }
                } else {
                    MatchOutcome {
                        content: regex.replace_all(input, replace.as_str()),
                        count,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(search: &str, replace: &str) -> Rule {
        Rule::new(search, replace)
    }

    #[test]
    fn test_case_sensitive_literal() {
        let matcher = RuleMatcher::compile(&rule("hello", "hi"), true, false).unwrap();
        let outcome = matcher.apply("Hello HELLO hello HeLLo");

        assert_eq!(outcome.content, "Hello HELLO hi HeLLo");
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_case_insensitive_literal() {
        let matcher = RuleMatcher::compile(&rule("hello", "hi"), false, false).unwrap();
        let outcome = matcher.apply("Hello HELLO hello HeLLo");

        assert_eq!(outcome.content, "hi hi hi hi");
        assert_eq!(outcome.count, 4);
    }

    #[test]
    fn test_literal_mode_ignores_metacharacters() {
        // `a.c` must not match `abc` in either literal mode
        let sensitive = RuleMatcher::compile(&rule("a.c", "X"), true, false).unwrap();
        assert_eq!(sensitive.apply("abc a.c").content, "abc X");

        let insensitive = RuleMatcher::compile(&rule("a.c", "X"), false, false).unwrap();
        let outcome = insensitive.apply("abc A.C a.c");
        assert_eq!(outcome.content, "abc X X");
        assert_eq!(outcome.count, 2);
    }

    #[test]
    fn test_literal_replacement_is_verbatim() {
        // `$1` in the replacement is plain text outside regex mode
        let sensitive = RuleMatcher::compile(&rule("price", "$1"), true, false).unwrap();
        assert_eq!(sensitive.apply("the price").content, "the $1");

        let insensitive = RuleMatcher::compile(&rule("price", "$1"), false, false).unwrap();
        assert_eq!(insensitive.apply("the PRICE").content, "the $1");
    }

    #[test]
    fn test_regex_with_capture_groups() {
        let matcher =
            RuleMatcher::compile(&rule(r"\$(\d+\.\d+)", "£$1"), true, true).unwrap();
        let outcome = matcher.apply("Price: $10.50 and $20.75");

        assert_eq!(outcome.content, "Price: £10.50 and £20.75");
        assert_eq!(outcome.count, 2);
    }

    #[test]
    fn test_regex_case_insensitive() {
        let matcher = RuleMatcher::compile(&rule(r"test\d+", "Result"), false, true).unwrap();
        let outcome = matcher.apply("Test123 TEST456 test789");

        assert_eq!(outcome.content, "Result Result Result");
        assert_eq!(outcome.count, 3);
    }

    #[test]
    fn test_invalid_pattern_names_the_offender() {
        let err = RuleMatcher::compile(&rule("[unclosed", "x"), true, true).unwrap_err();
        assert!(err.to_string().contains("[unclosed"));
    }

    #[test]
    fn test_non_overlapping_count() {
        // "aaa" contains one non-overlapping "aa": the scan consumes it
        let matcher = RuleMatcher::compile(&rule("aa", "b"), true, false).unwrap();
        let outcome = matcher.apply("aaa");

        assert_eq!(outcome.content, "ba");
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_no_match_borrows_input() {
        let matcher = RuleMatcher::compile(&rule("absent", "x"), true, false).unwrap();
        let outcome = matcher.apply("hello world");

        assert!(matches!(outcome.content, Cow::Borrowed(_)));
        assert_eq!(outcome.count, 0);
    }
}
