use crate::config::RunOptions;
use crate::errors::{Error, Result};
use crate::matcher::{MatchOutcome, RuleMatcher};
use serde::Deserialize;
use std::borrow::Cow;
use std::cmp::Reverse;
use std::collections::HashMap;

/// One `(search, replace)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    /// The text or pattern to look for.
    pub search: String,
    /// The text it is replaced with.
    pub replace: String,
}

impl Rule {
    pub fn new(search: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replace: replace.into(),
        }
    }
}

/// A rule paired with the matcher compiled for the run's matching mode.
#[derive(Debug)]
pub struct CompiledRule {
    rule: Rule,
    matcher: RuleMatcher,
}

impl CompiledRule {
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn matcher(&self) -> &RuleMatcher {
        &self.matcher
    }
}

/// A validated, ordered collection of rules.
///
/// Construction validates the collection (distinct, non-empty search terms),
/// fixes the effective application order, and compiles one matcher per rule,
/// so every configuration error surfaces before the first file is read. A
/// built `RuleSet` is immutable and reused for every file in a run.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Validates, orders, and compiles `rules` into a usable set.
    ///
    /// When `options.sort_by_length` is set, the effective order is a stable
    /// sort by the character length of `search`, longest first: a rule for
    /// `"abcd"` must fire before a rule for `"a"`, or the shorter rule eats
    /// the text the longer one was meant to match. Rules of equal length
    /// keep their input order. Each rule runs exactly once over the result
    /// of the previous rule; there is no fixpoint iteration.
    pub fn build(rules: Vec<Rule>, options: &RunOptions) -> Result<Self> {
        validate_distinct(&rules)?;

        let mut ordered = rules;
        if options.sort_by_length {
            ordered.sort_by_key(|r| Reverse(r.search.chars().count()));
        }

        let rules = ordered
            .into_iter()
            .map(|rule| {
                let matcher =
                    RuleMatcher::compile(&rule, options.case_sensitive, options.use_regex)?;
                Ok(CompiledRule { rule, matcher })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// The rules in effective application order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule over `input` in effective order, threading each
    /// rule's output into the next and summing the per-rule counts.
    ///
    /// Text introduced by one rule's replacement is never re-scanned by
    /// earlier rules; later rules see it like any other content.
    pub fn apply<'a>(&self, input: &'a str) -> MatchOutcome<'a> {
        let mut content = Cow::Borrowed(input);
        let mut total = 0;

        for compiled in &self.rules {
            let outcome = compiled.matcher.apply(content.as_ref());
            if outcome.count == 0 {
                continue;
            }
            total += outcome.count;
            let replaced = outcome.content.into_owned();
            content = Cow::Owned(replaced);
        }

        MatchOutcome {
            content,
            count: total,
        }
    }
}

/// Rejects empty search terms and repeated search terms.
///
/// A repeated search term signals caller error (redundant or copy-pasted
/// input) even when both rules agree on the replacement, so duplicates are
/// rejected regardless of their `replace` values.
fn validate_distinct(rules: &[Rule]) -> Result<()> {
    if rules.iter().any(|r| r.search.is_empty()) {
        return Err(Error::EmptySearchTerm);
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for rule in rules {
        *seen.entry(rule.search.as_str()).or_insert(0) += 1;
    }

    let mut duplicates: Vec<String> = seen
        .into_iter()
        .filter(|(_, occurrences)| *occurrences > 1)
        .map(|(term, _)| term.to_string())
        .collect();

    if duplicates.is_empty() {
        return Ok(());
    }
    duplicates.sort();
    Err(Error::DuplicateSearchTerms(duplicates))
}
