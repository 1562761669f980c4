//! Formatting heuristics and mild-profanity masking.

use tracing::debug;

use crate::config::MatchMode;
use crate::moderation::detectors::Detector;
use crate::moderation::rules::RuleSet;
use crate::moderation::types::{IssueKind, ModerationIssue};

/// Share of symbol characters above which text reads as spam.
const MAX_SPECIAL_RATIO: f64 = 0.3;

/// Titles longer than this may not be all capitals.
const SHOUTING_MIN_CHARS: usize = 5;

/// Spam formatting: shouting and symbol-heavy text.
pub struct SpamDetector {
    check_shouting: bool,
}

impl SpamDetector {
    /// Titles get the all-caps check as well.
    pub fn title() -> Self {
        Self {
            check_shouting: true,
        }
    }

    pub fn body() -> Self {
        Self {
            check_shouting: false,
        }
    }
}

impl Detector for SpamDetector {
    fn name(&self) -> &'static str {
        "spam"
    }

    fn scan(&self, text: &str, field: &str, mode: MatchMode) -> Vec<ModerationIssue> {
        let mut issues = Vec::new();

        if self.check_shouting && is_shouting(text) {
            debug!(field, "Text is all capitals");
            issues.push(ModerationIssue::new(IssueKind::Spam, "all capital letters", field));
            if mode == MatchMode::FirstMatch {
                return issues;
            }
        }

        if special_char_ratio(text) > MAX_SPECIAL_RATIO {
            debug!(field, "Text has excessive special characters");
            issues.push(ModerationIssue::new(
                IssueKind::Spam,
                "excessive special characters",
                field,
            ));
        }

        issues
    }
}

fn is_shouting(text: &str) -> bool {
    if text.chars().count() <= SHOUTING_MIN_CHARS {
        return false;
    }
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

fn special_char_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let special = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    special as f64 / total as f64
}

/// Replace whole-word mild terms with asterisks of the same length.
pub fn clean_text(rules: &RuleSet, text: &str) -> String {
    let mut cleaned = text.to_string();
    for term in rules.mild_terms() {
        let spans: Vec<_> = term.find_iter(&cleaned).map(|m| m.range()).collect();
        if spans.is_empty() {
            continue;
        }
        let mut masked = String::with_capacity(cleaned.len());
        let mut last = 0;
        for span in spans {
            masked.push_str(&cleaned[last..span.start]);
            masked.extend(std::iter::repeat_n('*', cleaned[span.clone()].chars().count()));
            last = span.end;
        }
        masked.push_str(&cleaned[last..]);
        cleaned = masked;
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shouting_titles_flagged() {
        let issue = SpamDetector::title().detect("BEST DEAL EVER", "title").unwrap();
        assert_eq!(issue.kind, IssueKind::Spam);
        assert_eq!(issue.matched_text, "all capital letters");
    }

    #[test]
    fn short_or_mixed_case_titles_pass() {
        assert!(SpamDetector::title().detect("TV", "title").is_none());
        assert!(SpamDetector::title().detect("IKEA desk lamp", "title").is_none());
        assert!(SpamDetector::title().detect("12345 678", "title").is_none());
    }

    #[test]
    fn body_skips_shouting_check() {
        assert!(SpamDetector::body().detect("BEST DEAL EVER", "description").is_none());
    }

    #[test]
    fn symbol_heavy_text_flagged() {
        let issue = SpamDetector::body().detect("$$$ !!! ***", "description").unwrap();
        assert_eq!(issue.matched_text, "excessive special characters");
        assert!(SpamDetector::body().detect("Great bike, barely used!", "description").is_none());
    }

    #[test]
    fn all_matches_reports_both() {
        let issues = SpamDetector::title().scan("!!!BUY!!!", "title", MatchMode::AllMatches);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn clean_text_masks_whole_words() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(clean_text(&rules, "Damn, what a deal"), "****, what a deal");
        assert_eq!(clean_text(&rules, "hello from hell"), "hello from ****");
        assert_eq!(clean_text(&rules, "crap crap"), "**** ****");
        assert_eq!(clean_text(&rules, "scrap metal"), "scrap metal");
    }
}
