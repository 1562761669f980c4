//! Stateless detectors, one per violation family.
//!
//! Each text detector maps a single field to issues. In first-match mode a
//! detector stops at the first rule that hits, so at most one issue is
//! reported per detector per field.

use std::ops::Range;

use tracing::debug;

use crate::config::MatchMode;
use crate::moderation::rules::RuleSet;
use crate::moderation::types::{IssueKind, ModerationIssue, field};

/// A pure text classifier over one submission field.
pub trait Detector {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Scan `text`, reporting issues against `field`.
    fn scan(&self, text: &str, field: &str, mode: MatchMode) -> Vec<ModerationIssue>;

    /// First issue only.
    fn detect(&self, text: &str, field: &str) -> Option<ModerationIssue> {
        self.scan(text, field, MatchMode::FirstMatch).into_iter().next()
    }
}

// ── Profanity ───────────────────────────────────────────────────────

/// Whole-word, case-insensitive banned term matching.
pub struct ProfanityDetector<'r> {
    rules: &'r RuleSet,
    skip_numeric: bool,
}

impl<'r> ProfanityDetector<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            skip_numeric: false,
        }
    }

    /// Street addresses: purely numeric terms are ignored so house numbers
    /// never read as slang.
    pub fn for_address(rules: &'r RuleSet) -> Self {
        Self {
            rules,
            skip_numeric: true,
        }
    }
}

impl Detector for ProfanityDetector<'_> {
    fn name(&self) -> &'static str {
        "profanity"
    }

    fn scan(&self, text: &str, field: &str, mode: MatchMode) -> Vec<ModerationIssue> {
        let lowercased = text.to_lowercase();
        let mut issues = Vec::new();

        for term in self.rules.profanity() {
            if self.skip_numeric && term.term().chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if !term.is_match(&lowercased) {
                continue;
            }
            let kind = if self.rules.is_adult_term(term.term()) {
                IssueKind::Nsfw
            } else {
                IssueKind::Profanity
            };
            debug!(field, term = term.term(), %kind, "Text matched banned term");
            issues.push(ModerationIssue::new(kind, term.term(), field));
            if mode == MatchMode::FirstMatch {
                break;
            }
        }

        issues
    }
}

// ── Contact / website ───────────────────────────────────────────────

/// Ordered URL, handle, email and phone pattern matching.
pub struct WebsiteDetector<'r> {
    rules: &'r RuleSet,
}

impl<'r> WebsiteDetector<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }
}

impl Detector for WebsiteDetector<'_> {
    fn name(&self) -> &'static str {
        "website"
    }

    fn scan(&self, text: &str, field: &str, mode: MatchMode) -> Vec<ModerationIssue> {
        let mut issues = Vec::new();
        // Spans already reported by a more specific pattern.
        let mut claimed: Vec<Range<usize>> = Vec::new();

        for pattern in self.rules.contact_patterns() {
            let hit = pattern.regex.find_iter(text).find(|m| {
                !claimed
                    .iter()
                    .any(|span| m.start() < span.end && span.start < m.end())
            });
            let Some(m) = hit else {
                continue;
            };
            debug!(
                field,
                rule = %pattern.name,
                matched = m.as_str(),
                "Text matched contact pattern"
            );
            issues.push(ModerationIssue::new(IssueKind::Website, m.as_str(), field));
            if mode == MatchMode::FirstMatch {
                break;
            }
            claimed.push(m.range());
        }

        issues
    }
}

// ── Promotional ─────────────────────────────────────────────────────

/// Case-insensitive phrase containment.
pub struct PromotionalDetector<'r> {
    rules: &'r RuleSet,
}

impl<'r> PromotionalDetector<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }
}

impl Detector for PromotionalDetector<'_> {
    fn name(&self) -> &'static str {
        "promotional"
    }

    fn scan(&self, text: &str, field: &str, mode: MatchMode) -> Vec<ModerationIssue> {
        let lowercased = text.to_lowercase();
        let mut issues = Vec::new();

        for phrase in self.rules.promotional_phrases() {
            if lowercased.contains(phrase.as_str()) {
                debug!(field, phrase = %phrase, "Text matched promotional phrase");
                issues.push(ModerationIssue::new(IssueKind::Promotional, phrase, field));
                if mode == MatchMode::FirstMatch {
                    break;
                }
            }
        }

        issues
    }
}

// ── Category ────────────────────────────────────────────────────────

/// Listing categories that are never allowed to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestrictedCategory {
    Adult,
    Services,
}

impl RestrictedCategory {
    /// Parse a free-text category label. Unknown labels are not restricted.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "adult" => Some(Self::Adult),
            "services" => Some(Self::Services),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RestrictedCategory::Adult => "adult",
            RestrictedCategory::Services => "services",
        }
    }
}

/// Flags restricted categories regardless of the listing text.
pub struct CategoryDetector;

impl CategoryDetector {
    pub fn detect(&self, category: Option<&str>) -> Option<ModerationIssue> {
        let restricted = RestrictedCategory::from_label(category?)?;
        debug!(category = restricted.as_str(), "Listing uses restricted category");
        Some(ModerationIssue::new(
            IssueKind::Nsfw,
            restricted.as_str(),
            field::CATEGORY,
        ))
    }
}
