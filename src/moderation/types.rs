//! Shared types for the moderation pipeline.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ── Fields ──────────────────────────────────────────────────────────

/// Provenance labels attached to issues.
pub mod field {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const ADDRESS: &str = "address";
    pub const CATEGORY: &str = "category";
    pub const IMAGE: &str = "image";
}

// ── Issue ───────────────────────────────────────────────────────────

/// What kind of violation an issue represents.
///
/// The declaration order is the order used when summarizing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Profanity,
    Website,
    Promotional,
    Nsfw,
    Spam,
    Image,
}

impl IssueKind {
    /// Phrase used in the user-facing summary.
    pub fn phrase(self) -> &'static str {
        match self {
            IssueKind::Profanity => "inappropriate language",
            IssueKind::Website => "external links or contact information",
            IssueKind::Promotional => "promotional content",
            IssueKind::Nsfw => "adult content",
            IssueKind::Spam => "spam-like formatting",
            IssueKind::Image => "an unsupported image",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Profanity => write!(f, "profanity"),
            IssueKind::Website => write!(f, "website"),
            IssueKind::Promotional => write!(f, "promotional"),
            IssueKind::Nsfw => write!(f, "nsfw"),
            IssueKind::Spam => write!(f, "spam"),
            IssueKind::Image => write!(f, "image"),
        }
    }
}

/// A single flagged violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationIssue {
    pub kind: IssueKind,
    /// The rule term or the substring that triggered the issue.
    pub matched_text: String,
    /// Which submission field the issue came from.
    pub field: String,
}

impl ModerationIssue {
    pub fn new(kind: IssueKind, matched_text: impl Into<String>, field: &str) -> Self {
        Self {
            kind,
            matched_text: matched_text.into(),
            field: field.to_string(),
        }
    }
}

// ── Result ──────────────────────────────────────────────────────────

/// Aggregate verdict for a submission.
///
/// There is no stored pass flag: a result passes iff it has no issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationResult {
    issues: Vec<ModerationIssue>,
}

impl ModerationResult {
    /// A passing result.
    pub fn passed() -> Self {
        Self::default()
    }

    pub fn from_issues(issues: Vec<ModerationIssue>) -> Self {
        Self { issues }
    }

    pub fn is_passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ModerationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ModerationIssue> {
        self.issues
    }

    /// Unique issue kinds present, in summary order.
    pub fn kinds(&self) -> BTreeSet<IssueKind> {
        self.issues.iter().map(|i| i.kind).collect()
    }

    /// Human-readable summary shown to the submitter.
    pub fn message(&self) -> String {
        if self.is_passed() {
            return "Content passed moderation".to_string();
        }

        let phrases: Vec<&str> = self.kinds().into_iter().map(IssueKind::phrase).collect();
        format!(
            "Your content contains {}. Please remove it before posting.",
            phrases.join(", ")
        )
    }
}

impl Extend<ModerationIssue> for ModerationResult {
    fn extend<T: IntoIterator<Item = ModerationIssue>>(&mut self, iter: T) {
        self.issues.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_passes() {
        let result = ModerationResult::passed();
        assert!(result.is_passed());
        assert_eq!(result.message(), "Content passed moderation");
    }

    #[test]
    fn message_dedupes_and_orders_kinds() {
        let result = ModerationResult::from_issues(vec![
            ModerationIssue::new(IssueKind::Website, "example.com", field::DESCRIPTION),
            ModerationIssue::new(IssueKind::Profanity, "crap", field::TITLE),
            ModerationIssue::new(IssueKind::Website, "@seller", field::TITLE),
        ]);
        assert!(!result.is_passed());
        assert_eq!(
            result.message(),
            "Your content contains inappropriate language, external links or contact information. Please remove it before posting."
        );
    }

    #[test]
    fn issue_serializes_snake_case_kind() {
        let issue = ModerationIssue::new(IssueKind::Nsfw, "adult", field::CATEGORY);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "nsfw");
        assert_eq!(json["field"], "category");
    }
}
