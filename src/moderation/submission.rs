//! Wire types for submissions arriving over the `moderate` CLI.

use serde::{Deserialize, Serialize};

use crate::moderation::engine::ModerationEngine;
use crate::moderation::types::{ModerationIssue, ModerationResult};

/// A submission to screen, tagged by `"type"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Submission {
    Listing {
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    },
    Event {
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        address: String,
    },
    Image {
        width: u32,
        height: u32,
    },
    ImageCount {
        count: usize,
    },
}

impl Submission {
    pub fn moderate(&self, engine: &ModerationEngine) -> ModerationResult {
        match self {
            Submission::Listing {
                title,
                description,
                category,
            } => engine.moderate_listing(title, description, category.as_deref()),
            Submission::Event {
                title,
                description,
                address,
            } => engine.moderate_event(title, description, address),
            Submission::Image { width, height } => engine.check_image(*width, *height),
            Submission::ImageCount { count } => engine.check_image_count(*count),
        }
    }
}

/// Serializable verdict with the synthesized message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationReport {
    pub passed: bool,
    pub message: String,
    pub issues: Vec<ModerationIssue>,
}

impl From<ModerationResult> for ModerationReport {
    fn from(result: ModerationResult) -> Self {
        Self {
            passed: result.is_passed(),
            message: result.message(),
            issues: result.into_issues(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModerationConfig;

    #[test]
    fn parses_tagged_listing() {
        let submission: Submission = serde_json::from_str(
            r#"{"type":"listing","title":"Lamp","description":"Nice lamp","category":"adult"}"#,
        )
        .unwrap();
        let engine = ModerationEngine::with_builtin_rules(ModerationConfig::default()).unwrap();
        let report = ModerationReport::from(submission.moderate(&engine));
        assert!(!report.passed);
        assert_eq!(report.issues[0].field, "category");
        assert!(report.message.contains("adult content"));
    }

    #[test]
    fn event_address_defaults_to_empty() {
        let submission: Submission =
            serde_json::from_str(r#"{"type":"event","title":"Garage sale"}"#).unwrap();
        assert!(matches!(submission, Submission::Event { ref address, .. } if address.is_empty()));
    }

    #[test]
    fn report_serializes_passed_flag() {
        let report = ModerationReport::from(ModerationResult::passed());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["passed"], true);
        assert_eq!(json["message"], "Content passed moderation");
    }
}
