//! Moderation pipeline: runs detectors over the fields of a submission and
//! aggregates their issues into a single verdict.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ModerationConfig;
use crate::error::Result;
use crate::moderation::detectors::{
    CategoryDetector, Detector, ProfanityDetector, PromotionalDetector, WebsiteDetector,
};
use crate::moderation::image::ImageCheck;
use crate::moderation::rules::RuleSet;
use crate::moderation::screening::{self, SpamDetector};
use crate::moderation::types::{ModerationIssue, ModerationResult, field};

/// Content moderation engine.
///
/// Cheap to clone; clones share the same immutable `RuleSet`. Every call is
/// a pure function of its inputs, so one engine can serve many threads.
#[derive(Debug, Clone)]
pub struct ModerationEngine {
    rules: Arc<RuleSet>,
    config: ModerationConfig,
    image: ImageCheck,
}

impl ModerationEngine {
    /// Fails when the config is unusable, e.g. inverted image limits.
    pub fn new(rules: Arc<RuleSet>, config: ModerationConfig) -> Result<Self> {
        config.validate()?;
        let image = ImageCheck::new(config.image)?;
        Ok(Self {
            rules,
            config,
            image,
        })
    }

    /// Engine over the compiled-in rule lists.
    pub fn with_builtin_rules(config: ModerationConfig) -> Result<Self> {
        config.validate()?;
        let rules = RuleSet::builtin()?;
        Self::new(Arc::new(rules), config)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// Screen a rental listing before publication.
    pub fn moderate_listing(
        &self,
        title: &str,
        description: &str,
        category: Option<&str>,
    ) -> ModerationResult {
        let mut result = ModerationResult::passed();
        result.extend(self.check_content(title, field::TITLE));
        result.extend(self.check_content(description, field::DESCRIPTION));
        result.extend(CategoryDetector.detect(category));

        self.log_verdict("listing", &result);
        result
    }

    /// Screen an event (garage sale) before publication.
    ///
    /// The address only gets the profanity check, minus purely numeric
    /// terms: street numbers and zip codes would otherwise trip the contact
    /// patterns or a term like "420".
    pub fn moderate_event(
        &self,
        title: &str,
        description: &str,
        address: &str,
    ) -> ModerationResult {
        let mut result = ModerationResult::passed();
        result.extend(self.check_content(title, field::TITLE));
        result.extend(self.check_content(description, field::DESCRIPTION));
        result.extend(self.run(
            &ProfanityDetector::for_address(&self.rules),
            address,
            field::ADDRESS,
        ));

        self.log_verdict("event", &result);
        result
    }

    /// Dimension sanity check for an uploaded image.
    pub fn check_image(&self, width: u32, height: u32) -> ModerationResult {
        self.image.check(width, height)
    }

    /// Image count check for a submission.
    pub fn check_image_count(&self, count: usize) -> ModerationResult {
        self.image.check_count(count)
    }

    pub fn contains_profanity(&self, text: &str) -> bool {
        ProfanityDetector::new(&self.rules).detect(text, "").is_some()
    }

    pub fn contains_website(&self, text: &str) -> bool {
        WebsiteDetector::new(&self.rules).detect(text, "").is_some()
    }

    pub fn contains_promotional(&self, text: &str) -> bool {
        PromotionalDetector::new(&self.rules).detect(text, "").is_some()
    }

    /// Mask mild profanity instead of rejecting it.
    pub fn clean_text(&self, text: &str) -> String {
        screening::clean_text(&self.rules, text)
    }

    /// Profanity, website and promotional checks on one free-text field.
    fn check_content(&self, text: &str, field: &str) -> Vec<ModerationIssue> {
        let mut issues = Vec::new();
        issues.extend(self.run(&ProfanityDetector::new(&self.rules), text, field));
        issues.extend(self.run(&WebsiteDetector::new(&self.rules), text, field));
        issues.extend(self.run(&PromotionalDetector::new(&self.rules), text, field));

        if self.config.spam_heuristics {
            let spam = if field == field::TITLE {
                SpamDetector::title()
            } else {
                SpamDetector::body()
            };
            issues.extend(self.run(&spam, text, field));
        }

        issues
    }

    fn run(&self, detector: &dyn Detector, text: &str, field: &str) -> Vec<ModerationIssue> {
        if text.is_empty() {
            return Vec::new();
        }
        let issues = detector.scan(text, field, self.config.match_mode);
        if !issues.is_empty() {
            debug!(
                detector = detector.name(),
                field,
                count = issues.len(),
                "Detector reported issues"
            );
        }
        issues
    }

    fn log_verdict(&self, submission: &str, result: &ModerationResult) {
        if result.is_passed() {
            debug!(submission, "Submission passed moderation");
        } else {
            let kinds: Vec<String> = result.kinds().iter().map(ToString::to_string).collect();
            info!(
                submission,
                issues = result.issues().len(),
                kinds = %kinds.join(","),
                "Submission failed moderation"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchMode;
    use crate::moderation::types::IssueKind;

    fn engine() -> ModerationEngine {
        ModerationEngine::with_builtin_rules(ModerationConfig::default()).unwrap()
    }

    #[test]
    fn clean_listing_passes() {
        let result =
            engine().moderate_listing("Mountain bike", "Barely used, 21 speeds", Some("Sports"));
        assert!(result.is_passed());
    }

    #[test]
    fn issues_keep_field_provenance() {
        let result = engine().moderate_listing("Damn good drill", "Call 555-123-4567", None);
        let fields: Vec<(&str, IssueKind)> = result
            .issues()
            .iter()
            .map(|i| (i.field.as_str(), i.kind))
            .collect();
        assert_eq!(
            fields,
            vec![("title", IssueKind::Profanity), ("description", IssueKind::Website)]
        );
    }

    #[test]
    fn category_issue_appended_last() {
        let result = engine().moderate_listing("Dm me", "", Some("services"));
        let last = result.issues().last().unwrap();
        assert_eq!(last.field, "category");
        assert_eq!(last.kind, IssueKind::Nsfw);
    }

    #[test]
    fn address_only_checked_for_profanity() {
        let engine = engine();
        assert!(
            engine
                .moderate_event("Sale", "Come by", "Apt 12, 555-123-4567")
                .is_passed()
        );

        let result = engine.moderate_event("Sale", "Come by", "Hell Street 4");
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].field, "address");
    }

    #[test]
    fn numeric_terms_skipped_in_address_only() {
        let engine = engine();
        assert!(engine.moderate_event("Sale", "Come by", "420 Elm Street").is_passed());

        let result = engine.moderate_event("420 friendly sale", "Come by", "12 Elm Street");
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].field, "title");
        assert_eq!(result.issues()[0].matched_text, "420");
    }

    #[test]
    fn all_matches_mode_reports_more() {
        let config = ModerationConfig {
            match_mode: MatchMode::AllMatches,
            ..ModerationConfig::default()
        };
        let engine = ModerationEngine::with_builtin_rules(config).unwrap();
        let result = engine.moderate_listing("venmo or zelle", "", None);
        assert_eq!(result.issues().len(), 2);
    }

    #[test]
    fn spam_heuristics_opt_in() {
        assert!(engine().moderate_listing("HUGE BLOWOUT", "", None).is_passed());

        let config = ModerationConfig {
            spam_heuristics: true,
            ..ModerationConfig::default()
        };
        let engine = ModerationEngine::with_builtin_rules(config).unwrap();
        let result = engine.moderate_listing("HUGE BLOWOUT", "", None);
        assert_eq!(
            result.kinds().into_iter().collect::<Vec<_>>(),
            vec![IssueKind::Spam]
        );
    }

    #[test]
    fn quick_checks_project_detectors() {
        let engine = engine();
        assert!(engine.contains_profanity("oh crap"));
        assert!(!engine.contains_profanity("scrap"));
        assert!(engine.contains_website("visit www.example.org"));
        assert!(!engine.contains_website("Apt 4B"));
        assert!(engine.contains_promotional("Limited Time offer"));
        assert!(!engine.contains_promotional("Lamp"));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = ModerationConfig::default();
        config.image.max_images = 0;
        assert!(ModerationEngine::with_builtin_rules(config).is_err());
    }

    #[test]
    fn new_rejects_inverted_image_limits() {
        let mut config = ModerationConfig::default();
        config.image.min_dimension = 600;
        config.image.max_dimension = 500;
        let rules = Arc::new(RuleSet::builtin().unwrap());
        match ModerationEngine::new(rules, config) {
            Err(crate::error::Error::Config(_)) => {}
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn new_applies_custom_image_limits() {
        let mut config = ModerationConfig::default();
        config.image.min_dimension = 600;
        let engine = ModerationEngine::new(Arc::new(RuleSet::empty()), config).unwrap();
        assert!(!engine.check_image(550, 550).is_passed());
        assert!(engine.check_image(800, 600).is_passed());
    }
}
