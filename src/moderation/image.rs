//! Image sanity checks.
//!
//! Only dimensions and counts are inspected; pixel data is never read.

use tracing::debug;

use crate::config::ImageLimits;
use crate::error::ConfigError;
use crate::moderation::types::{IssueKind, ModerationIssue, ModerationResult, field};

/// Dimension and count filter for uploaded images.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCheck {
    limits: ImageLimits,
}

impl ImageCheck {
    /// Fails when the limits are inverted or allow no images.
    pub fn new(limits: ImageLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    /// Reject images that are too small to be a photo or implausibly large.
    pub fn check(&self, width: u32, height: u32) -> ModerationResult {
        let reason = if width < self.limits.min_dimension || height < self.limits.min_dimension {
            "Image too small"
        } else if width > self.limits.max_dimension || height > self.limits.max_dimension {
            "Image too large"
        } else {
            return ModerationResult::passed();
        };

        debug!(width, height, reason, "Image failed dimension check");
        fail(reason)
    }

    /// Require at least one image and no more than the configured maximum.
    pub fn check_count(&self, count: usize) -> ModerationResult {
        if count == 0 {
            return fail("At least one image is required");
        }
        if count > self.limits.max_images {
            return fail(&format!("Maximum {} images allowed", self.limits.max_images));
        }
        ModerationResult::passed()
    }
}

fn fail(reason: &str) -> ModerationResult {
    ModerationResult::from_issues(vec![ModerationIssue::new(
        IssueKind::Image,
        reason,
        field::IMAGE,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_small_and_large() {
        let check = ImageCheck::default();

        let small = check.check(50, 50);
        assert!(!small.is_passed());
        assert_eq!(small.issues()[0].matched_text, "Image too small");

        let large = check.check(6000, 6000);
        assert_eq!(large.issues().len(), 1);
        assert_eq!(large.issues()[0].matched_text, "Image too large");

        assert!(check.check(800, 600).is_passed());
    }

    #[test]
    fn one_bad_dimension_is_enough() {
        let check = ImageCheck::default();
        assert!(!check.check(800, 99).is_passed());
        assert!(!check.check(5001, 600).is_passed());
        assert!(check.check(100, 5000).is_passed());
    }

    #[test]
    fn count_bounds() {
        let check = ImageCheck::default();
        assert_eq!(
            check.check_count(0).issues()[0].matched_text,
            "At least one image is required"
        );
        assert_eq!(
            check.check_count(11).issues()[0].matched_text,
            "Maximum 10 images allowed"
        );
        assert!(check.check_count(10).is_passed());
    }

    #[test]
    fn new_rejects_unusable_limits() {
        let inverted = ImageLimits {
            min_dimension: 600,
            max_dimension: 500,
            max_images: 10,
        };
        assert!(matches!(
            ImageCheck::new(inverted),
            Err(ConfigError::InvalidValue { .. })
        ));

        let custom = ImageCheck::new(ImageLimits {
            min_dimension: 200,
            max_dimension: 1000,
            max_images: 3,
        })
        .unwrap();
        assert!(!custom.check(150, 400).is_passed());
        assert!(custom.check(550, 550).is_passed());
        assert_eq!(
            custom.check_count(4).issues()[0].matched_text,
            "Maximum 3 images allowed"
        );
    }
}
