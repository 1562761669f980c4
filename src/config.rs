//! Configuration types.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How many issues a detector reports for a single field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Stop at the first rule that matches (one issue per detector per field).
    #[default]
    FirstMatch,
    /// Report every rule that matches.
    AllMatches,
}

impl MatchMode {
    /// Parse the `MODERATION_MATCH_MODE` value: `first` or `all`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "first" | "first_match" => Ok(Self::FirstMatch),
            "all" | "all_matches" => Ok(Self::AllMatches),
            other => Err(ConfigError::InvalidValue {
                key: "MODERATION_MATCH_MODE".into(),
                message: format!("expected `first` or `all`, got `{other}`"),
            }),
        }
    }
}

/// Bounds for the image sanity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLimits {
    /// Smallest accepted width or height, in pixels.
    pub min_dimension: u32,
    /// Largest accepted width or height, in pixels.
    pub max_dimension: u32,
    /// Maximum number of images on one submission.
    pub max_images: usize,
}

impl ImageLimits {
    /// Reject inverted dimension bounds and a zero image allowance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dimension > self.max_dimension {
            return Err(ConfigError::InvalidValue {
                key: "MODERATION_IMAGE_MIN".into(),
                message: format!(
                    "minimum dimension {} exceeds maximum {}",
                    self.min_dimension, self.max_dimension
                ),
            });
        }
        if self.max_images == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MODERATION_MAX_IMAGES".into(),
                message: "must allow at least one image".into(),
            });
        }
        Ok(())
    }
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            min_dimension: 100,
            max_dimension: 5000,
            max_images: 10,
        }
    }
}

/// Moderation engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// First-match (default) or collect-all reporting.
    pub match_mode: MatchMode,
    /// Image dimension and count limits.
    pub image: ImageLimits,
    /// Flag all-caps titles and symbol-heavy text as spam.
    pub spam_heuristics: bool,
}

impl ModerationConfig {
    /// Build config from environment variables.
    ///
    /// Unparseable numbers fall back to the defaults. An unknown match mode
    /// or inconsistent image limits are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ImageLimits::default();
        let var = |key: &str| std::env::var(key).ok();

        let match_mode = match var("MODERATION_MATCH_MODE") {
            Some(value) => MatchMode::parse(&value)?,
            None => MatchMode::default(),
        };

        let config = Self {
            match_mode,
            image: ImageLimits {
                min_dimension: parse_or(var("MODERATION_IMAGE_MIN"), defaults.min_dimension),
                max_dimension: parse_or(var("MODERATION_IMAGE_MAX"), defaults.max_dimension),
                max_images: parse_or(var("MODERATION_MAX_IMAGES"), defaults.max_images),
            },
            spam_heuristics: var("MODERATION_SPAM_HEURISTICS")
                .is_some_and(|value| parse_flag(&value)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the limits are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.image.validate()
    }
}

/// Parse a numeric env value, falling back to `default` when unset or invalid.
fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Truthy env flag: `1`, `true`, `yes` or `on`, case-insensitive.
fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
