//! Error types for the moderation engine.
//!
//! A moderation violation is never an error: it is reported as issues on a
//! `ModerationResult`. Errors only come from building rules or config.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while compiling a rule set.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Empty {list} entry at position {index}")]
    EmptyTerm { list: &'static str, index: usize },

    #[error("Pattern {name} failed to compile")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Duplicate contact pattern name: {name}")]
    DuplicatePattern { name: String },
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
