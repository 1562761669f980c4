//! Content moderation pipeline.
//!
//! Every submission flows through:
//! 1. `RuleSet` - compiled-once banned terms, contact patterns, phrases
//! 2. Detectors - profanity, website/contact, promotional, category
//! 3. `ModerationEngine` - per-field orchestration and aggregation
//! 4. `ModerationResult` - pass/fail verdict plus a user-facing message
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod detectors;
pub mod engine;
pub mod image;
pub mod rules;
pub mod screening;
pub mod submission;
pub mod types;

pub use engine::ModerationEngine;
pub use rules::RuleSet;
pub use types::{IssueKind, ModerationIssue, ModerationResult};
