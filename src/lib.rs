//! Listing moderation - rule-based screening of marketplace submissions.

pub mod config;
pub mod error;
pub mod moderation;
