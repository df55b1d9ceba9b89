//! StanceLens Core
//!
//! Core types, traits, and utilities shared across StanceLens components.
//!
//! This crate provides:
//! - The result model for sentiment and stance classification
//! - Error types and result handling
//! - Char-based text measurements used by every scoring stage
//! - The result cache seam and its deterministic key derivation

pub mod cache;
pub mod error;
pub mod text;
pub mod types;

pub use cache::{CacheKey, NoopCache, ResultCache};
pub use error::{Error, Result};
pub use types::{
    clamp_confidence, ClassificationResult, MentionPosition, ScoreVector, SentimentLabel,
    SentimentResult, StanceLabel, StanceResult, TargetQuery, TextSample, MAX_CONFIDENCE,
    MIN_CONFIDENCE,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::{CacheKey, ResultCache};
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ClassificationResult, ScoreVector, SentimentLabel, SentimentResult, StanceLabel,
        StanceResult,
    };
}
