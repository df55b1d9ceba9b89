//! StanceLens Classifiers
//!
//! Deterministic, lexicon-based classification of short texts:
//! - Sentiment (Tier A): overall positive / negative / normal polarity
//! - Stance (Tier B): supportive / opposing / neutral toward a named target
//!
//! Every request passes the robustness gate first, which rejects or
//! degrades unusable input instead of failing. Admitted text is scored,
//! fused and calibrated into a confidence in [0.1, 1.0].

pub mod analyzer;
pub mod calibration;
pub mod classifier;
pub mod config;
pub mod context;
pub mod fusion;
pub mod gate;
pub mod language;
pub mod locator;
pub mod polarity;
pub mod sentiment;
pub mod stance;

pub use analyzer::Analyzer;
pub use classifier::{Classifier, ClassifierTier};
pub use config::{
    AnalyzerConfig, CacheConfig, LanguageConfig, LexiconConfig, LimitsConfig, PenaltyConfig,
    SentimentConfig, StanceConfig,
};
pub use context::{ContextScorer, MentionSignal};
pub use fusion::{FusedResult, SignalFusion};
pub use gate::{Admission, GateDecision, RobustnessGate};
pub use language::LanguageGate;
pub use locator::TargetLocator;
pub use polarity::{LexiconPolarity, PolarityScorer};
pub use sentiment::SentimentClassifier;
pub use stance::{StanceClassifier, TargetedStanceClassifier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::classifier::{Classifier, ClassifierTier};
    pub use crate::config::AnalyzerConfig;
    pub use crate::polarity::{LexiconPolarity, PolarityScorer};
    pub use crate::sentiment::SentimentClassifier;
    pub use crate::stance::StanceClassifier;
    pub use stancelens_core::prelude::*;
}
