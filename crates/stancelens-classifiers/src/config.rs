//! Configuration for the classifiers
//!
//! Every tuning constant of the scoring pipeline lives here so it can be
//! overridden from YAML. Defaults reproduce the calibrated behaviour.

use serde::{Deserialize, Serialize};
use stancelens_core::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

/// Configuration for the whole analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Input size limits used by the robustness gate
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Confidence penalties for degraded input
    #[serde(default)]
    pub penalties: PenaltyConfig,

    /// Stance scoring parameters
    #[serde(default)]
    pub stance: StanceConfig,

    /// Sentiment labelling parameters
    #[serde(default)]
    pub sentiment: SentimentConfig,

    /// Word lists for keyword scoring
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Language gate
    #[serde(default)]
    pub language: LanguageConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Input size limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Minimum trimmed length in chars
    pub min_length: usize,

    /// Maximum trimmed length in chars before truncation
    pub max_length: usize,

    /// Word count below which analysis is flagged as unreliable
    pub min_words: usize,

    /// Symbol ratio above which the text is cleaned before analysis
    pub max_symbol_ratio: f64,

    /// Words the cleaned text needs to be analyzed at all
    pub min_extracted_words: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 5000,
            min_words: 3,
            max_symbol_ratio: 0.7,
            min_extracted_words: 2,
        }
    }
}

/// Confidence penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyConfig {
    pub truncated: f64,
    pub symbol_heavy: f64,
    pub few_words: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            truncated: 0.2,
            symbol_heavy: 0.3,
            few_words: 0.2,
        }
    }
}

/// Stance scoring parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceConfig {
    /// Radius in chars of the polarity window around a mention.
    /// The keyword window uses twice this radius.
    pub context_window: usize,

    /// Radius in words of the keyword scan
    pub keyword_window: usize,

    /// |combined score| at or below which the stance is neutral
    pub neutral_threshold: f64,

    pub sentiment_weight: f64,
    pub keyword_weight: f64,

    /// Both signals must exceed this magnitude for the agreement boost
    pub agreement_threshold: f64,
    pub agreement_boost: f64,

    pub intensifier_multiplier: f64,
    pub diminisher_multiplier: f64,

    /// Words inspected on each side of an indicator for modifiers
    pub modifier_span: usize,

    /// Words inspected before an indicator for negations
    pub negation_lookback: usize,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            context_window: 50,
            keyword_window: 10,
            neutral_threshold: 0.12,
            sentiment_weight: 0.4,
            keyword_weight: 0.6,
            agreement_threshold: 0.3,
            agreement_boost: 1.2,
            intensifier_multiplier: 1.5,
            diminisher_multiplier: 0.7,
            modifier_span: 2,
            negation_lookback: 3,
        }
    }
}

/// Sentiment labelling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// |compound| below which the sentiment is normal
    pub neutral_threshold: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            neutral_threshold: 0.05,
        }
    }
}

/// Word lists used by keyword scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub positive: BTreeSet<String>,
    pub negative: BTreeSet<String>,
    pub intensifiers: BTreeSet<String>,
    pub diminishers: BTreeSet<String>,
    pub negations: BTreeSet<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            positive: words(&[
                "love", "like", "great", "excellent", "amazing", "wonderful", "fantastic",
                "good", "best", "awesome", "perfect", "brilliant", "outstanding", "superb",
                "support", "endorse", "recommend", "praise", "admire", "appreciate", "trust",
                "respect", "favor", "champion", "defend", "celebrate", "embrace",
            ]),
            negative: words(&[
                "hate", "dislike", "terrible", "awful", "horrible", "bad", "worst",
                "disgusting", "pathetic", "useless", "garbage", "trash", "sucks", "oppose",
                "against", "criticize", "condemn", "reject", "disapprove", "distrust",
                "despise", "attack", "blame", "fault", "boycott", "avoid", "overpriced",
                "worthless", "disappointing", "frustrated",
            ]),
            intensifiers: words(&[
                "very", "extremely", "really", "totally", "completely", "absolutely",
            ]),
            diminishers: words(&[
                "somewhat", "slightly", "kind of", "sort of", "a bit", "rather",
            ]),
            negations: words(&[
                "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none",
                "don't", "doesn't", "didn't", "won't", "wouldn't", "can't", "couldn't",
                "shouldn't",
            ]),
        }
    }
}

fn words(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Language gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Reject text that does not look like English
    pub require_english: bool,

    /// Share of common English words needed to pass
    pub min_common_ratio: f64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            require_english: false,
            min_common_ratio: 0.3,
        }
    }
}

/// Result cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live handed to the cache on store
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl AnalyzerConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse analyzer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if limits.max_length <= limits.min_length {
            return Err(Error::config(format!(
                "limits.max_length ({}) must exceed limits.min_length ({})",
                limits.max_length, limits.min_length
            )));
        }
        if !(0.0..=1.0).contains(&limits.max_symbol_ratio) {
            return Err(Error::config("limits.max_symbol_ratio must be within [0, 1]"));
        }

        for (name, value) in [
            ("penalties.truncated", self.penalties.truncated),
            ("penalties.symbol_heavy", self.penalties.symbol_heavy),
            ("penalties.few_words", self.penalties.few_words),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} must be within [0, 1]")));
            }
        }

        let stance = &self.stance;
        if stance.context_window == 0 || stance.keyword_window == 0 {
            return Err(Error::config(
                "stance.context_window and stance.keyword_window must be positive",
            ));
        }
        if stance.sentiment_weight < 0.0 || stance.keyword_weight < 0.0 {
            return Err(Error::config("stance weights must not be negative"));
        }
        if stance.neutral_threshold < 0.0 || self.sentiment.neutral_threshold < 0.0 {
            return Err(Error::config("neutral thresholds must not be negative"));
        }

        if !(0.0..=1.0).contains(&self.language.min_common_ratio) {
            return Err(Error::config("language.min_common_ratio must be within [0, 1]"));
        }

        Ok(())
    }
}
