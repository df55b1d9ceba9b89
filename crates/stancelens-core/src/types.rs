//! Core types for StanceLens

use crate::text;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest confidence any result can carry
pub const MIN_CONFIDENCE: f64 = 0.1;

/// Highest confidence any result can carry
pub const MAX_CONFIDENCE: f64 = 1.0;

/// Clamp a raw confidence into `[MIN_CONFIDENCE, MAX_CONFIDENCE]`
pub fn clamp_confidence(value: f64) -> f64 {
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Output of the polarity scoring primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    /// Overall polarity in [-1, 1]
    pub compound: f64,

    /// Share of positive signal in [0, 1]
    pub positive: f64,

    /// Share of neutral signal in [0, 1]
    pub neutral: f64,

    /// Share of negative signal in [0, 1]
    pub negative: f64,
}

impl ScoreVector {
    /// Create a new score vector
    pub fn new(compound: f64, positive: f64, neutral: f64, negative: f64) -> Self {
        Self {
            compound,
            positive,
            neutral,
            negative,
        }
    }

    /// Fully neutral scores, used by fallback results
    pub fn neutral() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Largest of the positive, neutral and negative shares
    pub fn dominant_share(&self) -> f64 {
        self.positive.max(self.neutral).max(self.negative)
    }

    /// Whether the shares sum to 1 (within 0.01) and compound is in range
    pub fn is_normalized(&self) -> bool {
        let sum = self.positive + self.neutral + self.negative;
        (sum - 1.0).abs() <= 0.01 && (-1.0..=1.0).contains(&self.compound)
    }
}

impl Default for ScoreVector {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Overall sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Normal,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stance toward a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanceLabel {
    Supportive,
    Opposing,
    Neutral,
}

impl StanceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supportive => "supportive",
            Self::Opposing => "opposing",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for StanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of sentiment classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Sentiment label
    pub label: SentimentLabel,

    /// Calibrated confidence in [0.1, 1.0]
    pub confidence: f64,

    /// Raw polarity scores of the analyzed text
    pub scores: ScoreVector,

    /// Whether the robustness gate degraded or short-circuited the analysis
    pub fallback_used: bool,

    /// Human-readable explanation of the degradation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl SentimentResult {
    /// Result for input that could not be analyzed at all
    pub fn fallback(warning: impl Into<String>) -> Self {
        Self {
            label: SentimentLabel::Normal,
            confidence: MIN_CONFIDENCE,
            scores: ScoreVector::neutral(),
            fallback_used: true,
            warning: Some(warning.into()),
        }
    }
}

/// Result of stance classification toward one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StanceResult {
    /// Stance label
    pub label: StanceLabel,

    /// Calibrated confidence in [0.1, 1.0]
    pub confidence: f64,

    /// Target exactly as supplied by the caller
    pub target: String,

    /// Number of located target mentions
    pub mention_count: usize,

    /// Mean polarity compound of the mention context windows
    pub context_sentiment: f64,

    /// Mean keyword score of the mentions
    pub keyword_score: f64,

    /// Fused stance score in [-1, 1]
    pub combined_score: f64,

    /// Uniformity of the stance signal across mentions in [0, 1]
    pub consistency: f64,

    /// Whether the robustness gate degraded or short-circuited the analysis
    pub fallback_used: bool,

    /// Human-readable explanation of the degradation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl StanceResult {
    /// Result for input that could not be analyzed at all
    pub fn fallback(target: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            label: StanceLabel::Neutral,
            confidence: MIN_CONFIDENCE,
            target: target.into(),
            mention_count: 0,
            context_sentiment: 0.0,
            keyword_score: 0.0,
            combined_score: 0.0,
            consistency: 1.0,
            fallback_used: true,
            warning: Some(warning.into()),
        }
    }
}

/// Result of any classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClassificationResult {
    Sentiment(SentimentResult),
    Stance(StanceResult),
}

impl ClassificationResult {
    /// Label as a string
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sentiment(r) => r.label.as_str(),
            Self::Stance(r) => r.label.as_str(),
        }
    }

    /// Calibrated confidence
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Sentiment(r) => r.confidence,
            Self::Stance(r) => r.confidence,
        }
    }

    pub fn fallback_used(&self) -> bool {
        match self {
            Self::Sentiment(r) => r.fallback_used,
            Self::Stance(r) => r.fallback_used,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Sentiment(r) => r.warning.as_deref(),
            Self::Stance(r) => r.warning.as_deref(),
        }
    }

    pub fn into_sentiment(self) -> Option<SentimentResult> {
        match self {
            Self::Sentiment(r) => Some(r),
            Self::Stance(_) => None,
        }
    }

    pub fn into_stance(self) -> Option<StanceResult> {
        match self {
            Self::Stance(r) => Some(r),
            Self::Sentiment(_) => None,
        }
    }
}

impl From<SentimentResult> for ClassificationResult {
    fn from(result: SentimentResult) -> Self {
        Self::Sentiment(result)
    }
}

impl From<StanceResult> for ClassificationResult {
    fn from(result: StanceResult) -> Self {
        Self::Stance(result)
    }
}

/// Measurements of a raw input string
#[derive(Debug, Clone, Copy)]
pub struct TextSample<'a> {
    /// The raw text
    pub text: &'a str,

    /// Length in chars
    pub char_length: usize,

    /// Length in chars after trimming surrounding whitespace
    pub trimmed_length: usize,

    /// Whitespace-separated word count
    pub word_count: usize,

    /// Share of non-alphanumeric, non-whitespace chars
    pub symbol_ratio: f64,
}

impl<'a> TextSample<'a> {
    /// Measure a raw input string
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            char_length: text::char_len(text),
            trimmed_length: text::char_len(text.trim()),
            word_count: text::word_count(text),
            symbol_ratio: text::symbol_ratio(text),
        }
    }

    /// Whether the text is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.trimmed_length == 0
    }
}

/// A target phrase prepared for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetQuery {
    /// Whitespace-normalized phrase in its original case
    pub phrase: String,

    /// Case-folded phrase
    pub folded: String,

    /// Distinct case-folded words longer than two chars, only for multi-word phrases
    pub sub_words: Vec<String>,
}

impl TargetQuery {
    /// Prepare a target phrase
    pub fn new(target: &str) -> Self {
        let phrase = text::normalize_whitespace(target);
        let folded = text::fold_case(&phrase);

        let mut sub_words: Vec<String> = Vec::new();
        if text::word_count(&folded) > 1 {
            for word in folded.split_whitespace() {
                if text::char_len(word) > 2 && !sub_words.iter().any(|w| w == word) {
                    sub_words.push(word.to_string());
                }
            }
        }

        Self {
            phrase,
            folded,
            sub_words,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    pub fn word_count(&self) -> usize {
        text::word_count(&self.phrase)
    }

    /// Length of the folded phrase in chars
    pub fn char_len(&self) -> usize {
        text::char_len(&self.folded)
    }
}

/// Char offset where an accepted target occurrence begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MentionPosition(pub usize);

impl MentionPosition {
    pub fn offset(&self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_sample_measurements() {
        let sample = TextSample::new("  Hello, world!  ");
        assert_eq!(sample.char_length, 17);
        assert_eq!(sample.trimmed_length, 13);
        assert_eq!(sample.word_count, 2);
        assert!(!sample.is_blank());
        assert!(TextSample::new(" \t\n").is_blank());
    }

    #[test]
    fn test_target_query_sub_words() {
        let query = TargetQuery::new("  Microsoft   Corporation ");
        assert_eq!(query.phrase, "Microsoft Corporation");
        assert_eq!(query.folded, "microsoft corporation");
        assert_eq!(query.sub_words, vec!["microsoft", "corporation"]);
        assert_eq!(query.word_count(), 2);

        let short_words = TargetQuery::new("AI of US");
        assert!(short_words.sub_words.is_empty());

        let single = TargetQuery::new("Apple");
        assert!(single.sub_words.is_empty());
    }

    #[test]
    fn test_fallback_results() {
        let sentiment = SentimentResult::fallback("empty or whitespace-only input");
        assert_eq!(sentiment.label, SentimentLabel::Normal);
        assert_eq!(sentiment.confidence, MIN_CONFIDENCE);
        assert!(sentiment.fallback_used);
        assert!(sentiment.scores.is_normalized());

        let stance = StanceResult::fallback("Apple", "empty target");
        assert_eq!(stance.label, StanceLabel::Neutral);
        assert_eq!(stance.mention_count, 0);
        assert_eq!(stance.consistency, 1.0);
    }

    #[test]
    fn test_classification_result_serde() {
        let result: ClassificationResult = StanceResult::fallback("Apple", "target not found in text").into();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"kind\":\"stance\""));
        assert!(json.contains("\"label\":\"neutral\""));

        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.label(), "neutral");
        assert!(back.into_sentiment().is_none());
    }
}
