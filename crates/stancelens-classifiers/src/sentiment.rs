//! Sentiment classifier (Tier A)
//!
//! One polarity pass over the admitted text, labelled by its compound
//! score and calibrated from the score distribution and text shape.

use crate::calibration::sentiment_confidence;
use crate::classifier::{Classifier, ClassifierTier};
use crate::config::AnalyzerConfig;
use crate::gate::{GateDecision, RobustnessGate};
use crate::polarity::{LexiconPolarity, PolarityScorer};
use stancelens_core::{text, ClassificationResult, Result, SentimentLabel, SentimentResult};
use std::sync::Arc;

/// Longest run of one repeated char kept before scoring
const MAX_REPEAT_RUN: usize = 3;

pub struct SentimentClassifier {
    name: String,
    gate: RobustnessGate,
    polarity: Arc<dyn PolarityScorer>,
    neutral_threshold: f64,
}

impl SentimentClassifier {
    /// Create a classifier with the default configuration and lexicon
    pub fn new() -> Result<Self> {
        Self::with_config(&AnalyzerConfig::default(), Arc::new(LexiconPolarity::new()))
    }

    pub fn with_config(config: &AnalyzerConfig, polarity: Arc<dyn PolarityScorer>) -> Result<Self> {
        Ok(Self {
            name: "sentiment".to_string(),
            gate: RobustnessGate::new(config)?,
            polarity,
            neutral_threshold: config.sentiment.neutral_threshold,
        })
    }

    /// Classify the overall sentiment of `input`.
    ///
    /// Bad input yields a fallback result; only polarity faults are errors.
    pub fn analyze(&self, input: &str) -> Result<SentimentResult> {
        let admission = match self.gate.inspect(input) {
            GateDecision::Reject { warning } => return Ok(SentimentResult::fallback(warning)),
            GateDecision::Admit(admission) => admission,
        };

        let processed = preprocess(&admission.text);
        let scores = self.polarity.score(&processed)?;
        let confidence = sentiment_confidence(&scores, &admission.text, &processed);

        Ok(SentimentResult {
            label: self.label(scores.compound),
            confidence: admission.apply_penalty(confidence),
            scores,
            fallback_used: admission.is_degraded(),
            warning: admission.warning,
        })
    }

    pub fn label(&self, compound: f64) -> SentimentLabel {
        if compound >= self.neutral_threshold {
            SentimentLabel::Positive
        } else if compound <= -self.neutral_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Normal
        }
    }
}

fn preprocess(input: &str) -> String {
    text::squeeze_repeats(&text::normalize_whitespace(input), MAX_REPEAT_RUN)
}

#[async_trait::async_trait]
impl Classifier for SentimentClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(self.analyze(text)?.into())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> ClassifierTier {
        ClassifierTier::A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SentimentClassifier {
        SentimentClassifier::new().unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyzerConfig::default();
        config.limits.max_length = config.limits.min_length;
        let err = SentimentClassifier::with_config(&config, Arc::new(LexiconPolarity::new()));
        assert!(matches!(err, Err(stancelens_core::Error::Config(_))));
    }

    #[test]
    fn test_positive() {
        let result = classifier()
            .analyze("I love this product! It's amazing and wonderful.")
            .unwrap();
        assert_eq!(result.label, SentimentLabel::Positive);
        assert!(result.confidence > 0.5);
        assert!(!result.fallback_used);
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_negative() {
        let result = classifier().analyze("This is terrible, I hate it.").unwrap();
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_normal() {
        let result = classifier()
            .analyze("The meeting is scheduled for Tuesday at noon.")
            .unwrap();
        assert_eq!(result.label, SentimentLabel::Normal);
        // neutral share dominates
        assert!((result.confidence - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let result = classifier().analyze("").unwrap();
        assert_eq!(result.label, SentimentLabel::Normal);
        assert_eq!(result.confidence, 0.1);
        assert!(result.fallback_used);
    }

    #[test]
    fn test_symbol_only_input() {
        let result = classifier().analyze("!@#$%^&*()").unwrap();
        assert_eq!(result.label, SentimentLabel::Normal);
        assert_eq!(result.confidence, 0.1);
        assert!(result.fallback_used);
        assert!(result.warning.unwrap().contains("too many symbols"));
    }

    #[test]
    fn test_truncated_input() {
        let result = classifier().analyze(&"A".repeat(6000)).unwrap();
        assert!(result.fallback_used);
        assert!(result.warning.unwrap().contains("truncated"));
        assert!(result.confidence >= 0.1);
    }

    #[test]
    fn test_few_words_penalized() {
        let plain = classifier().analyze("I love it so much").unwrap();
        let short = classifier().analyze("love it").unwrap();
        assert_eq!(short.label, SentimentLabel::Positive);
        assert!(short.fallback_used);
        assert!(short.confidence < plain.confidence);
    }

    #[test]
    fn test_repeated_chars_squeezed() {
        let result = classifier().analyze("This is goooooood and greatttttt").unwrap();
        assert!(result.scores.is_normalized());
    }

    #[test]
    fn test_label_thresholds() {
        let classifier = classifier();
        assert_eq!(classifier.label(0.05), SentimentLabel::Positive);
        assert_eq!(classifier.label(0.049), SentimentLabel::Normal);
        assert_eq!(classifier.label(-0.05), SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_classifier_trait() {
        let classifier = classifier();
        let result = classifier.classify("What a great day!").await.unwrap();
        assert_eq!(result.label(), "positive");
        assert_eq!(classifier.tier(), ClassifierTier::A);
        assert_eq!(classifier.name(), "sentiment");
    }
}
