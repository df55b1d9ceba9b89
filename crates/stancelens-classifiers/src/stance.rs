//! Stance classifier (Tier B)
//!
//! Locates the target in the text, scores a narrow polarity window and a
//! wider keyword window around every mention, fuses both signals and
//! calibrates the result against mention count, consistency and text shape.

use crate::calibration::stance_confidence;
use crate::classifier::{Classifier, ClassifierTier};
use crate::config::AnalyzerConfig;
use crate::context::{ContextScorer, MentionText};
use crate::fusion::SignalFusion;
use crate::gate::{GateDecision, RobustnessGate};
use crate::locator::TargetLocator;
use crate::polarity::{LexiconPolarity, PolarityScorer};
use stancelens_core::{text, ClassificationResult, Result, StanceResult, TargetQuery};
use std::sync::Arc;
use tracing::debug;

const TARGET_NOT_FOUND: &str = "target not found in text";

pub struct StanceClassifier {
    gate: RobustnessGate,
    scorer: ContextScorer,
    fusion: SignalFusion,
}

impl StanceClassifier {
    /// Create a classifier with the default configuration and lexicon
    pub fn new() -> Result<Self> {
        Self::with_config(&AnalyzerConfig::default(), Arc::new(LexiconPolarity::new()))
    }

    pub fn with_config(config: &AnalyzerConfig, polarity: Arc<dyn PolarityScorer>) -> Result<Self> {
        Ok(Self {
            gate: RobustnessGate::new(config)?,
            scorer: ContextScorer::new(config, polarity),
            fusion: SignalFusion::new(&config.stance),
        })
    }

    /// Classify the stance of `input` toward `target`.
    ///
    /// Bad input and absent targets yield fallback results; only polarity
    /// faults are errors.
    pub fn analyze(&self, input: &str, target: &str) -> Result<StanceResult> {
        let admission = match self.gate.inspect_with_target(input, target) {
            GateDecision::Reject { warning } => return Ok(StanceResult::fallback(target, warning)),
            GateDecision::Admit(admission) => admission,
        };

        let normalized = text::normalize_whitespace(&admission.text);
        let folded = text::fold_case(&normalized);
        let query = TargetQuery::new(target);

        let positions = TargetLocator::new(&query)?.locate(&folded);
        if positions.is_empty() {
            let warning = match &admission.warning {
                Some(gate_warning) => format!("{gate_warning}; {TARGET_NOT_FOUND}"),
                None => TARGET_NOT_FOUND.to_string(),
            };
            return Ok(StanceResult::fallback(target, warning));
        }

        let mention_text = MentionText::new(&normalized, &folded);
        let signals = positions
            .iter()
            .map(|&position| self.scorer.score(&mention_text, position))
            .collect::<Result<Vec<_>>>()?;

        let fused = self.fusion.fuse(&signals);
        let confidence = stance_confidence(&fused, &normalized, query.word_count());
        debug!(
            target = %query.phrase,
            mentions = fused.mention_count,
            combined = fused.combined_score,
            consistency = fused.consistency,
            "stance fused"
        );

        Ok(StanceResult {
            label: self.fusion.label(fused.combined_score),
            confidence: admission.apply_penalty(confidence),
            target: target.to_string(),
            mention_count: fused.mention_count,
            context_sentiment: fused.context_sentiment,
            keyword_score: fused.keyword_score,
            combined_score: fused.combined_score,
            consistency: fused.consistency,
            fallback_used: admission.is_degraded(),
            warning: admission.warning,
        })
    }

    /// Bind this classifier to one target so it can serve as a [`Classifier`]
    pub fn bind(self: Arc<Self>, target: impl Into<String>) -> TargetedStanceClassifier {
        let target = target.into();
        TargetedStanceClassifier {
            name: format!("stance:{}", target),
            target,
            inner: self,
        }
    }
}

/// A stance classifier fixed to one target
pub struct TargetedStanceClassifier {
    name: String,
    target: String,
    inner: Arc<StanceClassifier>,
}

impl TargetedStanceClassifier {
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[async_trait::async_trait]
impl Classifier for TargetedStanceClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        Ok(self.inner.analyze(text, &self.target)?.into())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tier(&self) -> ClassifierTier {
        ClassifierTier::B
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stancelens_core::StanceLabel;

    fn classifier() -> StanceClassifier {
        StanceClassifier::new().unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AnalyzerConfig::default();
        config.stance.keyword_window = 0;
        let err = StanceClassifier::with_config(&config, Arc::new(LexiconPolarity::new()));
        assert!(matches!(err, Err(stancelens_core::Error::Config(_))));
    }

    #[test]
    fn test_truncated_input_is_penalized() {
        let input = "Apple is great. ".repeat(400);
        let head = text::truncate_chars(&input, 5000);

        let truncated = classifier().analyze(&input, "Apple").unwrap();
        let reference = classifier().analyze(head, "Apple").unwrap();

        assert!(!reference.fallback_used);
        assert!(truncated.fallback_used);
        assert_eq!(
            truncated.warning.as_deref(),
            Some("text truncated from 6399 to 5000 characters")
        );
        assert_eq!(truncated.label, reference.label);
        assert_eq!(truncated.mention_count, reference.mention_count);
        assert!((truncated.confidence - (reference.confidence - 0.2).max(0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_input_without_target() {
        let input = "The weather is nice today. ".repeat(200);
        let result = classifier().analyze(&input, "Apple").unwrap();

        assert_eq!(result.mention_count, 0);
        assert_eq!(result.confidence, 0.1);
        assert!(result.fallback_used);
        assert_eq!(
            result.warning.as_deref(),
            Some("text truncated from 5399 to 5000 characters; target not found in text")
        );
    }

    #[test]
    fn test_symbol_heavy_input_scores_extracted_text() {
        let noise = |c: char| c.to_string().repeat(15);
        let input = format!(
            "{} Apple {} is {} great {}",
            noise('@'),
            noise('#'),
            noise('~'),
            noise('$')
        );

        let degraded = classifier().analyze(&input, "Apple").unwrap();
        let reference = classifier().analyze("Apple is great", "Apple").unwrap();

        assert!(degraded.fallback_used);
        assert_eq!(
            degraded.warning.as_deref(),
            Some("high symbol ratio, analysis based on extracted text")
        );
        assert_eq!(degraded.label, reference.label);
        assert_eq!(degraded.combined_score, reference.combined_score);
        assert!((degraded.confidence - (reference.confidence - 0.3).max(0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_supportive() {
        let result = classifier()
            .analyze("I love Apple products! They make amazing phones and computers.", "Apple")
            .unwrap();
        assert_eq!(result.label, StanceLabel::Supportive);
        assert_eq!(result.mention_count, 1);
        assert!(result.combined_score > 0.12);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_opposing() {
        let result = classifier()
            .analyze("I hate Microsoft products! They are terrible and overpriced.", "Microsoft")
            .unwrap();
        assert_eq!(result.label, StanceLabel::Opposing);
        assert!(result.context_sentiment < 0.0);
        assert!(result.keyword_score < 0.0);
    }

    #[test]
    fn test_target_case_is_kept() {
        let result = classifier().analyze("apple is great", "  APPLE ").unwrap();
        assert_eq!(result.target, "  APPLE ");
        assert_eq!(result.mention_count, 1);
    }

    #[test]
    fn test_target_not_found() {
        let result = classifier()
            .analyze("Bananas are a great source of potassium.", "Apple")
            .unwrap();
        assert_eq!(result.label, StanceLabel::Neutral);
        assert_eq!(result.confidence, 0.1);
        assert_eq!(result.mention_count, 0);
        assert!(result.fallback_used);
        assert_eq!(result.warning.as_deref(), Some("target not found in text"));
    }

    #[test]
    fn test_target_not_found_keeps_gate_warning() {
        let result = classifier().analyze("nice weather", "Apple").unwrap();
        assert_eq!(
            result.warning.as_deref(),
            Some("very short text, analysis may be less reliable; target not found in text")
        );
    }

    #[test]
    fn test_empty_inputs() {
        let result = classifier().analyze("   ", "Apple").unwrap();
        assert_eq!(result.warning.as_deref(), Some("empty or whitespace-only input"));

        let result = classifier().analyze("Apple is great", "").unwrap();
        assert_eq!(result.warning.as_deref(), Some("empty target"));
        assert_eq!(result.confidence, 0.1);
    }

    #[test]
    fn test_word_boundary_mentions() {
        let result = classifier()
            .analyze("Pineapple is good but Apple is better.", "Apple")
            .unwrap();
        assert_eq!(result.mention_count, 1);
    }

    #[test]
    fn test_consistent_mentions() {
        let result = classifier()
            .analyze("Apple is great. Apple is amazing. Apple is wonderful.", "Apple")
            .unwrap();
        assert_eq!(result.mention_count, 3);
        assert!(result.consistency > 0.7);
        assert_eq!(result.label, StanceLabel::Supportive);
    }

    #[tokio::test]
    async fn test_bound_classifier() {
        let bound = Arc::new(classifier()).bind("Tesla");
        assert_eq!(bound.target(), "Tesla");
        assert_eq!(bound.name(), "stance:Tesla");
        assert_eq!(bound.tier(), ClassifierTier::B);

        let result = bound
            .classify("I really admire Tesla and their engineering.")
            .await
            .unwrap()
            .into_stance()
            .unwrap();
        assert_eq!(result.target, "Tesla");
        assert_eq!(result.label, StanceLabel::Supportive);
    }
}
