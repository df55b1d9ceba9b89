//! Signal fusion and cross-mention consistency

use crate::config::StanceConfig;
use crate::context::MentionSignal;
use stancelens_core::StanceLabel;

/// Fused stance evidence for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedResult {
    /// Mean narrow-window compound
    pub context_sentiment: f64,

    /// Mean keyword score
    pub keyword_score: f64,

    /// Weighted fusion of both means, in [-1, 1]
    pub combined_score: f64,

    /// Uniformity of the narrow-window compounds, in [0, 1]
    pub consistency: f64,

    pub mention_count: usize,
}

impl FusedResult {
    /// Evidence for a request without mentions
    pub fn empty() -> Self {
        Self {
            context_sentiment: 0.0,
            keyword_score: 0.0,
            combined_score: 0.0,
            consistency: 1.0,
            mention_count: 0,
        }
    }
}

/// Combines per-mention signals into one stance score
#[derive(Debug, Clone)]
pub struct SignalFusion {
    config: StanceConfig,
}

impl SignalFusion {
    pub fn new(config: &StanceConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Average the signals, fuse them and measure their consistency
    pub fn fuse(&self, signals: &[MentionSignal]) -> FusedResult {
        if signals.is_empty() {
            return FusedResult::empty();
        }

        let compounds: Vec<f64> = signals.iter().map(|s| s.context_sentiment).collect();
        let context_sentiment = mean(&compounds);
        let keyword_score = signals.iter().map(|s| s.keyword_score).sum::<f64>() / signals.len() as f64;

        FusedResult {
            context_sentiment,
            keyword_score,
            combined_score: self.combine(context_sentiment, keyword_score),
            consistency: consistency(&compounds),
            mention_count: signals.len(),
        }
    }

    /// Weighted sum, boosted when both signals agree strongly
    pub fn combine(&self, context_sentiment: f64, keyword_score: f64) -> f64 {
        let config = &self.config;
        let mut combined =
            config.sentiment_weight * context_sentiment + config.keyword_weight * keyword_score;

        let strong = context_sentiment.abs() > config.agreement_threshold
            && keyword_score.abs() > config.agreement_threshold;
        let agree = context_sentiment.signum() == keyword_score.signum();
        if strong && agree {
            combined *= config.agreement_boost;
        }

        combined.clamp(-1.0, 1.0)
    }

    pub fn label(&self, combined_score: f64) -> StanceLabel {
        let threshold = self.config.neutral_threshold;
        if combined_score > threshold {
            StanceLabel::Supportive
        } else if combined_score < -threshold {
            StanceLabel::Opposing
        } else {
            StanceLabel::Neutral
        }
    }
}

/// `max(0, 1 - 2 * population variance)`, or 1.0 for at most one value
pub fn consistency(compounds: &[f64]) -> f64 {
    if compounds.len() <= 1 {
        return 1.0;
    }
    let mean = mean(compounds);
    let variance =
        compounds.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / compounds.len() as f64;
    (1.0 - 2.0 * variance).max(0.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
