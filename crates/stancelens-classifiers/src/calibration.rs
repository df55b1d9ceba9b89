//! Confidence calibration
//!
//! Turns raw scores into a confidence in [0.1, 1.0]. Every increase is
//! capped at the maximum and every decrease floored at the minimum as it
//! is applied; the final value is clamped once more.

use crate::fusion::FusedResult;
use stancelens_core::{clamp_confidence, text, ScoreVector, MAX_CONFIDENCE, MIN_CONFIDENCE};

fn raise(value: f64, by: f64) -> f64 {
    (value + by).min(MAX_CONFIDENCE)
}

fn lower(value: f64, by: f64) -> f64 {
    (value - by).max(MIN_CONFIDENCE)
}

/// Stance confidence from the fused evidence.
///
/// `text` is the whitespace-normalized text, `target_words` the word
/// count of the normalized target.
pub fn stance_confidence(fused: &FusedResult, text: &str, target_words: usize) -> f64 {
    if fused.mention_count == 0 {
        return MIN_CONFIDENCE;
    }

    let strength = fused.combined_score.abs();
    let mut confidence = strength;

    if fused.mention_count > 1 {
        confidence = raise(confidence, 0.1);
    }

    confidence *= fused.consistency;

    let words = text::word_count(text);
    if words < 5 {
        confidence = lower(confidence, 0.2);
    } else if words > 50 {
        confidence = raise(confidence, 0.1);
    }

    if target_words > 1 {
        confidence = raise(confidence, 0.05);
    }

    if strength > 0.7 {
        confidence = raise(confidence, 0.1);
    }

    clamp_confidence(confidence)
}

/// Sentiment confidence from the polarity scores.
///
/// `admitted` is the text handed over by the gate, `processed` the text
/// that was actually scored.
pub fn sentiment_confidence(scores: &ScoreVector, admitted: &str, processed: &str) -> f64 {
    let mut confidence = scores.compound.abs();

    let dominant = scores.dominant_share();
    if dominant > 0.6 {
        confidence = raise(confidence, 0.1);
    } else if dominant < 0.4 {
        confidence = lower(confidence, 0.1);
    }

    if !admitted.is_empty() && !processed.is_empty() {
        let words = text::word_count(processed);
        if words < 3 {
            confidence = lower(confidence, 0.2);
        } else if words < 5 {
            confidence = lower(confidence, 0.1);
        }

        let ratio = text::char_len(processed) as f64 / text::char_len(admitted) as f64;
        if ratio < 0.5 {
            confidence = lower(confidence, 0.15);
        }
    }

    clamp_confidence(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fused(combined_score: f64, consistency: f64, mention_count: usize) -> FusedResult {
        FusedResult {
            combined_score,
            consistency,
            mention_count,
            ..FusedResult::empty()
        }
    }

    const SIX_WORDS: &str = "one two three four five six";

    #[test]
    fn test_no_mentions_is_minimum() {
        assert_eq!(stance_confidence(&fused(0.9, 1.0, 0), SIX_WORDS, 1), 0.1);
    }

    #[test]
    fn test_stance_base_is_strength() {
        assert!((stance_confidence(&fused(-0.4, 1.0, 1), SIX_WORDS, 1) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_stance_adjustments() {
        // (0.4 + 0.1) * 0.8 + 0.05
        let confidence = stance_confidence(&fused(0.4, 0.8, 2), SIX_WORDS, 2);
        assert!((confidence - 0.45).abs() < 1e-9);

        // short text, floored
        assert_eq!(stance_confidence(&fused(0.2, 1.0, 1), "Apple rocks", 1), 0.1);

        // very clear stance
        let confidence = stance_confidence(&fused(0.8, 1.0, 1), SIX_WORDS, 1);
        assert!((confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_stance_long_text_bonus() {
        let long_text = "word ".repeat(60);
        let confidence = stance_confidence(&fused(0.3, 1.0, 1), &long_text, 1);
        assert!((confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_stance_zero_consistency_floors() {
        assert_eq!(stance_confidence(&fused(0.5, 0.0, 3), SIX_WORDS, 1), 0.1);
    }

    #[test]
    fn test_sentiment_dominance() {
        let scores = ScoreVector::new(0.5, 0.3, 0.7, 0.0);
        let confidence = sentiment_confidence(&scores, SIX_WORDS, SIX_WORDS);
        assert!((confidence - 0.6).abs() < 1e-9);

        let split = ScoreVector::new(0.5, 0.35, 0.3, 0.35);
        let confidence = sentiment_confidence(&split, SIX_WORDS, SIX_WORDS);
        assert!((confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_sentiment_short_and_shrunk_text() {
        let scores = ScoreVector::new(0.8, 0.5, 0.5, 0.0);

        let confidence = sentiment_confidence(&scores, "good day", "good day");
        assert!((confidence - 0.6).abs() < 1e-9);

        let confidence = sentiment_confidence(&scores, "soooooooooooooo good", "sooo good");
        assert!((confidence - 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_sentiment_bounds() {
        let neutral = ScoreVector::neutral();
        assert_eq!(sentiment_confidence(&neutral, "", ""), 0.1);
        let strong = ScoreVector::new(0.99, 0.9, 0.1, 0.0);
        assert_eq!(sentiment_confidence(&strong, SIX_WORDS, SIX_WORDS), 1.0);
    }
}
