//! Robustness gate
//!
//! Decides, before any scoring, whether a request can be analyzed and on
//! which text. Checks run in a fixed order and the first one that matches
//! decides the request:
//!
//! 1. empty text → reject
//! 2. empty target (stance only) → reject
//! 3. too short → reject
//! 4. not English (only when the language gate is enabled) → reject
//! 5. too long → truncate, analyze, penalize
//! 6. symbol-heavy → reject, or clean, analyze, penalize
//! 7. few words → analyze, penalize

use crate::config::{AnalyzerConfig, LimitsConfig, PenaltyConfig};
use crate::language::LanguageGate;
use regex::Regex;
use stancelens_core::{text, Error, Result, TextSample, MIN_CONFIDENCE};
use std::borrow::Cow;
use tracing::debug;

/// Outcome of the gate for one request
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision<'a> {
    /// Skip scoring and return a fallback result with this warning
    Reject { warning: String },

    /// Score the admitted text
    Admit(Admission<'a>),
}

/// Text admitted for scoring, with the degradation it went through
#[derive(Debug, Clone, PartialEq)]
pub struct Admission<'a> {
    /// Text to score, before whitespace normalization
    pub text: Cow<'a, str>,

    /// Confidence subtracted after calibration
    pub penalty: f64,

    /// Set whenever the request was degraded
    pub warning: Option<String>,
}

impl<'a> Admission<'a> {
    fn clean(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            penalty: 0.0,
            warning: None,
        }
    }

    fn degraded(text: Cow<'a, str>, penalty: f64, warning: String) -> Self {
        Self {
            text,
            penalty,
            warning: Some(warning),
        }
    }

    /// Whether the request went through a degraded path
    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }

    /// Subtract the penalty, never going below the confidence floor
    pub fn apply_penalty(&self, confidence: f64) -> f64 {
        if self.penalty > 0.0 {
            (confidence - self.penalty).max(MIN_CONFIDENCE)
        } else {
            confidence
        }
    }
}

/// The degradation ladder
pub struct RobustnessGate {
    limits: LimitsConfig,
    penalties: PenaltyConfig,
    symbol_filter: Regex,
    language: Option<LanguageGate>,
}

impl RobustnessGate {
    /// Create a gate from the analyzer configuration.
    ///
    /// Both classifiers build their gate first, so an invalid configuration
    /// never reaches the scorers.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        let symbol_filter = Regex::new(r#"[^\w\s.,!?;:'"()\-]"#)
            .map_err(|e| Error::classifier(format!("Failed to compile symbol filter: {}", e)))?;

        let language = if config.language.require_english {
            Some(LanguageGate::new(config.language.min_common_ratio)?)
        } else {
            None
        };

        Ok(Self {
            limits: config.limits.clone(),
            penalties: config.penalties.clone(),
            symbol_filter,
            language,
        })
    }

    /// Run the ladder for a sentiment request
    pub fn inspect<'a>(&self, input: &'a str) -> GateDecision<'a> {
        let sample = TextSample::new(input);
        if sample.is_blank() {
            return reject("empty or whitespace-only input");
        }
        self.inspect_sample(sample)
    }

    /// Run the ladder for a stance request
    pub fn inspect_with_target<'a>(&self, input: &'a str, target: &str) -> GateDecision<'a> {
        let sample = TextSample::new(input);
        if sample.is_blank() {
            return reject("empty or whitespace-only input");
        }
        if target.trim().is_empty() {
            return reject("empty target");
        }
        self.inspect_sample(sample)
    }

    fn inspect_sample<'a>(&self, sample: TextSample<'a>) -> GateDecision<'a> {
        let limits = &self.limits;

        if sample.trimmed_length < limits.min_length {
            return reject(format!(
                "text too short, minimum {} characters",
                limits.min_length
            ));
        }

        if let Some(language) = &self.language {
            let head = text::truncate_chars(sample.text, limits.max_length);
            if !language.looks_like_english(head) {
                return reject("text does not appear to be English");
            }
        }

        if sample.trimmed_length > limits.max_length {
            debug!(
                from = sample.trimmed_length,
                to = limits.max_length,
                "truncating over-length input"
            );
            let truncated = text::truncate_chars(sample.text, limits.max_length);
            return GateDecision::Admit(Admission::degraded(
                Cow::Borrowed(truncated),
                self.penalties.truncated,
                format!(
                    "text truncated from {} to {} characters",
                    sample.trimmed_length, limits.max_length
                ),
            ));
        }

        if sample.symbol_ratio > limits.max_symbol_ratio {
            let extracted = self.extract_meaningful(sample.text);
            let words = content_words(&extracted);
            debug!(ratio = sample.symbol_ratio, words, "symbol-heavy input");

            if words < limits.min_extracted_words {
                return reject("too many symbols, cannot extract meaningful content");
            }
            return GateDecision::Admit(Admission::degraded(
                Cow::Owned(extracted),
                self.penalties.symbol_heavy,
                "high symbol ratio, analysis based on extracted text".to_string(),
            ));
        }

        if sample.word_count < limits.min_words {
            return GateDecision::Admit(Admission::degraded(
                Cow::Borrowed(sample.text),
                self.penalties.few_words,
                "very short text, analysis may be less reliable".to_string(),
            ));
        }

        GateDecision::Admit(Admission::clean(sample.text))
    }

    /// Replace everything except word chars, whitespace and basic punctuation
    fn extract_meaningful(&self, input: &str) -> String {
        let kept = self.symbol_filter.replace_all(input, " ");
        text::normalize_whitespace(&kept)
    }
}

/// Words carrying at least one letter or digit
fn content_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|word| word.chars().any(char::is_alphanumeric))
        .count()
}

fn reject<'a>(warning: impl Into<String>) -> GateDecision<'a> {
    let warning = warning.into();
    debug!(%warning, "input rejected by robustness gate");
    GateDecision::Reject { warning }
}
