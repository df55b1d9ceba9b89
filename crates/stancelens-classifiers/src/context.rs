//! Context and keyword scoring around target mentions
//!
//! Each mention yields two signals:
//! - the polarity compound of a narrow char window around the mention
//! - a keyword score over a wider window, where stance indicators are
//!   weighted by their word distance from the window midpoint and adjusted
//!   for nearby modifiers and negations

use crate::config::{AnalyzerConfig, LexiconConfig, StanceConfig};
use crate::polarity::PolarityScorer;
use stancelens_core::{MentionPosition, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Chars stripped from both ends of a word before lexicon lookup
const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')', '[', ']', '{', '}'];

/// Both signals for one mention
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MentionSignal {
    /// Polarity compound of the narrow window, in [-1, 1]
    pub context_sentiment: f64,

    /// Keyword score of the wide window, in [-1, 1]
    pub keyword_score: f64,
}

/// A text prepared for windowing: original-case and folded chars
/// with identical offsets
pub struct MentionText {
    original: Vec<char>,
    folded: Vec<char>,
}

impl MentionText {
    /// `original` and `folded` must have the same char length
    pub fn new(original: &str, folded: &str) -> Self {
        let original: Vec<char> = original.chars().collect();
        let folded: Vec<char> = folded.chars().collect();
        debug_assert_eq!(original.len(), folded.len());
        Self { original, folded }
    }

    fn window(chars: &[char], center: usize, radius: usize) -> String {
        let start = center.saturating_sub(radius);
        let end = center.saturating_add(radius).min(chars.len());
        if start >= end {
            return String::new();
        }
        chars[start..end].iter().collect()
    }

    /// `[pos - radius, pos + radius)` of the original-case text
    pub fn narrow_window(&self, position: MentionPosition, radius: usize) -> String {
        Self::window(&self.original, position.offset(), radius)
    }

    /// `[pos - radius, pos + radius)` of the folded text
    pub fn folded_window(&self, position: MentionPosition, radius: usize) -> String {
        Self::window(&self.folded, position.offset(), radius)
    }
}

/// Keyword lookup tables built from the lexicon
struct KeywordTables {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    diminishers: HashSet<String>,
    negations: HashSet<String>,
}

impl KeywordTables {
    fn new(lexicon: &LexiconConfig) -> Self {
        let fold = |set: &std::collections::BTreeSet<String>| -> HashSet<String> {
            set.iter().map(|w| w.to_lowercase()).collect()
        };
        Self {
            positive: fold(&lexicon.positive),
            negative: fold(&lexicon.negative),
            intensifiers: fold(&lexicon.intensifiers),
            diminishers: fold(&lexicon.diminishers),
            negations: fold(&lexicon.negations),
        }
    }
}

/// Scores the signals of every mention
pub struct ContextScorer {
    config: StanceConfig,
    tables: KeywordTables,
    polarity: Arc<dyn PolarityScorer>,
}

impl ContextScorer {
    pub fn new(config: &AnalyzerConfig, polarity: Arc<dyn PolarityScorer>) -> Self {
        Self {
            config: config.stance.clone(),
            tables: KeywordTables::new(&config.lexicon),
            polarity,
        }
    }

    /// Polarity compound of the narrow window around a mention
    pub fn context_sentiment(&self, text: &MentionText, position: MentionPosition) -> Result<f64> {
        let window = text.narrow_window(position, self.config.context_window);
        Ok(self.polarity.score(&window)?.compound)
    }

    /// Keyword score of the wide window around a mention
    pub fn mention_keyword_score(&self, text: &MentionText, position: MentionPosition) -> f64 {
        let window = text.folded_window(position, self.config.context_window * 2);
        let words: Vec<&str> = window.split_whitespace().map(strip_edges).collect();
        self.keyword_score(&words, words.len() / 2)
    }

    /// Score both signals of one mention
    pub fn score(&self, text: &MentionText, position: MentionPosition) -> Result<MentionSignal> {
        Ok(MentionSignal {
            context_sentiment: self.context_sentiment(text, position)?,
            keyword_score: self.mention_keyword_score(text, position),
        })
    }

    /// Distance-weighted indicator sum around `center`, normalized by the
    /// widest possible window and clamped to [-1, 1].
    ///
    /// `words` must already be folded and stripped of edge punctuation.
    pub fn keyword_score(&self, words: &[&str], center: usize) -> f64 {
        let radius = self.config.keyword_window;
        let start = center.saturating_sub(radius);
        let end = center.saturating_add(radius).min(words.len());

        let mut sum = 0.0;
        for i in start..end {
            let polarity = if self.tables.positive.contains(words[i]) {
                1.0
            } else if self.tables.negative.contains(words[i]) {
                -1.0
            } else {
                continue;
            };

            let weight = 1.0 / (i.abs_diff(center) as f64 + 1.0);
            let score = self.apply_modifiers(words, i, polarity * weight);
            sum += self.apply_negation(words, i, score);
        }

        (sum / (2 * radius) as f64).clamp(-1.0, 1.0)
    }

    /// First modifier within the span decides; intensifiers win ties
    fn apply_modifiers(&self, words: &[&str], index: usize, score: f64) -> f64 {
        let span = self.config.modifier_span;
        let start = index.saturating_sub(span);
        let end = index.saturating_add(span + 1).min(words.len());

        let span_words = &words[..end];
        for j in start..end {
            if j == index {
                continue;
            }
            if self.tables.intensifiers.contains(words[j]) {
                return score * self.config.intensifier_multiplier;
            }
            if self.is_diminisher(span_words, j) {
                return score * self.config.diminisher_multiplier;
            }
        }
        score
    }

    /// Single-word diminisher at `j`, or a two-word one starting there.
    /// Pairs never reach past the end of `words`.
    fn is_diminisher(&self, words: &[&str], j: usize) -> bool {
        if self.tables.diminishers.contains(words[j]) {
            return true;
        }
        // two-word diminishers such as "kind of"
        match words.get(j + 1) {
            Some(next) => {
                let pair = format!("{} {}", words[j], next);
                self.tables.diminishers.contains(&pair)
            }
            None => false,
        }
    }

    fn apply_negation(&self, words: &[&str], index: usize, score: f64) -> f64 {
        let lookback = self.config.negation_lookback.max(1);
        let negated = words[index.saturating_sub(lookback)..index]
            .iter()
            .any(|w| self.tables.negations.contains(*w));
        if negated {
            -score
        } else {
            score
        }
    }
}

fn strip_edges(word: &str) -> &str {
    word.trim_matches(EDGE_PUNCTUATION)
}
