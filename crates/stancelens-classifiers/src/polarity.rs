//! Polarity scoring primitive
//!
//! [`PolarityScorer`] is the seam for any lexicon sentiment scorer. The
//! bundled [`LexiconPolarity`] is a valence-lexicon scorer with booster,
//! negation, capitalization, contrast and exclamation heuristics.

use stancelens_core::{Result, ScoreVector};
use std::collections::HashMap;

/// Scores the polarity of a text fragment.
///
/// Implementations must be pure: the same input always yields the same
/// vector. Faults are returned as `Err` and propagate to the caller.
pub trait PolarityScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<ScoreVector>;

    fn name(&self) -> &str;
}

/// Normalization constant of the compound score
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Valence shift contributed by a booster word
const BOOSTER_INCREMENT: f64 = 0.293;

/// Valence shift for an ALL-CAPS word in mixed-case text
const CAPS_INCREMENT: f64 = 0.733;

/// Scale applied to a valence preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;

/// Emphasis per exclamation mark
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// How far back boosters and negations reach, with booster decay per step
const LOOKBACK_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

const VALENCES: &[(&str, f64)] = &[
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("like", 2.0),
    ("liked", 1.8),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("good", 1.9),
    ("nice", 1.8),
    ("best", 3.2),
    ("better", 1.9),
    ("awesome", 3.1),
    ("perfect", 2.7),
    ("brilliant", 2.8),
    ("outstanding", 3.0),
    ("superb", 3.1),
    ("happy", 2.7),
    ("glad", 2.0),
    ("enjoy", 2.2),
    ("beautiful", 2.9),
    ("impressive", 2.3),
    ("innovative", 1.6),
    ("helpful", 1.7),
    ("reliable", 1.4),
    ("support", 1.7),
    ("supports", 1.5),
    ("endorse", 1.5),
    ("recommend", 1.5),
    ("praise", 2.6),
    ("admire", 2.1),
    ("appreciate", 1.7),
    ("trust", 2.3),
    ("respect", 2.1),
    ("favor", 1.7),
    ("champion", 2.9),
    ("celebrate", 2.7),
    ("embrace", 1.3),
    ("win", 2.8),
    ("success", 2.7),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("fun", 2.3),
    ("pleased", 1.9),
    ("hate", -2.7),
    ("hated", -3.2),
    ("dislike", -1.6),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("disgusting", -2.4),
    ("pathetic", -2.2),
    ("useless", -1.8),
    ("garbage", -2.1),
    ("trash", -1.5),
    ("sucks", -1.5),
    ("oppose", -1.1),
    ("criticize", -1.9),
    ("condemn", -1.6),
    ("reject", -1.7),
    ("disapprove", -1.6),
    ("distrust", -1.8),
    ("despise", -2.6),
    ("attack", -2.1),
    ("blame", -1.4),
    ("fault", -1.7),
    ("boycott", -1.3),
    ("overpriced", -1.5),
    ("worthless", -1.9),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("frustrated", -2.4),
    ("sad", -2.1),
    ("angry", -2.3),
    ("poor", -2.1),
    ("broken", -2.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("problem", -1.7),
    ("wrong", -2.1),
    ("annoying", -2.3),
    ("ugly", -2.3),
    ("slow", -0.9),
];

const BOOSTERS_UP: &[&str] = &[
    "very", "extremely", "really", "totally", "completely", "absolutely", "incredibly",
    "so", "highly", "truly", "most",
];

const BOOSTERS_DOWN: &[&str] = &[
    "somewhat", "slightly", "barely", "hardly", "rather", "marginally", "partly",
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none", "cannot",
    "don't", "doesn't", "didn't", "won't", "wouldn't", "can't", "couldn't", "shouldn't",
    "isn't", "aren't", "wasn't", "weren't", "dont", "doesnt", "didnt", "isnt", "without",
];

/// One scoring token
struct Token {
    folded: String,
    shouting: bool,
}

/// Valence-lexicon polarity scorer
pub struct LexiconPolarity {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: Vec<String>,
}

impl LexiconPolarity {
    /// Create a scorer with the bundled lexicon
    pub fn new() -> Self {
        Self::with_valences(
            VALENCES
                .iter()
                .map(|(word, valence)| (word.to_string(), *valence)),
        )
    }

    /// Create a scorer with a custom valence lexicon
    pub fn with_valences(valences: impl IntoIterator<Item = (String, f64)>) -> Self {
        let boosters = BOOSTERS_UP
            .iter()
            .map(|w| (w.to_string(), BOOSTER_INCREMENT))
            .chain(
                BOOSTERS_DOWN
                    .iter()
                    .map(|w| (w.to_string(), -BOOSTER_INCREMENT)),
            )
            .collect();

        Self {
            valences: valences.into_iter().collect(),
            boosters,
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn tokenize(text: &str) -> Vec<Token> {
        text.split_whitespace()
            .filter_map(|raw| {
                let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
                let word = word.trim_matches('\'');
                if word.is_empty() {
                    return None;
                }
                let has_letters = word.chars().any(char::is_alphabetic);
                let shouting = has_letters
                    && word.chars().count() > 1
                    && word.chars().all(|c| !c.is_lowercase());
                Some(Token {
                    folded: word.to_lowercase(),
                    shouting,
                })
            })
            .collect()
    }

    fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word) || word.ends_with("n't")
    }

    /// Valence of the token at `idx`, 0.0 when it carries none
    fn token_valence(&self, tokens: &[Token], idx: usize, caps_differential: bool) -> f64 {
        let token = &tokens[idx];
        if self.boosters.contains_key(&token.folded) {
            return 0.0;
        }
        let Some(&base) = self.valences.get(&token.folded) else {
            return 0.0;
        };

        let mut valence = base;
        if caps_differential && token.shouting {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for (step, decay) in LOOKBACK_DECAY.iter().enumerate() {
            let Some(prev) = idx.checked_sub(step + 1) else {
                break;
            };
            if let Some(&shift) = self.boosters.get(&tokens[prev].folded) {
                // boosters scale magnitude, so the shift follows the valence sign
                let signed = if valence < 0.0 { -shift } else { shift };
                valence += signed * decay;
            }
        }

        let negated = (1..=LOOKBACK_DECAY.len())
            .filter_map(|back| idx.checked_sub(back))
            .any(|prev| self.is_negation(&tokens[prev].folded));
        if negated {
            valence *= NEGATION_SCALAR;
        }

        valence
    }

    fn exclamation_emphasis(text: &str) -> f64 {
        let count = text.chars().filter(|c| *c == '!').count().min(MAX_EXCLAMATIONS);
        count as f64 * EXCLAMATION_INCREMENT
    }
}

impl Default for LexiconPolarity {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconPolarity {
    fn score(&self, text: &str) -> Result<ScoreVector> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return Ok(ScoreVector::neutral());
        }

        let shouting = tokens.iter().filter(|t| t.shouting).count();
        let caps_differential = shouting > 0 && shouting < tokens.len();

        let mut valences: Vec<f64> = (0..tokens.len())
            .map(|idx| self.token_valence(&tokens, idx, caps_differential))
            .collect();

        // contrastive "but": damp what precedes, stress what follows
        if let Some(pivot) = tokens.iter().position(|t| t.folded == "but") {
            for (idx, valence) in valences.iter_mut().enumerate() {
                if idx < pivot {
                    *valence *= 0.5;
                } else if idx > pivot {
                    *valence *= 1.5;
                }
            }
        }

        let emphasis = Self::exclamation_emphasis(text);
        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut positive_sum = 0.0;
        let mut negative_sum = 0.0;
        let mut neutral_count = 0.0;
        for valence in &valences {
            if *valence > 0.0 {
                positive_sum += valence + 1.0;
            } else if *valence < 0.0 {
                negative_sum += valence.abs() + 1.0;
            } else {
                neutral_count += 1.0;
            }
        }
        if positive_sum > negative_sum {
            positive_sum += emphasis;
        } else if negative_sum > positive_sum {
            negative_sum += emphasis;
        }

        let total = positive_sum + negative_sum + neutral_count;
        if total == 0.0 {
            return Ok(ScoreVector::neutral());
        }

        Ok(ScoreVector::new(
            compound,
            positive_sum / total,
            neutral_count / total,
            negative_sum / total,
        ))
    }

    fn name(&self) -> &str {
        "lexicon-polarity"
    }
}
