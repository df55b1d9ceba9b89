//! "Looks like English" heuristic used by the optional language gate

use regex::Regex;
use stancelens_core::{Error, Result};

const COMMON_ENGLISH_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "is", "are",
    "was", "were", "has", "had", "its", "our", "your", "very", "really",
];

/// Word-frequency language check
pub struct LanguageGate {
    url_regex: Regex,
    email_regex: Regex,
    handle_regex: Regex,
    digit_regex: Regex,
    punctuation_regex: Regex,
    min_common_ratio: f64,
}

impl LanguageGate {
    /// Create a gate that passes text whose share of common English words
    /// reaches `min_common_ratio`
    pub fn new(min_common_ratio: f64) -> Result<Self> {
        Ok(Self {
            url_regex: Regex::new(r"https?://\S+")
                .map_err(|e| Error::classifier(format!("Failed to compile url regex: {}", e)))?,
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .map_err(|e| Error::classifier(format!("Failed to compile email regex: {}", e)))?,
            handle_regex: Regex::new(r"[@#]\w+")
                .map_err(|e| Error::classifier(format!("Failed to compile handle regex: {}", e)))?,
            digit_regex: Regex::new(r"\d+")
                .map_err(|e| Error::classifier(format!("Failed to compile digit regex: {}", e)))?,
            punctuation_regex: Regex::new(r"[^\w\s]").map_err(|e| {
                Error::classifier(format!("Failed to compile punctuation regex: {}", e))
            })?,
            min_common_ratio,
        })
    }

    /// Strip URLs, e-mail addresses, @mentions, #hashtags, digits and punctuation
    fn strip_noise(&self, text: &str) -> String {
        let text = self.url_regex.replace_all(text, " ");
        let text = self.email_regex.replace_all(&text, " ");
        let text = self.handle_regex.replace_all(&text, " ");
        let text = self.digit_regex.replace_all(&text, " ");
        let text = self.punctuation_regex.replace_all(&text, " ");
        text.to_lowercase()
    }

    pub fn looks_like_english(&self, text: &str) -> bool {
        let cleaned = self.strip_noise(text);
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        if words.is_empty() {
            return false;
        }

        let common = words
            .iter()
            .filter(|w| COMMON_ENGLISH_WORDS.contains(w))
            .count();

        common as f64 / words.len() as f64 >= self.min_common_ratio
    }
}
