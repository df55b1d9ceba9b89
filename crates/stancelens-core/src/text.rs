//! Text measurements shared by the gate, the locator and the calibrator.
//!
//! All lengths and offsets are in `char`s, never bytes.

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase `text` one char at a time, keeping only the first char of each
/// lowercase mapping so char offsets in the result line up with `text`.
pub fn fold_case(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Case-fold a single char (see [`fold_case`]).
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of chars.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Share of chars that are neither alphanumeric nor whitespace.
pub fn symbol_ratio(text: &str) -> f64 {
    let total = char_len(text);
    if total == 0 {
        return 0.0;
    }

    let symbols = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();

    symbols as f64 / total as f64
}

/// First `max_chars` chars of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Cap every run of a repeated char at `max_run` occurrences
/// ("sooooo" becomes "sooo" with `max_run = 3`).
pub fn squeeze_repeats(text: &str, max_run: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
        } else {
            prev = Some(c);
            run = 1;
        }
        if run <= max_run {
            out.push(c);
        }
    }

    out
}
