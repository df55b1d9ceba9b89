//! Target mention locator
//!
//! Finds where a target phrase occurs in a text, on word boundaries and
//! ignoring case. Multi-word targets also match on their significant
//! sub-words, as long as a sub-word hit does not sit on top of a mention
//! that was already accepted.

use aho_corasick::{AhoCorasick, MatchKind};
use stancelens_core::{text, Error, MentionPosition, Result, TargetQuery};

/// Matcher for one target phrase
pub struct TargetLocator {
    matcher: AhoCorasick,
    /// Char length of each pattern, indexed like the matcher's patterns
    pattern_lengths: Vec<usize>,
    target_length: usize,
}

impl TargetLocator {
    /// Build a matcher for the folded target and its sub-words.
    ///
    /// Pattern 0 is always the full target.
    pub fn new(query: &TargetQuery) -> Result<Self> {
        if query.is_empty() {
            return Err(Error::classifier("Cannot locate an empty target"));
        }

        let patterns: Vec<&str> = std::iter::once(query.folded.as_str())
            .chain(query.sub_words.iter().map(String::as_str))
            .collect();

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| {
                Error::classifier(format!("Failed to build target matcher: {}", e))
            })?;

        Ok(Self {
            pattern_lengths: patterns.iter().map(|p| text::char_len(p)).collect(),
            target_length: query.char_len(),
            matcher,
        })
    }

    /// Locate mentions in case-folded text.
    ///
    /// Returns sorted, de-duplicated char offsets.
    pub fn locate(&self, folded: &str) -> Vec<MentionPosition> {
        let chars: Vec<char> = folded.chars().collect();
        let char_offsets = char_offset_table(folded);

        // hits[pattern] holds every boundary-respecting start, in text order
        let mut hits: Vec<Vec<usize>> = vec![Vec::new(); self.pattern_lengths.len()];
        for m in self.matcher.find_overlapping_iter(folded) {
            let pattern = m.pattern().as_usize();
            let start = char_offsets[m.start()];
            if on_word_boundary(&chars, start, self.pattern_lengths[pattern]) {
                hits[pattern].push(start);
            }
        }
        for list in hits.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }

        let mut accepted: Vec<usize> = hits[0].clone();
        for sub_word_hits in hits.iter().skip(1) {
            for &start in sub_word_hits {
                let overlaps = accepted
                    .iter()
                    .any(|&existing| start.abs_diff(existing) < self.target_length);
                if !overlaps {
                    accepted.push(start);
                }
            }
        }

        accepted.sort_unstable();
        accepted.dedup();
        accepted.into_iter().map(MentionPosition).collect()
    }
}

/// Map every byte offset that starts a char to its char index
fn char_offset_table(text: &str) -> Vec<usize> {
    let mut table = vec![0; text.len() + 1];
    let mut count = 0;
    for (byte, _) in text.char_indices() {
        table[byte] = count;
        count += 1;
    }
    table[text.len()] = count;
    table
}

fn on_word_boundary(chars: &[char], start: usize, len: usize) -> bool {
    let before = start
        .checked_sub(1)
        .and_then(|i| chars.get(i))
        .map_or(true, |c| !c.is_alphanumeric());
    let after = chars.get(start + len).map_or(true, |c| !c.is_alphanumeric());
    before && after
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(input: &str, target: &str) -> Vec<usize> {
        let query = TargetQuery::new(target);
        let locator = TargetLocator::new(&query).unwrap();
        locator
            .locate(&text::fold_case(input))
            .into_iter()
            .map(|p| p.offset())
            .collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(locate("I love APPLE and apple", "Apple"), vec![7, 17]);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(locate("Pineapple is good but Apple is better.", "Apple"), vec![22]);
        assert!(locate("Applesauce for everyone", "Apple").is_empty());
        // punctuation counts as a boundary
        assert_eq!(locate("(Apple), Apple!", "apple"), vec![1, 9]);
    }

    #[test]
    fn test_sub_words_fill_in() {
        let text = "Microsoft Corporation reported earnings. Later, Microsoft said more.";
        // the full-phrase hit covers its own words; the later "Microsoft" is new
        assert_eq!(locate(text, "Microsoft Corporation"), vec![0, 48]);
    }

    #[test]
    fn test_sub_word_near_accepted_mention_skipped() {
        // "corporation" starts 10 chars after the full match, inside its length
        assert_eq!(locate("microsoft corporation", "Microsoft Corporation"), vec![0]);
    }

    #[test]
    fn test_short_sub_words_ignored() {
        // "of" is too short to be a sub-word
        assert!(locate("a bag of chips", "Bank of America").is_empty());
    }

    #[test]
    fn test_offsets_are_chars() {
        assert_eq!(locate("Café Apple déjà Apple", "apple"), vec![5, 16]);
    }

    #[test]
    fn test_absent_target() {
        assert!(locate("Nothing to see here", "Apple").is_empty());
    }

    #[test]
    fn test_empty_target_rejected() {
        let query = TargetQuery::new("   ");
        assert!(TargetLocator::new(&query).is_err());
    }
}
