//! Sentiment tally over a fixed lexicon.
//!
//! Literal non-overlapping substring counts summed per label. No context
//! extraction and no dedup; a word hitting twice counts twice.

use crate::patterns::LexiconEntry;

/// Count lexicon word occurrences per label, in lexicon order.
pub fn sentiment_scores(lexicon: &[LexiconEntry], text: &str) -> Vec<(String, usize)> {
    lexicon
        .iter()
        .map(|entry| {
            let total: usize = entry
                .words
                .iter()
                .map(|word| text.matches(word).count())
                .sum();
            (entry.label.to_string(), total)
        })
        .collect()
}
