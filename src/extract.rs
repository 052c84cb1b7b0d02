//! Fenced-block extraction from the transcript export.
//!
//! The fetcher embeds raw chat history as triple-backtick blocks inside a
//! markdown document. Analysis runs over the newline-joined concatenation of
//! all block payloads, in document order. Anything outside the fences is
//! commentary and is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```\n(.*?)\n```").unwrap());

/// Concatenate the payloads of all fenced blocks, newline-joined.
///
/// A document with no well-formed fences yields an empty string, not an
/// error; downstream stages handle empty text by producing empty sections.
pub fn transcript_text(document: &str) -> String {
    FENCED_BLOCK
        .captures_iter(document)
        .map(|cap| cap[1].to_string())
        .collect::<Vec<String>>()
        .join("\n")
}
