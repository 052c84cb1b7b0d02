//! Classification engine: pattern scanning, context windowing, dedup.
//!
//! Shared by every report variant. Scans the transcript once per pattern
//! with leftmost non-overlapping semantics, lifts a bounded context window
//! around each hit, and keeps the first finding per distinct context
//! string within a category.

use std::collections::HashSet;

use tracing::debug;

use crate::patterns::{CompiledCategory, PatternSet};

/// One retained hit: the pattern that fired, its byte span in the
/// transcript, and the trimmed context window around it.
#[derive(Debug, Clone)]
pub struct Finding {
    pub pattern: String,
    pub pattern_index: usize,
    pub start: usize,
    pub end: usize,
    pub context: String,
}

/// All retained findings for one category, in discovery order.
#[derive(Debug)]
pub struct CategoryFindings {
    pub name: String,
    pub findings: Vec<Finding>,
}

/// Widen a byte span by up to `w` characters on each side, clipped to the
/// text bounds. Offsets stay on char boundaries, so the result is always
/// a valid substring.
fn context_window(text: &str, start: usize, end: usize, w: usize) -> &str {
    let mut lo = start;
    for _ in 0..w {
        match text[..lo].chars().next_back() {
            Some(c) => lo -= c.len_utf8(),
            None => break,
        }
    }
    let mut hi = end;
    for _ in 0..w {
        match text[hi..].chars().next() {
            Some(c) => hi += c.len_utf8(),
            None => break,
        }
    }
    text[lo..hi].trim()
}

/// Scan one category's patterns over the text, dedup by context string.
///
/// Discovery order is pattern definition order, then left-to-right scan
/// order within a pattern. When two patterns lift an identical trimmed
/// context, the earlier-defined pattern wins; this is the deterministic
/// tie-break the reports rely on.
fn scan_category(category: &CompiledCategory, text: &str, window: usize) -> CategoryFindings {
    let mut seen: HashSet<String> = HashSet::new();
    let mut findings = Vec::new();

    for pattern in &category.patterns {
        for m in pattern.regex.find_iter(text) {
            // Zero-width matches (an empty pattern) carry no remark.
            if m.start() == m.end() {
                continue;
            }
            let context = context_window(text, m.start(), m.end(), window);
            if context.is_empty() || seen.contains(context) {
                continue;
            }
            seen.insert(context.to_string());
            findings.push(Finding {
                pattern: pattern.label.clone(),
                pattern_index: pattern.index,
                start: m.start(),
                end: m.end(),
                context: context.to_string(),
            });
        }
    }

    debug!(category = %category.name, retained = findings.len(), "scanned category");
    CategoryFindings {
        name: category.name.clone(),
        findings,
    }
}

/// Run the full pattern set over the text. Categories come back in
/// definition order; a category with no hits is present with an empty
/// finding list. The same span may surface in several categories, which
/// is expected, not an error.
pub fn classify(set: &PatternSet, text: &str) -> Vec<CategoryFindings> {
    set.categories
        .iter()
        .map(|category| scan_category(category, text, set.window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternGroup, PatternSet};

    fn set(groups: &'static [PatternGroup], window: usize) -> PatternSet {
        PatternSet::compile(groups, window).unwrap()
    }

    static ERROR_ONLY: &[PatternGroup] = &[PatternGroup {
        label: "技術的な問題",
        patterns: &["エラー"],
    }];

    #[test]
    fn test_repeated_pattern_distinct_contexts_both_kept() {
        let text = "エラーが発生しました。エラーの原因を確認しました。";
        let result = classify(&set(ERROR_ONLY, 5), text);
        assert_eq!(result.len(), 1);
        let cat = &result[0];
        assert_eq!(cat.name, "技術的な問題");
        assert_eq!(cat.findings.len(), 2);
        assert_ne!(cat.findings[0].context, cat.findings[1].context);
        assert!(cat.findings.iter().all(|f| f.pattern == "エラー"));
    }

    #[test]
    fn test_window_clipped_at_bounds() {
        let text = "エラー";
        let result = classify(&set(ERROR_ONLY, 100), text);
        assert_eq!(result[0].findings[0].context, "エラー");
    }

    #[test]
    fn test_window_length_bounded() {
        let text = "あ".repeat(30);
        static MID: &[PatternGroup] = &[PatternGroup {
            label: "c",
            patterns: &["あああ"],
        }];
        let result = classify(&set(MID, 4), &text);
        // 3-char match plus at most 4 chars each side
        for f in &result[0].findings {
            assert!(f.context.chars().count() <= 11);
            assert!(f.start < text.len() && f.end <= text.len());
        }
        // An interior match gets the full window.
        let widest = result[0]
            .findings
            .iter()
            .map(|f| f.context.chars().count())
            .max()
            .unwrap();
        assert_eq!(widest, 11);
    }

    #[test]
    fn test_identical_context_deduped() {
        // Whole text fits inside every window, so all hits share one context.
        let text = "問題と課題";
        static BOTH: &[PatternGroup] = &[PatternGroup {
            label: "c",
            patterns: &["問題", "課題"],
        }];
        let result = classify(&set(BOTH, 50), text);
        assert_eq!(result[0].findings.len(), 1);
        // First-defined pattern wins the shared context.
        assert_eq!(result[0].findings[0].pattern, "問題");
    }

    #[test]
    fn test_same_span_may_hit_multiple_categories() {
        static TWO_CATS: &[PatternGroup] = &[
            PatternGroup { label: "a", patterns: &["問題"] },
            PatternGroup { label: "b", patterns: &["問題"] },
        ];
        let result = classify(&set(TWO_CATS, 10), "問題があります");
        assert_eq!(result[0].findings.len(), 1);
        assert_eq!(result[1].findings.len(), 1);
    }

    #[test]
    fn test_empty_text_yields_empty_categories() {
        let result = classify(&set(ERROR_ONLY, 50), "");
        assert_eq!(result.len(), 1);
        assert!(result[0].findings.is_empty());
    }

    #[test]
    fn test_context_is_trimmed() {
        let text = "  エラー  ";
        let result = classify(&set(ERROR_ONLY, 5), text);
        assert_eq!(result[0].findings[0].context, "エラー");
    }

    #[test]
    fn test_non_overlapping_same_pattern() {
        static AA: &[PatternGroup] = &[PatternGroup {
            label: "c",
            patterns: &["ああ"],
        }];
        // Five chars: leftmost non-overlapping gives two matches, not four.
        let result = classify(&set(AA, 0), "あああああ");
        assert_eq!(result[0].findings.len(), 1); // identical "ああ" contexts dedup to one
        // With a window wide enough to make contexts differ, both survive.
        let result = classify(&set(AA, 1), "xああyああz");
        assert_eq!(result[0].findings.len(), 2);
    }

    #[test]
    fn test_determinism() {
        let text = "課題が多い。問題も多い。課題の整理が必要。";
        let s = set(NEG_SMALL, 8);
        let a = classify(&s, text);
        let b = classify(&s, text);
        let flat = |r: &Vec<CategoryFindings>| -> Vec<(String, String)> {
            r.iter()
                .flat_map(|c| c.findings.iter().map(|f| (f.pattern.clone(), f.context.clone())))
                .collect()
        };
        assert_eq!(flat(&a), flat(&b));
    }

    static NEG_SMALL: &[PatternGroup] = &[PatternGroup {
        label: "c",
        patterns: &["課題", "問題"],
    }];

    #[test]
    fn test_empty_pattern_yields_nothing() {
        static EMPTY: &[PatternGroup] = &[PatternGroup {
            label: "c",
            patterns: &[""],
        }];
        let result = classify(&set(EMPTY, 10), "何かの文章");
        assert!(result[0].findings.is_empty());
    }
}
