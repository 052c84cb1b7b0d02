//! Aggregation and ranking over deduplicated findings.
//!
//! Counts per category and per pattern and ranks patterns by frequency,
//! definition order breaking ties. Everything downstream of here is pure
//! data; the formatter truncates lists for layout but never counts or
//! sorts.

use crate::scan::CategoryFindings;

/// Per-category roll-up ready for formatting. `examples` keep discovery
/// order; `pattern_counts` are ranked by count descending, definition
/// order on ties.
#[derive(Debug)]
pub struct CategorySummary {
    pub name: String,
    pub total: usize,
    pub examples: Vec<String>,
    pub pattern_counts: Vec<(String, usize)>,
}

impl CategorySummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn summarize_category(cat: &CategoryFindings) -> CategorySummary {
    // Counts keyed by definition index so ties resolve to table order.
    let mut counts: Vec<(usize, String, usize)> = Vec::new();
    for f in &cat.findings {
        match counts.iter().position(|(idx, _, _)| *idx == f.pattern_index) {
            Some(pos) => counts[pos].2 += 1,
            None => counts.push((f.pattern_index, f.pattern.clone(), 1)),
        }
    }
    counts.sort_by_key(|(idx, _, _)| *idx);
    // Stable sort keeps definition order among equal counts.
    counts.sort_by(|a, b| b.2.cmp(&a.2));

    CategorySummary {
        name: cat.name.clone(),
        total: cat.findings.len(),
        examples: cat.findings.iter().map(|f| f.context.clone()).collect(),
        pattern_counts: counts.into_iter().map(|(_, label, n)| (label, n)).collect(),
    }
}

/// Roll up all categories, preserving definition order. Empty categories
/// stay in the list (they contribute zero to totals); the formatter skips
/// them when emitting sections.
pub fn summarize(categories: &[CategoryFindings]) -> Vec<CategorySummary> {
    categories.iter().map(summarize_category).collect()
}

/// Total retained findings across all categories, empty ones included.
pub fn grand_total(summaries: &[CategorySummary]) -> usize {
    summaries.iter().map(|s| s.total).sum()
}
