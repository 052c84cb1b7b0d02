//! Per-variant pipelines: extract, classify, aggregate, format.
//!
//! Each function is a one-shot transformation of (static tables, input
//! document) to a rendered report string. No state survives a run and no
//! I/O happens here; reading and writing stay with the caller.

use tracing::debug;

use crate::aggregate;
use crate::error::AnalysisError;
use crate::extract::transcript_text;
use crate::keywords::{self, Tokenizer};
use crate::patterns::{self, PatternSet};
use crate::report;
use crate::scan;
use crate::sentiment::sentiment_scores;

/// Context half-width for the KPT report.
const KPT_WINDOW: usize = 50;
/// Context half-width for the remark reports.
const REMARK_WINDOW: usize = 100;

fn classified(
    groups: &'static [patterns::PatternGroup],
    window: usize,
    text: &str,
) -> Result<Vec<aggregate::CategorySummary>, AnalysisError> {
    let set = PatternSet::compile(groups, window)?;
    Ok(aggregate::summarize(&scan::classify(&set, text)))
}

/// Combined KPT analysis: sentiment tally, keyword ranking and KPT
/// classification over the embedded transcript.
pub fn kpt_report(
    document: &str,
    tokenizer: &dyn Tokenizer,
    generated_at: Option<String>,
) -> Result<String, AnalysisError> {
    let text = transcript_text(document);
    debug!(chars = text.chars().count(), "extracted transcript");

    let sentiment = sentiment_scores(patterns::SENTIMENT_LEXICON, &text);
    let keywords = keywords::top_keywords(&tokenizer.tokenize(&text), report::KEYWORD_LIMIT);
    let categories = classified(patterns::KPT_PATTERNS, KPT_WINDOW, &text)?;

    Ok(report::kpt_report(generated_at, sentiment, keywords, &categories).render())
}

/// Negative detail report: pattern trend plus every retained remark.
pub fn negative_report(
    document: &str,
    generated_at: Option<String>,
) -> Result<String, AnalysisError> {
    let text = transcript_text(document);
    let set = PatternSet::compile(patterns::NEGATIVE_PATTERNS, REMARK_WINDOW)?;
    let categories = scan::classify(&set, &text);

    // Single flat category: details pair each fired pattern with its
    // context, in discovery order.
    let details: Vec<(String, String)> = categories[0]
        .findings
        .iter()
        .map(|f| (f.pattern.clone(), f.context.clone()))
        .collect();
    let summaries = aggregate::summarize(&categories);
    let trend = summaries[0].pattern_counts.clone();

    Ok(report::negative_detail_report(generated_at, trend, &details).render())
}

/// Categorized negative summary with capped examples and top patterns.
pub fn negative_summary(
    document: &str,
    generated_at: Option<String>,
) -> Result<String, AnalysisError> {
    let text = transcript_text(document);
    let summaries = classified(patterns::NEGATIVE_SUMMARY_PATTERNS, REMARK_WINDOW, &text)?;
    Ok(report::negative_summary_report(generated_at, &summaries).render())
}

/// Full numbered list of negative remarks per category.
pub fn negative_list(
    document: &str,
    generated_at: Option<String>,
) -> Result<String, AnalysisError> {
    let text = transcript_text(document);
    let summaries = classified(patterns::NEGATIVE_LIST_PATTERNS, REMARK_WINDOW, &text)?;
    Ok(report::remark_list_report("ネガティブ発言リスト", generated_at, &summaries).render())
}

/// Full numbered list of positive remarks per category.
pub fn positive_list(
    document: &str,
    generated_at: Option<String>,
) -> Result<String, AnalysisError> {
    let text = transcript_text(document);
    let summaries = classified(patterns::POSITIVE_LIST_PATTERNS, REMARK_WINDOW, &text)?;
    Ok(report::remark_list_report("ポジティブ発言リスト", generated_at, &summaries).render())
}

/// Wordcloud feed: the space-joined noun stream for the renderer. Empty
/// when the document has no fenced blocks or no nouns survive.
pub fn wordcloud_tokens(document: &str, tokenizer: &dyn Tokenizer) -> String {
    let text = transcript_text(document);
    keywords::noun_stream(tokenizer, &text)
}
