//! Retrospective transcript analysis.
//!
//! Takes a transcript export (chat history embedded as fenced blocks in a
//! markdown document) and produces analysis reports:
//! 1. KPT classification (keep / problem / try) with sentiment and keywords
//! 2. Negative remark detail, summary and list reports
//! 3. Positive remark list
//! 4. Wordcloud token feed (noun stream for a pluggable renderer)
//!
//! One classification engine serves every variant; variants differ only
//! in their static pattern tables, context width and report layout.

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod sentiment;

pub use error::AnalysisError;
