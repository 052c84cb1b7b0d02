//! Error taxonomy for the analysis pipeline.
//!
//! All variants are fatal: the run aborts without writing a partial report.
//! Empty input is not an error anywhere in the pipeline; it degrades to a
//! report with headers and zero counts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not valid UTF-8")]
    Encoding { path: PathBuf },

    #[error("invalid pattern {pattern:?} in category {category:?}: {source}")]
    PatternCompile {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}
