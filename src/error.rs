use thiserror::Error;

/// Failures while loading a date sheet
#[derive(Debug, Error)]
pub enum DatesheetError {
    #[error("failed to read date sheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("date sheet has no header row (expected one after {skipped} leading rows)")]
    MissingHeader { skipped: usize },

    #[error("date sheet header has {found} columns, need at least Day and Date")]
    TooFewColumns { found: usize },
}
