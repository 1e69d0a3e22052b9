// ============================================================
// CONVERSION REPORTS
// ============================================================
// Outcome of one file and of a whole directory run

use std::path::PathBuf;

use crate::domain::error::AppError;

/// Result of a successful single-file conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub rows: usize,
    pub cells: usize,
    pub line_breaks: usize,
    pub symbols: usize,

    /// Characters the target encoding could not represent
    pub placeholders: usize,
}

/// One entry of a batch, in processing order
#[derive(Debug)]
pub enum FileOutcome {
    Converted(ConversionReport),
    Failed { source: PathBuf, error: AppError },
}

impl FileOutcome {
    pub fn source(&self) -> &PathBuf {
        match self {
            FileOutcome::Converted(report) => &report.source,
            FileOutcome::Failed { source, .. } => source,
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, FileOutcome::Converted(_))
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_converted()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.converted()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
