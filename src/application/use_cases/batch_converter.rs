// ============================================================
// BATCH CONVERTER USE CASE
// ============================================================
// Convert every *.csv in a folder, one file at a time

use std::path::{Path, PathBuf};

use crate::domain::error::{AppError, Result};
use crate::domain::transcode::{BatchSummary, FileOutcome};
use crate::infrastructure::storage::{ensure_dir, list_files_with_extension};

use super::csv_transcoder::CsvTranscoder;

const CSV_EXTENSION: &str = "csv";

pub struct BatchConverter<'a> {
    transcoder: CsvTranscoder<'a>,
}

impl<'a> BatchConverter<'a> {
    pub fn new(transcoder: CsvTranscoder<'a>) -> Self {
        Self { transcoder }
    }

    /// Files that `run` would convert, in processing order
    pub fn plan(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        if !input_dir.is_dir() {
            return Err(AppError::NotFound(format!(
                "input directory {} does not exist",
                input_dir.display()
            )));
        }
        list_files_with_extension(input_dir, CSV_EXTENSION).map_err(|e| {
            AppError::IoError(format!("Failed to list {}: {}", input_dir.display(), e))
        })
    }

    /// Convert every matching file. Only setup problems (missing input
    /// directory, output directory not creatable) are returned as errors;
    /// per-file failures are recorded in the summary.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchSummary> {
        self.run_with(input_dir, output_dir, |_| {})
    }

    /// Like [`BatchConverter::run`], calling `on_outcome` after each file
    pub fn run_with<F>(&self, input_dir: &Path, output_dir: &Path, mut on_outcome: F) -> Result<BatchSummary>
    where
        F: FnMut(&FileOutcome),
    {
        let sources = self.plan(input_dir)?;
        ensure_dir(output_dir).map_err(|e| {
            AppError::IoError(format!("Failed to create {}: {}", output_dir.display(), e))
        })?;

        tracing::info!(
            input_dir = %input_dir.display(),
            output_dir = %output_dir.display(),
            files = sources.len(),
            "Starting CSV batch"
        );

        let mut summary = BatchSummary::default();
        for source in sources {
            let outcome = match source.file_name() {
                Some(name) => {
                    let destination = output_dir.join(name);
                    match self.transcoder.convert(&source, &destination) {
                        Ok(report) => FileOutcome::Converted(report),
                        Err(error) => {
                            tracing::warn!(source = %source.display(), error = %error, "CSV conversion failed");
                            FileOutcome::Failed { source, error }
                        }
                    }
                }
                None => FileOutcome::Failed {
                    error: AppError::NotFound(format!("{} has no file name", source.display())),
                    source,
                },
            };

            on_outcome(&outcome);
            summary.push(outcome);
        }

        tracing::info!(
            converted = summary.converted(),
            failed = summary.failed(),
            "Finished CSV batch"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;
    use std::fs;
    use tempfile::TempDir;

    fn converter() -> BatchConverter<'static> {
        BatchConverter::new(CsvTranscoder::default_config().unwrap())
    }

    #[test]
    fn test_good_file_survives_corrupt_neighbour() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("a_corrupt.csv"), b"x,\xff\n").unwrap();
        fs::write(input.path().join("b_good.csv"), "name,note\n太郎,\"hi\nthere\"\n").unwrap();

        let summary = converter().run(input.path(), output.path()).unwrap();

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.converted(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.outcomes[0].is_converted());
        assert!(summary.outcomes[1].is_converted());

        let bytes = fs::read(output.path().join("b_good.csv")).unwrap();
        let (text, _, _) = SHIFT_JIS.decode(&bytes);
        assert_eq!(text, "\"name\",\"note\"\r\n\"太郎\",\"hi\\nthere\"\r\n");
    }

    #[test]
    fn test_output_dir_is_created_and_other_files_ignored() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let nested = output.path().join("deep/er");
        fs::write(input.path().join("data.csv"), "a\n").unwrap();
        fs::write(input.path().join("readme.txt"), "ignore me").unwrap();

        let mut seen = Vec::new();
        let summary = converter()
            .run_with(input.path(), &nested, |outcome| seen.push(outcome.source().clone()))
            .unwrap();

        assert_eq!(summary.converted(), 1);
        assert_eq!(seen, vec![input.path().join("data.csv")]);
        assert!(nested.join("data.csv").is_file());
        assert!(!nested.join("readme.txt").exists());
    }

    #[test]
    fn test_empty_input_dir() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let summary = converter().run(input.path(), output.path()).unwrap();

        assert_eq!(summary.total(), 0);
        assert!(!summary.has_failures());
    }

    #[test]
    fn test_missing_input_dir_is_fatal() {
        let output = TempDir::new().unwrap();
        let err = converter()
            .run(&output.path().join("missing"), output.path())
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
