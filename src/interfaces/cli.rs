//! Command-line surface and console status lines

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::domain::transcode::{BatchSummary, FileOutcome};

/// Convert every CSV file in a folder to another encoding, turning line
/// breaks inside cells into a literal \n and emoji into :name: tokens.
///
/// Encodings, the placeholder for unmappable characters and the write mode
/// come from csv-recode.toml or CSV_RECODE_* environment variables.
#[derive(Debug, Parser)]
#[command(name = "csv-recode", version)]
pub struct Cli {
    /// Folder containing the source *.csv files
    pub input_dir: PathBuf,

    /// Folder receiving the converted files (created if missing)
    pub output_dir: PathBuf,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn print_outcome(out: &mut impl Write, outcome: &FileOutcome) -> io::Result<()> {
    match outcome {
        FileOutcome::Converted(report) => writeln!(
            out,
            "✅ {} → {} ({} rows)",
            file_label(&report.source),
            report.destination.display(),
            report.rows
        ),
        FileOutcome::Failed { source, error } => {
            writeln!(out, "❌ {}: {}", file_label(source), error)
        }
    }
}

pub fn print_summary(out: &mut impl Write, summary: &BatchSummary) -> io::Result<()> {
    writeln!(
        out,
        "🎉 Converted {} of {} CSV files ({} failed).",
        summary.converted(),
        summary.total(),
        summary.failed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::transcode::ConversionReport;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_two_positionals() {
        let cli = Cli::try_parse_from(["csv-recode", "in", "out"]).unwrap();
        assert_eq!(cli.input_dir, PathBuf::from("in"));
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_rejects_missing_output_dir() {
        assert!(Cli::try_parse_from(["csv-recode", "in"]).is_err());
    }

    #[test]
    fn test_console_lines() {
        let mut summary = BatchSummary::default();
        summary.push(FileOutcome::Converted(ConversionReport {
            source: PathBuf::from("in/a.csv"),
            destination: PathBuf::from("out/a.csv"),
            rows: 3,
            cells: 9,
            line_breaks: 0,
            symbols: 0,
            placeholders: 0,
        }));
        summary.push(FileOutcome::Failed {
            source: PathBuf::from("in/b.csv"),
            error: AppError::ParseError("bad row".to_string()),
        });

        let mut out = Vec::new();
        for outcome in &summary.outcomes {
            print_outcome(&mut out, outcome).unwrap();
        }
        print_summary(&mut out, &summary).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "✅ a.csv → out/a.csv (3 rows)");
        assert_eq!(lines[1], "❌ b.csv: Parse error: bad row");
        assert_eq!(lines[2], "🎉 Converted 1 of 2 CSV files (1 failed).");
    }
}
