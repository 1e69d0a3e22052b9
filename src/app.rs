use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::{BatchConverter, CsvTranscoder};
use crate::domain::error::Result;
use crate::domain::transcode::BatchSummary;
use crate::infrastructure::config::ConfigService;
use crate::interfaces::cli::{self, Cli};

/// Some files failed and `fail_on_error` is set
const EXIT_FILE_FAILURES: u8 = 1;
/// Nothing was attempted: bad config or unusable directories
const EXIT_SETUP_FAILURE: u8 = 2;

pub fn run() -> ExitCode {
    init_tracing();
    let args = Cli::parse();

    match execute(&args) {
        Ok((summary, fail_on_error)) => {
            if fail_on_error && summary.has_failures() {
                ExitCode::from(EXIT_FILE_FAILURES)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "CSV conversion aborted");
            eprintln!("❌ {}", err);
            ExitCode::from(EXIT_SETUP_FAILURE)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn execute(args: &Cli) -> Result<(BatchSummary, bool)> {
    let config = ConfigService::new().load()?;
    let fail_on_error = config.fail_on_error;
    let converter = BatchConverter::new(CsvTranscoder::new(config)?);

    let stdout = io::stdout();
    let summary = converter.run_with(&args.input_dir, &args.output_dir, |outcome| {
        warn_on_console_error(cli::print_outcome(&mut stdout.lock(), outcome));
    })?;

    let mut out = stdout.lock();
    warn_on_console_error(writeln!(out));
    warn_on_console_error(cli::print_summary(&mut out, &summary));
    Ok((summary, fail_on_error))
}

/// Status lines are informational; a closed stdout must not stop the batch
fn warn_on_console_error(result: io::Result<()>) {
    if let Err(err) = result {
        tracing::warn!(error = %err, "Failed to write console status line");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_write_errors_are_surfaced_not_fatal() {
        let result = cli::print_summary(&mut ClosedPipe, &BatchSummary::default());
        assert!(matches!(&result, Err(e) if e.kind() == io::ErrorKind::BrokenPipe));

        // Logged and swallowed so the batch keeps going
        warn_on_console_error(result);
        warn_on_console_error(Ok(()));
    }
}
