// ============================================================
// CSV TRANSCODER USE CASE
// ============================================================
// Read, flatten, name symbols, re-encode and write one CSV file

use std::path::Path;

use encoding_rs::Encoding;

use crate::domain::error::{AppError, Result};
use crate::domain::transcode::{
    CellStats, CellTransformer, ConversionReport, SymbolTable, TranscodeConfig, WriteMode,
};
use crate::infrastructure::csv::{RecordReader, RecordWriter};
use crate::infrastructure::emoji;
use crate::infrastructure::storage::{remove_if_exists, Destination};

/// Single-file conversion use case
pub struct CsvTranscoder<'a> {
    config: TranscodeConfig,
    source: &'static Encoding,
    target: &'static Encoding,
    symbols: &'a SymbolTable,
}

impl CsvTranscoder<'static> {
    /// Create a transcoder using the process-wide emoji table
    pub fn new(config: TranscodeConfig) -> Result<Self> {
        Self::with_symbols(config, emoji::standard_table())
    }

    /// Create with default configuration
    pub fn default_config() -> Result<Self> {
        Self::new(TranscodeConfig::default())
    }
}

impl<'a> CsvTranscoder<'a> {
    pub fn with_symbols(config: TranscodeConfig, symbols: &'a SymbolTable) -> Result<Self> {
        config.validate().map_err(|e| {
            AppError::ConfigError(format!("Invalid transcode config: {}", e))
        })?;
        let source = config.source().map_err(AppError::ConfigError)?;
        let target = config.target().map_err(AppError::ConfigError)?;

        Ok(Self {
            config,
            source,
            target,
            symbols,
        })
    }

    pub fn config(&self) -> &TranscodeConfig {
        &self.config
    }

    /// Convert `source_path` into `destination_path`, replacing whatever
    /// was there before
    pub fn convert(&self, source_path: &Path, destination_path: &Path) -> Result<ConversionReport> {
        tracing::debug!(
            source = %source_path.display(),
            destination = %destination_path.display(),
            "Converting CSV file"
        );

        // Direct mode clears the old output up front so a failed conversion
        // never leaves stale content behind
        if self.config.write_mode == WriteMode::Direct {
            remove_if_exists(destination_path).map_err(|e| {
                AppError::IoError(format!(
                    "Failed to remove {}: {}",
                    destination_path.display(),
                    e
                ))
            })?;
        }

        if !source_path.is_file() {
            return Err(AppError::NotFound(format!(
                "{} is not a file",
                source_path.display()
            )));
        }

        let content = RecordReader::new().read_file(source_path, self.source)?;
        let destination = Destination::create(destination_path, self.config.write_mode)
            .map_err(|e| {
                AppError::IoError(format!(
                    "Failed to open {}: {}",
                    destination_path.display(),
                    e
                ))
            })?;

        let (destination, rows, stats, placeholders) = self.transcode(&content, destination)?;
        let destination_path = destination.commit()?;

        tracing::debug!(
            source = %source_path.display(),
            rows,
            symbols = stats.symbols,
            placeholders,
            "Converted CSV file"
        );

        Ok(ConversionReport {
            source: source_path.to_path_buf(),
            destination: destination_path,
            rows,
            cells: stats.cells,
            line_breaks: stats.line_breaks,
            symbols: stats.symbols,
            placeholders,
        })
    }

    /// Convert in-memory CSV content, returning the encoded bytes
    pub fn convert_content(&self, content: &str) -> Result<Vec<u8>> {
        let (bytes, _, _, _) = self.transcode(content, Vec::new())?;
        Ok(bytes)
    }

    fn transcode<W: std::io::Write>(
        &self,
        content: &str,
        sink: W,
    ) -> Result<(W, usize, CellStats, usize)> {
        let transformer = CellTransformer::new(self.symbols);
        let parser = RecordReader::new();
        let mut writer = RecordWriter::new(sink, self.target, self.config.placeholder);
        let mut stats = CellStats::default();

        for (index, raw) in parser.raw_records(content).enumerate() {
            if raw.is_empty() {
                writer.write_blank_row()?;
                continue;
            }

            let mut reader = parser.reader(raw);
            for record in reader.records() {
                let record = record.map_err(|e| {
                    AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
                })?;

                let (row, row_stats) = transformer.transform_row(record.iter());
                stats.absorb(row_stats);
                writer.write_row(&row)?;
            }
        }

        let rows = writer.rows();
        let (sink, placeholders) = writer.finish()?;
        Ok((sink, rows, stats, placeholders))
    }
}
