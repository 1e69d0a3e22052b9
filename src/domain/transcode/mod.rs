// ============================================================
// TRANSCODE DOMAIN LAYER
// ============================================================
// Core types and value objects for CSV re-encoding
// No I/O, no async

mod cell_transform;
mod conversion_report;
mod symbol_table;
mod transcode_config;

pub use cell_transform::{normalize_line_breaks, CellStats, CellTransformer, LINE_BREAK_MARKER};
pub use conversion_report::{BatchSummary, ConversionReport, FileOutcome};
pub use symbol_table::SymbolTable;
pub use transcode_config::{resolve_encoding, TranscodeConfig, WriteMode};
