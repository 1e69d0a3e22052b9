// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Decoding reader, re-encoding writer, csv error mapping

mod record_reader;
mod record_writer;

pub use record_reader::{decode_strict, RawRecords, RecordReader};
pub use record_writer::{EncodingWriter, RecordWriter};

use crate::domain::error::AppError;

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return AppError::IoError(err.to_string());
        }
        AppError::ParseError(err.to_string())
    }
}
