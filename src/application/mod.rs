pub mod use_cases;

pub use use_cases::batch_converter::BatchConverter;
pub use use_cases::csv_transcoder::CsvTranscoder;
