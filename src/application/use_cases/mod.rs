pub mod batch_converter;
pub mod csv_transcoder;
