pub mod error;
pub mod transcode;
