pub mod config;
pub mod csv;
pub mod emoji;
pub mod storage;
