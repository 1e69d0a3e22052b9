// ============================================================
// RECORD READER
// ============================================================
// Decode a source file and iterate its rows with standard CSV rules

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use encoding_rs::Encoding;

use crate::domain::error::{AppError, Result};

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// CSV reader configured for pass-through parsing
#[derive(Debug, Default)]
pub struct RecordReader;

impl RecordReader {
    pub fn new() -> Self {
        Self
    }

    /// Every line is data: no header row, no trimming, ragged rows allowed
    pub fn reader<'a>(&self, content: &'a str) -> csv::Reader<&'a [u8]> {
        ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(content.as_bytes())
    }

    /// Split `content` into raw records at unquoted line terminators.
    /// Blank lines come back as empty slices; the `csv` reader itself
    /// would skip them.
    pub fn raw_records<'a>(&self, content: &'a str) -> RawRecords<'a> {
        RawRecords { content, pos: 0 }
    }

    /// Read and decode a whole file
    pub fn read_file(&self, path: &Path, encoding: &'static Encoding) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("{}: {}", path.display(), e))
            }
            _ => AppError::IoError(format!("Failed to read {}: {}", path.display(), e)),
        })?;

        decode_strict(&bytes, encoding).map(Cow::into_owned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Raw record slices without their terminator (`\r\n`, `\n` or `\r`)
pub struct RawRecords<'a> {
    content: &'a str,
    pos: usize,
}

impl<'a> Iterator for RawRecords<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.content.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let mut state = FieldState::Start;
        let mut i = start;

        // Delimiters are ASCII, so every split lands on a char boundary
        while i < bytes.len() {
            let b = bytes[i];
            match (state, b) {
                (FieldState::Quoted, QUOTE) => state = FieldState::QuoteInQuoted,
                (FieldState::Quoted, _) => {}
                (FieldState::Start, QUOTE) => state = FieldState::Quoted,
                (FieldState::QuoteInQuoted, QUOTE) => state = FieldState::Quoted,
                (_, DELIMITER) => state = FieldState::Start,
                (_, b'\r') | (_, b'\n') => {
                    let end = i;
                    i += 1;
                    if b == b'\r' && bytes.get(i) == Some(&b'\n') {
                        i += 1;
                    }
                    self.pos = i;
                    return Some(&self.content[start..end]);
                }
                _ => state = FieldState::Unquoted,
            }
            i += 1;
        }

        self.pos = bytes.len();
        Some(&self.content[start..])
    }
}

/// Decode without replacement, dropping a BOM that matches `encoding`
pub fn decode_strict<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Result<Cow<'a, str>> {
    let body = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) if bom_encoding == encoding => &bytes[bom_len..],
        _ => bytes,
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            AppError::EncodingError(format!("input is not valid {}", encoding.name()))
        })
}
