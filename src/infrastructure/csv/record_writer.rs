// ============================================================
// RECORD WRITER
// ============================================================
// Fully quoted CSV output, re-encoded with placeholder substitution

use std::io::{self, Write};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use encoding_rs::{Encoder, EncoderResult, Encoding};

use crate::domain::error::Result;

const SCRATCH_LEN: usize = 8 * 1024;

/// `Write` adapter taking UTF-8 bytes and emitting `encoding` bytes.
///
/// Characters the target cannot represent are replaced by the placeholder,
/// which must itself be representable. Writes may split a UTF-8 sequence;
/// the incomplete tail is held until the next write.
pub struct EncodingWriter<W: Write> {
    inner: W,
    encoder: Encoder,
    placeholder: String,
    pending: Vec<u8>,
    scratch: Vec<u8>,
    placeholders: usize,
}

impl<W: Write> EncodingWriter<W> {
    pub fn new(inner: W, encoding: &'static Encoding, placeholder: char) -> Self {
        Self {
            inner,
            encoder: encoding.new_encoder(),
            placeholder: placeholder.to_string(),
            pending: Vec::new(),
            scratch: vec![0u8; SCRATCH_LEN],
            placeholders: 0,
        }
    }

    /// Number of characters replaced so far
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Flush encoder state and hand back the inner writer
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        if !self.pending.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream ended inside a UTF-8 sequence",
            ));
        }
        self.encode_str("", true)?;
        self.inner.flush()?;
        Ok((self.inner, self.placeholders))
    }

    fn encode_str(&mut self, mut src: &str, last: bool) -> io::Result<()> {
        loop {
            let (result, read, written) =
                self.encoder
                    .encode_from_utf8_without_replacement(src, &mut self.scratch, last);
            self.inner.write_all(&self.scratch[..written])?;
            src = &src[read..];

            match result {
                EncoderResult::InputEmpty => return Ok(()),
                EncoderResult::OutputFull => {}
                EncoderResult::Unmappable(_) => {
                    self.placeholders += 1;
                    let placeholder = std::mem::take(&mut self.placeholder);
                    let outcome = self.encode_str(&placeholder, false);
                    self.placeholder = placeholder;
                    outcome?;
                }
            }
        }
    }
}

impl<W: Write> Write for EncodingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        let pending = std::mem::take(&mut self.pending);

        let valid_len = match std::str::from_utf8(&pending) {
            Ok(text) => text.len(),
            // Incomplete sequence at the end: keep it for the next write
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        let (head, tail) = pending.split_at(valid_len);
        let text = std::str::from_utf8(head)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.encode_str(text, false)?;
        self.pending = tail.to_vec();

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

const TERMINATOR: &[u8] = b"\r\n";

/// Fully quoted CSV writer on top of an [`EncodingWriter`].
///
/// Each row is serialized on its own so a blank source line can be written
/// as a bare terminator; `csv::Writer` turns an empty record into `""`.
pub struct RecordWriter<W: Write> {
    builder: WriterBuilder,
    row_buf: Vec<u8>,
    out: EncodingWriter<W>,
    rows: usize,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, encoding: &'static Encoding, placeholder: char) -> Self {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(b',')
            .quote_style(QuoteStyle::Always)
            .double_quote(true)
            .terminator(Terminator::CRLF)
            .buffer_capacity(1024);

        Self {
            builder,
            row_buf: Vec::new(),
            out: EncodingWriter::new(inner, encoding, placeholder),
            rows: 0,
        }
    }

    pub fn write_row<I, T>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.row_buf.clear();
        {
            let mut row_writer = self.builder.from_writer(&mut self.row_buf);
            row_writer.write_record(row)?;
            row_writer.flush()?;
        }
        self.out.write_all(&self.row_buf)?;
        self.rows += 1;
        Ok(())
    }

    /// An empty record: just the terminator, no quoted empty field
    pub fn write_blank_row(&mut self) -> Result<()> {
        self.out.write_all(TERMINATOR)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush everything; returns the inner writer and the placeholder count
    pub fn finish(self) -> Result<(W, usize)> {
        Ok(self.out.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::RecordReader;
    use encoding_rs::{ISO_2022_JP, SHIFT_JIS, UTF_8};

    fn write_rows(rows: &[Vec<&str>], encoding: &'static Encoding) -> (Vec<u8>, usize) {
        let mut writer = RecordWriter::new(Vec::new(), encoding, '?');
        for row in rows {
            writer.write_row(row).unwrap();
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_every_field_is_quoted() {
        let (bytes, _) = write_rows(&[vec!["a", "", "1,2", "say \"hi\""]], UTF_8);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "\"a\",\"\",\"1,2\",\"say \"\"hi\"\"\"\r\n"
        );
    }

    #[test]
    fn test_blank_row_is_a_bare_terminator() {
        let mut writer = RecordWriter::new(Vec::new(), UTF_8, '?');
        writer.write_row(["a"]).unwrap();
        writer.write_blank_row().unwrap();
        writer.write_row(["b"]).unwrap();
        assert_eq!(writer.rows(), 3);

        let (bytes, _) = writer.finish().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "\"a\"\r\n\r\n\"b\"\r\n");
    }

    #[test]
    fn test_quoting_round_trip() {
        let rows = vec![
            vec!["comma, inside", "quote \" inside", "marker\\nkept"],
            vec!["", "solo"],
        ];
        let (bytes, _) = write_rows(&rows, UTF_8);
        let text = String::from_utf8(bytes).unwrap();

        let mut reader = RecordReader::new().reader(&text);
        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();

        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_unmappable_characters_become_placeholders() {
        let (bytes, placeholders) = write_rows(&[vec!["日本🦀", "é"]], SHIFT_JIS);
        let (decoded, _, _) = SHIFT_JIS.decode(&bytes);

        assert_eq!(decoded, "\"日本?\",\"?\"\r\n");
        assert_eq!(placeholders, 2);
    }

    #[test]
    fn test_stateful_encoding_is_terminated() {
        let (bytes, _) = write_rows(&[vec!["日本"]], ISO_2022_JP);
        let (decoded, _, had_errors) = ISO_2022_JP.decode(&bytes);

        assert!(!had_errors);
        assert_eq!(decoded, "\"日本\"\r\n");
        // Ends back in ASCII mode before the terminator
        assert!(bytes.ends_with(b"\"\r\n"));
    }

    #[test]
    fn test_split_utf8_sequence_across_writes() {
        let mut writer = EncodingWriter::new(Vec::new(), SHIFT_JIS, '?');
        let bytes = "日本".as_bytes();
        writer.write_all(&bytes[..1]).unwrap();
        writer.write_all(&bytes[1..4]).unwrap();
        writer.write_all(&bytes[4..]).unwrap();

        let (out, placeholders) = writer.finish().unwrap();
        assert_eq!(out, b"\x93\xfa\x96\x7b");
        assert_eq!(placeholders, 0);
    }
}
