// ============================================================
// TRANSCODE CONFIGURATION
// ============================================================
// Encoding pair, placeholder and write behavior for one run

use encoding_rs::{Encoding, SHIFT_JIS};
use serde::{Deserialize, Serialize};

/// How a destination file gets replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Delete the destination, then write it in place.
    /// A failure mid-write leaves a truncated file behind.
    Direct,

    /// Write a temporary file next to the destination and rename it
    /// over the destination once every row is written
    Atomic,
}

/// Configuration for a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeConfig {
    /// Encoding label of the input files (default: utf-8)
    pub source_encoding: String,

    /// Encoding label of the output files (default: cp932)
    pub target_encoding: String,

    /// Written in place of characters the target encoding cannot represent
    pub placeholder: char,

    /// Destination replacement strategy (default: direct)
    pub write_mode: WriteMode,

    /// Exit with a failure status when any file fails to convert
    pub fail_on_error: bool,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            source_encoding: "utf-8".to_string(),
            target_encoding: "cp932".to_string(),
            placeholder: '?',
            write_mode: WriteMode::Direct,
            fail_on_error: false,
        }
    }
}

impl TranscodeConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Result<&'static Encoding, String> {
        resolve_encoding(&self.source_encoding)
    }

    pub fn target(&self) -> Result<&'static Encoding, String> {
        resolve_encoding(&self.target_encoding)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.source()?;
        let target = self.target()?;

        // UTF-16 and "replacement" decode only; encoding_rs would silently
        // emit UTF-8 for them
        if target.output_encoding() != target {
            return Err(format!(
                "target_encoding '{}' cannot be used for output",
                self.target_encoding
            ));
        }

        let mut buf = [0u8; 4];
        let (_, _, unmappable) = target.encode(self.placeholder.encode_utf8(&mut buf));
        if unmappable {
            return Err(format!(
                "placeholder '{}' is not representable in {}",
                self.placeholder,
                target.name()
            ));
        }
        Ok(())
    }
}

/// Resolve an encoding label, accepting the Windows code page names that
/// WHATWG labels leave out
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, String> {
    let normalized = label.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "cp932" | "windows-932" | "ms-932" => return Ok(SHIFT_JIS),
        _ => {}
    }
    Encoding::for_label(normalized.as_bytes())
        .ok_or_else(|| format!("unknown encoding label '{}'", label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{EUC_JP, UTF_8};

    #[test]
    fn test_default_config_is_valid() {
        let config = TranscodeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.source().unwrap(), UTF_8);
        assert_eq!(config.target().unwrap(), SHIFT_JIS);
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_encoding("CP932").unwrap(), SHIFT_JIS);
        assert_eq!(resolve_encoding("windows-31j").unwrap(), SHIFT_JIS);
        assert_eq!(resolve_encoding(" euc-jp ").unwrap(), EUC_JP);
        assert!(resolve_encoding("klingon").is_err());
    }

    #[test]
    fn test_rejects_decode_only_target() {
        let config = TranscodeConfig {
            target_encoding: "utf-16le".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_placeholder() {
        let config = TranscodeConfig {
            placeholder: '😀',
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("placeholder"));
    }
}
