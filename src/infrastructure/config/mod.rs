// ============================================================
// CONFIG LOADING
// ============================================================
// Defaults <- TOML file <- CSV_RECODE_* environment variables

use std::env;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::domain::error::{AppError, Result};
use crate::domain::transcode::TranscodeConfig;

pub const ENV_PREFIX: &str = "CSV_RECODE_";
pub const CONFIG_PATH_VAR: &str = "CSV_RECODE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "csv-recode.toml";

pub struct ConfigService {
    file: Option<PathBuf>,
}

impl ConfigService {
    /// Config file from `CSV_RECODE_CONFIG`, else `csv-recode.toml` when present
    pub fn new() -> Self {
        let file = env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            });
        Self { file }
    }

    pub fn with_file(path: impl AsRef<Path>) -> Self {
        Self {
            file: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(TranscodeConfig::default()));
        if let Some(file) = &self.file {
            figment = figment.merge(Toml::file(file));
        }
        // The config-path variable itself is not a config key
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn load(&self) -> Result<TranscodeConfig> {
        if let Some(file) = &self.file {
            if !file.is_file() {
                return Err(AppError::ConfigError(format!(
                    "config file {} does not exist",
                    file.display()
                )));
            }
        }

        let config: TranscodeConfig = self
            .figment()
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate().map_err(AppError::ConfigError)?;

        tracing::debug!(
            source_encoding = %config.source_encoding,
            target_encoding = %config.target_encoding,
            write_mode = ?config.write_mode,
            "Loaded transcode config"
        );
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
