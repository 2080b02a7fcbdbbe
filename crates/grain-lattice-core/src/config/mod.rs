//! Configuration management for the grain-lattice components.

mod sub_configs;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use sub_configs::{ChunkerConfig, LoggingConfig, PhiConfig};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunker: ChunkerConfig,
    #[serde(default)]
    pub phi: PhiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{GRAIN_LATTICE_ENV}.toml (environment-specific)
    /// 3. Environment variables with GRAIN_LATTICE_ prefix
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var("GRAIN_LATTICE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("GRAIN_LATTICE").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(chunk_size = config.chunker.chunk_size, "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Out-of-domain values that would hang the chunker or degenerate the
    /// numeral encoder are rejected here rather than at use sites.
    pub fn validate(&self) -> CoreResult<()> {
        if self.chunker.chunk_size == 0 {
            return Err(CoreError::ConfigError(
                "chunker.chunk_size must be greater than 0".into(),
            ));
        }
        if let Some(step) = self.chunker.overlap_step {
            if step == 0 || step > self.chunker.chunk_size {
                return Err(CoreError::ConfigError(format!(
                    "chunker.overlap_step ({}) must be in 1..=chunk_size ({})",
                    step, self.chunker.chunk_size
                )));
            }
        }
        if self.chunker.delimiters.is_empty() {
            return Err(CoreError::ConfigError(
                "chunker.delimiters must not be empty".into(),
            ));
        }
        if self.phi.max_precision == 0 {
            return Err(CoreError::ConfigError(
                "phi.max_precision must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HORIZON_FRAME_SIZE;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunker.chunk_size, HORIZON_FRAME_SIZE);
        assert_eq!(config.chunker.overlap_step, None);
        assert_eq!(config.phi.max_precision, 32);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = Config::default();
        config.chunker.chunk_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk_size"));
    }

    #[test]
    fn test_overlap_step_out_of_range_rejected() {
        let mut config = Config::default();
        config.chunker.chunk_size = 100;
        config.chunker.overlap_step = Some(101);
        assert!(config.validate().is_err());
        config.chunker.overlap_step = Some(0);
        assert!(config.validate().is_err());
        config.chunker.overlap_step = Some(100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("parse");
        assert_eq!(parsed.chunker.chunk_size, config.chunker.chunk_size);
        assert_eq!(parsed.chunker.delimiters, config.chunker.delimiters);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[chunker]\nchunk_size = 512\noverlap_step = 256\n\n[phi]\nmax_precision = 16\n"
        )
        .expect("write");

        let config = Config::from_file(file.path()).expect("load");
        assert_eq!(config.chunker.chunk_size, 512);
        assert_eq!(config.chunker.overlap_step, Some(256));
        assert_eq!(config.phi.max_precision, 16);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[chunker]\nchunk_size = 0\n").expect("write");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_build_chunker_from_config() {
        let mut config = Config::default();
        config.chunker.chunk_size = 1024;
        let chunker = config.chunker.build().expect("build");
        assert_eq!(chunker.chunk_size(), 1024);
        // Default step derives from the golden ratio
        assert_eq!(chunker.overlap_step(), 632);
    }
}
