//! Configuration management for the resume ranker

use crate::error::{Result, RankerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Catalogue id, Hugging Face repo id, or local model directory
    pub embedding_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// How many of the most frequent description keywords are matched
    pub top_n_keywords: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-ranker")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "potion-base-8M".to_string(),
            },
            scoring: ScoringConfig { top_n_keywords: 30 },
            input: InputConfig {
                max_file_size_mb: 16,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.input.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    fn validate(&self) -> Result<()> {
        if self.scoring.top_n_keywords == 0 {
            return Err(RankerError::Configuration(
                "scoring.top_n_keywords must be at least 1".to_string(),
            ));
        }
        if self.models.embedding_model.trim().is_empty() {
            return Err(RankerError::Configuration(
                "models.embedding_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.scoring.top_n_keywords, 30);
        assert_eq!(config.input.max_file_size_mb, 16);
        assert_eq!(config.max_file_size_bytes(), 16 * 1024 * 1024);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.top_n_keywords = 12;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scoring.top_n_keywords, 12);
        assert_eq!(loaded.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.top_n_keywords = 0;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(RankerError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "models = [not toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(RankerError::Configuration(_))
        ));
    }
}
