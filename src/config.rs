//! Configuration management for the job matcher

use crate::error::{JobMatcherError, Result};
use crate::matcher::MatchSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub resume: ResumeConfig,
    pub matching: MatchingConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// Chunking parameters for indexing the resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeConfig {
    pub path: Option<PathBuf>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub similarity_threshold: f64,
    pub top_k_snippets: usize,
}

/// Job search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub provider: String,
    pub jobs_path: Option<PathBuf>,
    pub keywords: Vec<String>,
    pub location: Option<String>,
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub detailed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resume: ResumeConfig {
                path: None,
                chunk_size: 400,
                chunk_overlap: 50,
            },
            matching: MatchingConfig {
                similarity_threshold: 0.25,
                top_k_snippets: 3,
            },
            search: SearchConfig {
                provider: "local".to_string(),
                jobs_path: None,
                keywords: Vec::new(),
                location: None,
                max_results: 20,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                detailed: false,
            },
        }
    }
}

impl Config {
    /// Load the configuration from the default path, creating it with
    /// defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load from an explicit path, or fall back to the default location.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                JobMatcherError::Configuration(format!("Failed to parse config: {e}"))
            })?;
            Ok(config)
        } else if path.is_some() {
            Err(JobMatcherError::Configuration(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            JobMatcherError::Configuration(format!("Failed to serialize config: {e}"))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            similarity_threshold: self.matching.similarity_threshold,
            top_k_snippets: self.matching.top_k_snippets,
        }
    }
}
