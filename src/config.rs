//! Configuration management for the candidate matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub resume: ResumeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum skill match percentage (inclusive) for a candidate to be skill-eligible
    pub skill_threshold: f64,
    /// Evaluate requirements on the rayon thread pool
    pub parallel: bool,
    /// Skip the resume fetch when country or degree already failed
    pub short_circuit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    pub provider: ProviderKind,
    pub resume_dir: Option<PathBuf>,
    pub cache: bool,
    /// 0 disables the timeout
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Placeholder,
    Directory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Csv,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            skill_threshold: 60.0,
            parallel: false,
            short_circuit: true,
        }
    }
}

impl Default for ResumeConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Placeholder,
            resume_dir: None,
            cache: true,
            fetch_timeout_secs: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the per-user config file, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("candidate-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.matching.skill_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(MatcherError::Configuration(format!(
                "matching.skill_threshold must be within 0..=100, got {}",
                threshold
            )));
        }
        if self.resume.provider == ProviderKind::Directory && self.resume.resume_dir.is_none() {
            return Err(MatcherError::Configuration(
                "resume.provider = \"directory\" requires resume.resume_dir".to_string(),
            ));
        }
        Ok(())
    }

    /// Set a single value by dotted key, e.g. `matching.skill_threshold`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |e: String| MatcherError::Configuration(format!("{}: {}", key, e));

        let mut updated = self.clone();

        match key {
            "matching.skill_threshold" => {
                updated.matching.skill_threshold = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "matching.parallel" => {
                updated.matching.parallel = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "matching.short_circuit" => {
                updated.matching.short_circuit = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "resume.provider" => {
                updated.resume.provider = match value.to_lowercase().as_str() {
                    "placeholder" => ProviderKind::Placeholder,
                    "directory" => ProviderKind::Directory,
                    other => return Err(invalid(format!("unknown provider '{}'", other))),
                };
            }
            "resume.resume_dir" => {
                updated.resume.resume_dir = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }
            "resume.cache" => {
                updated.resume.cache = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "resume.fetch_timeout_secs" => {
                updated.resume.fetch_timeout_secs = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "output.format" => {
                updated.output.format = crate::cli::parse_output_format(value).map_err(invalid)?;
            }
            "output.detailed" => {
                updated.output.detailed = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            "output.color_output" => {
                updated.output.color_output = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            }
            _ => {
                return Err(MatcherError::Configuration(format!("Unknown configuration key: {}", key)));
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
