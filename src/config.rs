//! Configuration management for the resume analyzer
//!
//! Credentials come from the environment at startup (a missing key or
//! endpoint is fatal before any request is issued); request and output
//! preferences live in a TOML file under the user config directory.

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct Config {
    pub azure: AzureConfig,
    pub request: RequestConfig,
    pub output: OutputConfig,
}

/// Azure OpenAI connection settings. Never serialized to disk.
#[derive(Debug, Clone)]
pub struct AzureConfig {
    pub api_key: String,
    pub endpoint: String,
    pub api_version: String,
    pub deployment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

/// On-disk portion of the configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    request: RequestConfig,
    #[serde(default)]
    output: OutputConfig,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 800,
            timeout_secs: 120,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl AzureConfig {
    /// Reads connection settings from the environment. The API key and
    /// endpoint are required; version and deployment fall back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = require_env("AZURE_OPENAI_API_KEY")?;
        let endpoint = require_env("AZURE_OPENAI_ENDPOINT")?;

        let api_version = env::var("AZURE_OPENAI_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        let deployment = env::var("AZURE_OPENAI_DEPLOYMENT_NAME")
            .unwrap_or_else(|_| DEFAULT_DEPLOYMENT.to_string());

        Ok(Self {
            api_key,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version,
            deployment,
        })
    }

    /// API key with everything but the last four characters masked,
    /// for `config show` output and logs.
    pub fn redacted_key(&self) -> String {
        let tail: String = self
            .api_key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{}", tail)
    }
}

fn require_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AnalyzerError::Configuration(format!(
            "{} is not set. Add it to the environment or a .env file.",
            name
        ))),
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let prefs = Self::load_preferences()?;
        let azure = AzureConfig::from_env()?;

        Ok(Self {
            azure,
            request: prefs.request,
            output: prefs.output,
        })
    }

    fn load_preferences() -> Result<Preferences> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let prefs: Preferences = toml::from_str(&content).map_err(|e| {
                AnalyzerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(prefs)
        } else {
            let prefs = Preferences::default();
            Self::save_preferences(&prefs)?;
            Ok(prefs)
        }
    }

    fn save_preferences(prefs: &Preferences) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(prefs).map_err(|e| {
            AnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Rewrites the preferences file with defaults. Credentials are
    /// untouched since they only ever live in the environment.
    pub fn reset_preferences() -> Result<()> {
        Self::save_preferences(&Preferences::default())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = RequestConfig::default();
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.max_tokens, 800);
        assert_eq!(request.timeout_secs, 120);
    }

    #[test]
    fn test_redacted_key_keeps_tail_only() {
        let azure = AzureConfig {
            api_key: "abcdef123456".to_string(),
            endpoint: "https://example.openai.azure.com".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
        };
        assert_eq!(azure.redacted_key(), "****3456");
    }

    #[test]
    fn test_preferences_roundtrip() {
        let prefs = Preferences::default();
        let content = toml::to_string_pretty(&prefs).unwrap();
        let parsed: Preferences = toml::from_str(&content).unwrap();
        assert_eq!(parsed.request.max_tokens, prefs.request.max_tokens);
        assert_eq!(parsed.output.format, OutputFormat::Console);
    }
}
