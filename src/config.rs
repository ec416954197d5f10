use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::api::NbpClient;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub nbp_api_url: String,
    pub chart_output: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nbp_api_url: NbpClient::DEFAULT_BASE_URL.to_string(),
            chart_output: PathBuf::from("gold_prices.png"),
            chart_width: 1024,
            chart_height: 768,
            http_timeout: Duration::from_secs(10),
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

impl AppConfig {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`; unset or blank keys fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let chart_width = parse_or(&lookup, "CHART_WIDTH", defaults.chart_width)?;
        let chart_height = parse_or(&lookup, "CHART_HEIGHT", defaults.chart_height)?;
        if chart_width == 0 || chart_height == 0 {
            return Err(ConfigError::Invalid {
                key: "CHART_WIDTH/CHART_HEIGHT",
                value: format!("{}x{}", chart_width, chart_height),
            });
        }

        let timeout_secs: u64 = parse_or(&lookup, "HTTP_TIMEOUT_SECS", defaults.http_timeout.as_secs())?;

        Ok(Self {
            nbp_api_url: lookup("NBP_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.nbp_api_url),
            chart_output: lookup("CHART_OUTPUT")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.chart_output),
            chart_width,
            chart_height,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
