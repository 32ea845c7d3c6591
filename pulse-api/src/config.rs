//! Server configuration

use std::path::PathBuf;
use std::time::Duration;

use pulse_providers::ConfigError;
use pulse_services::RefreshIntervals;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_FILE: &str = "data.json";
const DEFAULT_NEWS_REFRESH_SECS: u64 = 60 * 60;
const DEFAULT_ARTICLE_REFRESH_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Snapshot document location
    pub data_file: PathBuf,
    pub intervals: RefreshIntervals,
}

impl ServerConfig {
    /// Load from SERVER_PORT (or PORT), DATA_FILE, NEWS_REFRESH_SECS and ARTICLE_REFRESH_SECS
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port_var = ["SERVER_PORT", "PORT"]
            .into_iter()
            .find_map(|key| get(key).map(|value| (key, value)));
        let port = match port_var {
            Some((field, value)) => value.parse().map_err(|_| invalid(field, &value))?,
            None => DEFAULT_PORT,
        };

        let data_file = get("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let seconds = |key: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match get(key) {
                Some(value) => match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
                    _ => Err(invalid(key, &value)),
                },
                None => Ok(Duration::from_secs(default)),
            }
        };

        Ok(Self {
            port,
            data_file,
            intervals: RefreshIntervals {
                news: seconds("NEWS_REFRESH_SECS", DEFAULT_NEWS_REFRESH_SECS)?,
                article: seconds("ARTICLE_REFRESH_SECS", DEFAULT_ARTICLE_REFRESH_SECS)?,
            },
        })
    }
}

fn invalid(field: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
