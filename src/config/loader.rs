use std::{env, time::Duration};

use url::Url;

use super::env::{AppConfig, ConfigError, DirectoryConfig, LoggingConfig, RemoteConfig};

pub const DEFAULT_ENDPOINT: &str = "https://clearbox.onrender.com/api/classify";
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
const DEFAULT_TIMEOUT_MS: u64 = 15_000;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = match lookup("CLASSIFIER_ENDPOINT") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(parse_endpoint(value.trim())?),
            None => Some(parse_endpoint(DEFAULT_ENDPOINT)?),
        };

        let remote = RemoteConfig {
            endpoint,
            timeout: Duration::from_millis(
                lookup("CLASSIFIER_TIMEOUT_MS")
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
        };

        let directories = DirectoryConfig {
            logs_dir: lookup("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
            exports_dir: lookup("EXPORTS_DIR").unwrap_or_else(|| "exports".to_string()),
        };

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        let timezone = lookup("CLEARBOX_TIMEZONE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        Ok(Self {
            remote,
            directories,
            logging,
            timezone,
        })
    }
}

fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::Invalid {
            key: "CLASSIFIER_ENDPOINT",
            value: value.to_string(),
        }),
    }
}
