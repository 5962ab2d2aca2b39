use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub type AppConfig = CaptionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("failed to install logging: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptionConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default)]
    pub youtube: YouTubeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// No timeout is enforced when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_credentials: default_true(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            youtube: YouTubeConfig::default(),
        }
    }
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            base_url: default_youtube_base_url(),
            accept_language: default_accept_language(),
            request_timeout_secs: None,
        }
    }
}

pub trait ConfigLoader: Sized {
    fn create_default() -> Self;

    fn config_prefix() -> &'static str;

    /// Applies overrides looked up by suffix, e.g. `SERVER_PORT`.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>;
}

impl ConfigLoader for CaptionConfig {
    fn create_default() -> Self {
        CaptionConfig::default()
    }

    fn config_prefix() -> &'static str {
        "CAPTION_SERVICE"
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            self.server.port = parse("SERVER_PORT", &port)?;
        }
        if let Some(level) = get("LOGGING_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = get("LOGGING_FORMAT") {
            self.logging.format = match format.to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOGGING_FORMAT".to_string(),
                        value: format,
                        reason: "expected `pretty` or `json`".to_string(),
                    })
                }
            };
        }
        if let Some(allow) = get("CORS_ALLOW_CREDENTIALS") {
            self.cors.allow_credentials = parse("CORS_ALLOW_CREDENTIALS", &allow)?;
        }
        if let Some(language) = get("DEFAULT_LANGUAGE") {
            self.service.default_language = language;
        }
        if let Some(base_url) = get("YOUTUBE_BASE_URL") {
            self.service.youtube.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(accept_language) = get("YOUTUBE_ACCEPT_LANGUAGE") {
            self.service.youtube.accept_language = accept_language;
        }
        if let Some(timeout) = get("YOUTUBE_REQUEST_TIMEOUT_SECS") {
            self.service.youtube.request_timeout_secs =
                Some(parse("YOUTUBE_REQUEST_TIMEOUT_SECS", &timeout)?);
        }
        Ok(())
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|err| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: err.to_string(),
    })
}

/// Defaults overlaid with `CAPTION_SERVICE_*` environment variables.
pub fn load_config() -> Result<CaptionConfig, ConfigError> {
    let mut config = CaptionConfig::create_default();
    let prefix = CaptionConfig::config_prefix();
    config.apply_overrides(|key| std::env::var(format!("{prefix}_{key}")).ok())?;
    Ok(config)
}

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level. Fails if a global subscriber is already set.
pub fn setup_logging(config: &CaptionConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    let installed = match config.logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    installed.map_err(|err| ConfigError::Logging(err.to_string()))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "pl".to_string()
}

fn default_youtube_base_url() -> String {
    "https://www.youtube.com".to_string()
}

fn default_accept_language() -> String {
    "en-US".to_string()
}
