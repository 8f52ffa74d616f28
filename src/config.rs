use crate::error::ConfigError;
use crate::security::csrf::TOKEN_TTL_MS;
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the CSRF signing secret.
///
/// Deliberately env-only: the secret never lives in the config file, and
/// there is no built-in fallback. A deployment without it fails at startup
/// instead of silently issuing forgeable tokens.
pub const CSRF_SECRET_ENV: &str = "CSRF_SECRET";

/// Application configuration loaded from an optional YAML file.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// CSRF token validity window in milliseconds
    #[serde(default = "default_csrf_ttl_ms")]
    pub csrf_ttl_ms: i64,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_csrf_ttl_ms() -> i64 {
    TOKEN_TTL_MS
}

impl AppConfig {
    /// Load configuration from the `CONFIG_FILE` env var path, falling back
    /// to defaults when the variable is unset or the file is unusable.
    /// `BIND_ADDR` overrides the file.
    pub fn load() -> Self {
        let mut config = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_file(Path::new(&path)),
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }

        config
    }

    fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Read the signing secret from the environment.
    ///
    /// Errors when the variable is unset or empty; startup propagates this
    /// rather than defaulting.
    pub fn csrf_secret() -> Result<String, ConfigError> {
        match std::env::var(CSRF_SECRET_ENV) {
            Ok(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(ConfigError::MissingSecret(CSRF_SECRET_ENV)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            csrf_ttl_ms: default_csrf_ttl_ms(),
        }
    }
}
