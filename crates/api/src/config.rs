use std::str::FromStr;

use photopack_core::archiver::DEFAULT_CONCURRENCY;
use photopack_core::error::CoreError;
use photopack_unsplash::{Timeouts, UnsplashConfig, DEFAULT_API_URL};

/// Server configuration loaded from environment variables.
///
/// Everything except the Unsplash access key has a default suitable for
/// running the tool locally.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Timeout for search requests in seconds (default: `300`). Archive
    /// downloads are bounded by the provider call timeouts instead.
    pub request_timeout_secs: u64,
    /// Images fetched in parallel per archive (default: `6`).
    pub archive_concurrency: usize,
    /// Unsplash credential and endpoint.
    pub unsplash: UnsplashConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `UNSPLASH_ACCESS_KEY`  | required (or `UNSPLASH_KEY`) |
    /// | `UNSPLASH_API_URL`     | `https://api.unsplash.com` |
    /// | `HOST`                 | `127.0.0.1`                |
    /// | `PORT`                 | `5001`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                      |
    /// | `ARCHIVE_CONCURRENCY`  | `6`                        |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key = lookup("UNSPLASH_ACCESS_KEY")
            .or_else(|| lookup("UNSPLASH_KEY"))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                CoreError::Configuration(
                    "UNSPLASH_ACCESS_KEY is not set; add it to the environment or .env and restart"
                        .to_string(),
                )
            })?;

        let api_url = lookup("UNSPLASH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port: u16 = parse_var(&lookup, "PORT", 5001)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 300)?;
        let archive_concurrency: usize =
            parse_var(&lookup, "ARCHIVE_CONCURRENCY", DEFAULT_CONCURRENCY)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            archive_concurrency,
            unsplash: UnsplashConfig {
                access_key,
                api_url,
                timeouts: Timeouts::default(),
            },
        })
    }
}

/// Parse an optional variable, using `default` when unset.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, CoreError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            CoreError::Configuration(format!("{key} has invalid value '{raw}': {e}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, CoreError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = load(&[("UNSPLASH_ACCESS_KEY", "abc")]).unwrap();

        assert_eq!(config.unsplash.access_key, "abc");
        assert_eq!(config.unsplash.api_url, DEFAULT_API_URL);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5001);
        assert_eq!(config.cors_origins, ["http://localhost:5001"]);
        assert_eq!(config.request_timeout_secs, 300);
        assert_eq!(config.archive_concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.unsplash.timeouts, Timeouts::default());
    }

    #[test]
    fn legacy_key_name_is_accepted() {
        let config = load(&[("UNSPLASH_KEY", "legacy")]).unwrap();
        assert_eq!(config.unsplash.access_key, "legacy");
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        assert_matches!(load(&[]), Err(CoreError::Configuration(msg)) if msg.contains("UNSPLASH_ACCESS_KEY"));
    }

    #[test]
    fn blank_key_is_a_configuration_error() {
        assert_matches!(
            load(&[("UNSPLASH_ACCESS_KEY", "   ")]),
            Err(CoreError::Configuration(_))
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("UNSPLASH_ACCESS_KEY", "abc"),
            ("UNSPLASH_API_URL", "http://localhost:9999"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("REQUEST_TIMEOUT_SECS", "60"),
            ("ARCHIVE_CONCURRENCY", "4"),
        ])
        .unwrap();

        assert_eq!(config.unsplash.api_url, "http://localhost:9999");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.archive_concurrency, 4);
    }

    #[test]
    fn invalid_port_is_a_configuration_error() {
        assert_matches!(
            load(&[("UNSPLASH_ACCESS_KEY", "abc"), ("PORT", "http")]),
            Err(CoreError::Configuration(msg)) if msg.starts_with("PORT")
        );
    }
}
