use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration, read from the process environment.
///
/// - `DATABASE_URL` (required): where the submission store lives.
/// - `PORT` (default 5000)
/// - `HOST` (default 0.0.0.0)
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Path to the redb database file.
    pub db_path: PathBuf,

    /// Interface to bind.
    pub host: String,

    /// Listening port.
    pub port: u16,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = match lookup("PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let host = lookup("HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        Ok(Self {
            db_path: resolve_db_path(&database_url)?,
            host,
            port,
        })
    }

    /// `host:port` string for the TCP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        key: "PORT",
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Resolve `DATABASE_URL` to a database file path.
///
/// Accepts a bare path, `file://<path>` or `redb://<path>`.
pub fn resolve_db_path(url: &str) -> Result<PathBuf, ConfigError> {
    let url = url.trim();
    let path = match url.split_once("://") {
        Some(("file" | "redb", rest)) => rest,
        Some((scheme, _)) => {
            return Err(ConfigError::Invalid {
                key: "DATABASE_URL",
                value: url.to_string(),
                reason: format!("unsupported scheme {scheme:?}"),
            });
        }
        None => url,
    };

    if path.is_empty() {
        return Err(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: url.to_string(),
            reason: "empty path".to_string(),
        });
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[("DATABASE_URL", "/data/cover.redb")])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/cover.redb"));
        assert_eq!(config.port, 5000);
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "redb:///var/lib/cover/data.redb"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/cover/data.redb"));
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_database_url_required() {
        assert_eq!(
            ServiceConfig::from_lookup(lookup(&[("PORT", "8080")])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
        assert_eq!(
            ServiceConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = ServiceConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "data.redb"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_resolve_db_path() {
        assert_eq!(resolve_db_path("file://./data.redb").unwrap(), PathBuf::from("./data.redb"));
        assert_eq!(resolve_db_path("data.redb").unwrap(), PathBuf::from("data.redb"));
        assert!(resolve_db_path("mongodb://localhost/cover").is_err());
        assert!(resolve_db_path("redb://").is_err());
    }
}
