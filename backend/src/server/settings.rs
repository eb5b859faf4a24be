//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PEOPLE_*` environment variables, and config
//! files. Every field is optional at load time; accessors apply defaults and
//! validate, so a misconfiguration is reported once at startup.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60 * 60;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_AGE_SOURCE_URL: &str = "https://api.agify.io/";
const DEFAULT_GENDER_SOURCE_URL: &str = "https://api.genderize.io/";
const DEFAULT_NATIONALITY_SOURCE_URL: &str = "https://api.nationalize.io/";

/// Invalid or missing settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set PEOPLE_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("bind_addr {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("{field} {value:?} is not a valid URL: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Configuration for the people service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PEOPLE")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Redis connection URL; the in-memory cache is used when absent.
    pub redis_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Deadline for each demographic lookup, in milliseconds.
    pub lookup_timeout_ms: Option<u64>,
    /// Lifetime of cached demographic stats, in seconds.
    pub cache_ttl_secs: Option<u64>,
    pub age_source_url: Option<String>,
    pub gender_source_url: Option<String>,
    pub nationality_source_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, SettingsError> {
    Url::parse(value).map_err(|err| SettingsError::InvalidUrl {
        field,
        value: value.to_owned(),
        reason: err.to_string(),
    })
}

fn positive(field: &'static str, value: u64) -> Result<u64, SettingsError> {
    if value == 0 {
        return Err(SettingsError::Zero { field });
    }
    Ok(value)
}

impl AppSettings {
    /// Return the database URL or fail when it is not configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Return the Redis URL, if configured and non-blank.
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: value.to_owned(),
        })
    }

    pub fn lookup_timeout(&self) -> Result<Duration, SettingsError> {
        let millis = self.lookup_timeout_ms.unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS);
        positive("lookup_timeout_ms", millis).map(Duration::from_millis)
    }

    pub fn cache_ttl(&self) -> Result<Duration, SettingsError> {
        let secs = self.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS);
        positive("cache_ttl_secs", secs).map(Duration::from_secs)
    }

    pub fn age_source_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "age_source_url",
            self.age_source_url.as_deref().unwrap_or(DEFAULT_AGE_SOURCE_URL),
        )
    }

    pub fn gender_source_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "gender_source_url",
            self.gender_source_url
                .as_deref()
                .unwrap_or(DEFAULT_GENDER_SOURCE_URL),
        )
    }

    pub fn nationality_source_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "nationality_source_url",
            self.nationality_source_url
                .as_deref()
                .unwrap_or(DEFAULT_NATIONALITY_SOURCE_URL),
        )
    }

    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        let value = self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS);
        if value == 0 {
            return Err(SettingsError::Zero {
                field: "db_max_connections",
            });
        }
        Ok(value)
    }
}
