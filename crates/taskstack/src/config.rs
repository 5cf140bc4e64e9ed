use std::{env, fmt, str::FromStr, time::Duration};

use taskstack_core::cache::TASKS_CACHE_TTL_SECS;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL host (default: "postgres-db")
    pub postgres_host: String,
    /// PostgreSQL port (default: 5432)
    pub postgres_port: u16,
    /// PostgreSQL database name (default: "appdb")
    pub postgres_db: String,
    /// PostgreSQL user (default: "appuser")
    pub postgres_user: String,
    /// PostgreSQL password (default: "apppass")
    pub postgres_password: String,
    /// Upper bound on pooled PostgreSQL connections (default: 5)
    pub postgres_max_connections: u32,
    /// Seconds to wait for a pooled PostgreSQL connection (default: 3)
    pub postgres_acquire_timeout_seconds: u64,
    /// Redis host (default: "redis-cache")
    pub redis_host: String,
    /// Redis port (default: 6379)
    pub redis_port: u16,
    /// Seconds allowed for a Redis connect or command (default: 2)
    pub redis_timeout_seconds: u64,
    /// Cache TTL in seconds (default: 60)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 1,000)
    pub cache_max_entries: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `POSTGRES_HOST` - Database host (default: "postgres-db")
    /// - `POSTGRES_PORT` - Database port (default: 5432)
    /// - `POSTGRES_DB` - Database name (default: "appdb")
    /// - `POSTGRES_USER` - Database user (default: "appuser")
    /// - `POSTGRES_PASSWORD` - Database password (default: "apppass")
    /// - `POSTGRES_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `POSTGRES_ACQUIRE_TIMEOUT_SECONDS` - Pool acquire timeout (default: 3)
    /// - `REDIS_HOST` - Redis host (default: "redis-cache")
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_TIMEOUT_SECONDS` - Redis connect/response timeout (default: 2)
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 60)
    /// - `CACHE_MAX_ENTRIES` - In-memory cache capacity (default: 1,000)
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            postgres_host: text_var(&lookup, "POSTGRES_HOST", "postgres-db"),
            postgres_port: parsed_var(&lookup, "POSTGRES_PORT", 5432),
            postgres_db: text_var(&lookup, "POSTGRES_DB", "appdb"),
            postgres_user: text_var(&lookup, "POSTGRES_USER", "appuser"),
            postgres_password: text_var(&lookup, "POSTGRES_PASSWORD", "apppass"),
            postgres_max_connections: parsed_var(&lookup, "POSTGRES_MAX_CONNECTIONS", 5),
            postgres_acquire_timeout_seconds: parsed_var(
                &lookup,
                "POSTGRES_ACQUIRE_TIMEOUT_SECONDS",
                3,
            ),
            redis_host: text_var(&lookup, "REDIS_HOST", "redis-cache"),
            redis_port: parsed_var(&lookup, "REDIS_PORT", 6379),
            redis_timeout_seconds: parsed_var(&lookup, "REDIS_TIMEOUT_SECONDS", 2),
            cache_ttl_seconds: parsed_var(&lookup, "CACHE_TTL_SECONDS", TASKS_CACHE_TTL_SECS),
            cache_max_entries: parsed_var(&lookup, "CACHE_MAX_ENTRIES", 1_000),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// How long a request may wait for a pooled PostgreSQL connection.
    #[cfg_attr(not(feature = "postgres"), allow(dead_code))]
    pub fn postgres_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.postgres_acquire_timeout_seconds)
    }

    /// Connect and response timeout for Redis commands.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub fn redis_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_timeout_seconds)
    }

    /// Redis connection URL built from host and port.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}", self.redis_host, self.redis_port)
    }

    /// PostgreSQL connection options built from the individual settings.
    #[cfg(feature = "postgres")]
    pub fn pg_connect_options(&self) -> sqlx::postgres::PgConnectOptions {
        sqlx::postgres::PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .database(&self.postgres_db)
            .username(&self.postgres_user)
            .password(&self.postgres_password)
    }
}

fn text_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parsed_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("postgres_host", &self.postgres_host)
            .field("postgres_port", &self.postgres_port)
            .field("postgres_db", &self.postgres_db)
            .field("postgres_user", &self.postgres_user)
            .field("postgres_password", &"<redacted>")
            .field("postgres_max_connections", &self.postgres_max_connections)
            .field(
                "postgres_acquire_timeout_seconds",
                &self.postgres_acquire_timeout_seconds,
            )
            .field("redis_host", &self.redis_host)
            .field("redis_port", &self.redis_port)
            .field("redis_timeout_seconds", &self.redis_timeout_seconds)
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("cache_max_entries", &self.cache_max_entries)
            .finish()
    }
}
