/// Configuration management for the API server
///
/// This module loads configuration from environment variables once at
/// startup and provides a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `PORT`: Port to bind to (default: 5000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `DATABASE_URL`: Full connection URL; overrides the `DB_*` variables
/// - `DB_HOST`: PostgreSQL host (default: localhost)
/// - `DB_PORT`: PostgreSQL port (default: 5432)
/// - `DB_USER`: PostgreSQL role (required unless `DATABASE_URL` is set)
/// - `DB_PASSWORD`: PostgreSQL password (default: empty)
/// - `DB_DATABASE`: Database name (required unless `DATABASE_URL` is set)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: Pool acquire timeout (default: 30)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use std::env;
use std::str::FromStr;
use taskboard_shared::db::pool::DatabaseConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Origins allowed to call the API from a browser; `*` allows any
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ApiConfig {
    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

/// Reads an optional variable and parses it, falling back to `default`
fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        None => Ok(default),
    }
}

fn required_var<F>(lookup: &F, name: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", name))
}

/// Splits a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from any variable source
    ///
    /// `lookup` returns the value of a variable, or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();
        let api = ApiConfig {
            host: lookup("API_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_origins),
        };

        let pool_defaults = DatabaseConfig::default();
        let mut database = DatabaseConfig {
            max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                pool_defaults.max_connections,
            )?,
            acquire_timeout_seconds: parse_var(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECONDS",
                pool_defaults.acquire_timeout_seconds,
            )?,
            ..pool_defaults
        };

        if let Some(url) = lookup("DATABASE_URL") {
            database.url = Some(url);
        } else {
            database.host = lookup("DB_HOST").unwrap_or(database.host);
            database.port = parse_var(&lookup, "DB_PORT", database.port)?;
            database.username = required_var(&lookup, "DB_USER")?;
            database.password = lookup("DB_PASSWORD").unwrap_or_default();
            database.database = required_var(&lookup, "DB_DATABASE")?;
        }

        if database.max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self { api, database })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
