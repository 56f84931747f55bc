//! Application settings loaded from environment variables.
//!
//! Every value has a default so the backend starts with an empty environment. Call
//! `dotenvy::dotenv()` before [`Config::from_env`] to pick up a local `.env` file.

use std::{fmt, str::FromStr};

use crate::server::error::config::ConfigError;

/// Global prefix for every module endpoint, e.g. `/api/home`.
pub const ENDPOINT_API: &str = "/api";

/// Responses smaller than this many bytes are sent uncompressed.
pub const GZIP_MINIMUM_SIZE: u16 = 100;

/// gzip compression level applied to responses.
pub const GZIP_COMPRESS_LEVEL: i32 = 6;

static DEFAULT_CORS_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS,PATCH";
static DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Output format of the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Colored output with source location, for local development
    #[default]
    Default,
    /// Plain `LEVEL: message` lines for log collectors in cloud environments
    Cloud,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "cloud" => Ok(Self::Cloud),
            other => Err(format!("expected `default` or `cloud`, got `{}`", other)),
        }
    }
}

/// Supported database backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseProvider {
    Postgresql,
    Mysql,
    Sqlite,
}

impl FromStr for DatabaseProvider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "postgresql" => Ok(Self::Postgresql),
            "mysql" => Ok(Self::Mysql),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!(
                "expected `postgresql`, `mysql` or `sqlite`, got `{}`",
                other
            )),
        }
    }
}

impl fmt::Display for DatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        };

        f.write_str(name)
    }
}

/// Parts of a network database connection URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub db: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

impl ConnectionParams {
    fn localhost(port: u16) -> Self {
        Self {
            db: None,
            username: None,
            password: None,
            host: "127.0.0.1".to_string(),
            port,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// `None` runs the backend without a database
    pub provider: Option<DatabaseProvider>,
    /// Log every SQL statement executed
    pub echo: bool,
    pub postgresql: ConnectionParams,
    pub mysql: ConnectionParams,
    /// File path of the SQLite database, `:memory:` for an in-memory database
    pub sqlite_path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            provider: None,
            echo: false,
            postgresql: ConnectionParams::localhost(5432),
            mysql: ConnectionParams::localhost(3306),
            sqlite_path: ":memory:".to_string(),
        }
    }
}

/// Cross-Origin Resource Sharing rules, `*` allows everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: vec!["*".to_string()],
            allow_methods: parse_list(DEFAULT_CORS_METHODS),
            allow_headers: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub logger: LogFormat,
    pub database: DatabaseSettings,
    /// Application modules mounted under [`ENDPOINT_API`], in registration order
    pub installed_modules: Vec<String>,
    pub cors: CorsConfig,
    /// Send the security headers (CSP, HSTS, frame options...) with every response
    pub use_secweb: bool,
    /// Log every request with a generated `x-request-id`
    pub log_requests: bool,
    /// Largest request body accepted, in bytes
    pub max_body_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            logger: LogFormat::Default,
            database: DatabaseSettings::default(),
            installed_modules: vec!["home".to_string()],
            cors: CorsConfig::default(),
            use_secweb: false,
            log_requests: false,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();

        let provider = match env.get("DATABASE_PROVIDER") {
            Some(value) => Some(env.parse_value("DATABASE_PROVIDER", &value)?),
            None => None,
        };

        let database = DatabaseSettings {
            provider,
            echo: env.flag("DATABASE_ECHO"),
            postgresql: env.connection("POSTGRESQL", 5432)?,
            mysql: env.connection("MYSQL", 3306)?,
            sqlite_path: env
                .get("SQLITE_PATH")
                .unwrap_or(defaults.database.sqlite_path),
        };

        let cors = CorsConfig {
            allow_origins: env
                .list("CORS_ALLOW_ORIGINS")
                .unwrap_or(defaults.cors.allow_origins),
            allow_methods: env
                .list("CORS_ALLOW_METHODS")
                .unwrap_or(defaults.cors.allow_methods),
            allow_headers: env
                .list("CORS_ALLOW_HEADERS")
                .unwrap_or(defaults.cors.allow_headers),
        };

        Ok(Self {
            host: env.get("HOST").unwrap_or(defaults.host),
            port: env.parse_or("PORT", defaults.port)?,
            logger: env.parse_or("DEFAULT_LOGGER", defaults.logger)?,
            database,
            installed_modules: env
                .list("INSTALLED_MODULES")
                .unwrap_or(defaults.installed_modules),
            cors,
            use_secweb: env.flag("USE_SECWEB"),
            log_requests: env.flag("LOG_REQUESTS"),
            max_body_size: env.parse_or("MAX_BODY_SIZE", defaults.max_body_size)?,
        })
    }
}

/// Returns true for `true`, `1`, `yes` and `on`, ignoring case and surrounding whitespace.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// Splits a comma separated list, trimming items and dropping empty ones.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| parse_bool_flag(&value))
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|value| parse_list(&value))
    }

    fn parse_value<T>(&self, key: &str, value: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            Some(value) => self.parse_value(key, &value),
            None => Ok(default),
        }
    }

    fn connection(&self, prefix: &str, default_port: u16) -> Result<ConnectionParams, ConfigError> {
        let defaults = ConnectionParams::localhost(default_port);

        Ok(ConnectionParams {
            db: self.get(&format!("{}_DB", prefix)),
            username: self.get(&format!("{}_USERNAME", prefix)),
            password: self.get(&format!("{}_PASSWORD", prefix)),
            host: self
                .get(&format!("{}_HOST", prefix))
                .unwrap_or(defaults.host),
            port: self.parse_or(&format!("{}_PORT", prefix), defaults.port)?,
        })
    }
}
