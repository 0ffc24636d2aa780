//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::postgres;
use smart_default::SmartDefault;

/// Configuration of the lease schedule engine.
///
/// Values are taken from an optional TOML file, overridden by the
/// `LEASE__`-prefixed environment variables (`LEASE__DATABASE__HOST` sets
/// `database.host`, for example).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: Server,

    /// Lease storage configuration.
    pub database: Database,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Prefix of the environment variables overriding [`Config`] values.
    pub const ENV_PREFIX: &'static str = "LEASE";

    /// Loads a new [`Config`] from the file at the provided `path` (if it
    /// exists) and the environment variables.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::build(
            ConfigBuilder::<DefaultState>::default()
                .add_source(
                    config::File::with_name(path.as_ref()).required(false),
                )
                .add_source(
                    config::Environment::with_prefix(Self::ENV_PREFIX)
                        .prefix_separator("__")
                        .separator("__"),
                ),
        )
    }

    /// Builds a new [`Config`] out of the provided sources, filling missing
    /// values with defaults.
    fn build(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// Origins allowed to call the GraphQL API from a browser.
    #[default(vec!["*".to_owned()])]
    pub allowed_origins: Vec<String>,
}

/// Lease storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Database {
    /// Host of the Postgres server.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port of the Postgres server.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Name of the database storing leases and their payment records.
    #[default("leases".to_owned())]
    pub name: String,

    /// Maximum number of pooled connections.
    #[default(16)]
    pub pool_size: usize,

    /// Indicates whether pending migrations are applied on start.
    #[default(true)]
    pub migrate: bool,
}

impl From<&Database> for postgres::Config {
    fn from(db: &Database) -> Self {
        Self {
            host: Some(db.host.clone()),
            port: Some(db.port),
            user: Some(db.user.clone()),
            password: Some(db.password.clone()),
            dbname: Some(db.name.clone()),
            pool: Some(postgres::PoolConfig::new(db.pool_size)),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Maximum level of the emitted logs.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Everything, including every executed GraphQL field.
    Trace,

    /// Diagnostic details.
    Debug,

    /// Generated payment schedules and served requests.
    #[default]
    Info,

    /// Failed requests.
    Warn,

    /// Failures of the server itself.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
