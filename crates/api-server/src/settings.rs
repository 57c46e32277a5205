use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "EXERCISE_LOG";

/// Process settings, read from `EXERCISE_LOG_*` environment variables.
///
/// Without `EXERCISE_LOG_DB_PATH` the store lives in memory and is lost on
/// shutdown.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db_path: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_prefix(ENV_PREFIX)
    }

    pub(crate) fn with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 3000)?
            .add_source(Environment::with_prefix(prefix))
            .build()?;

        s.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
