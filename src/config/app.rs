use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration, read once at startup from a JSON
/// file and never re-read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub meta: MetaConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub app_name: String,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection: ConnectionConfig,
    pub pool: PoolConfig,
}

/// Store connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
}

/// Bounded-pool parameters. `reset_session` maps to testing a connection
/// before it is handed back out of the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    pub name: String,
    pub size: u32,
    #[serde(default)]
    pub reset_session: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl ConnectionConfig {
    /// Connection target for log lines, password omitted.
    pub fn summary(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
    {
        "meta": { "app_name": "fitness-app" },
        "database": {
            "connection": {
                "host": "localhost",
                "port": 5432,
                "database": "fitness",
                "user": "fitness",
                "password": "secret"
            },
            "pool": { "name": "fitness_pool", "size": 5, "reset_session": true }
        }
    }
    "#;

    #[test]
    fn parses_sample_config() {
        let config: AppConfig = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(config.meta.app_name, "fitness-app");
        assert_eq!(config.meta.log_filter, "info");
        assert_eq!(config.database.connection.port, 5432);
        assert_eq!(config.database.pool.size, 5);
        assert!(config.database.pool.reset_session);
    }

    #[test]
    fn reads_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.database.connection.summary(), "fitness@localhost:5432/fitness");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::from_file(Path::new("/nonexistent/config.json")).is_err());
    }

    #[test]
    fn summary_never_contains_the_password() {
        let config: AppConfig = serde_json::from_str(SAMPLE).unwrap();
        assert!(!config.database.connection.summary().contains("secret"));
    }
}
