//! Server configuration.
//!
//! Settings are layered from default values, an optional TOML file, and
//! environment variables, each overriding the one before.

use crate::Cli;
use catalog_axum::config::AxumConfig;
use catalog_sqlite::config::SqliteConfig;
use serde::{Deserialize, Serialize};

/// Everything `catalogd` reads at startup, one section per component.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration (bind address, environment, pagination limits)
    #[serde(default)]
    pub server: AxumConfig,

    /// Database configuration
    #[serde(default)]
    pub database: SqliteConfig,
}

impl AppConfig {
    /// Build the configuration. Built-in defaults come first, then the file
    /// named by `--config` if any, then variables named
    /// `APP_<SECTION>__<KEY>`, each overriding the previous layer:
    ///
    /// ```bash
    /// export APP_DATABASE__DATABASE_URL="sqlite://catalog.db"
    /// export APP_SERVER__BIND_ADDRESS="127.0.0.1:3000"
    /// export APP_SERVER__ENVIRONMENT="development"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            anyhow::ensure!(path.exists(), "no config file at {}", path.display());
            config = config.add_source(config::File::from(path.as_path()));
        }

        config = config.add_source(Self::environment());

        config.build()?.try_deserialize().map_err(Into::into)
    }

    // Maps APP_SERVER__BIND_ADDRESS to server.bind_address
    fn environment() -> config::Environment {
        config::Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_axum::config::Environment;
    use std::{io::Write as _, path::PathBuf};

    fn cli(config: Option<PathBuf>) -> Cli {
        Cli {
            config,
            secret: "secret".to_string(),
            schema: None,
        }
    }

    #[test]
    fn defaults() {
        let config = AppConfig::load(&cli(None)).unwrap();

        assert_eq!(config.server.bind_address.port(), 8080);
        assert_eq!(config.server.page_limit, 10);
        assert_eq!(config.server.max_page_limit, 100);
        assert!(config.database.create_if_missing);
    }

    #[test]
    fn file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("catalogd-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nenvironment = \"development\"\npage_limit = 25\n\n[database]\ndatabase_url = \"sqlite://catalog.db\""
        )
        .unwrap();

        let config = AppConfig::load(&cli(Some(path.clone()))).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.server.page_limit, 25);
        assert_eq!(config.server.max_page_limit, 100);
        assert_eq!(
            config.database.database_url.as_deref(),
            Some("sqlite://catalog.db")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/catalogd.toml");
        assert!(AppConfig::load(&cli(Some(path))).is_err());
    }
}
