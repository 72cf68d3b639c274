//! Where the product store lives.

use serde::{Deserialize, Serialize};

/// Store settings, read from the `database` section of the server config.
///
/// ```
/// use catalog_sqlite::config::SqliteConfig;
///
/// // Nothing configured: a private in-memory catalog
/// let memory = SqliteConfig::default();
/// assert!(memory.database_url.is_none());
///
/// let file = SqliteConfig {
///     database_url: Some("sqlite://catalog.db".to_string()),
///     ..Default::default()
/// };
/// assert!(file.create_if_missing);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// `sqlite://<path>` or a bare path; in-memory when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Create the database file on first open
    #[serde(default = "create_by_default")]
    pub create_if_missing: bool,
}

fn create_by_default() -> bool {
    true
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            create_if_missing: create_by_default(),
        }
    }
}
