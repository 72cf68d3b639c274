//! Application implementation with a shared API key.
//!
//! A single secret, supplied on the command line or through `APP_SECRET`,
//! authorizes every product change. Reads need no credential.

use catalog_axum::auth::Credential;
use catalog_core::ports::Application;
use catalog_sqlite::Db;
use std::sync::Arc;

/// The catalog server, backed by SQLite.
#[derive(Clone)]
pub struct CatalogApp {
    /// Database connection for persistent storage
    pub db: Db,
    secret: Arc<str>,
}

impl CatalogApp {
    /// Create the application, rejecting an empty secret.
    pub fn new(db: Db, secret: &str) -> anyhow::Result<Self> {
        if secret.trim().is_empty() {
            return Err(anyhow::anyhow!("The API secret must not be empty"));
        }
        Ok(Self {
            db,
            secret: secret.into(),
        })
    }
}

impl Application for CatalogApp {
    type Context = Credential;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    async fn can_manage_products(&self, context: &Self::Context) -> bool {
        // Exact match, no trimming or case folding
        context.as_str() == &*self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_sqlite::config::SqliteConfig;
    use tokio_test::block_on;

    async fn app(secret: &str) -> anyhow::Result<CatalogApp> {
        let db = Db::open(&SqliteConfig::default()).await?;
        CatalogApp::new(db, secret)
    }

    #[test]
    fn only_the_exact_secret_manages_products() {
        let app = block_on(app("s3cret")).unwrap();
        let allowed = |key: &str| block_on(app.can_manage_products(&Credential::new(key)));

        assert!(allowed("s3cret"));
        assert!(!allowed("S3CRET"));
        assert!(!allowed("s3cret "));
        assert!(!allowed("other"));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(block_on(app("")).is_err());
        assert!(block_on(app("   ")).is_err());
    }
}
