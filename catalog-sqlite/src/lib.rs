#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog-sqlite crate.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
//! [catalog_axum]: https://docs.rs/catalog_axum/latest/catalog_axum/index.html
//! [catalog_sqlite]: https://docs.rs/catalog_sqlite/latest/catalog_sqlite/index.html
#![doc = include_str!("../README.md")]

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

const IN_MEMORY: &str = ":memory:";

/// The product store.
///
/// Reads go through `reader`, a pool of concurrent connections. Every write
/// goes through `writer`, which holds a single connection because SQLite
/// admits one writer at a time.
///
/// ```no_run
/// # use catalog_sqlite::{Db, config::SqliteConfig};
/// # async fn open() -> Result<Db, sqlx::Error> {
/// let db = Db::open(&SqliteConfig::default()).await?;
/// # Ok(db)
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Pool for listings, lookups and statistics
    pub reader: SqlitePool,
    /// Single-connection pool for inserts, updates and deletes
    pub writer: SqlitePool,
}

impl Db {
    /// Connect both pools and bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Fails when the URL does not parse, the file cannot be opened or
    /// created, or a migration does not apply.
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let url = config.database_url.as_deref().unwrap_or(IN_MEMORY);
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(config.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        // Cloned options share one in-memory database between the pools.
        // That database lives only while a connection is open, so the
        // writer holds its single connection for the life of the pool.
        let (reader, writer) = try_join!(
            SqlitePoolOptions::new().connect_with(options.clone()),
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options),
        )?;

        sqlx::migrate!("./schema").run(&writer).await?;
        tracing::debug!(database = url, "catalog database ready");

        Ok(Self { reader, writer })
    }
}
