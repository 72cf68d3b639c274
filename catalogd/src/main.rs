use std::fs::File;

use catalog_axum::{router, start_server};
use catalog_sqlite::Db;
use catalogd::{AppConfig, Cli, impls::CatalogApp};
use tracing::{Level, event};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is configured through RUST_LOG, e.g. RUST_LOG=info
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Help, version, and usage errors print themselves and exit
    let cli = Cli::import().unwrap_or_else(|err| err.exit());

    if let Err(err) = run(cli).await {
        event!(Level::ERROR, err = format!("{err:#}"), "catalogd failed to start");
        return Err(err);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = CatalogApp::new(db, &cli.secret)?;

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = router(app, server).1;
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    event!(
        Level::INFO,
        environment = ?server.environment,
        "starting catalog server"
    );
    start_server(server, app).await?;

    Ok(())
}
