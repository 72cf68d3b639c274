#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the catalog-axum crate.
//! [catalog_core]: https://docs.rs/catalog_core/latest/catalog_core/index.html
//! [catalog_axum]: https://docs.rs/catalog_axum/latest/catalog_axum/index.html
//! [catalog_sqlite]: https://docs.rs/catalog_sqlite/latest/catalog_sqlite/index.html
#![doc = include_str!("../README.md")]

mod payload;
mod product_routes;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::OpenApi,
};
use axum::{
    Extension, Json,
    middleware,
    response::IntoResponse,
};
use catalog_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::Serialize;
use std::{fmt::Display, str::FromStr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, event};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod auth;
use auth::Credential;

pub mod config;
use config::AxumConfig;

pub mod error;

/// Liveness probe body.
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Plain-text greeting at the root
async fn welcome() -> impl IntoApiResponse {
    "Product Catalog API. Products are served under /api/products and the documentation under /docs."
        .into_response()
}

/// Construct the full API router for the given application and config,
/// together with the OpenAPI document describing it.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let environment = config.environment;

    let routes = ApiRouter::new()
        .route("/", get(welcome))
        .api_route("/health", get(health))
        .nest("/api/products", product_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    // Arc is very important here or you will face massive memory and performance issues
    let api = Arc::new(api);

    let router = routes
        .fallback(error::route_not_found)
        .layer(Extension(api.clone()))
        .layer(Extension(Arc::new(config)))
        .layer(middleware::from_fn_with_state(
            environment,
            error::expose_stack,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    (router, api)
}

/// Starts the HTTP server with the provided configuration.
///
/// The server drains in-flight requests and returns once Ctrl-C or SIGTERM
/// is received.
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on the first of Ctrl-C or SIGTERM. A signal whose handler cannot
/// be installed is logged and never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            event!(Level::ERROR, err = err.to_string(), "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                event!(Level::ERROR, err = err.to_string(), "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// The bounds an [`Application`] needs to serve as router state.
///
/// Every handler is generic over `T: ApiApplication`; the blanket
/// implementation below means any application meeting the bounds qualifies
/// without further ceremony.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Credential,
        Repository: Send
                        + Sync
                        + 'static
                        + Repository<
            ProductId: Clone + Display + FromStr + Serialize + JsonSchema + Send + Sync + 'static,
            DateTime: Serialize + JsonSchema + Send + Sync + 'static,
        >,
    >
{
}

impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Credential,
            Repository: Send
                            + Sync
                            + 'static
                            + Repository<
                ProductId: Clone
                               + Display
                               + FromStr
                               + Serialize
                               + JsonSchema
                               + Send
                               + Sync
                               + 'static,
                DateTime: Serialize + JsonSchema + Send + Sync + 'static,
            >,
        >
{
}
