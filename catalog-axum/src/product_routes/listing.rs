use super::{Envelope, Listing, Matches, Record};
use crate::{ApiApplication, config::AxumConfig, error::ApiError, payload::Params};
use axum::{Extension, Json, extract::State};
use catalog_core::{
    models::{CatalogStats, Page},
    ports::ProductRepository as _,
    query::{ListParams, ProductFilter, ProductQuery, Sort},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// List products, filtered, sorted, and paginated.
///
/// Unusable parameters are ignored rather than rejected. The page size
/// defaults to the configured `page_limit` and is capped at
/// `max_page_limit`.
///
/// # Returns
///
/// - `200 OK`: One page of matching products with navigation counts
/// - `500 Internal Server Error`: Database query failed
pub(super) async fn list_products<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Params(params): Params<ListParams>,
) -> Result<Json<Listing<Record<T>>>, ApiError> {
    let ProductQuery {
        filter,
        sort,
        window,
    } = ProductQuery::from_params(&params, config.page_limit, config.max_page_limit);
    let db = app.database();

    // The count and the window are independent reads
    let (total, items) = tokio::try_join!(
        db.count_products(&filter),
        db.query_products(&filter, sort, Some(window)),
    )
    .map_err(ApiError::store("failed to list products"))?;

    Ok(Json(Page::new(items, total, window).into()))
}

/// Query parameters of the search endpoint.
#[derive(Deserialize, JsonSchema)]
pub(super) struct SearchParams {
    /// Case-insensitive substring of the name or the description
    #[serde(default)]
    q: Option<String>,
}

/// Find every product whose name or description contains `q`.
///
/// Results are not paginated and come newest first.
///
/// # Returns
///
/// - `200 OK`: The matching products and their count
/// - `400 Bad Request`: `q` is missing or blank
/// - `500 Internal Server Error`: Database query failed
pub(super) async fn search_products<T: ApiApplication>(
    State(app): State<T>,
    Params(SearchParams { q }): Params<SearchParams>,
) -> Result<Json<Matches<Record<T>>>, ApiError> {
    let term = q
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let items = app
        .database()
        .query_products(&ProductFilter::search(term), Sort::default(), None)
        .await
        .map_err(ApiError::store("failed to search products"))?;

    Ok(Json(items.into()))
}

/// Aggregate the catalog by category.
///
/// # Returns
///
/// - `200 OK`: Per-category counts and prices, with catalog totals
/// - `500 Internal Server Error`: Database query failed
pub(super) async fn product_stats<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Envelope<CatalogStats>>, ApiError> {
    let stats = app
        .database()
        .product_stats()
        .await
        .map_err(ApiError::store("failed to compute product statistics"))?;

    Ok(Json(Envelope::data(stats)))
}
