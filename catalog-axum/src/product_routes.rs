//! REST API endpoints for the product catalog.
//!
//! Reads (listing, lookup, search, statistics) are public. Creating,
//! updating, and deleting a product require a [`Manager`](crate::auth::Manager)
//! credential. Every successful response is wrapped in an envelope whose
//! `success` flag is true; failures go through [`ApiError`].

use crate::{ApiApplication, error::ApiError};
use aide::{
    axum::{ApiRouter, routing::get},
    transform::TransformOperation,
};
use catalog_core::{
    models::Page,
    ports::{Application, RecordOf, Repository},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod crud;
mod listing;

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(listing::list_products::<T>).post_with(crud::create_product::<T>, secured),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/stats",
            get(listing::product_stats::<T>),
            |route| route.tag("products").tag("stats"),
        )
        .api_route_with(
            "/search",
            get(listing::search_products::<T>),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/{product_id}",
            get(crud::read_product::<T>)
                .put_with(crud::update_product::<T>, secured)
                .delete_with(crud::delete_product::<T>, |op| {
                    secured(op).response_with::<204, (), _>(|res| {
                        res.description("The product was deleted")
                    })
                }),
            |route| route.tag("products"),
        )
}

/// Mutating routes accept either form of the credential.
fn secured(op: TransformOperation) -> TransformOperation {
    op.security_requirement("apiKey")
        .security_requirement("bearer")
}

type ProductIdOf<T> = <<T as Application>::Repository as Repository>::ProductId;
type Record<T> = RecordOf<<T as Application>::Repository>;

/// Path parameter for product-specific endpoints.
///
/// It is kept as text so that a malformed identifier is reported as a
/// missing product rather than a bad request.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct ProductPath {
    /// The unique identifier of the product
    product_id: String,
}

impl ProductPath {
    fn parse<T: ApiApplication>(&self) -> Result<ProductIdOf<T>, ApiError> {
        self.product_id
            .trim()
            .parse()
            .map_err(|_| ApiError::product_not_found())
    }
}

/// The success envelope around a single value.
#[derive(Serialize, JsonSchema)]
struct Envelope<D> {
    /// Always true
    success: bool,
    /// Confirmation of a write
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    /// The payload
    data: D,
}

impl<D> Envelope<D> {
    fn data(data: D) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    fn with_message(message: &str, data: D) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data,
        }
    }
}

/// One page of a product listing.
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct Listing<D> {
    /// Always true
    success: bool,
    /// Number of records on this page
    count: usize,
    /// Number of records matching the filter, across all pages
    total: u64,
    /// The 1-based page number
    page: u64,
    /// The page size
    limit: u64,
    /// Number of pages the matching records span
    total_pages: u64,
    /// Whether a later page exists
    has_next_page: bool,
    /// Whether an earlier page exists
    has_previous_page: bool,
    /// The records on this page
    data: Vec<D>,
}

impl<D> From<Page<D>> for Listing<D> {
    fn from(page: Page<D>) -> Self {
        Self {
            success: true,
            count: page.items.len(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
            data: page.items,
        }
    }
}

/// Every product matching a search.
#[derive(Serialize, JsonSchema)]
struct Matches<D> {
    /// Always true
    success: bool,
    /// Number of matching records
    count: usize,
    /// The matching records, newest first
    data: Vec<D>,
}

impl<D> From<Vec<D>> for Matches<D> {
    fn from(data: Vec<D>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
