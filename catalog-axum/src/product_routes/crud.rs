use super::{Envelope, ProductPath, Record};
use crate::{ApiApplication, auth::Manager, error::ApiError, payload::Payload};
use aide::OperationOutput;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_core::{
    ports::ProductRepository as _,
    validate::{self, ProductDraft, ProductPatch},
};
use tracing::{Level, event};

/// Retrieve a single product.
///
/// # Returns
///
/// - `200 OK`: The product record
/// - `404 Not Found`: No product has this id, or the id is malformed
/// - `500 Internal Server Error`: Database query failed
pub(super) async fn read_product<T: ApiApplication>(
    State(app): State<T>,
    Path(path): Path<ProductPath>,
) -> Result<Json<Envelope<Record<T>>>, ApiError> {
    let product_id = path.parse::<T>()?;

    let record = app
        .database()
        .get_product(product_id)
        .await
        .map_err(ApiError::store("failed to get product"))?
        .ok_or_else(ApiError::product_not_found)?;

    Ok(Json(Envelope::data(record)))
}

/// Create a new product.
///
/// The store assigns the id and both timestamps. `inStock` defaults to true.
///
/// # Authorization
///
/// Requires a credential the application accepts for managing products.
///
/// # Returns
///
/// - `201 Created`: The created record
/// - `400 Bad Request`: The body is not a JSON object, or fields are invalid
/// - `401 Unauthorized`: No credential
/// - `403 Forbidden`: The credential is not accepted
/// - `500 Internal Server Error`: Database operation failed
pub(super) async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    _: Manager,
    Payload(draft): Payload<ProductDraft>,
) -> Result<(StatusCode, Json<Envelope<Record<T>>>), ApiError> {
    let data = draft.validate().map_err(ApiError::Validation)?;

    let record = app
        .database()
        .create_product(data)
        .await
        .map_err(ApiError::store("failed to create product"))??;

    event!(Level::INFO, product_id = %record.id, "created product");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::with_message("Product created successfully", record)),
    ))
}

/// Update some fields of a product.
///
/// Only the fields present in the body change; absent or `null` fields keep
/// their stored value. An empty body only refreshes `updatedAt`.
///
/// # Authorization
///
/// Requires a credential the application accepts for managing products.
///
/// # Returns
///
/// - `200 OK`: The full updated record
/// - `400 Bad Request`: The body is not a JSON object, or fields are invalid
/// - `401 Unauthorized`: No credential
/// - `403 Forbidden`: The credential is not accepted
/// - `404 Not Found`: No product has this id
/// - `500 Internal Server Error`: Database operation failed
pub(super) async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    _: Manager,
    Path(path): Path<ProductPath>,
    Payload(patch): Payload<ProductPatch>,
) -> Result<Json<Envelope<Record<T>>>, ApiError> {
    let changes = patch.validate().map_err(ApiError::Validation)?;
    let product_id = path.parse::<T>()?;
    let db = app.database();

    let existing = db
        .get_product(product_id.clone())
        .await
        .map_err(ApiError::store("failed to get product"))?
        .ok_or_else(ApiError::product_not_found)?;

    let data = changes.apply(existing.data);
    validate::check(&data).map_err(ApiError::Validation)?;

    let record = db
        .update_product(product_id, data)
        .await
        .map_err(ApiError::store("failed to update product"))??;

    event!(Level::INFO, product_id = %record.id, "updated product");
    Ok(Json(Envelope::with_message(
        "Product updated successfully",
        record,
    )))
}

/// Permanently delete a product.
///
/// # Authorization
///
/// Requires a credential the application accepts for managing products.
///
/// # Returns
///
/// - `204 No Content`: The product was deleted
/// - `401 Unauthorized`: No credential
/// - `403 Forbidden`: The credential is not accepted
/// - `404 Not Found`: No product has this id
/// - `500 Internal Server Error`: Database operation failed
pub(super) async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    _: Manager,
    Path(path): Path<ProductPath>,
) -> Result<Deleted, ApiError> {
    let product_id = path.parse::<T>()?;

    app.database()
        .delete_product(product_id.clone())
        .await
        .map_err(ApiError::store("failed to delete product"))??;

    event!(Level::INFO, product_id = %product_id, "deleted product");
    Ok(Deleted)
}

/// An empty `204 No Content` response.
pub(super) struct Deleted;

impl IntoResponse for Deleted {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

impl OperationOutput for Deleted {
    type Inner = ();
}
