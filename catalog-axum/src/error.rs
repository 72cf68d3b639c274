//! The error responder.
//!
//! Every handler and extractor fails with an [`ApiError`]. Converting it into
//! a response is the only place that decides the status code and the shape of
//! the body, `{success: false, message, errors?}`.

use crate::config::Environment;
use aide::{
    OperationOutput,
    generate::GenContext,
    openapi::{Operation, Response as ApiResponse},
};
use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use catalog_core::{ports::ProductFailure, validate::FieldError};
use schemars::JsonSchema;
use serde::Serialize;
use std::error::Error as StdError;
use tracing::{Level, event};

/// The errors an API request can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more fields of the payload are invalid
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// No credential was supplied
    #[error("Access denied. No API key provided")]
    Unauthorized,

    /// A credential was supplied but it is not accepted
    #[error("Invalid API key")]
    Forbidden,

    /// The addressed resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The request is malformed
    #[error("{0}")]
    BadRequest(String),

    /// The store or the server itself failed
    #[error("{context}")]
    Internal {
        /// What the server was doing
        context: &'static str,
        /// The underlying failure
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ApiError {
    /// The error for a missing product.
    pub fn product_not_found() -> Self {
        Self::NotFound("Product not found".to_string())
    }

    /// Log a store failure and wrap it, for use with `map_err`.
    pub(crate) fn store<E: StdError + Send + Sync + 'static>(
        context: &'static str,
    ) -> impl FnOnce(E) -> Self {
        move |err| {
            event!(Level::ERROR, err = err.to_string(), context);
            Self::Internal {
                context,
                source: Box::new(err),
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The error followed by each of its sources, outermost first.
    fn chain(&self) -> Vec<String> {
        let mut chain = vec![self.to_string()];
        let mut source = self.source();
        while let Some(err) = source {
            chain.push(err.to_string());
            source = err.source();
        }
        chain
    }
}

impl From<ProductFailure> for ApiError {
    fn from(failure: ProductFailure) -> Self {
        match failure {
            ProductFailure::DoesNotExist => Self::product_not_found(),
            ProductFailure::Invalid(errors) => Self::Validation(errors),
        }
    }
}

/// The JSON body of every error response.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorBody {
    /// Always false
    pub success: bool,
    /// A human-readable summary
    pub message: String,
    /// Per-field problems, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    /// The chain of underlying causes; development mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
}

// Carries the detailed body from the responder to `expose_stack`
#[derive(Clone)]
struct Diagnostics(ErrorBody);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let stack = self.chain();
        let message = match &self {
            Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        };
        let errors = match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = ErrorBody {
            success: false,
            message,
            errors,
            stack: None,
        };
        let detailed = ErrorBody {
            stack: Some(stack),
            ..body.clone()
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(Diagnostics(detailed));
        response
    }
}

impl OperationOutput for ApiError {
    type Inner = ErrorBody;

    fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
        Json::<ErrorBody>::operation_response(ctx, operation)
    }
}

/// Middleware that swaps error bodies for their detailed form in
/// development mode.
pub(crate) async fn expose_stack(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let diagnostics = response.extensions_mut().remove::<Diagnostics>();

    match (environment, diagnostics) {
        (Environment::Development, Some(Diagnostics(detailed))) => {
            (response.status(), Json(detailed)).into_response()
        }
        _ => response,
    }
}

/// Fallback for requests that match no route.
pub(crate) async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} not found", uri.path()))
}
