//! The auth gate for mutating routes.
//!
//! A caller presents a shared-secret credential either as an `x-api-key`
//! header or as `Authorization: Bearer <credential>`. Whether it is accepted
//! is up to the [`Application`](catalog_core::ports::Application).

use crate::{ApiApplication, error::ApiError};
use aide::OperationInput;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use headers::{Authorization, HeaderMapExt as _, authorization::Bearer};

/// Name of the header that carries the credential directly.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The credential a request presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw credential.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw credential.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read the credential from the request headers, preferring `x-api-key`
    /// over a bearer token. Blank values count as absent.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let api_key = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(api_key) = api_key {
            return Some(Self::new(api_key));
        }

        headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().trim().to_owned())
            .filter(|token| !token.is_empty())
            .map(Self)
    }
}

/// A caller that may create, update, and delete products.
///
/// Extracting it fails with 401 when no credential was presented and with
/// 403 when the application refuses it. As a request-parts extractor it runs
/// before the body is read, so an unauthorized request is never validated.
pub struct Manager(pub Credential);

impl<T: ApiApplication> FromRequestParts<T> for Manager {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, app: &T) -> Result<Self, Self::Rejection> {
        let credential = Credential::from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;

        if app.can_manage_products(&credential).await {
            Ok(Self(credential))
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

// The security requirement is attached per route
impl OperationInput for Manager {}
