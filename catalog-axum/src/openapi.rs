//! The API's self-description.
//!
//! The document is assembled by `aide` from the route table and served at
//! `/docs/api.json`, with a RapiDoc page at `/docs` to browse and try it.

use crate::auth::API_KEY_HEADER;
use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{ApiKeyLocation, OpenApi, SecurityScheme, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

const RAPIDOC_PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Product Catalog API</title>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/rapidoc/9.3.8/rapidoc-min.js" integrity="sha512-0ES6eX4K9J1PrIEjIizv79dTlN5HwI2GW9Ku6ymb8dijMHF5CIplkS8N0iFJ/wl3GybCSqBJu8HDhiFkZRAf0g==" crossorigin="anonymous" referrerpolicy="no-referrer"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        render-style="focused"
        show-method-in-nav-bar="as-colored-text"
        allow-authentication="true"
    ></rapi-doc>
  </body>
</html>"#;

async fn rapidoc_page() -> impl IntoApiResponse {
    Html(RAPIDOC_PAGE).into_response()
}

/// Routes for the documentation; they are left out of the document itself.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(rapidoc_page))
        .route("/api.json", get(openapi_json))
}

async fn openapi_json(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Title, security schemes and tags of the generated document.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Product Catalog API")
        .summary("A REST API for managing a catalog of products.")
        .description("Create, read, update, and delete products; list them with filters, sorting, and pagination; search them by text; and aggregate statistics by category.")
        .version(env!("CARGO_PKG_VERSION"))
        .security_scheme(
            "apiKey",
            SecurityScheme::ApiKey {
                location: ApiKeyLocation::Header,
                name: API_KEY_HEADER.into(),
                description: Some("The shared secret".into()),
                extensions: Default::default(),
            },
        )
        .security_scheme(
            "bearer",
            SecurityScheme::Http {
                scheme: "bearer".into(),
                bearer_format: None,
                description: Some("The shared secret as a bearer token".into()),
                extensions: Default::default(),
            },
        )
        .tag(Tag {
            name: "products".into(),
            description: Some("CRUD, listing, and search over products".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "stats".into(),
            description: Some("Aggregates over the catalog".into()),
            ..Default::default()
        })
}
