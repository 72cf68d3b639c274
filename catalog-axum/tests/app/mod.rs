use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use catalog_axum::{
    config::{AxumConfig, Environment},
    router,
};
use catalog_sqlite::{Db, config::SqliteConfig};
use serde_json::{Value, json};

mod application;
pub use application::{SECRET, TestApp};

/// A server over a fresh in-memory catalog.
pub async fn server(environment: Environment) -> TestServer {
    let db = Db::open(&SqliteConfig::default()).await.unwrap();
    let config = AxumConfig {
        environment,
        ..Default::default()
    };
    let (router, _) = router(TestApp(db), config);
    TestServer::new(router).unwrap()
}

pub fn api_key() -> HeaderName {
    HeaderName::from_static("x-api-key")
}

pub fn secret() -> HeaderValue {
    HeaderValue::from_static(SECRET)
}

pub fn product(name: &str, price: f64, category: &str, in_stock: bool) -> Value {
    json!({
        "name": name,
        "description": format!("A {name} for testing"),
        "price": price,
        "category": category,
        "inStock": in_stock,
    })
}

/// Create a product, returning the stored record.
pub async fn create(server: &TestServer, body: Value) -> Value {
    let response = server
        .post("/api/products")
        .add_header(api_key(), secret())
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}
