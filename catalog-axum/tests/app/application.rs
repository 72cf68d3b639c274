use catalog_axum::auth::Credential;
use catalog_core::ports::Application;
use catalog_sqlite::Db;

/// The only credential the test application accepts.
pub const SECRET: &str = "test-secret";

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Context = Credential;
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    async fn can_manage_products(&self, context: &Self::Context) -> bool {
        context.as_str() == SECRET
    }
}
