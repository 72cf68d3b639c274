use catalog_core::models::{Category, ProductData};
use catalog_sqlite::{Db, config::SqliteConfig};

pub async fn open() -> anyhow::Result<Db> {
    Ok(Db::open(&SqliteConfig::default()).await?)
}

pub fn product(name: &str, price: f64, category: Category) -> ProductData {
    ProductData {
        name: name.to_string(),
        description: format!("A {name} for testing"),
        price,
        category,
        in_stock: true,
    }
}
