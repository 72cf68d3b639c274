//! Type definitions for the SQLite implementation.
//!
//! The public types are the identifier and timestamp the repository hands
//! out. The crate-private row types map query results onto the core models.

use catalog_core::models::{Category, CategoryStats, ProductData, ProductRecord};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::ProductId;

#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl TryFrom<ProductRow> for ProductRecord<ProductId, DateTime> {
    type Error = sqlx::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(ProductRecord {
            id: row.id,
            data: ProductData {
                name: row.name,
                description: row.description,
                price: row.price,
                category: category(&row.category)?,
                in_stock: row.in_stock,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CategoryRow {
    pub category: String,
    pub count: i64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub total_value: f64,
    pub in_stock: i64,
}

impl TryFrom<CategoryRow> for CategoryStats {
    type Error = sqlx::Error;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(CategoryStats {
            category: category(&row.category)?,
            count: row.count.max(0) as u64,
            avg_price: row.avg_price,
            min_price: row.min_price,
            max_price: row.max_price,
            total_value: row.total_value,
            in_stock: row.in_stock.max(0) as u64,
        })
    }
}

fn category(value: &str) -> Result<Category, sqlx::Error> {
    value
        .parse()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
