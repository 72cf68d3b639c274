mod category;
mod page;
mod product;
mod stats;

pub use category::{CATEGORIES, Category, ParseCategoryError};
pub use page::Page;
pub use product::{ProductData, ProductRecord};
pub use stats::{CatalogStats, CategoryStats};
