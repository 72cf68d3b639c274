use super::Category;

/// Aggregates over the products of a single category.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    /// The category being summarized
    pub category: Category,
    /// Number of products in the category
    pub count: u64,
    /// Mean price over the category
    pub avg_price: f64,
    /// Cheapest price in the category
    pub min_price: f64,
    /// Most expensive price in the category
    pub max_price: f64,
    /// Sum of all prices in the category
    pub total_value: f64,
    /// Number of products in the category that are in stock
    pub in_stock: u64,
}

/// Catalog-wide statistics, grouped by category.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Per-category aggregates, sorted by category name
    pub by_category: Vec<CategoryStats>,
    /// Sum of the per-category counts
    pub total_products: u64,
    /// Products flagged as in stock
    pub in_stock: u64,
    /// `total_products - in_stock`
    pub out_of_stock: u64,
}

impl CatalogStats {
    /// Derive the catalog totals from the per-category groups.
    ///
    /// The totals are computed from the groups themselves, so the sum of the
    /// group counts always equals `total_products`.
    pub fn from_categories(mut by_category: Vec<CategoryStats>) -> Self {
        by_category.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str()));

        let total_products = by_category.iter().map(|group| group.count).sum::<u64>();
        let in_stock = by_category.iter().map(|group| group.in_stock).sum::<u64>();

        Self {
            by_category,
            total_products,
            in_stock,
            out_of_stock: total_products.saturating_sub(in_stock),
        }
    }
}
