use super::Category;

/// The user-controlled fields of a product.
///
/// Values of this type have already passed validation: the strings are
/// trimmed and within their length bounds, and the price is finite and
/// non-negative. See [`crate::validate`] for the rules.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    /// Display name, 1 to 100 characters
    pub name: String,
    /// Free-form description, 1 to 1000 characters
    pub description: String,
    /// Unit price, never negative
    pub price: f64,
    /// The category the product is listed under
    pub category: Category,
    /// Whether the product is currently available
    pub in_stock: bool,
}

/// A product record combines the store-assigned identity and timestamps with
/// the product's data.
///
/// The identifier and timestamp types are left to the repository, which
/// decides how they are generated and represented.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord<ProductId, DateTime> {
    /// Unique identifier of the product, immutable once assigned
    pub id: ProductId,
    /// The product's fields
    #[serde(flatten)]
    pub data: ProductData,
    /// When the store first inserted the product
    pub created_at: DateTime,
    /// When the store last wrote the product
    pub updated_at: DateTime,
}
