//! Validation of product payloads.
//!
//! Request bodies are deserialized into [`ProductDraft`] (create) or
//! [`ProductPatch`] (update), whose fields are untyped JSON values. Validation
//! converts them into typed data and reports every offending field at once,
//! rather than stopping at the first.

use crate::models::{CATEGORIES, Category, ProductData};
use serde_json::Value;

/// Maximum length of a product name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Maximum length of a product description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A validation failure attached to a single field of a payload.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct FieldError {
    /// The payload field, using its wire name (e.g. `inStock`)
    pub field: String,
    /// A human-readable description of the problem
    pub message: String,
}

impl FieldError {
    /// Construct a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The body of a create request, before validation.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Required, 1 to 100 characters after trimming
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<String>"))]
    pub name: Option<Value>,
    /// Required, 1 to 1000 characters after trimming
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<String>"))]
    pub description: Option<Value>,
    /// Required, a non-negative number
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<f64>"))]
    pub price: Option<Value>,
    /// Required, one of the known categories (case-insensitive)
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<Category>"))]
    pub category: Option<Value>,
    /// Optional, defaults to true
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<bool>"))]
    pub in_stock: Option<Value>,
}

impl ProductDraft {
    /// Validate every field, producing the product data or all field errors.
    pub fn validate(self) -> Result<ProductData, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = required(&mut errors, "name", "Product name", self.name, name);
        let description = required(
            &mut errors,
            "description",
            "Product description",
            self.description,
            description,
        );
        let price = required(&mut errors, "price", "Price", self.price, price);
        let category = required(&mut errors, "category", "Category", self.category, category);
        let in_stock = optional(&mut errors, "inStock", self.in_stock, in_stock);

        match (name, description, price, category) {
            (Some(name), Some(description), Some(price), Some(category)) if errors.is_empty() => {
                Ok(ProductData {
                    name,
                    description,
                    price,
                    category,
                    in_stock: in_stock.unwrap_or(true),
                })
            }
            _ => Err(errors),
        }
    }
}

/// The body of an update request, before validation. Every field is
/// optional; absent (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    /// 1 to 100 characters after trimming
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<String>"))]
    pub name: Option<Value>,
    /// 1 to 1000 characters after trimming
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<String>"))]
    pub description: Option<Value>,
    /// A non-negative number
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<f64>"))]
    pub price: Option<Value>,
    /// One of the known categories (case-insensitive)
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<Category>"))]
    pub category: Option<Value>,
    /// Availability flag
    #[serde(default)]
    #[cfg_attr(feature = "schemars", schemars(with = "Option<bool>"))]
    pub in_stock: Option<Value>,
}

impl ProductPatch {
    /// Validate the fields that are present.
    pub fn validate(self) -> Result<ProductChanges, Vec<FieldError>> {
        let mut errors = Vec::new();

        let changes = ProductChanges {
            name: optional(&mut errors, "name", self.name, name),
            description: optional(&mut errors, "description", self.description, description),
            price: optional(&mut errors, "price", self.price, price),
            category: optional(&mut errors, "category", self.category, category),
            in_stock: optional(&mut errors, "inStock", self.in_stock, in_stock),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    /// Replacement name
    pub name: Option<String>,
    /// Replacement description
    pub description: Option<String>,
    /// Replacement price
    pub price: Option<f64>,
    /// Replacement category
    pub category: Option<Category>,
    /// Replacement availability flag
    pub in_stock: Option<bool>,
}

impl ProductChanges {
    /// Overlay the supplied fields onto existing product data.
    pub fn apply(self, data: ProductData) -> ProductData {
        ProductData {
            name: self.name.unwrap_or(data.name),
            description: self.description.unwrap_or(data.description),
            price: self.price.unwrap_or(data.price),
            category: self.category.unwrap_or(data.category),
            in_stock: self.in_stock.unwrap_or(data.in_stock),
        }
    }
}

/// Check the invariants of already-typed product data.
///
/// This is the last gate before a write reaches the store.
pub fn check(data: &ProductData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(message) = bounded_text(&data.name, "Product name", NAME_MAX_CHARS) {
        errors.push(FieldError::new("name", message));
    }
    if let Err(message) = bounded_text(
        &data.description,
        "Product description",
        DESCRIPTION_MAX_CHARS,
    ) {
        errors.push(FieldError::new("description", message));
    }
    if let Err(message) = non_negative(data.price) {
        errors.push(FieldError::new("price", message));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn required<T>(
    errors: &mut Vec<FieldError>,
    field: &str,
    label: &str,
    value: Option<Value>,
    parse: fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match value {
        Some(value) => optional(errors, field, Some(value), parse),
        None => {
            errors.push(FieldError::new(field, format!("{label} is required")));
            None
        }
    }
}

fn optional<T>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<Value>,
    parse: fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match parse(value.as_ref()?) {
        Ok(parsed) => Some(parsed),
        Err(message) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn name(value: &Value) -> Result<String, String> {
    string(value, "Product name").and_then(|s| bounded_text(s, "Product name", NAME_MAX_CHARS))
}

fn description(value: &Value) -> Result<String, String> {
    string(value, "Product description")
        .and_then(|s| bounded_text(s, "Product description", DESCRIPTION_MAX_CHARS))
}

fn price(value: &Value) -> Result<f64, String> {
    let price = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|price| price.is_finite())
    .ok_or_else(|| "Price must be a number".to_owned())?;

    non_negative(price)
}

fn category(value: &Value) -> Result<Category, String> {
    let s = string(value, "Category")?.trim();
    if s.is_empty() {
        return Err("Category is required".to_owned());
    }
    s.parse().map_err(|_| {
        let names = CATEGORIES.map(|category| category.as_str()).join(", ");
        format!("Category must be one of: {names}")
    })
}

fn in_stock(value: &Value) -> Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| "inStock must be a boolean".to_owned())
}

fn string<'a>(value: &'a Value, label: &str) -> Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("{label} must be a string"))
}

fn bounded_text(s: &str, label: &str, max_chars: usize) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err(format!("{label} is required"))
    } else if trimmed.chars().count() > max_chars {
        Err(format!("{label} cannot exceed {max_chars} characters"))
    } else {
        Ok(trimmed.to_owned())
    }
}

fn non_negative(price: f64) -> Result<f64, String> {
    if !price.is_finite() {
        Err("Price must be a number".to_owned())
    } else if price < 0.0 {
        Err("Price cannot be negative".to_owned())
    } else {
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(value: Value) -> ProductDraft {
        serde_json::from_value(value).unwrap()
    }

    fn patch(value: Value) -> ProductPatch {
        serde_json::from_value(value).unwrap()
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    fn laptop() -> ProductData {
        ProductData {
            name: "Laptop".into(),
            description: "Fast".into(),
            price: 1299.99,
            category: Category::Electronics,
            in_stock: true,
        }
    }

    #[test]
    fn valid_draft_is_normalized() {
        let data = draft(json!({
            "name": "  Laptop ",
            "description": "Fast",
            "price": 1299.99,
            "category": "Electronics"
        }))
        .validate()
        .unwrap();

        assert_eq!(data, laptop());
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = draft(json!({})).validate().unwrap_err();
        assert_eq!(fields(&errors), ["name", "description", "price", "category"]);
        assert_eq!(errors[0].message, "Product name is required");
    }

    #[test]
    fn type_errors_are_aggregated() {
        let errors = draft(json!({
            "name": 42,
            "description": "",
            "price": "lots",
            "category": "toys",
            "inStock": "yes"
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            fields(&errors),
            ["name", "description", "price", "category", "inStock"]
        );
        assert_eq!(errors[0].message, "Product name must be a string");
        assert_eq!(errors[2].message, "Price must be a number");
        assert_eq!(
            errors[3].message,
            "Category must be one of: electronics, clothing, home, kitchen, sports, other"
        );
        assert_eq!(errors[4].message, "inStock must be a boolean");
    }

    #[test]
    fn length_bounds_count_characters() {
        let at_limit = "é".repeat(NAME_MAX_CHARS);
        let data = draft(json!({
            "name": at_limit,
            "description": "d",
            "price": 0,
            "category": "other"
        }))
        .validate()
        .unwrap();
        assert_eq!(data.name.chars().count(), NAME_MAX_CHARS);

        let errors = draft(json!({
            "name": "n",
            "description": "x".repeat(DESCRIPTION_MAX_CHARS + 1),
            "price": 0,
            "category": "other"
        }))
        .validate()
        .unwrap_err();
        assert_eq!(
            errors,
            [FieldError::new(
                "description",
                "Product description cannot exceed 1000 characters"
            )]
        );
    }

    #[test]
    fn price_rules() {
        let base = |price: Value| {
            draft(json!({
                "name": "n", "description": "d", "price": price, "category": "home"
            }))
            .validate()
        };

        assert_eq!(base(json!("12.50")).unwrap().price, 12.5);
        assert_eq!(base(json!(0)).unwrap().price, 0.0);
        assert_eq!(
            base(json!(-1)).unwrap_err()[0].message,
            "Price cannot be negative"
        );
        assert_eq!(
            base(json!(true)).unwrap_err()[0].message,
            "Price must be a number"
        );
        assert_eq!(
            base(json!("inf")).unwrap_err()[0].message,
            "Price must be a number"
        );
    }

    #[test]
    fn in_stock_defaults_to_true_and_null_is_absent() {
        let data = draft(json!({
            "name": "n", "description": "d", "price": 1, "category": "home", "inStock": null
        }))
        .validate()
        .unwrap();
        assert!(data.in_stock);

        let data = draft(json!({
            "name": "n", "description": "d", "price": 1, "category": "home", "inStock": false
        }))
        .validate()
        .unwrap();
        assert!(!data.in_stock);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let changes = patch(json!({})).validate().unwrap();
        assert_eq!(changes, ProductChanges::default());
        assert_eq!(changes.apply(laptop()), laptop());
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let changes = patch(json!({"price": 999, "category": "KITCHEN", "name": null}))
            .validate()
            .unwrap();
        let updated = changes.apply(laptop());

        assert_eq!(updated.price, 999.0);
        assert_eq!(updated.category, Category::Kitchen);
        assert_eq!(updated.name, "Laptop");
        assert_eq!(updated.description, "Fast");
        assert!(updated.in_stock);
    }

    #[test]
    fn patch_errors_are_aggregated() {
        let errors = patch(json!({"name": "   ", "price": -5, "inStock": 1}))
            .validate()
            .unwrap_err();
        assert_eq!(fields(&errors), ["name", "price", "inStock"]);
    }

    #[test]
    fn check_guards_typed_data() {
        assert_eq!(check(&laptop()), Ok(()));

        let broken = ProductData {
            name: " ".into(),
            price: -0.5,
            ..laptop()
        };
        let errors = check(&broken).unwrap_err();
        assert_eq!(fields(&errors), ["name", "price"]);
    }
}
