//! The query builder turns the loosely-typed parameters of a list request
//! into a [`ProductQuery`]: a [`ProductFilter`], a [`Sort`], and a
//! pagination [`Window`].
//!
//! Parameters arrive as text. Anything that cannot be interpreted is treated
//! as if it were never supplied, so a malformed query degrades to a broader
//! listing rather than an error.

use crate::models::Category;

/// Page size used when the request does not specify a usable `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// Upper bound applied to `limit` unless the caller configures another one.
pub const MAX_LIMIT: u64 = 100;

/// The raw query parameters accepted by the list endpoint.
///
/// Every field is optional text; coercion happens in
/// [`ProductQuery::from_params`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Case-insensitive substring of the product name
    #[serde(default)]
    pub name: Option<String>,
    /// Comma-separated list of categories to include
    #[serde(default)]
    pub category: Option<String>,
    /// `true` or `false`; any other value is ignored
    #[serde(default)]
    pub in_stock: Option<String>,
    /// Inclusive lower bound on the price
    #[serde(default)]
    pub min_price: Option<String>,
    /// Inclusive upper bound on the price
    #[serde(default)]
    pub max_price: Option<String>,
    /// Case-insensitive substring of the name or the description
    #[serde(default)]
    pub search: Option<String>,
    /// 1-based page number (default 1)
    #[serde(default)]
    pub page: Option<String>,
    /// Page size (default 10)
    #[serde(default)]
    pub limit: Option<String>,
    /// Sort field with an optional leading `-` for descending order (default `-createdAt`)
    #[serde(default)]
    pub sort: Option<String>,
}

/// A store-agnostic description of which products to select.
///
/// Each field is `None` unless the corresponding parameter was supplied and
/// valid. An empty filter selects every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring match against the name
    pub name: Option<String>,
    /// Membership filter; `Some(vec![])` matches nothing
    pub categories: Option<Vec<Category>>,
    /// Exact match on the in-stock flag
    pub in_stock: Option<bool>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// Case-insensitive substring match against the name or the description
    pub search: Option<String>,
}

impl ProductFilter {
    /// A filter that only performs the free-text name/description match.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Default::default()
        }
    }

    /// Build the filter portion of a list request.
    pub fn from_params(params: &ListParams) -> Self {
        Self {
            name: text(&params.name),
            categories: text(&params.category).map(|list| {
                let mut categories = Vec::new();
                for category in list.split(',').filter_map(|s| s.parse::<Category>().ok()) {
                    if !categories.contains(&category) {
                        categories.push(category);
                    }
                }
                categories
            }),
            in_stock: match params.in_stock.as_deref() {
                Some("true") => Some(true),
                Some("false") => Some(false),
                _ => None,
            },
            min_price: price(&params.min_price),
            max_price: price(&params.max_price),
            search: text(&params.search),
        }
    }

    /// Returns true if the filter provably selects nothing.
    pub fn is_unsatisfiable(&self) -> bool {
        let no_category = self.categories.as_ref().is_some_and(Vec::is_empty);
        let empty_range = matches!((self.min_price, self.max_price), (Some(lo), Some(hi)) if lo > hi);
        no_category || empty_range
    }
}

/// The fields a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Product name
    Name,
    /// Unit price
    Price,
    /// Category name
    Category,
    /// In-stock flag
    InStock,
    /// Insertion time
    CreatedAt,
    /// Last-write time
    UpdatedAt,
}

impl SortField {
    fn parse(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "category" => Some(Self::Category),
            "inStock" => Some(Self::InStock),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}

/// An ordering over products. Stores break ties by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// The field to order by
    pub field: SortField,
    /// Descending when true
    pub descending: bool,
}

impl Default for Sort {
    /// Newest first.
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            descending: true,
        }
    }
}

impl Sort {
    /// Parse `field` or `-field`; unknown fields fall back to the default.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (field, descending) = match spec.strip_prefix('-') {
            Some(field) => (field, true),
            None => (spec, false),
        };
        SortField::parse(field)
            .map(|field| Self { field, descending })
            .unwrap_or_default()
    }
}

/// A pagination window. The page is 1-based and the limit is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    page: u64,
    limit: u64,
}

impl Window {
    /// Create a window, raising `page` and `limit` to 1 if they are zero.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records excluded from the front: `(page - 1) * limit`.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of records in the window.
    pub fn take(&self) -> u64 {
        self.limit
    }
}

/// Everything a store needs to answer a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    /// Which products to select
    pub filter: ProductFilter,
    /// How to order them
    pub sort: Sort,
    /// Which slice of the ordered selection to return
    pub window: Window,
}

impl ProductQuery {
    /// Interpret the raw list parameters.
    ///
    /// `default_limit` applies when `limit` is missing or unusable, and
    /// `max_limit` caps whatever the client asks for.
    pub fn from_params(params: &ListParams, default_limit: u64, max_limit: u64) -> Self {
        let max_limit = max_limit.max(1);
        let page = number::<u64>(&params.page).filter(|&page| page >= 1).unwrap_or(1);
        let limit = number::<u64>(&params.limit)
            .filter(|&limit| limit >= 1)
            .unwrap_or(default_limit)
            .min(max_limit);

        Self {
            filter: ProductFilter::from_params(params),
            sort: params.sort.as_deref().map(Sort::parse).unwrap_or_default(),
            window: Window::new(page, limit),
        }
    }
}

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn number<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    text(value)?.parse().ok()
}

fn price(value: &Option<String>) -> Option<f64> {
    number::<f64>(value).filter(|p| p.is_finite() && *p >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    fn build(pairs: &[(&str, &str)]) -> ProductQuery {
        ProductQuery::from_params(&params(pairs), DEFAULT_LIMIT, MAX_LIMIT)
    }

    #[test]
    fn defaults() {
        let query = build(&[]);
        assert_eq!(query.filter, ProductFilter::default());
        assert_eq!(query.sort, Sort::default());
        assert_eq!(query.window, Window::new(1, 10));
        assert_eq!(query.window.skip(), 0);
    }

    #[test]
    fn category_list_and_stock_and_window() {
        let query = build(&[
            ("category", "electronics,Clothing"),
            ("inStock", "true"),
            ("page", "2"),
            ("limit", "5"),
        ]);
        assert_eq!(
            query.filter.categories,
            Some(vec![Category::Electronics, Category::Clothing])
        );
        assert_eq!(query.filter.in_stock, Some(true));
        assert_eq!(query.window.skip(), 5);
        assert_eq!(query.window.take(), 5);
    }

    #[test]
    fn unknown_categories_match_nothing() {
        let query = build(&[("category", "toys,games")]);
        assert_eq!(query.filter.categories, Some(Vec::new()));
        assert!(query.filter.is_unsatisfiable());

        let query = build(&[("category", "toys, home ,home")]);
        assert_eq!(query.filter.categories, Some(vec![Category::Home]));
        assert!(!query.filter.is_unsatisfiable());
    }

    #[test]
    fn in_stock_only_accepts_literal_booleans() {
        assert_eq!(build(&[("inStock", "false")]).filter.in_stock, Some(false));
        assert_eq!(build(&[("inStock", "yes")]).filter.in_stock, None);
        assert_eq!(build(&[("inStock", "TRUE")]).filter.in_stock, None);
        assert_eq!(build(&[("inStock", "1")]).filter.in_stock, None);
    }

    #[test]
    fn price_bounds_are_independent_and_tolerant() {
        let query = build(&[("minPrice", "10.5")]);
        assert_eq!(query.filter.min_price, Some(10.5));
        assert_eq!(query.filter.max_price, None);

        let query = build(&[("maxPrice", "99")]);
        assert_eq!(query.filter.min_price, None);
        assert_eq!(query.filter.max_price, Some(99.0));

        let query = build(&[("minPrice", "cheap"), ("maxPrice", "NaN")]);
        assert_eq!(query.filter.min_price, None);
        assert_eq!(query.filter.max_price, None);

        let query = build(&[("minPrice", "-3")]);
        assert_eq!(query.filter.min_price, None);

        assert!(build(&[("minPrice", "20"), ("maxPrice", "10")]).filter.is_unsatisfiable());
    }

    #[test]
    fn text_filters_are_trimmed_and_blank_is_absent() {
        let query = build(&[("name", "  lap "), ("search", "   ")]);
        assert_eq!(query.filter.name.as_deref(), Some("lap"));
        assert_eq!(query.filter.search, None);
    }

    #[test]
    fn unusable_paging_falls_back() {
        let query = build(&[("page", "0"), ("limit", "zero")]);
        assert_eq!(query.window, Window::new(1, DEFAULT_LIMIT));

        let query = build(&[("page", "-4"), ("limit", "0")]);
        assert_eq!(query.window, Window::new(1, DEFAULT_LIMIT));
    }

    #[test]
    fn limit_is_capped() {
        let query = build(&[("limit", "5000")]);
        assert_eq!(query.window.limit(), MAX_LIMIT);

        let query = ProductQuery::from_params(&params(&[("limit", "30")]), 10, 25);
        assert_eq!(query.window.limit(), 25);
    }

    #[test]
    fn sort_parsing() {
        assert_eq!(
            Sort::parse("price"),
            Sort {
                field: SortField::Price,
                descending: false
            }
        );
        assert_eq!(
            Sort::parse("-name"),
            Sort {
                field: SortField::Name,
                descending: true
            }
        );
        assert_eq!(Sort::parse("-createdAt"), Sort::default());
        assert_eq!(Sort::parse("password"), Sort::default());
        assert_eq!(Sort::parse("-"), Sort::default());
    }

    #[test]
    fn skip_does_not_overflow() {
        let window = Window::new(u64::MAX, 100);
        assert_eq!(window.skip(), u64::MAX);
    }
}
