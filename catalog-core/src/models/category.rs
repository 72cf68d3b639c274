use std::{fmt::Display, str::FromStr};

/// Every category a product may belong to, in declaration order.
pub const CATEGORIES: [Category; 6] = [
    Category::Electronics,
    Category::Clothing,
    Category::Home,
    Category::Kitchen,
    Category::Sports,
    Category::Other,
];

/// The fixed set of product categories.
///
/// Categories are parsed case-insensitively but always serialized (and
/// stored) in lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Phones, computers, and other devices
    Electronics,
    /// Apparel
    Clothing,
    /// Furniture and household goods
    Home,
    /// Cookware and appliances
    Kitchen,
    /// Sporting goods
    Sports,
    /// Anything else
    Other,
}

impl Category {
    /// The canonical, lower-case name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Home => "home",
            Self::Kitchen => "kitchen",
            Self::Sports => "sports",
            Self::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown category {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CATEGORIES
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Electronics".parse::<Category>(), Ok(Category::Electronics));
        assert_eq!(" KITCHEN ".parse::<Category>(), Ok(Category::Kitchen));
        assert_eq!("other".parse::<Category>(), Ok(Category::Other));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "toys".parse::<Category>(),
            Err(ParseCategoryError("toys".to_owned()))
        );
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_lower_case() {
        let json = serde_json::to_string(&Category::Sports).unwrap();
        assert_eq!(json, r#""sports""#);
        for category in CATEGORIES {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
