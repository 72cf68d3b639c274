//! Timestamps for product records.
//!
//! [`DateTime`] wraps `time::PrimitiveDateTime`, always interpreted as UTC,
//! and (de)serializes as RFC 3339 so the HTTP layer can pass it straight
//! through to clients.

use std::{borrow::Borrow, fmt::Display};
use time::format_description::well_known::Rfc3339;

/// A UTC timestamp with subsecond precision, used for `createdAt` and
/// `updatedAt`.
///
/// # Examples
///
/// ```
/// # use catalog_sqlite::types::DateTime;
/// # use time::OffsetDateTime;
/// let now = DateTime::from(OffsetDateTime::now_utc());
/// assert!(now.to_string().ends_with('Z'));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
    sqlx::Type,
)]
#[serde(from = "Rfc3339Dto", into = "Rfc3339Dto")]
#[sqlx(transparent)]
pub struct DateTime(time::PrimitiveDateTime);

impl DateTime {
    /// The current time.
    pub fn now() -> Self {
        time::OffsetDateTime::now_utc().into()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: time::OffsetDateTime = (*self).into();
        let formatted = value.format(&Rfc3339).map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl<T: Borrow<time::OffsetDateTime>> From<T> for DateTime {
    fn from(value: T) -> Self {
        let utc = value.borrow().to_offset(time::UtcOffset::UTC);
        Self(time::PrimitiveDateTime::new(utc.date(), utc.time()))
    }
}

impl From<DateTime> for time::OffsetDateTime {
    fn from(value: DateTime) -> Self {
        value.0.assume_utc()
    }
}

// (De)serialization goes through this helper so the wire format is always RFC 3339

#[derive(serde::Serialize, serde::Deserialize)]
struct Rfc3339Dto(#[serde(with = "time::serde::rfc3339")] time::OffsetDateTime);

impl From<Rfc3339Dto> for DateTime {
    fn from(value: Rfc3339Dto) -> Self {
        value.0.into()
    }
}

impl From<DateTime> for Rfc3339Dto {
    fn from(value: DateTime) -> Self {
        Rfc3339Dto(value.into())
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DateTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "DateTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date-time",
        })
    }
}
