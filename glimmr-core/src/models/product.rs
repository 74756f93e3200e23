use std::fmt;
use time::OffsetDateTime;

use super::{MaterialComposition, PriceBreakdown};

/// A catalog identifier, typically a URL slug such as `aria-22k-ring`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ProductId(String);

impl ProductId {
    /// The identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A breakdown remembered alongside a product for fast display.
///
/// The cache is only valid for the snapshot it was computed from, which is
/// why the snapshot timestamp travels with it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CachedPrice {
    /// The breakdown as computed
    pub breakdown: PriceBreakdown,
    /// Timestamp of the rate snapshot it was computed from
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    #[cfg_attr(feature = "schemars", schemars(schema_with = "super::time_schema"))]
    pub rates_as_of: OffsetDateTime,
}

impl CachedPrice {
    /// Whether the cache was computed from the snapshot taken at `as_of`
    pub fn is_current(&self, as_of: OffsetDateTime) -> bool {
        self.rates_as_of == as_of
    }
}

/// The slice of a catalog product the pricing read-path consumes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductRecord {
    /// Catalog identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Optional catalog category, e.g. "rings"
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub category: Option<String>,
    /// What the product is made of
    pub composition: MaterialComposition,
    /// The last breakdown computed for this product, if any
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cached_price: Option<CachedPrice>,
}
