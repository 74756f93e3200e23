use rust_decimal::Decimal;
use std::{fmt, str::FromStr};

use super::CompositionError;

/// The primary material a catalog item is priced by.
///
/// The set is closed: anything else coming from the catalog is a data-entry
/// problem and surfaces as [`CompositionError::UnknownMaterial`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Material {
    /// Yellow gold, priced by karat purity
    Gold,
    /// Rose gold, priced as gold
    RoseGold,
    /// White gold, priced as gold
    WhiteGold,
    /// Silver, priced at full weight
    Silver,
    /// Platinum, priced at full weight against its own rate
    Platinum,
    /// A loose or diamond-only piece with no metal setting
    Diamond,
}

impl Material {
    /// Every supported material, in catalog order.
    pub const ALL: [Material; 6] = [
        Material::Gold,
        Material::RoseGold,
        Material::WhiteGold,
        Material::Silver,
        Material::Platinum,
        Material::Diamond,
    ];

    /// Gold alloys share the gold rate and are the only materials with a karat.
    pub fn is_gold_family(self) -> bool {
        matches!(self, Self::Gold | Self::RoseGold | Self::WhiteGold)
    }

    /// The wire name of the material.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::RoseGold => "rose-gold",
            Self::WhiteGold => "white-gold",
            Self::Silver => "silver",
            Self::Platinum => "platinum",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|material| material.as_str() == s)
            .ok_or_else(|| CompositionError::UnknownMaterial(s.to_string()))
    }
}

/// Gold purity in parts per 24.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub enum Karat {
    /// 18 karat (75% gold)
    K18 = 18,
    /// 22 karat (about 91.7% gold)
    K22 = 22,
    /// 24 karat (pure gold)
    #[default]
    K24 = 24,
}

impl Karat {
    /// The storefront's fallback when a gold item does not state its karat.
    pub const STANDARD: Karat = Karat::K24;

    /// The number of gold parts out of 24.
    pub fn parts(self) -> u32 {
        self as u32
    }

    /// The purity fraction, karat / 24.
    ///
    /// Pricing multiplies by `parts()` and divides by 24 last to keep the
    /// decimal arithmetic exact where possible; this is for display.
    pub fn purity(self) -> Decimal {
        Decimal::from(self.parts()) / Decimal::from(24)
    }
}

impl TryFrom<u32> for Karat {
    type Error = CompositionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            18 => Ok(Self::K18),
            22 => Ok(Self::K22),
            24 => Ok(Self::K24),
            other => Err(CompositionError::UnsupportedKarat(other)),
        }
    }
}

impl From<Karat> for u32 {
    fn from(value: Karat) -> Self {
        value.parts()
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Karat {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Karat".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "integer",
            "enum": [18, 22, 24],
        })
    }
}

impl fmt::Display for Karat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.parts())
    }
}
