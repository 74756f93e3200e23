use rust_decimal::Decimal;
use thiserror::Error;

use super::{Karat, Material};

/// A graded diamond carried by a catalog item.
///
/// Grades are kept as the catalog spells them. They are resolved against the
/// multiplier tables of a [`super::RateSnapshot`] at pricing time, which is
/// where an unknown grade is reported.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiamondSpec {
    /// Diamond mass in carats (must be positive)
    pub carat: Decimal,
    /// Cut grade, e.g. "round" or "princess"
    pub cut: String,
    /// Color grade, e.g. "D"
    pub color: String,
    /// Clarity grade, e.g. "VVS1"
    pub clarity: String,
}

impl DiamondSpec {
    /// Convenience constructor; validation happens when the spec is placed in
    /// a [`MaterialComposition`].
    pub fn new(
        carat: Decimal,
        cut: impl Into<String>,
        color: impl Into<String>,
        clarity: impl Into<String>,
    ) -> Self {
        Self {
            carat,
            cut: cut.into(),
            color: color.into(),
            clarity: clarity.into(),
        }
    }
}

/// What a catalog item is made of.
///
/// A composition is always valid once constructed:
/// - weight is non-negative, and zero only for diamond-only pieces
/// - diamond-only pieces carry a diamond with a positive carat
/// - karat is kept only for gold-family materials (everything else is priced
///   at full purity)
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MaterialCompositionDto", into = "MaterialCompositionDto")
)]
pub struct MaterialComposition {
    material: Material,
    weight: Decimal,
    karat: Option<Karat>,
    diamond: Option<DiamondSpec>,
}

impl MaterialComposition {
    /// Creates a validated composition.
    pub fn new(
        material: Material,
        weight: Decimal,
        karat: Option<Karat>,
        diamond: Option<DiamondSpec>,
    ) -> Result<Self, CompositionError> {
        if weight < Decimal::ZERO {
            return Err(CompositionError::NegativeWeight(weight));
        }
        if weight.is_zero() && material != Material::Diamond {
            return Err(CompositionError::ZeroWeight(material));
        }
        if let Some(diamond) = &diamond {
            if diamond.carat <= Decimal::ZERO {
                return Err(CompositionError::NonPositiveCarat(diamond.carat));
            }
        } else if material == Material::Diamond {
            return Err(CompositionError::MissingDiamond);
        }

        Ok(Self {
            material,
            weight,
            karat: karat.filter(|_| material.is_gold_family()),
            diamond,
        })
    }

    /// Shorthand for a plain metal piece.
    pub fn metal(
        material: Material,
        weight: Decimal,
        karat: Option<Karat>,
    ) -> Result<Self, CompositionError> {
        Self::new(material, weight, karat, None)
    }

    /// Shorthand for a diamond with no metal setting.
    pub fn loose_diamond(diamond: DiamondSpec) -> Result<Self, CompositionError> {
        Self::new(Material::Diamond, Decimal::ZERO, None, Some(diamond))
    }

    /// The material the metal cost is priced by
    pub fn material(&self) -> Material {
        self.material
    }

    /// Metal weight in grams
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// The stated karat, if any (always `None` outside the gold family)
    pub fn karat(&self) -> Option<Karat> {
        self.karat
    }

    /// The graded diamond, if the piece carries one
    pub fn diamond(&self) -> Option<&DiamondSpec> {
        self.diamond.as_ref()
    }

    /// The karat a gold-family piece is priced at, falling back to `default`
    /// when the catalog omitted it. `None` for non-gold materials.
    pub fn effective_karat(&self, default: Karat) -> Option<Karat> {
        self.material
            .is_gold_family()
            .then(|| self.karat.unwrap_or(default))
    }
}

/// The "DTO" type for a composition, as the catalog supplies it.
///
/// The material is free text here so that an unknown material can be
/// reported as a composition error rather than a generic parse failure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MaterialCompositionDto {
    /// One of gold, rose-gold, white-gold, silver, platinum, diamond
    pub material: String,
    /// Metal weight in grams
    pub weight: Decimal,
    /// Gold purity (18, 22 or 24); ignored for other materials
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub karat: Option<u32>,
    /// Optional graded diamond
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub diamond: Option<DiamondSpec>,
}

impl TryFrom<MaterialCompositionDto> for MaterialComposition {
    type Error = CompositionError;

    fn try_from(value: MaterialCompositionDto) -> Result<Self, Self::Error> {
        let material = value.material.parse::<Material>()?;
        let karat = match value.karat {
            // only gold-family karats are meaningful, so only those are checked
            Some(karat) if material.is_gold_family() => Some(Karat::try_from(karat)?),
            _ => None,
        };
        Self::new(material, value.weight, karat, value.diamond)
    }
}

impl From<MaterialComposition> for MaterialCompositionDto {
    fn from(value: MaterialComposition) -> Self {
        Self {
            material: value.material.to_string(),
            weight: value.weight,
            karat: value.karat.map(Into::into),
            diamond: value.diamond,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for MaterialComposition {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        MaterialCompositionDto::schema_name()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        MaterialCompositionDto::json_schema(generator)
    }
}

/// The ways in which catalog material data can be malformed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    /// The material is not one of the supported set
    #[error("unknown material {0:?}")]
    UnknownMaterial(String),
    /// Gold karat outside of 18, 22 and 24
    #[error("unsupported karat {0}")]
    UnsupportedKarat(u32),
    /// Weight below zero
    #[error("weight must be non-negative, got {0}")]
    NegativeWeight(Decimal),
    /// Zero weight is only meaningful for diamond-only pieces
    #[error("{0} requires a positive weight")]
    ZeroWeight(Material),
    /// Diamond mass at or below zero
    #[error("diamond carat must be positive, got {0}")]
    NonPositiveCarat(Decimal),
    /// A diamond-only piece without a diamond
    #[error("diamond material requires diamond details")]
    MissingDiamond,
    /// Weight or carat so large that its price exceeds decimal range
    #[error("composition is too large to price")]
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn round_diamond() -> DiamondSpec {
        DiamondSpec::new(dec!(0.5), "round", "D", "FL")
    }

    #[test]
    fn test_negative_weight() {
        assert_eq!(
            MaterialComposition::metal(Material::Gold, dec!(-1), Some(Karat::K22)).unwrap_err(),
            CompositionError::NegativeWeight(dec!(-1))
        );
    }

    #[test]
    fn test_zero_weight_requires_diamond_material() {
        assert_eq!(
            MaterialComposition::metal(Material::Silver, dec!(0), None).unwrap_err(),
            CompositionError::ZeroWeight(Material::Silver)
        );
        assert!(MaterialComposition::loose_diamond(round_diamond()).is_ok());
    }

    #[test]
    fn test_diamond_material_requires_diamond() {
        assert_eq!(
            MaterialComposition::new(Material::Diamond, dec!(0), None, None).unwrap_err(),
            CompositionError::MissingDiamond
        );
    }

    #[test]
    fn test_non_positive_carat() {
        let diamond = DiamondSpec::new(dec!(0), "round", "D", "FL");
        assert_eq!(
            MaterialComposition::loose_diamond(diamond).unwrap_err(),
            CompositionError::NonPositiveCarat(dec!(0))
        );
    }

    #[test]
    fn test_karat_dropped_for_non_gold() {
        let silver = MaterialComposition::metal(Material::Silver, dec!(25), Some(Karat::K22)).unwrap();
        assert_eq!(silver.karat(), None);
        assert_eq!(silver.effective_karat(Karat::STANDARD), None);
    }

    #[test]
    fn test_effective_karat_falls_back() {
        let gold = MaterialComposition::metal(Material::RoseGold, dec!(4), None).unwrap();
        assert_eq!(gold.effective_karat(Karat::STANDARD), Some(Karat::K24));
        assert_eq!(gold.effective_karat(Karat::K18), Some(Karat::K18));
    }

    #[test]
    fn test_deserialize_validates() {
        let ring: MaterialComposition =
            serde_json::from_str(r#"{"material": "gold", "weight": 10, "karat": 22}"#).unwrap();
        assert_eq!(ring.material(), Material::Gold);
        assert_eq!(ring.weight(), dec!(10));
        assert_eq!(ring.karat(), Some(Karat::K22));

        assert!(
            serde_json::from_str::<MaterialComposition>(r#"{"material": "tin", "weight": 10}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<MaterialComposition>(
                r#"{"material": "gold", "weight": 10, "karat": 14}"#
            )
            .is_err()
        );
    }

    #[test]
    fn test_dto_reports_unknown_material() {
        let dto = MaterialCompositionDto {
            material: "brass".to_string(),
            weight: dec!(3),
            karat: None,
            diamond: None,
        };
        assert_eq!(
            MaterialComposition::try_from(dto).unwrap_err(),
            CompositionError::UnknownMaterial("brass".to_string())
        );
    }
}
