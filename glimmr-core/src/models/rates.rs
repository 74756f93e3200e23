use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use super::{GradeDimension, GradeTable, Material, PricingError};

/// The individual market rates a snapshot may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum RateKind {
    /// Fine gold, per gram
    GoldPerGram,
    /// Silver, per gram
    SilverPerGram,
    /// Platinum, per gram
    PlatinumPerGram,
    /// Diamond base rate, per carat
    DiamondBaseRatePerCarat,
}

impl RateKind {
    /// The per-gram rate a material's metal cost is priced against.
    ///
    /// Diamond-only pieces have no metal rate.
    pub fn for_metal(material: Material) -> Option<Self> {
        match material {
            Material::Gold | Material::RoseGold | Material::WhiteGold => Some(Self::GoldPerGram),
            Material::Silver => Some(Self::SilverPerGram),
            Material::Platinum => Some(Self::PlatinumPerGram),
            Material::Diamond => None,
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GoldPerGram => "goldPerGram",
            Self::SilverPerGram => "silverPerGram",
            Self::PlatinumPerGram => "platinumPerGram",
            Self::DiamondBaseRatePerCarat => "diamondBaseRatePerCarat",
        })
    }
}

/// An immutable, timestamped capture of market rates.
///
/// A snapshot is produced by the rate feed and handed to the calculator by
/// value (or behind an `Arc`); nothing mutates it after construction. Every
/// rate is optional because feeds are partial, but every rate that is present
/// is positive, as is every grade multiplier.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RateSnapshotDto", into = "RateSnapshotDto")
)]
pub struct RateSnapshot {
    timestamp: OffsetDateTime,
    gold_per_gram: Option<Decimal>,
    silver_per_gram: Option<Decimal>,
    platinum_per_gram: Option<Decimal>,
    diamond_base_rate_per_carat: Option<Decimal>,
    cut_multiplier: GradeTable,
    color_multiplier: GradeTable,
    clarity_multiplier: GradeTable,
}

impl RateSnapshot {
    /// Start building a snapshot taken at `timestamp`.
    pub fn builder(timestamp: OffsetDateTime) -> RateSnapshotDto {
        RateSnapshotDto {
            timestamp,
            gold_per_gram: None,
            silver_per_gram: None,
            platinum_per_gram: None,
            diamond_base_rate_per_carat: None,
            cut_multiplier: GradeTable::default(),
            color_multiplier: GradeTable::default(),
            clarity_multiplier: GradeTable::default(),
        }
    }

    /// When the rates were captured
    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// How old the snapshot is relative to `now` (negative if from the future)
    pub fn age(&self, now: OffsetDateTime) -> Duration {
        now - self.timestamp
    }

    /// The rate of the given kind, if the feed supplied it.
    pub fn get(&self, kind: RateKind) -> Option<Decimal> {
        match kind {
            RateKind::GoldPerGram => self.gold_per_gram,
            RateKind::SilverPerGram => self.silver_per_gram,
            RateKind::PlatinumPerGram => self.platinum_per_gram,
            RateKind::DiamondBaseRatePerCarat => self.diamond_base_rate_per_carat,
        }
    }

    /// The rate of the given kind, or `MissingRate` naming the material that needed it.
    pub fn require(&self, kind: RateKind, material: Material) -> Result<Decimal, PricingError> {
        self.get(kind)
            .ok_or(PricingError::MissingRate { rate: kind, material })
    }

    /// The multiplier table for one grading dimension
    pub fn grades(&self, dimension: GradeDimension) -> &GradeTable {
        match dimension {
            GradeDimension::Cut => &self.cut_multiplier,
            GradeDimension::Color => &self.color_multiplier,
            GradeDimension::Clarity => &self.clarity_multiplier,
        }
    }

    /// Resolve a diamond grade to its multiplier, failing closed.
    pub fn multiplier(&self, dimension: GradeDimension, grade: &str) -> Result<Decimal, PricingError> {
        self.grades(dimension).lookup(dimension, grade)
    }
}

/// The "DTO" type for a rate snapshot, also used as its builder.
///
/// Field names follow the rate feed's JSON contract.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct RateSnapshotDto {
    /// RFC3339 capture time
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    #[cfg_attr(feature = "schemars", schemars(schema_with = "super::time_schema"))]
    pub timestamp: OffsetDateTime,
    /// Fine gold per gram
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub gold_per_gram: Option<Decimal>,
    /// Silver per gram
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub silver_per_gram: Option<Decimal>,
    /// Platinum per gram
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub platinum_per_gram: Option<Decimal>,
    /// Diamond base rate per carat
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub diamond_base_rate_per_carat: Option<Decimal>,
    /// Cut grade multipliers
    #[cfg_attr(feature = "serde", serde(default))]
    pub cut_multiplier: GradeTable,
    /// Color grade multipliers
    #[cfg_attr(feature = "serde", serde(default))]
    pub color_multiplier: GradeTable,
    /// Clarity grade multipliers
    #[cfg_attr(feature = "serde", serde(default))]
    pub clarity_multiplier: GradeTable,
}

impl RateSnapshotDto {
    /// Set the gold rate per gram
    pub fn gold_per_gram(mut self, rate: Decimal) -> Self {
        self.gold_per_gram = Some(rate);
        self
    }

    /// Set the silver rate per gram
    pub fn silver_per_gram(mut self, rate: Decimal) -> Self {
        self.silver_per_gram = Some(rate);
        self
    }

    /// Set the platinum rate per gram
    pub fn platinum_per_gram(mut self, rate: Decimal) -> Self {
        self.platinum_per_gram = Some(rate);
        self
    }

    /// Set the diamond base rate per carat
    pub fn diamond_base_rate_per_carat(mut self, rate: Decimal) -> Self {
        self.diamond_base_rate_per_carat = Some(rate);
        self
    }

    /// Add a grade multiplier to one of the tables
    pub fn grade(mut self, dimension: GradeDimension, grade: impl Into<String>, multiplier: Decimal) -> Self {
        let table = match dimension {
            GradeDimension::Cut => &mut self.cut_multiplier,
            GradeDimension::Color => &mut self.color_multiplier,
            GradeDimension::Clarity => &mut self.clarity_multiplier,
        };
        table.insert(grade, multiplier);
        self
    }

    /// Validate into an immutable snapshot
    pub fn build(self) -> Result<RateSnapshot, RateError> {
        self.try_into()
    }
}

impl TryFrom<RateSnapshotDto> for RateSnapshot {
    type Error = RateError;

    fn try_from(value: RateSnapshotDto) -> Result<Self, Self::Error> {
        let rates = [
            (RateKind::GoldPerGram, value.gold_per_gram),
            (RateKind::SilverPerGram, value.silver_per_gram),
            (RateKind::PlatinumPerGram, value.platinum_per_gram),
            (RateKind::DiamondBaseRatePerCarat, value.diamond_base_rate_per_carat),
        ];
        for (kind, rate) in rates {
            if let Some(rate) = rate.filter(|rate| *rate <= Decimal::ZERO) {
                return Err(RateError::NonPositiveRate { kind, value: rate });
            }
        }

        let tables = [
            (GradeDimension::Cut, &value.cut_multiplier),
            (GradeDimension::Color, &value.color_multiplier),
            (GradeDimension::Clarity, &value.clarity_multiplier),
        ];
        for (dimension, table) in tables {
            if let Some((grade, multiplier)) = table.iter().find(|(_, m)| *m <= Decimal::ZERO) {
                return Err(RateError::NonPositiveMultiplier {
                    dimension,
                    grade: grade.to_string(),
                    value: multiplier,
                });
            }
        }

        Ok(Self {
            timestamp: value.timestamp,
            gold_per_gram: value.gold_per_gram,
            silver_per_gram: value.silver_per_gram,
            platinum_per_gram: value.platinum_per_gram,
            diamond_base_rate_per_carat: value.diamond_base_rate_per_carat,
            cut_multiplier: value.cut_multiplier,
            color_multiplier: value.color_multiplier,
            clarity_multiplier: value.clarity_multiplier,
        })
    }
}

impl From<RateSnapshot> for RateSnapshotDto {
    fn from(value: RateSnapshot) -> Self {
        Self {
            timestamp: value.timestamp,
            gold_per_gram: value.gold_per_gram,
            silver_per_gram: value.silver_per_gram,
            platinum_per_gram: value.platinum_per_gram,
            diamond_base_rate_per_carat: value.diamond_base_rate_per_carat,
            cut_multiplier: value.cut_multiplier,
            color_multiplier: value.color_multiplier,
            clarity_multiplier: value.clarity_multiplier,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for RateSnapshot {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        RateSnapshotDto::schema_name()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        RateSnapshotDto::json_schema(generator)
    }
}

/// The ways in which a rate feed payload can be invalid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    /// A supplied rate is zero or negative
    #[error("{kind} must be positive, got {value}")]
    NonPositiveRate {
        /// The offending rate
        kind: RateKind,
        /// Its value
        value: Decimal,
    },
    /// A supplied grade multiplier is zero or negative
    #[error("{dimension} multiplier for {grade:?} must be positive, got {value}")]
    NonPositiveMultiplier {
        /// The table containing the grade
        dimension: GradeDimension,
        /// The offending grade
        grade: String,
        /// Its multiplier
        value: Decimal,
    },
}
