use rust_decimal::Decimal;
use std::fmt;

use super::{Map, PricingError};

/// The three diamond grading dimensions that scale a stone's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum GradeDimension {
    /// Cut shape/quality, e.g. round, princess, cushion
    Cut,
    /// Color grade on the D to Z scale
    Color,
    /// Clarity grade on the FL to I3 scale
    Clarity,
}

impl fmt::Display for GradeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cut => "cut",
            Self::Color => "color",
            Self::Clarity => "clarity",
        })
    }
}

/// A closed lookup table from grade to value multiplier.
///
/// The table's keys are the complete set of grades it knows. Lookups never
/// default: a grade that is not listed is an [`PricingError::UnknownGrade`].
/// Multipliers are validated positive when a [`super::RateSnapshot`] is built.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct GradeTable(Map<String>);

impl GradeTable {
    /// Resolve a grade to its multiplier, failing closed.
    pub fn lookup(&self, dimension: GradeDimension, grade: &str) -> Result<Decimal, PricingError> {
        self.0
            .get(grade)
            .copied()
            .ok_or_else(|| PricingError::UnknownGrade {
                dimension,
                grade: grade.to_string(),
            })
    }

    /// Add or replace a grade.
    pub fn insert(&mut self, grade: impl Into<String>, multiplier: Decimal) -> Option<Decimal> {
        self.0.insert(grade.into(), multiplier)
    }

    /// The grades this table knows, in insertion order.
    pub fn grades(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over (grade, multiplier) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(grade, multiplier)| (grade.as_str(), *multiplier))
    }

    /// Number of known grades
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table knows no grades at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for GradeTable {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(grade, m)| (grade.into(), m)).collect())
    }
}
