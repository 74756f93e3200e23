use thiserror::Error;

use super::{CompositionError, GradeDimension, Material, RateKind};

/// The ways in which a price cannot be computed.
///
/// None of these are retryable by the calculator itself. Callers decide
/// whether to show "Pricing pending" or to refuse the operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Malformed material data, or a composition whose price does not fit
    /// in a decimal
    #[error("invalid composition: {0}")]
    InvalidComposition(#[from] CompositionError),

    /// A diamond grade missing from the snapshot's multiplier table
    #[error("unknown {dimension} grade {grade:?}")]
    UnknownGrade {
        /// The grading dimension that was looked up
        dimension: GradeDimension,
        /// The grade as the catalog spelled it
        grade: String,
    },

    /// The snapshot lacks a rate the material needs
    #[error("missing {rate} for {material}")]
    MissingRate {
        /// The absent rate
        rate: RateKind,
        /// The material that required it
        material: Material,
    },
}

impl PricingError {
    /// Whether this error means "pricing temporarily unavailable" (the rate
    /// feed may fill the gap) rather than a catalog data problem.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::MissingRate { .. })
    }
}
