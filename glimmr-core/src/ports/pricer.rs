use rust_decimal::Decimal;

use crate::models::{MaterialComposition, PriceBreakdown, PricingError, RateSnapshot};

/// Interface for price calculators.
///
/// A pricer is a pure function of its inputs and whatever policy it was
/// constructed with: no I/O, no interior state, safe to share across threads.
pub trait Pricer {
    /// Produce the full itemized price for a composition at the given rates.
    fn compute_price(
        &self,
        composition: &MaterialComposition,
        rates: &RateSnapshot,
    ) -> Result<PriceBreakdown, PricingError>;

    /// Produce the lighter-weight live estimate (metal + diamond, no making
    /// charges or tax) shown on listing cards.
    ///
    /// # Returns
    ///
    /// Ok(None) if the snapshot lacks a rate the composition needs. Other
    /// errors are data problems and are returned as such.
    fn live_unit_price(
        &self,
        composition: &MaterialComposition,
        rates: &RateSnapshot,
    ) -> Result<Option<Decimal>, PricingError>;
}
