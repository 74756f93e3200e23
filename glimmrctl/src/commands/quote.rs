use glimmr_core::{
    models::{DisplayPrice, MaterialComposition, PriceBreakdown, PricingError, PricingPolicy, RateSnapshot},
    ports::Pricer as _,
};
use glimmr_pricing::PriceCalculator;
use serde::{Deserialize, Serialize};

/// Everything needed to price one composition offline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// What the piece is made of
    pub composition: MaterialComposition,
    /// The market rates to price against
    pub rates: RateSnapshot,
    /// Making charges, GST and karat fallback (the storefront defaults when omitted)
    #[serde(default)]
    pub policy: PricingPolicy,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum QuoteError {
    #[error("Pricing pending: {0}")]
    Pending(PricingError),
    #[error(transparent)]
    Invalid(PricingError),
}

impl From<PricingError> for QuoteError {
    fn from(err: PricingError) -> Self {
        if err.is_pending() {
            Self::Pending(err)
        } else {
            Self::Invalid(err)
        }
    }
}

impl QuoteRequest {
    fn calculator(&self) -> PriceCalculator {
        PriceCalculator::new(self.policy)
    }

    /// The full itemized price
    pub fn quote(&self) -> Result<PriceBreakdown, QuoteError> {
        Ok(self.calculator().compute_price(&self.composition, &self.rates)?)
    }

    /// The live estimate; pending when a rate is missing
    pub fn live(&self) -> Result<DisplayPrice, QuoteError> {
        Ok(self
            .calculator()
            .live_unit_price(&self.composition, &self.rates)?
            .into())
    }
}
