use glimmr_core::{
    models::{MaterialComposition, PriceBreakdown, PricingError, PricingPolicy, RateSnapshot},
    ports::Pricer,
};
use rust_decimal::Decimal;

use crate::formula;

/// A price calculator bound to one pricing policy.
///
/// The calculator holds no rates: each call receives the snapshot to price
/// against, which keeps it stateless and freely shareable between threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PriceCalculator {
    policy: PricingPolicy,
}

impl PriceCalculator {
    /// Create a calculator for the given policy
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }
}

impl Pricer for PriceCalculator {
    fn compute_price(
        &self,
        composition: &MaterialComposition,
        rates: &RateSnapshot,
    ) -> Result<PriceBreakdown, PricingError> {
        formula::compute_price(composition, rates, &self.policy)
    }

    // Unlike the free function, gold without a karat falls back to the
    // policy's default rather than the hard standard.
    fn live_unit_price(
        &self,
        composition: &MaterialComposition,
        rates: &RateSnapshot,
    ) -> Result<Option<Decimal>, PricingError> {
        formula::live_value(composition, rates, self.policy.default_karat())
    }
}
