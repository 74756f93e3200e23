use super::TestCatalog;
use glimmr_core::{
    models::{MakingCharge, PricingPolicy, RateSnapshot},
    ports::Application,
};
use glimmr_pricing::PriceCalculator;
use rust_decimal_macros::dec;
use std::sync::Arc;

#[derive(Clone)]
pub struct TestApp {
    pub catalog: Arc<TestCatalog>,
    pub rates: Option<Arc<RateSnapshot>>,
    pricer: PriceCalculator,
}

impl TestApp {
    /// A storefront charging a flat ₹500 making charge and 3% GST.
    pub fn new(catalog: TestCatalog, rates: Option<RateSnapshot>) -> Self {
        let policy = PricingPolicy::new(MakingCharge::Flat(dec!(500)), dec!(0.03)).unwrap();
        Self {
            catalog: Arc::new(catalog),
            rates: rates.map(Arc::new),
            pricer: PriceCalculator::new(policy),
        }
    }
}

impl Application for TestApp {
    type Catalog = TestCatalog;
    type Pricer = PriceCalculator;

    fn catalog(&self) -> &Self::Catalog {
        &self.catalog
    }

    fn pricer(&self) -> &Self::Pricer {
        &self.pricer
    }

    fn rates(&self) -> Option<Arc<RateSnapshot>> {
        self.rates.clone()
    }
}
