//! The concrete application wiring the in-memory catalog, the configured
//! pricing policy and the live rate board together.

use crate::{catalog::MemoryCatalog, rates::RateBoard};
use glimmr_core::{models::RateSnapshot, ports::Application};
use glimmr_pricing::PriceCalculator;
use std::sync::Arc;
use time::OffsetDateTime;

/// The pricing daemon's application state.
#[derive(Clone)]
pub struct GlimmrApp {
    /// Product records and their cached prices
    pub catalog: Arc<MemoryCatalog>,
    /// The calculator, holding the configured policy
    pub pricer: PriceCalculator,
    /// The latest published rates
    pub rates: RateBoard,
}

impl Application for GlimmrApp {
    type Catalog = MemoryCatalog;
    type Pricer = PriceCalculator;

    fn catalog(&self) -> &Self::Catalog {
        &self.catalog
    }

    fn pricer(&self) -> &Self::Pricer {
        &self.pricer
    }

    fn rates(&self) -> Option<Arc<RateSnapshot>> {
        self.rates.current(OffsetDateTime::now_utc())
    }
}
