use std::sync::Arc;

use crate::models::RateSnapshot;

mod catalog;
mod pricer;
mod rates;

pub use catalog::CatalogRepository;
pub use pricer::Pricer;
pub use rates::RateSource;

/// The top-level port bundling everything a transport needs to serve prices.
///
/// Implementations decide where the catalog lives, which pricing policy is in
/// force and how rate snapshots are refreshed; consumers only ever see an
/// already-captured snapshot.
pub trait Application {
    /// The product catalog store
    type Catalog: CatalogRepository;

    /// The price calculator
    type Pricer: Pricer;

    /// Access the catalog
    fn catalog(&self) -> &Self::Catalog;

    /// Access the calculator
    fn pricer(&self) -> &Self::Pricer;

    /// Capture the current rate snapshot.
    ///
    /// Returns `None` when no usable snapshot exists (never fetched, or too
    /// stale to price from). Callers must use the returned value for the whole
    /// of one calculation instead of calling this again mid-way.
    fn rates(&self) -> Option<Arc<RateSnapshot>>;
}
