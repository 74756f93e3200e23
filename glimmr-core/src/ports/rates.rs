use crate::models::RateSnapshot;

/// A source of market rate snapshots, such as a third-party rate API.
///
/// Each successful fetch yields a fresh, immutable snapshot. Retrying and
/// scheduling are the caller's concern.
pub trait RateSource {
    /// Error type for fetch failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the latest rates.
    fn fetch(&self) -> impl Future<Output = Result<RateSnapshot, Self::Error>> + Send;
}
