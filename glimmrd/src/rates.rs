//! The market rate feed.
//!
//! A [`RateSourceConfig`] describes where snapshots come from. Fetched
//! snapshots are published on a [`RateBoard`], from which request handlers
//! capture one immutable `Arc<RateSnapshot>` per calculation. Snapshots older
//! than the configured maximum age are reported as absent, so a dead feed
//! degrades to "Pricing pending" instead of stale prices.

use glimmr_core::{models::RateSnapshot, ports::RateSource};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc, time::Duration};
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{Level, event};

/// Where rate snapshots are fetched from
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RateSourceConfig {
    /// A JSON document on disk, rewritten by some other process
    File {
        /// Path to the snapshot
        path: PathBuf,
    },
    /// A rate API answering `GET url` with a snapshot
    Http {
        /// The snapshot endpoint
        url: String,
        /// Request timeout
        #[serde(default = "default_timeout", with = "humantime_serde")]
        timeout: Duration,
    },
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

impl RateSourceConfig {
    /// Construct the configured source.
    pub fn build(&self) -> Result<FeedSource, FetchError> {
        Ok(match self {
            Self::File { path } => FeedSource::File(FileRates::new(path.clone())),
            Self::Http { url, timeout } => FeedSource::Http(HttpRates::new(url.clone(), *timeout)?),
        })
    }
}

/// The ways a rate fetch can fail
#[derive(Debug, Error)]
pub enum FetchError {
    /// The snapshot file could not be read
    #[error("failed to read {}", path.display())]
    Read {
        /// The file in question
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: std::io::Error,
    },
    /// The payload is not a valid snapshot
    #[error("invalid rate snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    /// The rate API could not be reached or answered with an error
    #[error("rate request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Reads snapshots from a JSON file.
#[derive(Debug, Clone)]
pub struct FileRates {
    path: PathBuf,
}

impl FileRates {
    /// A source reading `path` on every fetch
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RateSource for FileRates {
    type Error = FetchError;

    async fn fetch(&self) -> Result<RateSnapshot, Self::Error> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Read {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Fetches snapshots from an HTTP rate API.
#[derive(Debug, Clone)]
pub struct HttpRates {
    client: reqwest::Client,
    url: String,
}

impl HttpRates {
    /// A source issuing `GET url` on every fetch
    pub fn new(url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

impl RateSource for HttpRates {
    type Error = FetchError;

    async fn fetch(&self) -> Result<RateSnapshot, Self::Error> {
        // decode separately so payload problems are reported as such
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Any of the configured sources
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// See [`FileRates`]
    File(FileRates),
    /// See [`HttpRates`]
    Http(HttpRates),
}

impl RateSource for FeedSource {
    type Error = FetchError;

    async fn fetch(&self) -> Result<RateSnapshot, Self::Error> {
        match self {
            Self::File(source) => source.fetch().await,
            Self::Http(source) => source.fetch().await,
        }
    }
}

type Slot = Option<Arc<RateSnapshot>>;

/// The read side of the rate feed.
///
/// Cloning is cheap; every clone observes the latest published snapshot.
#[derive(Debug, Clone)]
pub struct RateBoard {
    receiver: watch::Receiver<Slot>,
    max_age: Duration,
}

/// The write side of the rate feed.
#[derive(Debug)]
pub struct RatePublisher(watch::Sender<Slot>);

impl RateBoard {
    /// Create an empty board and its publisher.
    pub fn new(max_age: Duration) -> (RatePublisher, Self) {
        let (sender, receiver) = watch::channel(None);
        (RatePublisher(sender), Self { receiver, max_age })
    }

    /// The snapshot to price from at `now`, if a fresh one exists.
    pub fn current(&self, now: OffsetDateTime) -> Option<Arc<RateSnapshot>> {
        let snapshot = self.receiver.borrow().clone()?;
        if snapshot.age(now) > self.max_age {
            event!(
                Level::DEBUG,
                as_of = %snapshot.timestamp(),
                "rate snapshot is stale"
            );
            None
        } else {
            Some(snapshot)
        }
    }

    /// The latest snapshot regardless of age
    pub fn latest(&self) -> Option<Arc<RateSnapshot>> {
        self.receiver.borrow().clone()
    }
}

/// What became of a published snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Publication {
    /// It is now the current snapshot
    Accepted,
    /// The same snapshot was already current
    Unchanged,
    /// Older than the current snapshot
    OutOfOrder,
    /// Same timestamp as the current snapshot but different rates
    Conflicting,
}

impl RatePublisher {
    /// Publish a snapshot, replacing the current one.
    ///
    /// A snapshot is identified by its timestamp: cached prices are matched
    /// on it. Older snapshots are ignored so a lagging feed replica cannot
    /// roll prices back, and a snapshot reusing the current timestamp with
    /// other rates is refused.
    pub fn publish(&self, snapshot: RateSnapshot) -> Publication {
        let incoming = snapshot.timestamp();
        let mut outcome = Publication::Accepted;
        self.0.send_if_modified(|slot| {
            outcome = match slot.as_deref() {
                Some(current) if current.timestamp() > incoming => Publication::OutOfOrder,
                Some(current) if current.timestamp() == incoming && *current == snapshot => {
                    Publication::Unchanged
                }
                Some(current) if current.timestamp() == incoming => Publication::Conflicting,
                _ => {
                    *slot = Some(Arc::new(snapshot));
                    return true;
                }
            };
            false
        });
        outcome
    }
}

/// Fetch once and publish the result.
///
/// Failures are logged and leave the previous snapshot in place.
pub async fn refresh<S: RateSource>(source: &S, publisher: &RatePublisher) {
    match source.fetch().await {
        Ok(snapshot) => {
            let as_of = snapshot.timestamp();
            match publisher.publish(snapshot) {
                Publication::Accepted => {
                    event!(Level::INFO, as_of = %as_of, "published rate snapshot");
                }
                Publication::Unchanged => {
                    event!(Level::DEBUG, as_of = %as_of, "rate snapshot unchanged");
                }
                Publication::OutOfOrder => {
                    event!(Level::WARN, as_of = %as_of, "ignored out-of-order rate snapshot");
                }
                Publication::Conflicting => {
                    event!(
                        Level::WARN,
                        as_of = %as_of,
                        "ignored rate snapshot that changes rates without a new timestamp"
                    );
                }
            }
        }
        Err(err) => {
            event!(
                Level::WARN,
                err = err.to_string(),
                "rate fetch failed, keeping previous snapshot"
            );
        }
    }
}
