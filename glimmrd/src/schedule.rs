//! Clock-aligned scheduling for periodic rate refreshes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{Instrument as _, Level, event, span};

/// When and how often to run a periodic task.
///
/// Runs are aligned to `from + k * every`, so several daemons configured
/// alike refresh at the same instants.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    /// An RFC3339 timestamp to align the schedule to (if omitted, the first run is immediate)
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    /// How often to run; no runs at all when omitted or zero
    #[serde(default, with = "humantime_serde::option")]
    pub every: Option<Duration>,
}

impl Scheduler {
    /// A schedule running immediately and then every `every`.
    pub fn every(every: Duration) -> Self {
        Self {
            from: None,
            every: Some(every),
        }
    }

    /// The run interval, if runs are scheduled at all.
    pub fn period(&self) -> Option<Duration> {
        self.every.filter(|every| !every.is_zero())
    }

    /// The first run time at or after `now`.
    pub fn first_run(&self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        let delta = self.period()?;
        Some(match self.from {
            Some(from) if from < now => {
                let periods = ((now - from) / delta).ceil() as u32;
                from + delta * periods
            }
            Some(from) => from,
            None => now,
        })
    }

    /// Run `f` at every scheduled instant until it fails.
    ///
    /// Returns immediately with `Ok(())` when no positive interval is
    /// configured.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use glimmrd::Scheduler;
    ///
    /// # fn main() -> Result<(), String> {
    /// let scheduler = Scheduler::every(Duration::from_secs(60));
    ///
    /// # tokio_test::block_on(async {
    /// scheduler.schedule(async |timestamp| {
    ///     println!("refreshing rates at {}", timestamp);
    ///     Ok::<(), String>(())
    /// }).await?;
    /// # Ok(())
    /// # })
    /// # }
    /// ```
    pub async fn schedule<T, E>(
        &self,
        f: impl AsyncFn(OffsetDateTime) -> Result<T, E>,
    ) -> Result<(), E> {
        let now = OffsetDateTime::now_utc();
        let (Some(delta), Some(mut anchor)) = (self.period(), self.first_run(now)) else {
            return Ok(());
        };

        tokio::time::sleep((anchor - now).unsigned_abs()).await;

        let mut interval = tokio::time::interval(delta);

        loop {
            interval.tick().await;

            let span = span!(Level::DEBUG, "scheduled run");
            async {
                event!(Level::DEBUG, run_time = %anchor);
                f(anchor).await
            }
            .instrument(span)
            .await?;

            anchor += delta;
        }
    }
}
