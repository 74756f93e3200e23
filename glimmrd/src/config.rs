//! Application configuration management.
//!
//! Configuration is merged from default values, an optional TOML file and
//! environment variables, in increasing order of precedence.

use crate::{Cli, Scheduler, rates::RateSourceConfig};
use glimmr_axum::config::AxumConfig;
use glimmr_core::models::PricingPolicy;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// The main application configuration that composes all component configs
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Web server configuration
    #[serde(default)]
    pub server: AxumConfig,

    /// Making charges, GST and the karat fallback
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Where market rates come from and how fresh they must be
    #[serde(default)]
    pub rates: RateFeedConfig,

    /// The catalog seed
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Rate feed configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateFeedConfig {
    /// The feed to poll; without one every price stays pending
    #[serde(default)]
    pub source: Option<RateSourceConfig>,

    /// When to poll the feed
    #[serde(default = "default_schedule")]
    pub schedule: Scheduler,

    /// Snapshots older than this are not priced from
    #[serde(default = "default_max_age", with = "humantime_serde")]
    pub max_age: Duration,
}

fn default_schedule() -> Scheduler {
    Scheduler::every(Duration::from_secs(60))
}

fn default_max_age() -> Duration {
    Duration::from_secs(10 * 60)
}

impl Default for RateFeedConfig {
    fn default() -> Self {
        Self {
            source: None,
            schedule: default_schedule(),
            max_age: default_max_age(),
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// A JSON file holding an array of product records; the catalog starts
    /// empty when omitted
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `APP_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Set server bind address
    /// export APP_SERVER__BIND_ADDRESS="0.0.0.0:3000"
    ///
    /// # Charge 12% making on material cost
    /// export APP_PRICING__MAKING_CHARGE_MODE="percent"
    /// export APP_PRICING__MAKING_CHARGE_VALUE="0.12"
    ///
    /// # Refuse rates older than five minutes
    /// export APP_RATES__MAX_AGE="5m"
    /// ```
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // This maps APP_SERVER__BIND_ADDRESS to server.bind_address
        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        let app_config: Self = built_config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject settings that parse but cannot run.
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.rates.schedule.every != Some(Duration::ZERO),
            "rates.schedule.every must be a positive duration"
        );
        Ok(())
    }
}
