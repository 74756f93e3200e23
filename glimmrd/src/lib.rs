#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod impls;
pub mod rates;

mod schedule;
pub use schedule::Scheduler;

mod cli;
pub use cli::Cli;

mod config;
pub use config::{AppConfig, CatalogConfig, RateFeedConfig};
