#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/**
 * The pricing formula itself, as free functions.
 */
mod formula;
pub use formula::{compute_price, live_unit_price, round_rupees};

/**
 * The policy-carrying implementation of the `Pricer` port.
 */
mod calculator;
pub use calculator::PriceCalculator;
