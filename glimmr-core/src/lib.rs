#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for jewelry pricing.
///
/// This module contains the material compositions, market rate snapshots,
/// pricing policy and the derived price breakdown. Validation happens at the
/// edges (constructors and deserialization) so the pricing code can assume
/// well-formed inputs.
pub mod models;

/// Interface traits for the pricing system.
///
/// These are the "ports" that decouple the price calculation from the rate
/// feed, the product catalog and whichever transport exposes them.
pub mod ports;
