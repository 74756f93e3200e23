#![allow(dead_code)]
use glimmr_core::models::{GradeDimension, RateSnapshot, RateSnapshotDto};
use rstest::fixture;
use rust_decimal_macros::dec;
use time::macros::datetime;

// The rate snapshot the storefront examples are worked against, before
// validation so tests can tweak it.
pub fn market() -> RateSnapshotDto {
    RateSnapshot::builder(datetime!(2026-03-02 09:30 UTC))
        .gold_per_gram(dec!(6500))
        .silver_per_gram(dec!(85))
        .platinum_per_gram(dec!(3200))
        .diamond_base_rate_per_carat(dec!(50000))
        .grade(GradeDimension::Cut, "round", dec!(1.0))
        .grade(GradeDimension::Cut, "princess", dec!(0.9))
        .grade(GradeDimension::Cut, "emerald", dec!(0.95))
        .grade(GradeDimension::Color, "D", dec!(1.2))
        .grade(GradeDimension::Color, "G", dec!(1.0))
        .grade(GradeDimension::Clarity, "FL", dec!(1.3))
        .grade(GradeDimension::Clarity, "VS1", dec!(1.0))
}

#[fixture]
pub fn rates() -> RateSnapshot {
    market().build().unwrap()
}
