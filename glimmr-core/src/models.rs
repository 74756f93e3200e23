mod breakdown;
mod composition;
mod display;
mod error;
mod grade;
mod map;
mod material;
mod policy;
mod product;
mod rates;

pub use breakdown::PriceBreakdown;
pub use composition::{CompositionError, DiamondSpec, MaterialComposition, MaterialCompositionDto};
pub use display::{DisplayPrice, format_inr};
pub use error::PricingError;
pub use grade::{GradeDimension, GradeTable};
pub use map::Map;
pub use material::{Karat, Material};
pub use policy::{MakingCharge, MakingChargeMode, PolicyError, PricingPolicy, PricingPolicyDto};
pub use product::{CachedPrice, ProductId, ProductRecord};
pub use rates::{RateError, RateKind, RateSnapshot, RateSnapshotDto};

/// JSON schema for RFC3339 timestamps, which `time` does not provide itself.
#[cfg(feature = "schemars")]
pub(crate) fn time_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date-time",
    })
}
