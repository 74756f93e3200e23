use rust_decimal::Decimal;
use thiserror::Error;

use super::Karat;

/// How artisan/labor charges are added on top of material cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MakingCharge {
    /// A fixed amount per item
    Flat(Decimal),
    /// A fraction of the material (metal + diamond) cost, e.g. 0.10 for 10%
    Percent(Decimal),
}

impl MakingCharge {
    /// The making charge for an item whose material cost is `material_cost`.
    /// `None` if a percentage charge overflows.
    pub fn apply(&self, material_cost: Decimal) -> Option<Decimal> {
        match *self {
            Self::Flat(amount) => Some(amount),
            Self::Percent(rate) => rate.checked_mul(material_cost),
        }
    }

    /// The configured mode
    pub fn mode(&self) -> MakingChargeMode {
        match self {
            Self::Flat(_) => MakingChargeMode::Flat,
            Self::Percent(_) => MakingChargeMode::Percent,
        }
    }

    /// The configured amount or rate
    pub fn value(&self) -> Decimal {
        match *self {
            Self::Flat(value) | Self::Percent(value) => value,
        }
    }
}

/// The making-charge mode as it appears in configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MakingChargeMode {
    /// `making_charge_value` is an amount in rupees
    Flat,
    /// `making_charge_value` is a fraction of material cost
    Percent,
}

/// The storefront's pricing policy: making charges, GST and the karat assumed
/// for gold items that do not state one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PricingPolicyDto", into = "PricingPolicyDto")
)]
pub struct PricingPolicy {
    making_charge: MakingCharge,
    gst_rate: Decimal,
    default_karat: Karat,
}

impl PricingPolicy {
    /// Creates a validated policy with the standard karat fallback.
    pub fn new(making_charge: MakingCharge, gst_rate: Decimal) -> Result<Self, PolicyError> {
        if making_charge.value() < Decimal::ZERO {
            return Err(PolicyError::NegativeMakingCharge(making_charge.value()));
        }
        if gst_rate < Decimal::ZERO {
            return Err(PolicyError::NegativeGstRate(gst_rate));
        }
        Ok(Self {
            making_charge,
            gst_rate,
            default_karat: Karat::STANDARD,
        })
    }

    /// Replace the karat assumed for gold items without one
    pub fn with_default_karat(mut self, karat: Karat) -> Self {
        self.default_karat = karat;
        self
    }

    /// The making-charge rule
    pub fn making_charge(&self) -> MakingCharge {
        self.making_charge
    }

    /// GST as a fraction, e.g. 0.03 for 3%
    pub fn gst_rate(&self) -> Decimal {
        self.gst_rate
    }

    /// The karat assumed for gold items that do not state one
    pub fn default_karat(&self) -> Karat {
        self.default_karat
    }
}

impl Default for PricingPolicy {
    /// No making charge, 3% GST (the rate on jewelry in India), 24K fallback.
    fn default() -> Self {
        Self {
            making_charge: MakingCharge::Flat(Decimal::ZERO),
            gst_rate: Decimal::new(3, 2),
            default_karat: Karat::STANDARD,
        }
    }
}

/// The "DTO" type for the pricing policy, in configuration form.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingPolicyDto {
    /// "flat" or "percent"
    pub making_charge_mode: MakingChargeMode,
    /// Rupees when flat; a fraction of material cost when percent
    pub making_charge_value: Decimal,
    /// GST as a fraction
    pub gst_rate: Decimal,
    /// Karat assumed for gold items that omit it
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_karat: Karat,
}

impl TryFrom<PricingPolicyDto> for PricingPolicy {
    type Error = PolicyError;

    fn try_from(value: PricingPolicyDto) -> Result<Self, Self::Error> {
        let making_charge = match value.making_charge_mode {
            MakingChargeMode::Flat => MakingCharge::Flat(value.making_charge_value),
            MakingChargeMode::Percent => MakingCharge::Percent(value.making_charge_value),
        };
        Ok(Self::new(making_charge, value.gst_rate)?.with_default_karat(value.default_karat))
    }
}

impl From<PricingPolicy> for PricingPolicyDto {
    fn from(value: PricingPolicy) -> Self {
        Self {
            making_charge_mode: value.making_charge.mode(),
            making_charge_value: value.making_charge.value(),
            gst_rate: value.gst_rate,
            default_karat: value.default_karat,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for PricingPolicy {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        PricingPolicyDto::schema_name()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        PricingPolicyDto::json_schema(generator)
    }
}

/// The ways in which a pricing policy can be misconfigured
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    /// Making charge amount or rate below zero
    #[error("making charge must be non-negative, got {0}")]
    NegativeMakingCharge(Decimal),
    /// GST rate below zero
    #[error("gst rate must be non-negative, got {0}")]
    NegativeGstRate(Decimal),
}
