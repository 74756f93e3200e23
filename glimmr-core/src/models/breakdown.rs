use rust_decimal::Decimal;
use std::fmt;

use super::{DisplayPrice, format_inr};

/// An itemized consumer price.
///
/// This is a derived view, never a source of truth: it is recomputed from the
/// current composition and rate snapshot whenever it is needed. The component
/// fields are carried at full precision, and
/// `final_price == round(metal_cost + diamond_cost + making_charges + gst)`
/// to whole rupees, half away from zero. Amounts travel as exact JSON
/// numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PriceBreakdown {
    /// Metal value at the current rate and purity
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::arbitrary_precision"))]
    #[cfg_attr(feature = "schemars", schemars(with = "Decimal"))]
    pub metal_cost: Decimal,
    /// Diamond value after grade multipliers (zero without a diamond)
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::arbitrary_precision"))]
    #[cfg_attr(feature = "schemars", schemars(with = "Decimal"))]
    pub diamond_cost: Decimal,
    /// Artisan/labor charges per the pricing policy
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::arbitrary_precision"))]
    #[cfg_attr(feature = "schemars", schemars(with = "Decimal"))]
    pub making_charges: Decimal,
    /// Tax on the pre-tax subtotal
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::arbitrary_precision"))]
    #[cfg_attr(feature = "schemars", schemars(with = "Decimal"))]
    pub gst: Decimal,
    /// Total in whole rupees
    #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::arbitrary_precision"))]
    #[cfg_attr(feature = "schemars", schemars(with = "Decimal"))]
    pub final_price: Decimal,
}

impl PriceBreakdown {
    /// Metal plus diamond cost
    pub fn material_cost(&self) -> Decimal {
        self.metal_cost + self.diamond_cost
    }

    /// Everything before tax
    pub fn subtotal(&self) -> Decimal {
        self.material_cost() + self.making_charges
    }

    /// The final price as the storefront displays it
    pub fn display_price(&self) -> DisplayPrice {
        DisplayPrice::Priced {
            amount: self.final_price,
        }
    }
}

impl fmt::Display for PriceBreakdown {
    /// Renders an itemized receipt with paise for the lines and whole rupees
    /// for the total.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = [
            ("Metal", format_inr(self.metal_cost, 2)),
            ("Diamond", format_inr(self.diamond_cost, 2)),
            ("Making charges", format_inr(self.making_charges, 2)),
            ("GST", format_inr(self.gst, 2)),
        ];
        let total = format_inr(self.final_price, 0);
        let width = lines
            .iter()
            .map(|(_, amount)| amount.chars().count())
            .chain(std::iter::once(total.chars().count()))
            .max()
            .unwrap_or_default();

        for (label, amount) in lines {
            writeln!(f, "{label:<16}₹{amount:>width$}")?;
        }
        write!(f, "{:<16}₹{total:>width$}", "Total")
    }
}
