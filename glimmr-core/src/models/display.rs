use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Format an amount in rupees with Indian digit grouping.
///
/// The amount is rounded half away from zero to `decimals` places, then the
/// integer part is grouped as thousands followed by pairs (lakh, crore):
/// `1234567.891` with two decimals becomes `12,34,567.89`.
pub fn format_inr(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + whole.len() / 2 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }

    let (head, tail) = whole.split_at(whole.len().saturating_sub(3));
    let lead = head.len() % 2;
    for (i, digit) in head.chars().enumerate() {
        if i > 0 && (i + 2 - lead) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !head.is_empty() {
        grouped.push(',');
    }
    grouped.push_str(tail);

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// A consumer-facing price: either a correct amount or explicitly absent.
///
/// The storefront never renders `₹0` for an item it cannot price; it renders
/// `Pricing pending` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "status", rename_all = "lowercase")
)]
pub enum DisplayPrice {
    /// A computed price in rupees
    Priced {
        /// The amount, in rupees
        #[cfg_attr(feature = "serde", serde(with = "rust_decimal::serde::arbitrary_precision"))]
        #[cfg_attr(feature = "schemars", schemars(with = "Decimal"))]
        amount: Decimal,
    },
    /// Pricing is temporarily unavailable
    Pending,
}

impl DisplayPrice {
    /// The amount, when priced
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Priced { amount } => Some(*amount),
            Self::Pending => None,
        }
    }
}

impl From<Option<Decimal>> for DisplayPrice {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Pending, |amount| Self::Priced { amount })
    }
}

impl fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priced { amount } => write!(f, "₹{}", format_inr(*amount, 0)),
            Self::Pending => f.write_str("Pricing pending"),
        }
    }
}
