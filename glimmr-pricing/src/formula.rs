use glimmr_core::models::{
    CompositionError, GradeDimension, Karat, MaterialComposition, PriceBreakdown, PricingError,
    PricingPolicy, RateKind, RateSnapshot,
};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{Level, event};

/// Compute the itemized consumer price of a composition.
///
/// All intermediate arithmetic is carried at full decimal precision; only the
/// final price is rounded (half-up, whole rupees).
///
/// # Errors
///
/// - `MissingRate` if the snapshot lacks the metal rate, or the diamond base
///   rate when the piece carries a diamond
/// - `UnknownGrade` if a diamond grade is not in the snapshot's tables
/// - `InvalidComposition(OutOfRange)` if the price does not fit in a decimal
pub fn compute_price(
    composition: &MaterialComposition,
    rates: &RateSnapshot,
    policy: &PricingPolicy,
) -> Result<PriceBreakdown, PricingError> {
    let metal_cost = metal_cost(composition, rates, policy.default_karat())?;
    let diamond_cost = diamond_cost(composition, rates)?;
    let material_cost = in_range(metal_cost.checked_add(diamond_cost))?;
    let making_charges = in_range(policy.making_charge().apply(material_cost))?;
    let subtotal = in_range(material_cost.checked_add(making_charges))?;
    let gst = in_range(policy.gst_rate().checked_mul(subtotal))?;
    let final_price = round_rupees(in_range(subtotal.checked_add(gst))?);

    event!(
        Level::DEBUG,
        material = %composition.material(),
        rates_as_of = %rates.timestamp(),
        %metal_cost,
        %diamond_cost,
        %making_charges,
        %gst,
        %final_price,
        "computed price"
    );

    Ok(PriceBreakdown {
        metal_cost,
        diamond_cost,
        making_charges,
        gst,
        final_price,
    })
}

/// The live material value of a composition (metal + diamond), without
/// making charges or tax, for listing cards.
///
/// Gold items without a karat are valued at [`Karat::STANDARD`].
///
/// # Returns
///
/// Ok(None) when the snapshot has no rate for what the piece is made of, so
/// the caller can show "Pricing pending" rather than a misleading zero.
pub fn live_unit_price(
    composition: &MaterialComposition,
    rates: &RateSnapshot,
) -> Result<Option<Decimal>, PricingError> {
    live_value(composition, rates, Karat::STANDARD)
}

pub(crate) fn live_value(
    composition: &MaterialComposition,
    rates: &RateSnapshot,
    default_karat: Karat,
) -> Result<Option<Decimal>, PricingError> {
    let value = metal_cost(composition, rates, default_karat).and_then(|metal| {
        in_range(metal.checked_add(diamond_cost(composition, rates)?))
    });

    match value {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_pending() => {
            event!(Level::DEBUG, err = err.to_string(), "live price pending");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Round to whole rupees, half away from zero (half-up for prices).
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn metal_cost(
    composition: &MaterialComposition,
    rates: &RateSnapshot,
    default_karat: Karat,
) -> Result<Decimal, PricingError> {
    let material = composition.material();

    // Diamond-only pieces have no metal setting to price.
    let Some(kind) = RateKind::for_metal(material) else {
        return Ok(Decimal::ZERO);
    };
    let rate = rates.require(kind, material)?;
    let value = in_range(rate.checked_mul(composition.weight()))?;

    // Multiply by parts first and divide by 24 last, so whole-gram 18K and
    // 24K prices stay exact.
    match composition.effective_karat(default_karat) {
        Some(karat) => {
            let parts = in_range(value.checked_mul(Decimal::from(karat.parts())))?;
            in_range(parts.checked_div(Decimal::from(24)))
        }
        None => Ok(value),
    }
}

fn diamond_cost(
    composition: &MaterialComposition,
    rates: &RateSnapshot,
) -> Result<Decimal, PricingError> {
    let Some(diamond) = composition.diamond() else {
        return Ok(Decimal::ZERO);
    };

    let base = rates.require(RateKind::DiamondBaseRatePerCarat, composition.material())?;
    let grades = [
        (GradeDimension::Cut, diamond.cut.as_str()),
        (GradeDimension::Color, diamond.color.as_str()),
        (GradeDimension::Clarity, diamond.clarity.as_str()),
    ];

    // Each grade scales value independently, so the multipliers compose
    // multiplicatively.
    grades
        .into_iter()
        .try_fold(
            in_range(base.checked_mul(diamond.carat))?,
            |value, (dimension, grade)| {
                let multiplier = rates.multiplier(dimension, grade).inspect_err(|err| {
                    event!(Level::WARN, err = err.to_string(), "diamond grade not in rate tables");
                })?;
                in_range(value.checked_mul(multiplier))
            },
        )
}

fn in_range(value: Option<Decimal>) -> Result<Decimal, PricingError> {
    value.ok_or(PricingError::InvalidComposition(CompositionError::OutOfRange))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmr_core::models::{DiamondSpec, MakingCharge, Material};
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    fn rates() -> RateSnapshot {
        RateSnapshot::builder(datetime!(2026-03-02 09:30 UTC))
            .gold_per_gram(dec!(6500))
            .silver_per_gram(dec!(85))
            .platinum_per_gram(dec!(3200))
            .diamond_base_rate_per_carat(dec!(50000))
            .grade(GradeDimension::Cut, "round", dec!(1.0))
            .grade(GradeDimension::Color, "D", dec!(1.2))
            .grade(GradeDimension::Clarity, "FL", dec!(1.3))
            .build()
            .unwrap()
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(round_rupees(dec!(2407.5)), dec!(2408));
        assert_eq!(round_rupees(dec!(2407.49)), dec!(2407));
        assert_eq!(round_rupees(dec!(61885.8333)), dec!(61886));
    }

    #[test]
    fn test_platinum_uses_platinum_rate() {
        let band = MaterialComposition::metal(Material::Platinum, dec!(5), None).unwrap();
        let policy = PricingPolicy::new(MakingCharge::Flat(dec!(0)), dec!(0)).unwrap();
        let breakdown = compute_price(&band, &rates(), &policy).unwrap();
        assert_eq!(breakdown.metal_cost, dec!(16000));
        assert_eq!(breakdown.final_price, dec!(16000));
    }

    #[test]
    fn test_gold_with_diamond() {
        let ring = MaterialComposition::new(
            Material::WhiteGold,
            dec!(4),
            Some(Karat::K18),
            Some(DiamondSpec::new(dec!(0.25), "round", "D", "FL")),
        )
        .unwrap();
        let value = live_unit_price(&ring, &rates()).unwrap().unwrap();
        // 6500 * 4 * 18 / 24 + 50000 * 0.25 * 1.0 * 1.2 * 1.3
        assert_eq!(value, dec!(19500) + dec!(19500));
    }

    #[test]
    fn test_diamond_rate_missing_on_metal_piece() {
        let rates = RateSnapshot::builder(datetime!(2026-03-02 09:30 UTC))
            .gold_per_gram(dec!(6500))
            .build()
            .unwrap();
        let ring = MaterialComposition::new(
            Material::Gold,
            dec!(4),
            Some(Karat::K22),
            Some(DiamondSpec::new(dec!(0.25), "round", "D", "FL")),
        )
        .unwrap();

        assert_eq!(
            compute_price(&ring, &rates, &PricingPolicy::default()).unwrap_err(),
            PricingError::MissingRate {
                rate: RateKind::DiamondBaseRatePerCarat,
                material: Material::Gold
            }
        );
        assert_eq!(live_unit_price(&ring, &rates).unwrap(), None);
    }
}
