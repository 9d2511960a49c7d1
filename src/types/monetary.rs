use rust_decimal::{Decimal, RoundingStrategy};

pub const CENT_PLACES: u32 = 2;

/// Rounds a summed amount to cents, resolving ties away from zero.
///
/// The result always carries a scale of exactly two decimal places so that
/// `100` renders as `100.00`.
pub fn round_to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENT_PLACES);
    rounded
}
