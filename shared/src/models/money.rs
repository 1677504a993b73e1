//! Money arithmetic on backend-supplied amounts
//!
//! Prices come straight from the backend, so products and sums saturate at
//! the `Decimal` bounds instead of panicking on overflow.

use rust_decimal::Decimal;

/// Rounding for displayed and reported amounts
const DECIMAL_PLACES: u32 = 2;

fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// price × quantity, saturating at the `Decimal` bounds
pub fn line_amount(price: Decimal, quantity: u32) -> Decimal {
    price
        .checked_mul(Decimal::from(quantity))
        .unwrap_or_else(|| saturated(price.is_sign_negative()))
}

/// Saturating Σ of amounts, rounded to two decimals
pub fn sum_amounts(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, amount| {
            acc.checked_add(amount)
                .unwrap_or_else(|| saturated(amount.is_sign_negative()))
        })
        .round_dp(DECIMAL_PLACES)
}
