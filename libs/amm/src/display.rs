//! Display-side conversions
//!
//! Decimal values here are for rendering only and never feed a transaction.
//! The one exception, [`usd_paired_amount`], produces a raw amount and so
//! works on the integer mantissas of the supplied prices instead of
//! multiplying decimals.

use num_bigint::BigUint;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::str::FromStr;
use types::{format_units, scale, RawAmount, ReservePair};

/// Human-scale decimal for `amount`; `None` past Decimal's 28-digit range
pub fn to_decimal(amount: &RawAmount, decimals: u8) -> Option<Decimal> {
    Decimal::from_str(&format_units(amount, decimals)).ok()
}

/// Units of the output token per unit of the input token at current reserves
///
/// `None` while the pool has no input-side liquidity.
pub fn exchange_rate(reserves: &ReservePair, decimals_in: u8, decimals_out: u8) -> Option<Decimal> {
    if reserves.reserve_in.is_zero() {
        return None;
    }
    let reserve_in = to_decimal(&reserves.reserve_in, decimals_in)?;
    let reserve_out = to_decimal(&reserves.reserve_out, decimals_out)?;
    reserve_out.checked_div(reserve_in)
}

/// USD value of `amount` at `price_usd` per whole token
pub fn usd_value(amount: &RawAmount, decimals: u8, price_usd: Decimal) -> Option<Decimal> {
    to_decimal(amount, decimals)?.checked_mul(price_usd)
}

/// Paired deposit for an empty pool, from externally supplied USD prices
///
/// ```text
/// amount_b = amount_a * price_a / price_b * 10^decimals_b / 10^decimals_a
/// ```
///
/// evaluated as one floor division over integers. `None` unless both prices
/// are strictly positive.
pub fn usd_paired_amount(
    amount_a: &RawAmount,
    decimals_a: u8,
    price_a: Decimal,
    decimals_b: u8,
    price_b: Decimal,
) -> Option<RawAmount> {
    let (mantissa_a, scale_a) = positive_parts(price_a)?;
    let (mantissa_b, scale_b) = positive_parts(price_b)?;

    let numerator = amount_a * mantissa_a * pow10(scale_b) * scale(decimals_b);
    let denominator = mantissa_b * pow10(scale_a) * scale(decimals_a);
    Some(numerator / denominator)
}

fn positive_parts(price: Decimal) -> Option<(BigUint, u32)> {
    if price.is_sign_negative() || price.is_zero() {
        return None;
    }
    let mantissa = u128::try_from(price.mantissa()).ok()?;
    Some((BigUint::from(mantissa), price.scale()))
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}
