//! Conversion between human decimal strings and raw units
//!
//! Decimals only affect presentation. Parsing and formatting are done on the
//! digit strings directly so no float ever touches an amount that may end up
//! in a transaction.

use crate::amount::RawAmount;
use crate::errors::{Result, TypesError};
use num_bigint::BigUint;
use num_traits::Zero;

/// 10^decimals as a raw amount
pub fn scale(decimals: u8) -> RawAmount {
    BigUint::from(10u32).pow(u32::from(decimals))
}

/// Parse `"1.5"` with 18 decimals into `1500000000000000000`.
///
/// Accepts an optional leading `.` or trailing `.`; rejects signs, exponents
/// and more fractional digits than the token carries.
pub fn parse_units(input: &str, decimals: u8) -> Result<RawAmount> {
    let trimmed = input.trim();
    let invalid = || TypesError::InvalidDecimal {
        input: input.to_string(),
    };

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > usize::from(decimals) {
        return Err(TypesError::TooManyDecimals {
            input: input.to_string(),
            found: fraction.len(),
            decimals,
        });
    }

    let mut digits = String::with_capacity(whole.len() + usize::from(decimals));
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat('0').take(usize::from(decimals) - fraction.len()));

    if digits.is_empty() {
        return Ok(RawAmount::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}

/// Format a raw amount with `decimals` places, trimming trailing zeros
pub fn format_units(amount: &RawAmount, decimals: u8) -> String {
    let digits = amount.to_str_radix(10);
    let decimals = usize::from(decimals);
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 18).unwrap(), BigUint::from(1_500_000_000_000_000_000u64));
        assert_eq!(parse_units("100", 6).unwrap(), BigUint::from(100_000_000u32));
        assert_eq!(parse_units(".25", 2).unwrap(), BigUint::from(25u32));
        assert_eq!(parse_units("7.", 0).unwrap(), BigUint::from(7u32));
        assert_eq!(parse_units("0", 18).unwrap(), BigUint::zero());
    }

    #[test]
    fn test_parse_units_rejects_bad_input() {
        assert!(matches!(parse_units("", 18), Err(TypesError::InvalidDecimal { .. })));
        assert!(matches!(parse_units(".", 18), Err(TypesError::InvalidDecimal { .. })));
        assert!(matches!(parse_units("-1", 18), Err(TypesError::InvalidDecimal { .. })));
        assert!(matches!(parse_units("1e18", 18), Err(TypesError::InvalidDecimal { .. })));
        assert!(matches!(
            parse_units("0.1234567", 6),
            Err(TypesError::TooManyDecimals { found: 7, decimals: 6, .. })
        ));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(&BigUint::from(1_500_000u32), 6), "1.5");
        assert_eq!(format_units(&BigUint::from(5u32), 6), "0.000005");
        assert_eq!(format_units(&BigUint::from(2_000_000u32), 6), "2");
        assert_eq!(format_units(&BigUint::zero(), 18), "0");
        assert_eq!(format_units(&BigUint::from(42u32), 0), "42");
    }
}
