//! Slippage tolerance and worst-case bounds
//!
//! Tolerances are whole basis points. Bounds always round down: a minimum
//! that is too high makes the router revert on a fair fill.

use crate::error::{AmmError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use types::RawAmount;

/// Basis-point denominator (100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Tolerance used when the user has not chosen one (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;

/// Maximum acceptable adverse price movement, in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SlippageTolerance(u32);

impl SlippageTolerance {
    pub const ZERO: SlippageTolerance = SlippageTolerance(0);

    pub fn from_bps(bps: u32) -> Result<Self> {
        if bps > BPS_DENOMINATOR {
            return Err(AmmError::InvalidSlippage { bps });
        }
        Ok(Self(bps))
    }

    /// Convert a UI percentage (`0.5` => 50 bps), rounding to the nearest bps
    pub fn from_percent(percent: Decimal) -> Result<Self> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(AmmError::InvalidSlippagePercent { percent });
        }
        let bps = percent
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(AmmError::InvalidSlippagePercent { percent })?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .ok_or(AmmError::InvalidSlippagePercent { percent })?;
        Self::from_bps(bps)
    }

    pub fn bps(&self) -> u32 {
        self.0
    }

    /// Tolerance as a percentage for display
    pub fn as_percent(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }

    /// Lowest acceptable amount when `amount` is the nominal quote
    pub fn min_amount(&self, amount: &RawAmount) -> RawAmount {
        amount * (BPS_DENOMINATOR - self.0) / BPS_DENOMINATOR
    }
}

impl Default for SlippageTolerance {
    fn default() -> Self {
        Self(DEFAULT_SLIPPAGE_BPS)
    }
}

impl TryFrom<u32> for SlippageTolerance {
    type Error = AmmError;

    fn try_from(bps: u32) -> Result<Self> {
        Self::from_bps(bps)
    }
}

impl From<SlippageTolerance> for u32 {
    fn from(tolerance: SlippageTolerance) -> Self {
        tolerance.0
    }
}

impl fmt::Display for SlippageTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}

/// `floor(amount * (10000 - bps) / 10000)`
pub fn min_amount_after_slippage(amount: &RawAmount, slippage: SlippageTolerance) -> RawAmount {
    slippage.min_amount(amount)
}

/// Why a chosen tolerance deserves a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlippageWarning {
    /// Non-zero but tight enough that ordinary price movement will revert
    TooLow,
    /// Loose enough to invite sandwiching
    TooHigh,
}

impl fmt::Display for SlippageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlippageWarning::TooLow => f.write_str("Slippage too low: your transaction might fail."),
            SlippageWarning::TooHigh => f.write_str("Slippage too high: you might lose funds."),
        }
    }
}

/// Tolerance band for warnings and user-entered values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippageBand {
    pub warn_low_bps: u32,
    pub warn_high_bps: u32,
    /// Largest tolerance a user may type in by hand
    pub max_custom_bps: u32,
}

impl Default for SlippageBand {
    fn default() -> Self {
        Self {
            warn_low_bps: 10,
            warn_high_bps: 500,
            max_custom_bps: 1_000,
        }
    }
}

impl SlippageBand {
    pub fn classify(&self, tolerance: SlippageTolerance) -> Option<SlippageWarning> {
        let bps = tolerance.bps();
        if bps != 0 && bps < self.warn_low_bps {
            Some(SlippageWarning::TooLow)
        } else if bps > self.warn_high_bps {
            Some(SlippageWarning::TooHigh)
        } else {
            None
        }
    }

    /// Validate a hand-entered percentage against the custom ceiling
    pub fn custom(&self, percent: Decimal) -> Result<SlippageTolerance> {
        let tolerance = SlippageTolerance::from_percent(percent)?;
        if tolerance.bps() > self.max_custom_bps {
            return Err(AmmError::InvalidSlippage {
                bps: tolerance.bps(),
            });
        }
        Ok(tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(v: u64) -> RawAmount {
        RawAmount::from(v)
    }

    #[test]
    fn test_default_half_percent() {
        assert_eq!(min_amount_after_slippage(&raw(1_000), SlippageTolerance::default()), raw(995));
    }

    #[test]
    fn test_rounds_down() {
        // 999 * 9950 / 10000 = 994.005
        assert_eq!(min_amount_after_slippage(&raw(999), SlippageTolerance::default()), raw(994));
        assert_eq!(min_amount_after_slippage(&raw(1), SlippageTolerance::default()), raw(0));
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        for amount in [0u64, 1, 995, u64::MAX] {
            assert_eq!(min_amount_after_slippage(&raw(amount), SlippageTolerance::ZERO), raw(amount));
        }
    }

    #[test]
    fn test_full_tolerance_is_zero() {
        let full = SlippageTolerance::from_bps(10_000).unwrap();
        assert_eq!(min_amount_after_slippage(&raw(123_456), full), raw(0));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            SlippageTolerance::from_bps(10_001),
            Err(AmmError::InvalidSlippage { bps: 10_001 })
        );
    }

    #[test]
    fn test_from_percent() {
        assert_eq!(SlippageTolerance::from_percent(dec!(0.5)).unwrap().bps(), 50);
        assert_eq!(SlippageTolerance::from_percent(dec!(3)).unwrap().bps(), 300);
        assert_eq!(SlippageTolerance::from_percent(dec!(0.125)).unwrap().bps(), 13);
        assert!(SlippageTolerance::from_percent(dec!(-0.1)).is_err());
        assert!(SlippageTolerance::from_percent(dec!(100.01)).is_err());
    }

    #[test]
    fn test_oversized_percent_rejected() {
        assert_eq!(
            SlippageTolerance::from_percent(Decimal::MAX),
            Err(AmmError::InvalidSlippagePercent { percent: Decimal::MAX })
        );
        assert!(SlippageBand::default().custom(Decimal::MAX).is_err());
    }

    #[test]
    fn test_band_warnings() {
        let band = SlippageBand::default();
        let tol = |bps| SlippageTolerance::from_bps(bps).unwrap();
        assert_eq!(band.classify(tol(0)), None);
        assert_eq!(band.classify(tol(5)), Some(SlippageWarning::TooLow));
        assert_eq!(band.classify(tol(50)), None);
        assert_eq!(band.classify(tol(500)), None);
        assert_eq!(band.classify(tol(501)), Some(SlippageWarning::TooHigh));
    }

    #[test]
    fn test_custom_ceiling() {
        let band = SlippageBand::default();
        assert_eq!(band.custom(dec!(10)).unwrap().bps(), 1_000);
        assert_eq!(band.custom(dec!(10.5)), Err(AmmError::InvalidSlippage { bps: 1_050 }));
    }

    #[test]
    fn test_serde_validates() {
        let tol: SlippageTolerance = serde_json::from_str("75").unwrap();
        assert_eq!(tol.bps(), 75);
        assert!(serde_json::from_str::<SlippageTolerance>("20000").is_err());
    }
}
