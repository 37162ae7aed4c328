use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Decimal places of the payment token.
pub const TCOIN_DECIMALS: u32 = 7;
const UNITS_PER_TCOIN: i64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount must not be negative")]
    Negative,
    #[error("amount has more than {TCOIN_DECIMALS} decimal places")]
    TooPrecise,
    #[error("amount is too large")]
    Overflow,
}

/// A payment token quantity in base units (1 TCOIN = 10^7 units).
///
/// Serialized as a decimal TCOIN string, e.g. `"1.05"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_units(units: i128) -> Self {
        Self(units)
    }

    pub fn units(self) -> i128 {
        self.0
    }

    pub fn from_tcoin(tcoin: Decimal) -> Result<Self, AmountError> {
        if tcoin < Decimal::ZERO {
            return Err(AmountError::Negative);
        }
        let tcoin = tcoin.normalize();
        if tcoin.scale() > TCOIN_DECIMALS {
            return Err(AmountError::TooPrecise);
        }
        tcoin
            .checked_mul(Decimal::from(UNITS_PER_TCOIN))
            .and_then(|units| units.to_i128())
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub fn to_tcoin(self) -> Decimal {
        Decimal::try_from_i128_with_scale(self.0, TCOIN_DECIMALS)
            .map(|d| d.normalize())
            .unwrap_or(Decimal::MAX)
    }

    /// Scales the amount by `percent` / 100, truncating.
    pub fn with_margin(self, percent: u32) -> Self {
        Self(self.0.saturating_mul(percent as i128) / 100)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} TCOIN", self.to_tcoin())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_tcoin().to_string())
    }
}
