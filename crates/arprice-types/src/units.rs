//! Byte counts and currency amounts.

use std::str::FromStr;

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

use crate::EstimateError;

/// Number of Winston in one AR.
pub const WINSTON_PER_AR: u64 = 1_000_000_000_000;

/// Maximum number of fractional digits an AR amount can carry.
const AR_DECIMALS: usize = 12;

/// A non-negative number of bytes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct ByteCount(u64);

impl ByteCount {
    /// Zero bytes.
    pub const ZERO: Self = Self(0);

    /// Creates a byte count.
    #[must_use]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Returns the raw number of bytes.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the byte count as a float for regression math.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl TryFrom<i64> for ByteCount {
    type Error = EstimateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        whole_from_i64(value, "byte count").map(Self)
    }
}

impl TryFrom<f64> for ByteCount {
    type Error = EstimateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        whole_from_f64(value, "byte count").map(Self)
    }
}

impl FromStr for ByteCount {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_whole(s, "byte count").map(Self)
    }
}

/// A price in Winston, the smallest indivisible unit of AR.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Winston(u64);

impl Winston {
    /// Zero Winston.
    pub const ZERO: Self = Self(0);

    /// Creates a Winston amount.
    #[must_use]
    pub const fn new(winston: u64) -> Self {
        Self(winston)
    }

    /// Returns the raw Winston amount.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the amount as a float for regression math.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Builds a Winston amount from a float, rounding half away from zero.
    ///
    /// Negative and NaN inputs clamp to zero; values past `u64::MAX` saturate.
    #[must_use]
    pub fn from_f64_rounded(value: f64) -> Self {
        Self(value.round() as u64)
    }

    /// Subtracts `rhs`, returning `None` if the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Adds `rhs`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl TryFrom<i64> for Winston {
    type Error = EstimateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        whole_from_i64(value, "winston value").map(Self)
    }
}

impl TryFrom<f64> for Winston {
    type Error = EstimateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        whole_from_f64(value, "winston value").map(Self)
    }
}

impl FromStr for Winston {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_whole(s, "winston value").map(Self)
    }
}

/// An amount in AR, the major currency unit.
///
/// Stored exactly as Winston; one AR is [`WINSTON_PER_AR`] Winston.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Ar {
    winston: Winston,
}

impl Ar {
    /// Creates an AR amount from its exact Winston value.
    #[must_use]
    pub const fn from_winston(winston: Winston) -> Self {
        Self { winston }
    }

    /// Creates an amount of whole AR, or `None` if it does not fit in Winston.
    #[must_use]
    pub const fn from_whole(ar: u64) -> Option<Self> {
        match ar.checked_mul(WINSTON_PER_AR) {
            Some(winston) => Some(Self::from_winston(Winston::new(winston))),
            None => None,
        }
    }

    /// Converts the amount to Winston.
    #[must_use]
    pub const fn to_winston(self) -> Winston {
        self.winston
    }
}

impl TryFrom<f64> for Ar {
    type Error = EstimateError;

    /// Converts a float AR amount, rounding to the nearest Winston (ties away from zero).
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(EstimateError::invalid_input(format!(
                "AR amount ({value}) should be a non-negative number"
            )));
        }
        let winston = (value * WINSTON_PER_AR as f64).round();
        if winston > u64::MAX as f64 {
            return Err(EstimateError::invalid_input(format!(
                "AR amount ({value}) is too large"
            )));
        }
        Ok(Self::from_winston(Winston::new(winston as u64)))
    }
}

impl FromStr for Ar {
    type Err = EstimateError;

    /// Parses a decimal AR amount exactly, e.g. `"1.5"` or `"0.000000000001"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || {
            EstimateError::invalid_input(format!(
                "AR amount ({s}) should be a non-negative decimal number"
            ))
        };

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > AR_DECIMALS {
            return Err(EstimateError::invalid_input(format!(
                "AR amount ({s}) has more than {AR_DECIMALS} fractional digits"
            )));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: u64 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<AR_DECIMALS$}")
                .parse()
                .map_err(|_| invalid())?
        };

        whole
            .checked_mul(WINSTON_PER_AR)
            .and_then(|w| w.checked_add(fraction))
            .map(|w| Self::from_winston(Winston::new(w)))
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for Ar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let winston = self.winston.get();
        let whole = winston / WINSTON_PER_AR;
        let fraction = winston % WINSTON_PER_AR;
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{fraction:0>AR_DECIMALS$}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

fn whole_from_i64(value: i64, what: &str) -> Result<u64, EstimateError> {
    u64::try_from(value).map_err(|_| {
        EstimateError::invalid_input(format!("{what} ({value}) should be a non-negative integer"))
    })
}

fn whole_from_f64(value: f64, what: &str) -> Result<u64, EstimateError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(EstimateError::invalid_input(format!(
            "{what} ({value}) should be a non-negative integer"
        )));
    }
    Ok(value as u64)
}

fn parse_whole(s: &str, what: &str) -> Result<u64, EstimateError> {
    let s = s.trim();
    s.parse::<u64>().map_err(|_| {
        EstimateError::invalid_input(format!("{what} ({s}) should be a non-negative integer"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_count_rejects_negative_and_fractional() {
        assert!(ByteCount::try_from(-1i64).unwrap_err().is_invalid_input());
        assert!(ByteCount::try_from(1.5f64).unwrap_err().is_invalid_input());
        assert!(ByteCount::try_from(f64::NAN).unwrap_err().is_invalid_input());
        assert!("-5".parse::<ByteCount>().unwrap_err().is_invalid_input());
        assert!("2.5".parse::<ByteCount>().unwrap_err().is_invalid_input());

        assert_eq!(ByteCount::try_from(1024i64).unwrap(), ByteCount::new(1024));
        assert_eq!(ByteCount::try_from(2048.0f64).unwrap(), ByteCount::new(2048));
        assert_eq!(" 42 ".parse::<ByteCount>().unwrap(), ByteCount::new(42));
    }

    #[test]
    fn test_winston_rejects_negative_and_fractional() {
        assert!(Winston::try_from(-10i64).unwrap_err().is_invalid_input());
        assert!(Winston::try_from(0.5f64).unwrap_err().is_invalid_input());
        assert!("abc".parse::<Winston>().unwrap_err().is_invalid_input());
        assert_eq!("1000".parse::<Winston>().unwrap(), Winston::new(1000));
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(Winston::from_f64_rounded(2.5), Winston::new(3));
        assert_eq!(Winston::from_f64_rounded(2.4999), Winston::new(2));
        assert_eq!(Winston::from_f64_rounded(-3.0), Winston::ZERO);
    }

    #[test]
    fn test_winston_arithmetic() {
        assert_eq!(
            Winston::new(10).checked_sub(Winston::new(4)),
            Some(Winston::new(6))
        );
        assert_eq!(Winston::new(4).checked_sub(Winston::new(10)), None);
        assert_eq!(
            Winston::new(u64::MAX).saturating_add(Winston::new(1)),
            Winston::new(u64::MAX)
        );
    }

    #[test]
    fn test_ar_parse_exact() {
        assert_eq!(
            "1".parse::<Ar>().unwrap().to_winston(),
            Winston::new(WINSTON_PER_AR)
        );
        assert_eq!(
            "1.5".parse::<Ar>().unwrap().to_winston(),
            Winston::new(1_500_000_000_000)
        );
        assert_eq!(
            ".000000000001".parse::<Ar>().unwrap().to_winston(),
            Winston::new(1)
        );
        assert_eq!("0.0000001".parse::<Ar>().unwrap().to_winston(), Winston::new(100_000));
    }

    #[test]
    fn test_ar_parse_rejects_bad_input() {
        assert!("-1".parse::<Ar>().unwrap_err().is_invalid_input());
        assert!("".parse::<Ar>().unwrap_err().is_invalid_input());
        assert!(".".parse::<Ar>().unwrap_err().is_invalid_input());
        assert!("1e5".parse::<Ar>().unwrap_err().is_invalid_input());
        assert!("0.0000000000001".parse::<Ar>().unwrap_err().is_invalid_input());
        assert!("99999999999".parse::<Ar>().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_ar_from_f64_rounds_to_nearest_winston() {
        let ar = Ar::try_from(0.25).unwrap();
        assert_eq!(ar.to_winston(), Winston::new(250_000_000_000));
        assert!(Ar::try_from(-0.1).unwrap_err().is_invalid_input());
        assert!(Ar::try_from(f64::INFINITY).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_ar_display() {
        assert_eq!(Ar::from_whole(3).unwrap().to_string(), "3");
        assert_eq!("1.250".parse::<Ar>().unwrap().to_string(), "1.25");
        assert_eq!(Ar::from_winston(Winston::new(1)).to_string(), "0.000000000001");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ByteCount::new(512)).unwrap();
        assert_eq!(json, "512");
        let winston: Winston = serde_json::from_str("77").unwrap();
        assert_eq!(winston, Winston::new(77));
    }
}
