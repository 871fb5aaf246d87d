//! Community tip policy.

use serde::{Deserialize, Serialize};

use crate::{EstimateError, Result, Winston};

/// Default community tip percentage.
pub const DEFAULT_TIP_PERCENTAGE: f64 = 15.0;

/// Default minimum community tip, in Winston.
pub const DEFAULT_MIN_WINSTON_FEE: u64 = 10_000_000;

const BASIS_POINTS_PER_PERCENT: u32 = 100;
const MAX_BASIS_POINTS: u32 = 100 * BASIS_POINTS_PER_PERCENT;

/// Fee deducted from a spend before computing purchasable capacity.
///
/// The tip is a percentage of the spend, floored at a minimum fee. The
/// percentage is held in basis points so the share is computed exactly for
/// any Winston amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TipPolicy", into = "TipPolicy")]
pub struct CommunityTip {
    tip_basis_points: u32,
    min_winston_fee: Winston,
}

/// Serialized form of [`CommunityTip`], validated through [`CommunityTip::new`].
#[derive(Serialize, Deserialize)]
struct TipPolicy {
    tip_percentage: f64,
    min_winston_fee: Winston,
}

impl CommunityTip {
    /// Creates a tip policy.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] if `tip_percentage` is not within
    /// 0..=100 or is finer than a hundredth of a percent.
    pub fn new(tip_percentage: f64, min_winston_fee: Winston) -> Result<Self> {
        if !(0.0..=100.0).contains(&tip_percentage) {
            return Err(EstimateError::invalid_input(format!(
                "tip percentage ({tip_percentage}) should be between 0 and 100"
            )));
        }
        let basis_points = tip_percentage * f64::from(BASIS_POINTS_PER_PERCENT);
        let rounded = basis_points.round();
        if (basis_points - rounded).abs() > 1e-6 {
            return Err(EstimateError::invalid_input(format!(
                "tip percentage ({tip_percentage}) has more than two decimal places"
            )));
        }
        Ok(Self {
            tip_basis_points: rounded as u32,
            min_winston_fee,
        })
    }

    /// A policy that deducts nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            tip_basis_points: 0,
            min_winston_fee: Winston::ZERO,
        }
    }

    /// Returns the tip percentage.
    #[must_use]
    pub fn tip_percentage(&self) -> f64 {
        f64::from(self.tip_basis_points) / f64::from(BASIS_POINTS_PER_PERCENT)
    }

    /// Returns the tip rate in basis points (hundredths of a percent).
    #[must_use]
    pub const fn tip_basis_points(&self) -> u32 {
        self.tip_basis_points
    }

    /// Returns the minimum tip.
    #[must_use]
    pub const fn min_winston_fee(&self) -> Winston {
        self.min_winston_fee
    }

    /// Returns the tip owed on a spend of `winston`.
    ///
    /// The percentage share is rounded half away from zero, then floored at the minimum fee.
    #[must_use]
    pub fn tip_for(&self, winston: Winston) -> Winston {
        let scaled = u128::from(winston.get()) * u128::from(self.tip_basis_points);
        let share = (scaled + u128::from(MAX_BASIS_POINTS / 2)) / u128::from(MAX_BASIS_POINTS);
        // share <= winston since the rate is at most 100%
        let share = Winston::new(u64::try_from(share).unwrap_or(u64::MAX));
        share.max(self.min_winston_fee)
    }

    /// Returns what is left of `winston` after the tip, or `None` if the tip exceeds it.
    #[must_use]
    pub fn remainder_after_tip(&self, winston: Winston) -> Option<Winston> {
        winston.checked_sub(self.tip_for(winston))
    }
}

impl Default for CommunityTip {
    fn default() -> Self {
        Self {
            tip_basis_points: 1_500,
            min_winston_fee: Winston::new(DEFAULT_MIN_WINSTON_FEE),
        }
    }
}

impl TryFrom<TipPolicy> for CommunityTip {
    type Error = EstimateError;

    fn try_from(policy: TipPolicy) -> Result<Self> {
        Self::new(policy.tip_percentage, policy.min_winston_fee)
    }
}

impl From<CommunityTip> for TipPolicy {
    fn from(tip: CommunityTip) -> Self {
        Self {
            tip_percentage: tip.tip_percentage(),
            min_winston_fee: tip.min_winston_fee,
        }
    }
}
