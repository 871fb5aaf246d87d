//! Linear price model fitted from oracle samples.

use arprice_types::{ByteCount, DataPriceSample, EstimateError, Result, Winston};
use chrono::{DateTime, Utc};

/// Least-squares fit of price against byte count.
///
/// `price = base + marginal × bytes`. The fit is fixed at construction; a
/// refresh builds a new regression rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRegression {
    samples: Vec<DataPriceSample>,
    base_winston_price: f64,
    marginal_winston_price: f64,
    fitted_at: DateTime<Utc>,
}

impl PriceRegression {
    /// Fits a regression through the given samples.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] if fewer than two samples are
    /// given, or if every sample has the same byte count.
    pub fn new(samples: Vec<DataPriceSample>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(EstimateError::invalid_input(
                "at least 2 price samples are required to fit a regression",
            ));
        }

        let n = samples.len() as f64;
        let mean_bytes = samples.iter().map(|s| s.byte_count.as_f64()).sum::<f64>() / n;
        let mean_price = samples.iter().map(|s| s.winston_price.as_f64()).sum::<f64>() / n;

        let (covariance, variance) = samples.iter().fold((0.0, 0.0), |(cov, var), s| {
            let dx = s.byte_count.as_f64() - mean_bytes;
            let dy = s.winston_price.as_f64() - mean_price;
            (cov + dx * dy, var + dx * dx)
        });

        if variance == 0.0 {
            return Err(EstimateError::invalid_input(
                "price samples must span at least 2 distinct byte counts",
            ));
        }

        let marginal_winston_price = covariance / variance;
        let base_winston_price = mean_price - marginal_winston_price * mean_bytes;

        Ok(Self {
            samples,
            base_winston_price,
            marginal_winston_price,
            fitted_at: Utc::now(),
        })
    }

    /// Returns the samples the regression was fitted from.
    #[must_use]
    pub fn samples(&self) -> &[DataPriceSample] {
        &self.samples
    }

    /// Returns the fixed cost of a transaction independent of its size (intercept).
    #[must_use]
    pub const fn base_winston_price(&self) -> f64 {
        self.base_winston_price
    }

    /// Returns the incremental cost per byte (slope).
    #[must_use]
    pub const fn marginal_winston_price(&self) -> f64 {
        self.marginal_winston_price
    }

    /// Returns when the regression was fitted.
    #[must_use]
    pub const fn fitted_at(&self) -> DateTime<Utc> {
        self.fitted_at
    }

    /// Predicts the price for `byte_count` bytes.
    ///
    /// The fitted value is rounded half away from zero; negative fits clamp to zero.
    #[must_use]
    pub fn predicted_price_for_byte_count(&self, byte_count: ByteCount) -> DataPriceSample {
        let price = self.base_winston_price + self.marginal_winston_price * byte_count.as_f64();
        DataPriceSample::new(byte_count, Winston::from_f64_rounded(price))
    }

    /// Returns the most bytes whose predicted price does not exceed `winston`.
    ///
    /// Returns zero when `winston` does not cover the base price.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::ModelUnavailable`] if the fitted marginal price
    /// is not positive, since capacity would then be unbounded.
    pub fn byte_count_for_winston(&self, winston: Winston) -> Result<ByteCount> {
        if self.marginal_winston_price <= 0.0 || !self.marginal_winston_price.is_finite() {
            return Err(EstimateError::ModelUnavailable(format!(
                "fitted marginal price ({}) is not positive",
                self.marginal_winston_price
            )));
        }

        let capacity =
            (winston.as_f64() - self.base_winston_price) / self.marginal_winston_price;
        if capacity <= 0.0 {
            return Ok(ByteCount::ZERO);
        }

        let mut byte_count = ByteCount::new(capacity.floor() as u64);
        // Float error can leave the floor one step past the budget
        while byte_count > ByteCount::ZERO
            && self.predicted_price_for_byte_count(byte_count).winston_price > winston
        {
            byte_count = ByteCount::new(byte_count.get() - 1);
        }
        Ok(byte_count)
    }
}
