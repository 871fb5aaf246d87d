//! Estimator that asks the oracle on every call.

use arprice_oracle::PriceOracle;
use arprice_types::{ByteCount, EstimateError, Result, Winston};
use async_trait::async_trait;

use crate::PriceEstimator;

/// Prices every request with a fresh oracle quote.
///
/// Exact, but each estimate costs at least one oracle round trip. Suited to
/// uploads of a single file or a handful of files.
#[derive(Debug, Clone)]
pub struct OracleEstimator<O> {
    oracle: O,
}

impl<O: PriceOracle> OracleEstimator<O> {
    /// Creates an estimator backed by `oracle`.
    #[must_use]
    pub const fn new(oracle: O) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl<O: PriceOracle> PriceEstimator for OracleEstimator<O> {
    async fn base_winston_price_for_byte_count(&self, byte_count: ByteCount) -> Result<Winston> {
        self.oracle
            .winston_price_for(byte_count)
            .await
            .map_err(EstimateError::model_unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingOracle;
    use arprice_types::{Ar, CommunityTip};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_one_oracle_call_per_price() {
        let oracle = Arc::new(CountingOracle::linear(0, 1.0));
        let estimator = OracleEstimator::new(Arc::clone(&oracle));

        for (i, bytes) in [10, 10, 2048].into_iter().enumerate() {
            let price = estimator
                .base_winston_price_for_byte_count(ByteCount::new(bytes))
                .await
                .unwrap();
            assert_eq!(price, Winston::new(bytes));
            assert_eq!(oracle.calls(), i + 1);
        }
    }

    #[tokio::test]
    async fn test_oracle_failure_is_model_unavailable() {
        let oracle = CountingOracle::linear(0, 1.0).failing_on(ByteCount::new(7));
        let estimator = OracleEstimator::new(oracle);

        let err = estimator
            .base_winston_price_for_byte_count(ByteCount::new(7))
            .await
            .unwrap_err();
        assert!(err.is_model_unavailable());
    }

    #[tokio::test]
    async fn test_capacity_queries_the_oracle() {
        let oracle = Arc::new(CountingOracle::linear(100, 2.0));
        let estimator = OracleEstimator::new(Arc::clone(&oracle));

        let capacity = estimator
            .byte_count_for_winston(Winston::new(300))
            .await
            .unwrap();
        assert_eq!(capacity, ByteCount::new(100));
        assert!(oracle.calls() >= 1);

        let before = oracle.calls();
        let tip = CommunityTip::new(10.0, Winston::new(5)).unwrap();
        let capacity = estimator
            .byte_count_for_ar(Ar::from_winston(Winston::new(1000)), &tip)
            .await
            .unwrap();
        // 1000 - 100 tip = 900; (900 - 100) / 2 = 400
        assert_eq!(capacity, ByteCount::new(400));
        assert!(oracle.calls() > before);
    }

    #[tokio::test]
    async fn test_budget_consumed_by_tip_queries_the_oracle() {
        let oracle = Arc::new(CountingOracle::linear(100, 2.0));
        let estimator = OracleEstimator::new(Arc::clone(&oracle));
        let tip = CommunityTip::new(10.0, Winston::new(500)).unwrap();

        let capacity = estimator
            .byte_count_for_ar(Ar::from_winston(Winston::new(100)), &tip)
            .await
            .unwrap();
        assert_eq!(capacity, ByteCount::ZERO);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_budget_consumed_by_tip_reports_oracle_failure() {
        let oracle = CountingOracle::linear(100, 2.0).failing_on(ByteCount::ZERO);
        let estimator = OracleEstimator::new(oracle);
        let tip = CommunityTip::new(10.0, Winston::new(500)).unwrap();

        let err = estimator
            .byte_count_for_ar(Ar::from_winston(Winston::new(100)), &tip)
            .await
            .unwrap_err();
        assert!(err.is_model_unavailable());
    }
}
