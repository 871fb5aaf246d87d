//! Test doubles for oracle-backed estimators.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use arprice_oracle::{OracleError, PriceOracle};
use arprice_types::{ByteCount, Winston};
use async_trait::async_trait;

/// Linear oracle that counts its calls and can be made slow or failing.
#[derive(Debug)]
pub(crate) struct CountingOracle {
    base: u64,
    rate_bits: AtomicU64,
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail_on: Option<ByteCount>,
    recovered: AtomicBool,
}

impl CountingOracle {
    pub(crate) fn linear(base: u64, winston_per_byte: f64) -> Self {
        Self {
            base,
            rate_bits: AtomicU64::new(winston_per_byte.to_bits()),
            calls: AtomicUsize::new(0),
            delay: None,
            fail_on: None,
            recovered: AtomicBool::new(false),
        }
    }

    pub(crate) const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) const fn failing_on(mut self, byte_count: ByteCount) -> Self {
        self.fail_on = Some(byte_count);
        self
    }

    /// Stops failing on the volume given to [`failing_on`](Self::failing_on).
    pub(crate) fn recover(&self) {
        self.recovered.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_rate(&self, winston_per_byte: f64) {
        self.rate_bits
            .store(winston_per_byte.to_bits(), Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceOracle for CountingOracle {
    async fn winston_price_for(&self, byte_count: ByteCount) -> Result<Winston, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on == Some(byte_count) && !self.recovered.load(Ordering::SeqCst) {
            return Err(OracleError::ServerError { status: 502 });
        }
        let rate = f64::from_bits(self.rate_bits.load(Ordering::SeqCst));
        Ok(Winston::from_f64_rounded(
            self.base as f64 + rate * byte_count.as_f64(),
        ))
    }
}
