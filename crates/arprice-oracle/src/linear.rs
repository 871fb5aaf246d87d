//! Fixed-rate oracle.

use arprice_types::{ByteCount, Winston};
use async_trait::async_trait;

use crate::{OracleError, PriceOracle};

/// Quotes `base + rate × bytes` without touching the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearOracle {
    base: Winston,
    winston_per_byte: f64,
}

impl LinearOracle {
    /// Creates an oracle with a fixed base price and per-byte rate.
    #[must_use]
    pub const fn new(base: Winston, winston_per_byte: f64) -> Self {
        Self {
            base,
            winston_per_byte,
        }
    }

    /// Returns the price this oracle quotes for `byte_count` bytes.
    #[must_use]
    pub fn quote(&self, byte_count: ByteCount) -> Winston {
        Winston::from_f64_rounded(self.base.as_f64() + self.winston_per_byte * byte_count.as_f64())
    }
}

#[async_trait]
impl PriceOracle for LinearOracle {
    async fn winston_price_for(&self, byte_count: ByteCount) -> Result<Winston, OracleError> {
        Ok(self.quote(byte_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        let oracle = LinearOracle::new(Winston::new(100), 0.5);
        assert_eq!(oracle.quote(ByteCount::ZERO), Winston::new(100));
        assert_eq!(oracle.quote(ByteCount::new(3)), Winston::new(102));
        assert_eq!(oracle.quote(ByteCount::new(1000)), Winston::new(600));
    }
}
