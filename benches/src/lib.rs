//! Benchmark fixtures for arprice.

use arprice_lib::{ByteCount, DataPriceSample, LinearOracle, Winston};

/// Base transaction fee used by the benchmark oracle.
pub const BENCH_BASE_WINSTON: u64 = 6_000_000;

/// Marginal price per byte used by the benchmark oracle.
pub const BENCH_WINSTON_PER_BYTE: f64 = 1_950.5;

/// Oracle with a fixed linear price curve.
#[must_use]
pub fn bench_oracle() -> LinearOracle {
    LinearOracle::new(Winston::new(BENCH_BASE_WINSTON), BENCH_WINSTON_PER_BYTE)
}

/// Samples `count` evenly spaced volumes from the benchmark price curve.
#[must_use]
pub fn linear_samples(count: u64) -> Vec<DataPriceSample> {
    let oracle = bench_oracle();
    (1..=count)
        .map(|i| {
            let byte_count = ByteCount::new(i * 1024 * 1024);
            DataPriceSample::new(byte_count, oracle.quote(byte_count))
        })
        .collect()
}

/// File sizes of a typical bulk upload, from a few KiB to a few GiB.
#[must_use]
pub fn upload_sizes(count: u64) -> Vec<ByteCount> {
    (0..count)
        .map(|i| ByteCount::new(4096u64 << (i % 20)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_samples_are_distinct() {
        let samples = linear_samples(4);
        assert_eq!(samples.len(), 4);
        assert!(samples.windows(2).all(|w| w[0].byte_count < w[1].byte_count));
        assert!(samples.windows(2).all(|w| w[0].winston_price < w[1].winston_price));
    }

    #[test]
    fn test_upload_sizes_cycle() {
        let sizes = upload_sizes(21);
        assert_eq!(sizes[0], ByteCount::new(4096));
        assert_eq!(sizes[20], ByteCount::new(4096));
    }
}
