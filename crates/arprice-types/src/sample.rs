//! Price samples quoted by the pricing oracle.

use serde::{Deserialize, Serialize};

use crate::{ByteCount, Winston};

/// The price quoted for storing a number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataPriceSample {
    /// Number of bytes priced.
    pub byte_count: ByteCount,
    /// Price for storing `byte_count` bytes.
    pub winston_price: Winston,
}

impl DataPriceSample {
    /// Creates a new price sample.
    #[must_use]
    pub const fn new(byte_count: ByteCount, winston_price: Winston) -> Self {
        Self {
            byte_count,
            winston_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_new() {
        let sample = DataPriceSample::new(ByteCount::new(1024), Winston::new(2048));
        assert_eq!(sample.byte_count.get(), 1024);
        assert_eq!(sample.winston_price.get(), 2048);
    }

    #[test]
    fn test_sample_serializes_with_field_names() {
        let sample = DataPriceSample::new(ByteCount::new(1), Winston::new(2));
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"byte_count":1,"winston_price":2}"#);
    }
}
