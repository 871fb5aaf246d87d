//! Arweave gateway URL construction.

use arprice_types::ByteCount;

/// Default gateway serving price quotes.
pub const DEFAULT_GATEWAY: &str = "https://arweave.net";

/// Builds the URL quoting the price of storing `byte_count` bytes.
///
/// URL format: `{gateway}/price/{bytes}`
///
/// # Example
///
/// ```
/// use arprice_oracle::url::price_url;
/// use arprice_types::ByteCount;
///
/// let url = price_url("https://arweave.net/", ByteCount::new(1024));
/// assert_eq!(url, "https://arweave.net/price/1024");
/// ```
#[must_use]
pub fn price_url(gateway: &str, byte_count: ByteCount) -> String {
    format!("{}/price/{}", gateway.trim_end_matches('/'), byte_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_url_default_gateway() {
        let url = price_url(DEFAULT_GATEWAY, ByteCount::new(102_400));
        assert_eq!(url, "https://arweave.net/price/102400");
    }

    #[test]
    fn test_price_url_zero_bytes() {
        let url = price_url("http://localhost:1984", ByteCount::ZERO);
        assert_eq!(url, "http://localhost:1984/price/0");
    }

    #[test]
    fn test_price_url_trailing_slashes() {
        let url = price_url("https://g8way.io//", ByteCount::new(1));
        assert_eq!(url, "https://g8way.io/price/1");
    }
}
