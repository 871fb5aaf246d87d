//! HTTP oracle backed by an Arweave gateway.

use std::time::Duration;

use arprice_types::{ByteCount, Winston};
use async_trait::async_trait;
use reqwest::Client;

use crate::url::{DEFAULT_GATEWAY, price_url};
use crate::{OracleError, PriceOracle};

/// Configuration for the gateway oracle.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Gateway base URL.
    pub gateway_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            max_retries: 3,
            base_delay_ms: 250,
            max_delay_ms: 5_000,
            user_agent: format!("arprice/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Price oracle querying a gateway's `/price/{bytes}` endpoint.
///
/// Timeouts and retries are handled here so that a hung gateway surfaces as
/// an error instead of stalling every estimate waiting on it.
#[derive(Debug, Clone)]
pub struct GatewayOracle {
    client: Client,
    config: OracleConfig,
}

impl GatewayOracle {
    /// Creates a new gateway oracle with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OracleConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates an oracle with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(OracleConfig::default())
    }

    /// Returns the oracle configuration.
    #[must_use]
    pub const fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Fetches the quoted price, retrying transient failures.
    async fn fetch_price(&self, byte_count: ByteCount) -> Result<Winston, OracleError> {
        let url = price_url(&self.config.gateway_url, byte_count);
        let mut attempts = 0;

        loop {
            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tracing::debug!(%url, %status, attempts, ?delay, "retrying price quote");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(OracleError::ServerError {
                            status: status.as_u16(),
                        });
                    }

                    let body = response.error_for_status()?.text().await?;
                    return parse_price(&body);
                }
                Err(e) if self.is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tracing::debug!(%url, error = %e, attempts, ?delay, "retrying price quote");
                    tokio::time::sleep(delay).await;
                }
                Err(e) if e.is_timeout() => return Err(OracleError::Timeout(attempts + 1)),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter of up to ±25%
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(50) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(&self, error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }
        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[async_trait]
impl PriceOracle for GatewayOracle {
    async fn winston_price_for(&self, byte_count: ByteCount) -> Result<Winston, OracleError> {
        let price = self.fetch_price(byte_count).await?;
        tracing::trace!(%byte_count, %price, "gateway price quote");
        Ok(price)
    }
}

/// Parses a gateway price body, a bare decimal Winston amount.
fn parse_price(body: &str) -> Result<Winston, OracleError> {
    body.trim()
        .parse::<Winston>()
        .map_err(|_| OracleError::InvalidResponse(body.trim().chars().take(64).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_config_default() {
        let config = OracleConfig::default();
        assert_eq!(config.gateway_url, "https://arweave.net");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_delay_ms, 250);
        assert_eq!(config.max_delay_ms, 5_000);
        assert!(config.user_agent.starts_with("arprice/"));
    }

    #[tokio::test]
    async fn test_oracle_creation() {
        let oracle = GatewayOracle::with_defaults();
        assert!(oracle.is_ok());
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let oracle = GatewayOracle::with_defaults().unwrap();

        // First attempt: base_delay * 2 = 500ms (plus jitter)
        let delay1 = oracle.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 375 && delay1.as_millis() <= 625);

        // Second attempt: base_delay * 4 = 1000ms (plus jitter)
        let delay2 = oracle.calculate_backoff_delay(2);
        assert!(delay2.as_millis() >= 750 && delay2.as_millis() <= 1250);

        // High attempts are capped at max_delay
        let delay_high = oracle.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 6_250);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("123456\n").unwrap(), Winston::new(123_456));
        assert!(matches!(
            parse_price("<html>bad gateway</html>"),
            Err(OracleError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_price("-5"),
            Err(OracleError::InvalidResponse(_))
        ));
    }
}
