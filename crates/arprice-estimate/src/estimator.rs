//! The price and capacity estimation capability.

use arprice_types::{Ar, ByteCount, CommunityTip, EstimateError, Result, Winston};
use async_trait::async_trait;

/// Byte volume priced to derive a slope when inverting an oracle by probing.
pub const PROBE_REFERENCE_BYTES: ByteCount = ByteCount::new(1024 * 1024 * 1024);

/// Estimates storage prices and the capacity a budget buys.
///
/// Implementations only have to price a byte count; the inverse and the
/// tip-adjusted budget have shared default implementations built on
/// [`base_winston_price_for_byte_count`](Self::base_winston_price_for_byte_count).
///
/// The three operations stay consistent: for a monotone price curve,
/// `base_winston_price_for_byte_count(byte_count_for_winston(p)) <= p`.
#[async_trait]
pub trait PriceEstimator: Send + Sync + std::fmt::Debug {
    /// Returns the network price for storing exactly `byte_count` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::ModelUnavailable`] if no price can be produced.
    async fn base_winston_price_for_byte_count(&self, byte_count: ByteCount) -> Result<Winston>;

    /// Returns how many bytes `winston` buys, ignoring any community tip.
    ///
    /// Returns zero when `winston` does not cover the fixed cost of a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::ModelUnavailable`] if no price can be produced.
    async fn byte_count_for_winston(&self, winston: Winston) -> Result<ByteCount> {
        byte_count_by_probing(self, winston).await
    }

    /// Returns how many bytes an AR budget buys once the community tip is paid.
    ///
    /// Returns zero when the tip alone exhausts the budget.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::ModelUnavailable`] if no price can be produced.
    async fn byte_count_for_ar(&self, ar: Ar, tip: &CommunityTip) -> Result<ByteCount> {
        byte_count_for_ar_after_tip(self, ar, tip).await
    }
}

/// Converts an AR budget to Winston, deducts the tip and prices the remainder.
///
/// A tip larger than the budget leaves nothing to spend; the estimator is
/// still consulted and answers zero bytes.
///
/// # Errors
///
/// Propagates errors from [`PriceEstimator::byte_count_for_winston`].
pub async fn byte_count_for_ar_after_tip<E>(
    estimator: &E,
    ar: Ar,
    tip: &CommunityTip,
) -> Result<ByteCount>
where
    E: PriceEstimator + ?Sized,
{
    let budget = ar.to_winston();
    // A tip that exhausts the budget still prices zero Winston, so the
    // estimator reports whether it can price at all
    let remainder = tip.remainder_after_tip(budget).unwrap_or_else(|| {
        tracing::debug!(%budget, tip = %tip.tip_for(budget), "community tip exceeds budget");
        Winston::ZERO
    });
    estimator.byte_count_for_winston(remainder).await
}

/// Inverts an estimator that can only price byte counts.
///
/// Prices zero bytes and [`PROBE_REFERENCE_BYTES`] to draw a line, inverts it,
/// and checks the guess with one more quote. An overshooting guess is narrowed
/// by bisection, so the result never costs more than `winston` as long as the
/// estimator's prices do not decrease with size.
///
/// # Errors
///
/// Propagates pricing errors, and returns [`EstimateError::ModelUnavailable`]
/// if the probed prices do not grow with size.
pub async fn byte_count_by_probing<E>(estimator: &E, winston: Winston) -> Result<ByteCount>
where
    E: PriceEstimator + ?Sized,
{
    let base = estimator
        .base_winston_price_for_byte_count(ByteCount::ZERO)
        .await?;
    if winston <= base {
        return Ok(ByteCount::ZERO);
    }

    let reference = estimator
        .base_winston_price_for_byte_count(PROBE_REFERENCE_BYTES)
        .await?;
    let marginal = (reference.as_f64() - base.as_f64()) / PROBE_REFERENCE_BYTES.as_f64();
    if marginal <= 0.0 {
        return Err(EstimateError::ModelUnavailable(format!(
            "price for {PROBE_REFERENCE_BYTES} bytes ({reference}) does not exceed base price ({base})"
        )));
    }

    let guess = ByteCount::new(((winston.as_f64() - base.as_f64()) / marginal).floor() as u64);
    if guess == ByteCount::ZERO {
        return Ok(ByteCount::ZERO);
    }
    if estimator.base_winston_price_for_byte_count(guess).await? <= winston {
        return Ok(guess);
    }

    // base(low) <= winston < base(high)
    let (mut low, mut high) = (0u64, guess.get());
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let price = estimator
            .base_winston_price_for_byte_count(ByteCount::new(mid))
            .await?;
        if price <= winston {
            low = mid;
        } else {
            high = mid;
        }
    }
    tracing::trace!(%guess, capacity = low, "narrowed overshooting capacity guess");
    Ok(ByteCount::new(low))
}
