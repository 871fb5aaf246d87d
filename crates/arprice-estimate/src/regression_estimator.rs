//! Estimator answering from a cached regression of sampled oracle prices.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arprice_oracle::{OracleError, PriceOracle};
use arprice_types::{
    Ar, ByteCount, CommunityTip, DataPriceSample, EstimateError, Result, Winston,
};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared, try_join_all};

use crate::{PriceEstimator, PriceRegression, byte_count_for_ar_after_tip};

/// Default byte volumes sampled to fit the regression: 100 KiB, 100 MiB and 10 GiB.
///
/// They span single files, medium uploads and bulk uploads so that no one
/// regime dominates the fit.
pub const DEFAULT_SAMPLE_BYTE_VOLUMES: [ByteCount; 3] = [
    ByteCount::new(100 * 1024),
    ByteCount::new(100 * 1024 * 1024),
    ByteCount::new(10 * 1024 * 1024 * 1024),
];

/// A refresh shared by every caller that asks for one while it runs.
type RefreshFuture = Shared<BoxFuture<'static, Result<Arc<PriceRegression>>>>;

/// Configuration for the regression estimator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegressionConfig {
    /// Byte volumes priced on every refresh.
    pub sample_byte_volumes: Vec<ByteCount>,
    /// Skip fetching prices at construction; the first estimate fetches them instead.
    pub skip_setup: bool,
}

impl RegressionConfig {
    /// Builds a configuration from untrusted volumes such as raw integers or floats.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] if any volume is negative or not an integer.
    pub fn try_with_volumes<T>(volumes: impl IntoIterator<Item = T>) -> Result<Self>
    where
        ByteCount: TryFrom<T, Error = EstimateError>,
    {
        let sample_byte_volumes = volumes
            .into_iter()
            .map(ByteCount::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            sample_byte_volumes,
            ..Self::default()
        })
    }

    /// Sets whether to skip fetching prices at construction.
    #[must_use]
    pub const fn skip_setup(mut self, skip_setup: bool) -> Self {
        self.skip_setup = skip_setup;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.sample_byte_volumes.len() < 2 {
            return Err(EstimateError::invalid_input(
                "byte volume array must contain at least 2 values to calculate regression",
            ));
        }
        let distinct: BTreeSet<_> = self.sample_byte_volumes.iter().collect();
        if distinct.len() < 2 {
            return Err(EstimateError::invalid_input(
                "byte volume array must contain at least 2 distinct values to calculate regression",
            ));
        }
        Ok(())
    }
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            sample_byte_volumes: DEFAULT_SAMPLE_BYTE_VOLUMES.to_vec(),
            skip_setup: false,
        }
    }
}

/// Estimates prices from a linear fit of a few sampled oracle quotes.
///
/// The model is fetched lazily on first use (or eagerly at construction) and
/// replaced wholesale by [`refresh`](Self::refresh). Concurrent callers never
/// start a second batch of oracle calls while one is in flight; they wait on
/// the running refresh and all observe its outcome.
#[derive(Debug)]
pub struct RegressionEstimator<O> {
    inner: Arc<Inner<O>>,
}

#[derive(Debug)]
struct Inner<O> {
    sampler: Arc<Sampler<O>>,
    state: Mutex<State>,
}

/// Everything a refresh needs to fit a model.
///
/// The in-flight refresh future owns this, never [`Inner`], so a pending
/// refresh does not keep its estimator alive.
#[derive(Debug)]
struct Sampler<O> {
    oracle: O,
    byte_volumes: Vec<ByteCount>,
}

#[derive(Default)]
struct State {
    predictor: Option<Arc<PriceRegression>>,
    installed_generation: u64,
    next_generation: u64,
    in_flight: Option<(u64, RefreshFuture)>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("predictor", &self.predictor)
            .field("installed_generation", &self.installed_generation)
            .field("next_generation", &self.next_generation)
            .field("in_flight", &self.in_flight.as_ref().map(|(g, _)| *g))
            .finish()
    }
}

impl<O: PriceOracle + 'static> RegressionEstimator<O> {
    /// Creates an estimator with the default sample volumes, fetching prices eagerly.
    ///
    /// # Errors
    ///
    /// Never fails with the default configuration; see [`with_config`](Self::with_config).
    pub fn new(oracle: O) -> Result<Self> {
        Self::with_config(oracle, RegressionConfig::default())
    }

    /// Creates an estimator with the given configuration.
    ///
    /// Unless `skip_setup` is set, a refresh is spawned on the current tokio
    /// runtime. Without a runtime the first estimate fetches prices instead.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidInput`] if fewer than two distinct
    /// sample volumes are configured.
    pub fn with_config(oracle: O, config: RegressionConfig) -> Result<Self> {
        config.validate()?;
        let estimator = Self {
            inner: Arc::new(Inner {
                sampler: Arc::new(Sampler {
                    oracle,
                    byte_volumes: config.sample_byte_volumes,
                }),
                state: Mutex::new(State::default()),
            }),
        };
        if !config.skip_setup {
            estimator.prime_in_background();
        }
        Ok(estimator)
    }

    /// Returns the byte volumes sampled on every refresh.
    #[must_use]
    pub fn sample_byte_volumes(&self) -> &[ByteCount] {
        &self.inner.sampler.byte_volumes
    }

    /// Returns the installed model without fetching one.
    #[must_use]
    pub fn current_model(&self) -> Option<Arc<PriceRegression>> {
        self.inner.lock_state().predictor.clone()
    }

    /// Fetches fresh prices and installs a new model.
    ///
    /// Joins the refresh already in flight, if any, instead of starting another.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::ModelUnavailable`] if any oracle quote fails.
    pub async fn refresh(&self) -> Result<Arc<PriceRegression>> {
        let (generation, refresh) = self.inner.join_or_start_refresh();
        self.inner.await_refresh(generation, refresh).await
    }

    /// Returns the installed model, fetching one first if there is none.
    async fn model(&self) -> Result<Arc<PriceRegression>> {
        match self.inner.model_or_refresh() {
            Ok(model) => Ok(model),
            Err((generation, refresh)) => self.inner.await_refresh(generation, refresh).await,
        }
    }

    fn prime_in_background(&self) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                let (generation, refresh) = inner.join_or_start_refresh();
                handle.spawn(async move {
                    if let Err(e) = inner.await_refresh(generation, refresh).await {
                        tracing::warn!(error = %e, "background price model refresh failed");
                    }
                });
            }
            Err(_) => {
                tracing::debug!("no async runtime; price model will be fetched on first use");
            }
        }
    }
}

impl<O: PriceOracle + 'static> Inner<O> {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the installed model, or the refresh that will produce one.
    ///
    /// Both are decided under one lock so a refresh finishing in between
    /// cannot make the caller start a redundant one.
    fn model_or_refresh(&self) -> std::result::Result<Arc<PriceRegression>, (u64, RefreshFuture)> {
        let mut state = self.lock_state();
        if let Some(model) = &state.predictor {
            return Ok(Arc::clone(model));
        }
        Err(self.join_or_start_locked(&mut state))
    }

    fn join_or_start_refresh(&self) -> (u64, RefreshFuture) {
        let mut state = self.lock_state();
        self.join_or_start_locked(&mut state)
    }

    fn join_or_start_locked(&self, state: &mut State) -> (u64, RefreshFuture) {
        if let Some((generation, refresh)) = &state.in_flight {
            tracing::trace!(generation, "joining in-flight price model refresh");
            return (*generation, refresh.clone());
        }

        state.next_generation += 1;
        let generation = state.next_generation;
        let refresh = Arc::clone(&self.sampler)
            .fetch_regression(generation)
            .boxed()
            .shared();
        state.in_flight = Some((generation, refresh.clone()));
        (generation, refresh)
    }

    /// Waits for a refresh and records its outcome.
    ///
    /// Every waiter records the outcome; only the first clears the in-flight
    /// marker and installs the model.
    async fn await_refresh(
        &self,
        generation: u64,
        refresh: RefreshFuture,
    ) -> Result<Arc<PriceRegression>> {
        let result = refresh.await;

        let mut state = self.lock_state();
        let first = matches!(&state.in_flight, Some((g, _)) if *g == generation);
        if first {
            state.in_flight = None;
        }

        match &result {
            Ok(regression) if generation > state.installed_generation => {
                state.predictor = Some(Arc::clone(regression));
                state.installed_generation = generation;
                tracing::debug!(
                    generation,
                    base = regression.base_winston_price(),
                    marginal = regression.marginal_winston_price(),
                    "installed price model"
                );
            }
            // Never let an older refresh replace a newer model
            Ok(_) if generation < state.installed_generation => {
                tracing::trace!(
                    generation,
                    installed = state.installed_generation,
                    "discarding superseded price model"
                );
            }
            Ok(_) => {}
            Err(e) if first => {
                tracing::debug!(generation, error = %e, "price model refresh failed");
            }
            Err(_) => {}
        }
        result
    }
}

impl<O: PriceOracle> Sampler<O> {
    async fn fetch_regression(self: Arc<Self>, generation: u64) -> Result<Arc<PriceRegression>> {
        tracing::debug!(
            generation,
            volumes = self.byte_volumes.len(),
            "refreshing price model"
        );
        let sampler = &self;
        let quotes = self.byte_volumes.iter().map(|&byte_count| async move {
            let price = sampler.oracle.winston_price_for(byte_count).await?;
            Ok::<_, OracleError>(DataPriceSample::new(byte_count, price))
        });
        let samples = try_join_all(quotes)
            .await
            .map_err(EstimateError::model_unavailable)?;
        PriceRegression::new(samples).map(Arc::new)
    }
}

#[async_trait]
impl<O: PriceOracle + 'static> PriceEstimator for RegressionEstimator<O> {
    async fn base_winston_price_for_byte_count(&self, byte_count: ByteCount) -> Result<Winston> {
        let model = self.model().await?;
        Ok(model.predicted_price_for_byte_count(byte_count).winston_price)
    }

    async fn byte_count_for_winston(&self, winston: Winston) -> Result<ByteCount> {
        let model = self.model().await?;
        model.byte_count_for_winston(winston)
    }

    async fn byte_count_for_ar(&self, ar: Ar, tip: &CommunityTip) -> Result<ByteCount> {
        self.model().await?;
        byte_count_for_ar_after_tip(self, ar, tip).await
    }
}
