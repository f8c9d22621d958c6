//! Pool Aggregator
//!
//! Queries every configured DEX source concurrently, keeps whatever
//! succeeded, and ranks the merged pools by APR.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use pools_core::{Dex, Pool, PoolsError, PoolsResult};
use pools_sources::{build_source, PoolMap, PoolSource};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Number of pools served by default
pub const DEFAULT_TOP_N: usize = 20;

/// Sources queried by default
pub const DEFAULT_SOURCES: [Dex; 4] = Dex::ALL;

/// Configuration for the PoolAggregator
#[derive(Clone, Debug)]
pub struct AggregatorConfig {
    /// DEXes to query on every request
    pub sources: Vec<Dex>,
    /// How many ranked pools to keep
    pub top_n: usize,
    /// Upper bound for a single source, unbounded when `None`
    pub source_timeout: Option<Duration>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.to_vec(),
            top_n: DEFAULT_TOP_N,
            source_timeout: None,
        }
    }
}

/// What one source produced during a fan-out
#[derive(Debug)]
pub struct SourceOutcome {
    pub dex: Dex,
    pub result: PoolsResult<PoolMap>,
}

impl SourceOutcome {
    /// Pools contributed to the ranking, zero for a failed source
    pub fn pool_count(&self) -> usize {
        self.result.as_ref().map(|pools| pools.len()).unwrap_or(0)
    }
}

/// Fans out to DEX sources and ranks their pools
pub struct PoolAggregator {
    sources: Vec<Arc<dyn PoolSource>>,
    top_n: usize,
    source_timeout: Option<Duration>,
}

impl PoolAggregator {
    /// Create an aggregator over the production endpoints of the configured DEXes
    pub fn new(config: &AggregatorConfig, client: Client) -> Self {
        let sources = config
            .sources
            .iter()
            .map(|dex| build_source(*dex, client.clone()))
            .collect();
        Self::with_sources(sources, config.top_n, config.source_timeout)
    }

    /// Create an aggregator over arbitrary sources
    pub fn with_sources(
        sources: Vec<Arc<dyn PoolSource>>,
        top_n: usize,
        source_timeout: Option<Duration>,
    ) -> Self {
        Self {
            sources,
            top_n,
            source_timeout,
        }
    }

    /// Query every source concurrently and wait for all of them
    ///
    /// Each source runs in its own task. A source that errors, times out or
    /// panics yields a failed outcome; the others are unaffected.
    pub async fn collect(&self) -> Vec<SourceOutcome> {
        let (dexes, tasks): (Vec<Dex>, Vec<_>) = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let timeout = self.source_timeout;
                (source.dex(), tokio::spawn(fetch_source(source, timeout)))
            })
            .unzip();

        let joined = join_all(tasks).await;

        dexes
            .into_iter()
            .zip(joined)
            .map(|(dex, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    Err(PoolsError::internal(format!("{} task failed: {}", dex, e)))
                });

                match &result {
                    Ok(pools) => debug!("[Aggregator] Got {} pools from {}", pools.len(), dex),
                    Err(e) => warn!("[Aggregator] Pool source {} returned with error: {}", dex, e),
                }

                SourceOutcome { dex, result }
            })
            .collect()
    }

    /// Top pools across all sources, best APR first
    ///
    /// Never fails: with every source down the result is empty.
    pub async fn top_pools(&self) -> Vec<Pool> {
        let outcomes = self.collect().await;
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        let total: usize = outcomes.iter().map(SourceOutcome::pool_count).sum();

        let ranked = rank_pools(outcomes, self.top_n);
        info!(
            "[Aggregator] Ranked {} of {} pools ({} source(s) failed)",
            ranked.len(),
            total,
            failed
        );
        ranked
    }
}

impl std::fmt::Debug for PoolAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dexes: Vec<Dex> = self.sources.iter().map(|s| s.dex()).collect();
        f.debug_struct("PoolAggregator")
            .field("sources", &dexes)
            .field("top_n", &self.top_n)
            .field("source_timeout", &self.source_timeout)
            .finish()
    }
}

async fn fetch_source(
    source: Arc<dyn PoolSource>,
    timeout: Option<Duration>,
) -> PoolsResult<PoolMap> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, source.fetch_pools())
            .await
            .unwrap_or_else(|_| {
                Err(PoolsError::timeout(format!(
                    "{} did not answer within {:?}",
                    source.dex(),
                    limit
                )))
            }),
        None => source.fetch_pools().await,
    }
}

/// Merge successful outcomes, sort by APR descending and keep the first `top_n`
///
/// Failed outcomes contribute no pools. The sort is stable, NaN APRs go last.
pub fn rank_pools(outcomes: Vec<SourceOutcome>, top_n: usize) -> Vec<Pool> {
    let mut pools: Vec<Pool> = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.result.ok())
        .flat_map(|pools| pools.into_values())
        .collect();

    pools.sort_by(|a, b| b.rank_key().total_cmp(&a.rank_key()));
    pools.truncate(top_n);
    pools
}
