//! Puzzle Swap pool client

use async_trait::async_trait;
use pools_core::{lenient_f64, Dex, Pool, PoolsResult, PLACEHOLDER};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::source::{decode_items, send_json, PoolMap, PoolSource};

const PUZZLE_API_BASE: &str = "https://puzzle-js-back.herokuapp.com";
const PUZZLE_APP_BASE: &str = "https://puzzleswap.org";

/// A pool entry from GET /api/v1/pools
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzlePool {
    pub contract_address: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Short pool slug used in app URLs
    #[serde(default)]
    pub domain: Option<String>,

    pub statistics: PuzzleStatistics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleStatistics {
    #[serde(default)]
    pub liquidity: Value,

    #[serde(default)]
    pub apy: Value,
}

impl PuzzlePool {
    /// Invest page for the pool, [`PLACEHOLDER`] without a domain
    pub fn link(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}/pools/{}/invest", PUZZLE_APP_BASE, domain),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn to_pool(&self) -> Pool {
        let mut pool = Pool::new(
            self.contract_address.clone(),
            Dex::Puzzle.tag(),
            self.title.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            lenient_f64(&self.statistics.liquidity),
            lenient_f64(&self.statistics.apy),
            self.link(),
        );
        pool.domain = self.domain.clone();
        pool
    }
}

/// Puzzle Swap API client
#[derive(Clone)]
pub struct PuzzleClient {
    client: Client,
    base_url: String,
}

impl PuzzleClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, PUZZLE_API_BASE)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_pools(&self) -> PoolsResult<Vec<PuzzlePool>> {
        let url = format!("{}/api/v1/pools", self.base_url);
        debug!("[Puzzle] Fetching pools from: {}", url);
        let items: Vec<Value> = send_json(self.client.get(&url), "Puzzle").await?;
        Ok(decode_items(items, "Puzzle"))
    }
}

#[async_trait]
impl PoolSource for PuzzleClient {
    fn dex(&self) -> Dex {
        Dex::Puzzle
    }

    async fn fetch_pools(&self) -> PoolsResult<PoolMap> {
        let pools = self.list_pools().await?;
        debug!("[Puzzle] Got {} pools", pools.len());

        Ok(pools
            .iter()
            .map(|pool| (pool.contract_address.clone(), pool.to_pool()))
            .collect())
    }
}

impl std::fmt::Debug for PuzzleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
