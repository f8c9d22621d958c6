//! Swop.fi pool client

use async_trait::async_trait;
use pools_core::{lenient_f64, Dex, Pool, PoolsResult, PLACEHOLDER};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::source::{decode_items, send_json, PoolMap, PoolSource};

const SWOP_API_BASE: &str = "https://backend.swop.fi";
const SWOP_APP_BASE: &str = "https://swop.fi";

/// Response from GET /pools/
///
/// Entries are decoded one at a time, see [`SwopPool`].
#[derive(Debug, Clone, Deserialize)]
pub struct SwopPoolsResponse {
    pub pools: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwopPool {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub liquidity: Value,

    /// Weekly statistics
    pub week: SwopWeek,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwopWeek {
    pub current: SwopPeriod,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwopPeriod {
    pub total_apr: SwopApr,
}

/// APR range over the period, the API computes the maximum already
#[derive(Debug, Clone, Deserialize)]
pub struct SwopApr {
    #[serde(default)]
    pub max: Value,
}

impl SwopPool {
    pub fn to_pool(&self) -> Pool {
        Pool::new(
            self.id.clone(),
            Dex::Swop.tag(),
            self.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            lenient_f64(&self.liquidity),
            lenient_f64(&self.week.current.total_apr.max),
            format!("{}/pool?address={}", SWOP_APP_BASE, self.id),
        )
    }
}

/// Swop.fi API client
#[derive(Clone)]
pub struct SwopClient {
    client: Client,
    base_url: String,
}

impl SwopClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, SWOP_API_BASE)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_pools(&self) -> PoolsResult<Vec<SwopPool>> {
        let url = format!("{}/pools/", self.base_url);
        debug!("[Swop] Fetching pools from: {}", url);
        let response: SwopPoolsResponse = send_json(self.client.get(&url), "Swop").await?;
        Ok(decode_items(response.pools, "Swop"))
    }
}

#[async_trait]
impl PoolSource for SwopClient {
    fn dex(&self) -> Dex {
        Dex::Swop
    }

    async fn fetch_pools(&self) -> PoolsResult<PoolMap> {
        let pools = self.list_pools().await?;
        debug!("[Swop] Got {} pools", pools.len());

        Ok(pools
            .iter()
            .map(|pool| (pool.id.clone(), pool.to_pool()))
            .collect())
    }
}

impl std::fmt::Debug for SwopClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwopClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
