//! Axly leveraged farm client

use async_trait::async_trait;
use pools_core::{lenient_f64, Dex, Pool, PoolsResult, PLACEHOLDER};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::source::{decode_items, send_json, PoolMap, PoolSource};

const AXLY_API_BASE: &str = "https://backend.axly.io";
const AXLY_APP_BASE: &str = "https://app.axly.io";

/// A farm entry from GET /v1/farm
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxlyFarm {
    pub pool_id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// TVL in USD, number or string
    #[serde(default)]
    pub tvl: Value,

    /// APY per underlying asset, each with its leverage tiers
    #[serde(default)]
    pub leverage_apy: Vec<AxlyLeverageApy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AxlyLeverageApy {
    #[serde(default)]
    pub leverages: Vec<AxlyLeverage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AxlyLeverage {
    #[serde(default)]
    pub total: Value,
}

impl AxlyFarm {
    /// Highest total APY across every leverage tier, NaN if there is none
    pub fn max_apr(&self) -> f64 {
        self.leverage_apy
            .iter()
            .flat_map(|apy| apy.leverages.iter())
            .map(|leverage| lenient_f64(&leverage.total))
            .filter(|total| !total.is_nan())
            .fold(f64::NAN, f64::max)
    }

    pub fn to_pool(&self) -> Pool {
        Pool::new(
            self.pool_id.clone(),
            Dex::Axly.tag(),
            self.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
            lenient_f64(&self.tvl),
            self.max_apr(),
            format!("{}/add-to-farm?address={}", AXLY_APP_BASE, self.pool_id),
        )
    }
}

/// Axly API client
#[derive(Clone)]
pub struct AxlyClient {
    client: Client,
    base_url: String,
}

impl AxlyClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, AXLY_API_BASE)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// List farms as returned by the API
    #[instrument(skip(self))]
    pub async fn list_farms(&self) -> PoolsResult<Vec<AxlyFarm>> {
        let url = format!("{}/v1/farm", self.base_url);
        debug!("[Axly] Fetching farms from: {}", url);
        let items: Vec<Value> = send_json(self.client.get(&url), "Axly").await?;
        Ok(decode_items(items, "Axly"))
    }
}

#[async_trait]
impl PoolSource for AxlyClient {
    fn dex(&self) -> Dex {
        Dex::Axly
    }

    async fn fetch_pools(&self) -> PoolsResult<PoolMap> {
        let farms = self.list_farms().await?;
        debug!("[Axly] Got {} farms", farms.len());

        Ok(farms
            .iter()
            .map(|farm| (farm.pool_id.clone(), farm.to_pool()))
            .collect())
    }
}

impl std::fmt::Debug for AxlyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxlyClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
