//! WX Network clients
//!
//! The pool statistics endpoint only reports asset ids, so WX pools are
//! produced with placeholder names and links. [`WxAssetClient`] resolves
//! those ids to tickers when the pools are presented.

use async_trait::async_trait;
use pools_core::{lenient_f64, Dex, Pool, PoolsError, PoolsResult, PLACEHOLDER};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::source::{decode_items, send_json, AssetNameResolver, PoolMap, PoolSource};

const WX_API_BASE: &str = "https://wx.network";

// ============================================================================
// Pool statistics
// ============================================================================

/// Response from GET /api/v1/liquidity_pools/stats
///
/// Items are decoded one at a time, see [`WxPoolStats`].
#[derive(Debug, Clone, Deserialize)]
pub struct WxPoolsResponse {
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WxPoolStats {
    /// Pool contract address
    pub address: String,

    /// Missing ids keep the pool, it is then shown unresolved
    #[serde(default)]
    pub amount_asset_id: Option<String>,

    #[serde(default)]
    pub price_asset_id: Option<String>,

    /// LP tokens issued by the pool
    #[serde(default)]
    pub pool_lp_balance: Value,

    /// USD value of one LP token
    #[serde(default)]
    pub rate_lp_usd: Value,

    #[serde(default)]
    pub base_apys: Vec<WxBaseApy>,

    /// Maximum boosted reward APY
    #[serde(default)]
    pub reward_apy_max: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WxBaseApy {
    #[serde(default)]
    pub base_apy: Value,
}

impl WxPoolStats {
    /// TVL in USD
    pub fn liquidity(&self) -> f64 {
        lenient_f64(&self.pool_lp_balance) * lenient_f64(&self.rate_lp_usd)
    }

    /// Base APY of the first period plus the maximum reward APY
    pub fn max_apr(&self) -> f64 {
        let base = self
            .base_apys
            .first()
            .map(|apy| lenient_f64(&apy.base_apy))
            .unwrap_or(f64::NAN);
        base + lenient_f64(&self.reward_apy_max)
    }

    pub fn to_pool(&self) -> Pool {
        let mut pool = Pool::new(
            self.address.clone(),
            Dex::Wx.tag(),
            PLACEHOLDER,
            self.liquidity(),
            self.max_apr(),
            PLACEHOLDER,
        );
        pool.amount_asset_id = self.amount_asset_id.clone();
        pool.price_asset_id = self.price_asset_id.clone();
        pool
    }
}

/// WX liquidity pool statistics client
#[derive(Clone)]
pub struct WxPoolsClient {
    client: Client,
    base_url: String,
}

impl WxPoolsClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, WX_API_BASE)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_pool_stats(&self) -> PoolsResult<Vec<WxPoolStats>> {
        let url = format!("{}/api/v1/liquidity_pools/stats", self.base_url);
        debug!("[WX] Fetching pool stats from: {}", url);
        let response: WxPoolsResponse = send_json(self.client.get(&url), "WX").await?;
        Ok(decode_items(response.items, "WX"))
    }
}

#[async_trait]
impl PoolSource for WxPoolsClient {
    fn dex(&self) -> Dex {
        Dex::Wx
    }

    async fn fetch_pools(&self) -> PoolsResult<PoolMap> {
        let stats = self.list_pool_stats().await?;
        debug!("[WX] Got {} pools", stats.len());

        Ok(stats
            .iter()
            .map(|item| (item.address.clone(), item.to_pool()))
            .collect())
    }
}

impl std::fmt::Debug for WxPoolsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WxPoolsClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Asset names
// ============================================================================

/// Response from GET /api/v1/assets?ids=...
#[derive(Debug, Clone, Deserialize)]
pub struct WxAssetsResponse {
    pub data: Vec<WxAssetEntry>,
}

/// One entry per requested id, `data` is null for unknown assets
#[derive(Debug, Clone, Deserialize)]
pub struct WxAssetEntry {
    #[serde(default)]
    pub data: Option<WxAsset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WxAsset {
    #[serde(default)]
    pub ticker: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl WxAsset {
    /// Ticker if set and non-empty, full name otherwise
    pub fn display_name(&self) -> Option<String> {
        self.ticker
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.is_empty()))
            .map(str::to_string)
    }
}

/// WX asset metadata client
#[derive(Clone)]
pub struct WxAssetClient {
    client: Client,
    base_url: String,
}

impl WxAssetClient {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, WX_API_BASE)
    }

    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Resolve several asset ids in one request, names come back in request order
    #[instrument(skip(self))]
    pub async fn resolve_names(&self, asset_ids: &[&str]) -> PoolsResult<Vec<String>> {
        // Ids are sent as a plain comma-joined list, the comma is not escaped
        let url = format!(
            "{}/api/v1/assets?ids={}",
            self.base_url,
            asset_ids.join(",")
        );
        debug!("[WX] Resolving asset names from: {}", url);

        let response: WxAssetsResponse = send_json(self.client.get(&url), "WX assets").await?;

        if response.data.len() < asset_ids.len() {
            return Err(PoolsError::not_found(format!(
                "WX returned {} assets for {} ids",
                response.data.len(),
                asset_ids.len()
            )));
        }

        asset_ids
            .iter()
            .zip(response.data)
            .map(|(id, entry)| {
                entry
                    .data
                    .and_then(|asset| asset.display_name())
                    .ok_or_else(|| PoolsError::not_found(format!("No name for asset {}", id)))
            })
            .collect()
    }
}

#[async_trait]
impl AssetNameResolver for WxAssetClient {
    async fn resolve_name(&self, asset_id: &str) -> PoolsResult<String> {
        let mut names = self.resolve_names(&[asset_id]).await?;
        names
            .pop()
            .ok_or_else(|| PoolsError::not_found(format!("No name for asset {}", asset_id)))
    }
}

impl std::fmt::Debug for WxAssetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WxAssetClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{http_client, test_support};
    use axum::http::StatusCode;

    const STATS: &str = r#"{
        "items": [
            {
                "address": "3PWx1",
                "amount_asset_id": "WAVES",
                "price_asset_id": "9wc3LXNA4TEBsXyKtoLE9mrbDD7WMHXvXrCjZvabLAsi",
                "pool_lp_balance": "1000.5",
                "rate_lp_usd": "2",
                "base_apys": [{"base_apy": "3.5"}, {"base_apy": "9"}],
                "reward_apy_max": "20.25"
            },
            {
                "address": "3PWx2",
                "amount_asset_id": "A",
                "price_asset_id": "B",
                "pool_lp_balance": "oops",
                "rate_lp_usd": "1",
                "base_apys": [],
                "reward_apy_max": 4
            }
        ]
    }"#;

    fn stats() -> Vec<WxPoolStats> {
        let response: WxPoolsResponse = serde_json::from_str(STATS).unwrap();
        decode_items(response.items, "WX")
    }

    #[test]
    fn test_to_pool() {
        let pool = stats()[0].to_pool();
        assert_eq!(pool.id, "3PWx1");
        assert_eq!(pool.dex, "WX");
        assert_eq!(pool.pool_name, PLACEHOLDER);
        assert_eq!(pool.link, PLACEHOLDER);
        assert_eq!(pool.pool_liquidity, 2001.0);
        assert_eq!(pool.pool_max_apr, 23.75);
        assert_eq!(pool.amount_asset_id.as_deref(), Some("WAVES"));
    }

    #[test]
    fn test_malformed_numbers_degrade() {
        let pool = stats()[1].to_pool();
        assert!(pool.pool_liquidity.is_nan());
        assert!(pool.pool_max_apr.is_nan());
    }

    #[test]
    fn test_display_name_prefers_ticker() {
        let asset = WxAsset {
            ticker: Some("USDT".to_string()),
            name: Some("Tether USD".to_string()),
        };
        assert_eq!(asset.display_name().as_deref(), Some("USDT"));

        let asset = WxAsset {
            ticker: Some(String::new()),
            name: Some("Tether USD".to_string()),
        };
        assert_eq!(asset.display_name().as_deref(), Some("Tether USD"));

        let asset = WxAsset {
            ticker: None,
            name: None,
        };
        assert_eq!(asset.display_name(), None);
    }

    #[tokio::test]
    async fn test_fetch_pools() {
        let base =
            test_support::serve("/api/v1/liquidity_pools/stats", StatusCode::OK, STATS).await;
        let source = WxPoolsClient::with_base_url(http_client().unwrap(), base);

        let pools = source.fetch_pools().await.unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools["3PWx1"].price_asset_id.as_deref(), Some("9wc3LXNA4TEBsXyKtoLE9mrbDD7WMHXvXrCjZvabLAsi"));
    }

    #[tokio::test]
    async fn test_fetch_pools_keeps_pool_with_null_asset_id() {
        let base = test_support::serve(
            "/api/v1/liquidity_pools/stats",
            StatusCode::OK,
            r#"{"items": [
                {"address": "3PGood", "amount_asset_id": "WAVES", "price_asset_id": "USDT",
                 "pool_lp_balance": "10", "rate_lp_usd": "3", "base_apys": [{"base_apy": "1"}], "reward_apy_max": "2"},
                {"address": "3PBad", "amount_asset_id": "WAVES", "price_asset_id": null,
                 "pool_lp_balance": "4", "rate_lp_usd": "5", "base_apys": [{"base_apy": "6"}], "reward_apy_max": "1"}
            ]}"#,
        )
        .await;
        let source = WxPoolsClient::with_base_url(http_client().unwrap(), base);

        let pools = source.fetch_pools().await.unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools["3PGood"].price_asset_id.as_deref(), Some("USDT"));

        let bad = &pools["3PBad"];
        assert_eq!(bad.amount_asset_id.as_deref(), Some("WAVES"));
        assert_eq!(bad.price_asset_id, None);
        assert_eq!(bad.pool_liquidity, 20.0);
        assert_eq!(bad.pool_max_apr, 7.0);
    }

    #[tokio::test]
    async fn test_fetch_pools_server_error() {
        let base = test_support::serve(
            "/api/v1/liquidity_pools/stats",
            StatusCode::INTERNAL_SERVER_ERROR,
            "{}",
        )
        .await;
        let source = WxPoolsClient::with_base_url(http_client().unwrap(), base);

        let err = source.fetch_pools().await.unwrap_err();
        assert!(matches!(err, PoolsError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_resolve_name() {
        let base = test_support::serve(
            "/api/v1/assets",
            StatusCode::OK,
            r#"{"data": [{"data": {"id": "WAVES", "ticker": null, "name": "Waves"}}]}"#,
        )
        .await;
        let resolver = WxAssetClient::with_base_url(http_client().unwrap(), base);

        assert_eq!(resolver.resolve_name("WAVES").await.unwrap(), "Waves");
    }

    #[tokio::test]
    async fn test_resolve_names_keeps_order() {
        let base = test_support::serve(
            "/api/v1/assets",
            StatusCode::OK,
            r#"{"data": [
                {"data": {"ticker": "WX", "name": "WX Token"}},
                {"data": {"ticker": "USDT", "name": "Tether"}}
            ]}"#,
        )
        .await;
        let resolver = WxAssetClient::with_base_url(http_client().unwrap(), base);

        let names = resolver.resolve_names(&["a", "b"]).await.unwrap();
        assert_eq!(names, vec!["WX".to_string(), "USDT".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_names_sends_plain_comma_list() {
        use axum::{extract::RawQuery, routing::get, Router};

        // Answers only when the ids arrive unescaped
        let app = Router::new().route(
            "/api/v1/assets",
            get(|RawQuery(query): RawQuery| async move {
                if query.as_deref() == Some("ids=a,b") {
                    (
                        StatusCode::OK,
                        r#"{"data": [{"data": {"ticker": "A"}}, {"data": {"ticker": "B"}}]}"#,
                    )
                } else {
                    (StatusCode::BAD_REQUEST, "{}")
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let resolver = WxAssetClient::with_base_url(http_client().unwrap(), format!("http://{}", addr));

        let names = resolver.resolve_names(&["a", "b"]).await.unwrap();
        assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_unknown_asset() {
        let base = test_support::serve(
            "/api/v1/assets",
            StatusCode::OK,
            r#"{"data": [{"data": null}]}"#,
        )
        .await;
        let resolver = WxAssetClient::with_base_url(http_client().unwrap(), base);

        let err = resolver.resolve_name("nope").await.unwrap_err();
        assert!(matches!(err, PoolsError::NotFound(_)));
    }
}
