//! Common source interface and HTTP plumbing

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pools_core::{Dex, Pool, PoolsError, PoolsResult};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::{AxlyClient, PuzzleClient, SwopClient, WxPoolsClient};

/// Pools of one source keyed by pool id
pub type PoolMap = HashMap<String, Pool>;

/// A DEX statistics endpoint that yields normalized pools
#[async_trait]
pub trait PoolSource: Send + Sync {
    /// Which DEX this source reads
    fn dex(&self) -> Dex;

    /// Fetch the current pools, one outbound request
    async fn fetch_pools(&self) -> PoolsResult<PoolMap>;
}

/// Resolves asset identifiers to display names
#[async_trait]
pub trait AssetNameResolver: Send + Sync {
    /// Short ticker when the asset has one, full name otherwise
    async fn resolve_name(&self, asset_id: &str) -> PoolsResult<String>;
}

/// Shared HTTP client for all sources
pub fn http_client() -> PoolsResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("DexPools/1.0")
        .build()
        .map_err(|e| PoolsError::internal(format!("Failed to create HTTP client: {}", e)))
}

/// Build the source for a known DEX at its production endpoint
pub fn build_source(dex: Dex, client: Client) -> Arc<dyn PoolSource> {
    match dex {
        Dex::Wx => Arc::new(WxPoolsClient::new(client)),
        Dex::Puzzle => Arc::new(PuzzleClient::new(client)),
        Dex::Swop => Arc::new(SwopClient::new(client)),
        Dex::Axly => Arc::new(AxlyClient::new(client)),
    }
}

/// Send a request and decode a JSON body, mapping failures to [`PoolsError`]
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    source: &str,
) -> PoolsResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| PoolsError::network(format!("{} request failed: {}", source, e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(PoolsError::api(
            status.as_u16(),
            format!("{} API error: {}", source, body),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PoolsError::network(format!("{} body read failed: {}", source, e)))?;

    serde_json::from_str(&body)
        .map_err(|e| PoolsError::parse(format!("Failed to parse {} response: {}", source, e)))
}

/// Decode list items one by one, dropping those that do not fit `T`
///
/// A single malformed entry costs that entry only, not the whole source.
pub(crate) fn decode_items<T: DeserializeOwned>(items: Vec<Value>, source: &str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("[{}] Skipping malformed item {}: {}", source, index, e);
                None
            }
        })
        .collect()
}

/// Local HTTP server standing in for a DEX API
#[cfg(test)]
pub(crate) mod test_support {
    use axum::{http::StatusCode, routing::get, Router};

    /// Serve `body` with `status` at `path`, returns the base URL
    pub async fn serve(path: &'static str, status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            path,
            get(move || async move {
                (status, [("content-type", "application/json")], body)
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}
