//! Pool Presenter
//!
//! Turns ranked pools into the public display format. WX pools only carry
//! asset ids, so their names are looked up before display.

use std::sync::Arc;

use futures::future::join_all;
use pools_core::{Dex, DisplayPool, Pool, PoolsError, PoolsResult, PresentedPool};
use pools_sources::AssetNameResolver;
use tracing::{debug, warn};

const WX_POOLS_PAGE: &str = "https://wx.network/liquiditypools/pools";

/// Presents pools for display, one item at a time
pub struct PoolPresenter {
    resolver: Arc<dyn AssetNameResolver>,
}

impl PoolPresenter {
    pub fn new(resolver: Arc<dyn AssetNameResolver>) -> Self {
        Self { resolver }
    }

    /// Present a single pool
    ///
    /// Pools from an unknown DEX are returned as they are.
    pub async fn present(&self, pool: &Pool) -> PoolsResult<PresentedPool> {
        let dex = match pool.dex.parse::<Dex>() {
            Ok(dex) => dex,
            Err(_) => {
                debug!("[Presenter] Passing through pool {} from {}", pool.id, pool.dex);
                return Ok(PresentedPool::Raw(pool.clone()));
            }
        };

        let display = match dex {
            Dex::Wx => self.present_wx(pool).await?,
            Dex::Puzzle | Dex::Swop | Dex::Axly => DisplayPool::from_pool(pool),
        };

        Ok(PresentedPool::Display(display))
    }

    /// Present every pool concurrently, keeping order
    ///
    /// A pool that fails to present is returned unmodified in its slot.
    pub async fn present_all(&self, pools: Vec<Pool>) -> Vec<PresentedPool> {
        let presented = pools.iter().map(|pool| async move {
            match self.present(pool).await {
                Ok(presented) => presented,
                Err(e) => {
                    warn!(
                        "[Presenter] Failed to present pool {} from {}: {}",
                        pool.id, pool.dex, e
                    );
                    PresentedPool::Raw(pool.clone())
                }
            }
        });

        join_all(presented).await
    }

    async fn present_wx(&self, pool: &Pool) -> PoolsResult<DisplayPool> {
        let (amount_id, price_id) = match (&pool.amount_asset_id, &pool.price_asset_id) {
            (Some(amount), Some(price)) => (amount, price),
            _ => {
                return Err(PoolsError::not_found(format!(
                    "WX pool {} has no asset ids",
                    pool.id
                )))
            }
        };

        let (amount_asset, price_asset) = tokio::try_join!(
            self.resolver.resolve_name(amount_id),
            self.resolver.resolve_name(price_id)
        )?;

        Ok(DisplayPool::new(
            pool.dex.clone(),
            format!("{} / {}", amount_asset, price_asset),
            format!("{}/{}_{}", WX_POOLS_PAGE, amount_asset, price_asset),
            pool.pool_liquidity,
            pool.pool_max_apr,
        ))
    }
}

impl std::fmt::Debug for PoolPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolPresenter").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Resolves from a fixed table, unknown ids fail
    struct TableResolver(HashMap<&'static str, &'static str>);

    #[async_trait]
    impl AssetNameResolver for TableResolver {
        async fn resolve_name(&self, asset_id: &str) -> PoolsResult<String> {
            self.0
                .get(asset_id)
                .map(|name| name.to_string())
                .ok_or_else(|| PoolsError::not_found(asset_id.to_string()))
        }
    }

    fn presenter() -> PoolPresenter {
        let table = HashMap::from([("WAVES", "WAVES"), ("usdt-id", "USDT"), ("wx-id", "WX")]);
        PoolPresenter::new(Arc::new(TableResolver(table)))
    }

    fn wx_pool(id: &str, amount: &str, price: &str, apr: f64) -> Pool {
        let mut pool = Pool::new(id, "WX", "-", 1000.4, apr, "-");
        pool.amount_asset_id = Some(amount.to_string());
        pool.price_asset_id = Some(price.to_string());
        pool
    }

    #[tokio::test]
    async fn test_present_wx_resolves_names() {
        let presented = presenter()
            .present(&wx_pool("3PWx", "WAVES", "usdt-id", 12.6))
            .await
            .unwrap();

        assert_eq!(
            presented,
            PresentedPool::Display(DisplayPool {
                dex: "WX".to_string(),
                pool_name: "WAVES / USDT".to_string(),
                link: "https://wx.network/liquiditypools/pools/WAVES_USDT".to_string(),
                pool_liquidity: Some(1000),
                pool_max_apr: Some(13),
            })
        );
    }

    #[tokio::test]
    async fn test_present_known_dex_rounds() {
        let pool = Pool::new("3PSwop", "swop.fi", "SWOP/USDT", 48210.77, 18.5, "https://swop.fi/pool?address=3PSwop");
        let presented = presenter().present(&pool).await.unwrap();

        match presented {
            PresentedPool::Display(display) => {
                assert_eq!(display.pool_name, "SWOP/USDT");
                assert_eq!(display.link, pool.link);
                assert_eq!(display.pool_liquidity, Some(48211));
                assert_eq!(display.pool_max_apr, Some(19));
            }
            other => panic!("expected display pool, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_dex_passes_through() {
        let mut pool = Pool::new("0xabc", "uniswap", "ETH/USDC", 10.25, 3.75, "https://app.uniswap.org");
        pool.domain = Some("kept".to_string());

        let presented = presenter().present(&pool).await.unwrap();
        assert_eq!(presented, PresentedPool::Raw(pool));
    }

    #[tokio::test]
    async fn test_wx_without_asset_ids_fails() {
        let pool = Pool::new("3PWx", "WX", "-", 1.0, 1.0, "-");
        assert!(presenter().present(&pool).await.is_err());
    }

    #[tokio::test]
    async fn test_present_all_isolates_failures() {
        let pools = vec![
            wx_pool("ok-1", "WAVES", "usdt-id", 40.0),
            Pool::new("puzzle-1", "puzzle", "Farm", 10.6, 30.2, "https://puzzleswap.org/pools/farm/invest"),
            wx_pool("broken", "WAVES", "missing-id", 20.5),
            wx_pool("ok-2", "wx-id", "usdt-id", 10.0),
        ];

        let presented = presenter().present_all(pools.clone()).await;

        assert_eq!(presented.len(), 4);
        assert!(!presented[0].is_raw());
        assert!(!presented[1].is_raw());
        assert_eq!(presented[2], PresentedPool::Raw(pools[2].clone()));
        match &presented[3] {
            PresentedPool::Display(display) => assert_eq!(display.pool_name, "WX / USDT"),
            other => panic!("expected display pool, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_present_all_empty() {
        assert!(presenter().present_all(Vec::new()).await.is_empty());
    }
}
