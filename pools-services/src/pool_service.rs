//! Pool service: the full aggregate-then-present pipeline

use std::sync::Arc;

use pools_core::PresentedPool;
use pools_sources::WxAssetClient;
use reqwest::Client;
use tracing::{info, instrument};

use crate::aggregator::{AggregatorConfig, PoolAggregator};
use crate::presenter::PoolPresenter;

/// Service for fetching, ranking and presenting pools across DEXes
pub struct PoolService {
    aggregator: Arc<PoolAggregator>,
    presenter: Arc<PoolPresenter>,
}

impl PoolService {
    /// Create a service over the production endpoints
    pub fn new(config: &AggregatorConfig, client: Client) -> Self {
        let aggregator = PoolAggregator::new(config, client.clone());
        let presenter = PoolPresenter::new(Arc::new(WxAssetClient::new(client)));
        Self::with_parts(aggregator, presenter)
    }

    pub fn with_parts(aggregator: PoolAggregator, presenter: PoolPresenter) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            presenter: Arc::new(presenter),
        }
    }

    /// Top pools in display form, best APR first
    ///
    /// Runs the whole pipeline on every call. Source and presentation
    /// failures only shrink or degrade the list, they never fail the call.
    #[instrument(skip(self))]
    pub async fn display_pools(&self) -> Vec<PresentedPool> {
        let ranked = self.aggregator.top_pools().await;
        let presented = self.presenter.present_all(ranked).await;

        let raw = presented.iter().filter(|p| p.is_raw()).count();
        info!(
            "Presenting {} pools ({} passed through unformatted)",
            presented.len(),
            raw
        );
        presented
    }
}

impl std::fmt::Debug for PoolService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolService")
            .field("aggregator", &self.aggregator)
            .finish()
    }
}
