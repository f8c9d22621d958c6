//! Pool data structures

use serde::Serialize;

use crate::numeric::display_integer;

/// Placeholder for names and links a source cannot provide directly
pub const PLACEHOLDER: &str = "-";

/// A liquidity pool as normalized by a source adapter
///
/// Field names on the wire match what the frontend already consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pool {
    /// Source-specific pool or contract identifier
    pub id: String,

    /// Tag of the DEX that produced this pool
    pub dex: String,

    /// Display name, may be [`PLACEHOLDER`]
    #[serde(rename = "poolName")]
    pub pool_name: String,

    /// Total value locked in USD
    #[serde(rename = "poolLiquidity")]
    pub pool_liquidity: f64,

    /// Best available APR in percent
    ///
    /// What "best" means differs per source (leverage tiers, precomputed
    /// weekly max, base plus reward), values are ranked as reported.
    #[serde(rename = "poolMaxAPR")]
    pub pool_max_apr: f64,

    /// Pool page on the DEX UI, may be [`PLACEHOLDER`]
    pub link: String,

    /// First asset of the pair, for sources that need name resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_asset_id: Option<String>,

    /// Second asset of the pair, for sources that need name resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_asset_id: Option<String>,

    /// Puzzle Swap aggregator domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Pool {
    /// Create a pool with no source-specific extras
    pub fn new(
        id: impl Into<String>,
        dex: impl Into<String>,
        pool_name: impl Into<String>,
        pool_liquidity: f64,
        pool_max_apr: f64,
        link: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            dex: dex.into(),
            pool_name: pool_name.into(),
            pool_liquidity,
            pool_max_apr,
            link: link.into(),
            amount_asset_id: None,
            price_asset_id: None,
            domain: None,
        }
    }

    /// Key used for ranking, NaN sorts below every real value
    pub fn rank_key(&self) -> f64 {
        if self.pool_max_apr.is_nan() {
            f64::NEG_INFINITY
        } else {
            self.pool_max_apr
        }
    }
}

/// A pool in the public display format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPool {
    pub dex: String,

    #[serde(rename = "poolName")]
    pub pool_name: String,

    pub link: String,

    /// Rounded liquidity, `null` when the source value was not a number
    #[serde(rename = "poolLiquidity")]
    pub pool_liquidity: Option<i64>,

    /// Rounded APR, `null` when the source value was not a number
    #[serde(rename = "poolMaxAPR")]
    pub pool_max_apr: Option<i64>,
}

impl DisplayPool {
    /// Build a display record, rounding the numeric fields
    pub fn new(
        dex: impl Into<String>,
        pool_name: impl Into<String>,
        link: impl Into<String>,
        pool_liquidity: f64,
        pool_max_apr: f64,
    ) -> Self {
        Self {
            dex: dex.into(),
            pool_name: pool_name.into(),
            link: link.into(),
            pool_liquidity: display_integer(pool_liquidity),
            pool_max_apr: display_integer(pool_max_apr),
        }
    }

    /// Display a pool using its own name and link
    pub fn from_pool(pool: &Pool) -> Self {
        Self::new(
            pool.dex.clone(),
            pool.pool_name.clone(),
            pool.link.clone(),
            pool.pool_liquidity,
            pool.pool_max_apr,
        )
    }
}

/// Result of presenting one ranked pool
///
/// Serialized without a tag: clients receive either the display shape or
/// the raw pool when presentation was skipped or failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PresentedPool {
    Display(DisplayPool),
    Raw(Pool),
}

impl PresentedPool {
    pub fn is_raw(&self) -> bool {
        matches!(self, PresentedPool::Raw(_))
    }
}
