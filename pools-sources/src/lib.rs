//! DEX integrations for the pool yield aggregator
//!
//! Each module wraps one DEX statistics endpoint and normalizes its
//! response into [`pools_core::Pool`] records. The WX module additionally
//! provides the asset-name lookup used when presenting WX pools.

pub mod axly;
pub mod puzzle;
pub mod source;
pub mod swop;
pub mod wx;

pub use axly::AxlyClient;
pub use puzzle::PuzzleClient;
pub use source::{build_source, http_client, AssetNameResolver, PoolMap, PoolSource};
pub use swop::SwopClient;
pub use wx::{WxAssetClient, WxPoolsClient};
