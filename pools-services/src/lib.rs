//! Business logic services for the pool yield aggregator
//!
//! This crate fans out to every configured DEX source, ranks the merged
//! pools by APR and turns the winners into their display form.

pub mod aggregator;
pub mod pool_service;
pub mod presenter;

pub use aggregator::{
    rank_pools, AggregatorConfig, PoolAggregator, SourceOutcome, DEFAULT_SOURCES, DEFAULT_TOP_N,
};
pub use pool_service::PoolService;
pub use presenter::PoolPresenter;
