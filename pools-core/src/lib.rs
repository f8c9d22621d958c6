//! Core types for the DEX pool yield aggregator
//!
//! This crate defines the shared data structures used across the workspace:
//! the normalized pool record produced by every source, its display form,
//! the set of known DEX tags and the workspace error type.

pub mod dex;
pub mod error;
pub mod numeric;
pub mod pool;

pub use dex::Dex;
pub use error::{PoolsError, PoolsResult};
pub use numeric::{display_integer, lenient_f64, round_half_up};
pub use pool::{DisplayPool, Pool, PresentedPool, PLACEHOLDER};
