//! Data access layer for the cart's remote collaborators.
//!
//! This crate provides:
//! - `ProductCatalog` / `StockLookup` - The seams the cart store depends on
//! - `ApiClient` - HTTP implementation of both, with timeout/retry
//! - `DependencyTag` - Semantic dependency categories
//! - `TimeoutConfig` - Per-dependency timeouts
//! - `RetryPolicy` - Retry strategies

mod client;
mod dependency;
mod retry;
mod source;
mod timeout;

pub use client::*;
pub use dependency::*;
pub use retry::*;
pub use source::*;
pub use timeout::*;
