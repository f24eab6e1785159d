//! Best-swap: best achievable exchange amount between two currencies.
//!
//! Conversion pairs form a directed graph of rates. A query explores every
//! chain of pairs up to a hop budget and keeps the one that yields the most of
//! the target currency.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log_adapter;
pub mod sanity;
pub mod table_display;
pub mod utils;

// commonly used types
pub use crate::config::Config;
pub use crate::core::{
    BestConversionFinder, ConversionEdge, ConversionHop, ConversionRoute, ExchangeGraph,
    SearchStrategy, DEFAULT_MAX_HOPS, NO_ROUTE_SENTINEL,
};
pub use crate::error::SwapError;
