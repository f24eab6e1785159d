pub mod exchange_graph;
pub mod best_conversion;
pub mod types;

// re-export the core types for callers outside the crate
pub use exchange_graph::ExchangeGraph;
pub use best_conversion::{BestConversionFinder, DEFAULT_MAX_HOPS};
pub use types::*;
