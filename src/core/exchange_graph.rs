use std::collections::{HashMap, HashSet};
use log::{debug, info};
use crate::core::types::ConversionEdge;

/// Read-only rate graph: one adjacency list entry per input edge, keyed by
/// source currency.
#[derive(Debug, Clone, Default)]
pub struct ExchangeGraph {
    /// currency -> outgoing edges in insertion order
    adjacency_list: HashMap<String, Vec<ConversionEdge>>,
    currencies: HashSet<String>, // every code seen as source or destination
    edge_order: Vec<(String, usize)>, // (source, index in its list) by insertion
}

impl ExchangeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from an ordered edge list.
    ///
    /// Duplicate sources are all kept and each source's list follows input
    /// order. Currencies that only ever appear as a destination get no entry.
    pub fn from_edges(edges: &[ConversionEdge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.clone());
        }

        let (currency_count, edge_count) = graph.get_stats();
        info!("Rate graph built: {} currencies, {} edges", currency_count, edge_count);
        graph
    }

    pub fn add_edge(&mut self, edge: ConversionEdge) {
        debug!("Adding edge {} -> {} @ {}", edge.from_currency, edge.to_currency, edge.rate);
        self.currencies.insert(edge.from_currency.clone());
        self.currencies.insert(edge.to_currency.clone());

        let source = edge.from_currency.clone();
        let list = self.adjacency_list.entry(source.clone()).or_default();
        list.push(edge);
        self.edge_order.push((source, list.len() - 1));
    }

    /// Outgoing edges of `currency`, empty when it never appears as a source.
    pub fn edges_from(&self, currency: &str) -> &[ConversionEdge] {
        self.adjacency_list
            .get(currency)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_source(&self, currency: &str) -> bool {
        self.adjacency_list.contains_key(currency)
    }

    /// Whether a single edge links the two currencies in that direction.
    pub fn has_direct_path(&self, from_currency: &str, to_currency: &str) -> bool {
        self.edges_from(from_currency)
            .iter()
            .any(|edge| edge.to_currency == to_currency)
    }

    pub fn currencies(&self) -> &HashSet<String> {
        &self.currencies
    }

    /// All edges in the order they were added.
    pub fn edges(&self) -> impl Iterator<Item = &ConversionEdge> + '_ {
        self.edge_order
            .iter()
            .filter_map(|(source, index)| self.adjacency_list.get(source)?.get(*index))
    }

    /// (currency count, edge count)
    pub fn get_stats(&self) -> (usize, usize) {
        let edge_count = self.adjacency_list.values().map(Vec::len).sum();
        (self.currencies.len(), edge_count)
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency_list.is_empty()
    }
}
