use std::collections::BTreeMap;
use bigdecimal::BigDecimal;
use log::{debug, info};
use crate::core::exchange_graph::ExchangeGraph;
use crate::core::types::{ConversionHop, ConversionRoute, SearchStrategy, NO_ROUTE_SENTINEL};

/// Hop budget used when a query does not name one.
pub const DEFAULT_MAX_HOPS: i32 = 3;

/// Best amount reached at a currency together with the hops that produced it.
type Candidate = (BigDecimal, Vec<ConversionHop>);

/// Finds the conversion path that yields the largest amount of the target
/// currency within a hop budget.
///
/// The hop budget is the only bound on the search; cycles are walked until it
/// runs out. Paths end at the first arrival at the target currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestConversionFinder {
    strategy: SearchStrategy,
}

impl BestConversionFinder {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Best route from `from_currency` to `to_currency` using at most
    /// `max_hops` edges, or `None` when no such path exists.
    ///
    /// A query whose source equals its target always yields the identity
    /// route, whatever the budget (zero and negative included).
    pub fn find_route(
        &self,
        graph: &ExchangeGraph,
        amount_in: &BigDecimal,
        from_currency: &str,
        to_currency: &str,
        max_hops: i32,
    ) -> Option<ConversionRoute> {
        debug!(
            "Searching {} {} -> {} within {} hops ({})",
            amount_in, from_currency, to_currency, max_hops, self.strategy
        );

        if from_currency == to_currency {
            return Some(ConversionRoute::identity(amount_in, from_currency));
        }

        let found = match self.strategy {
            SearchStrategy::Recursive => {
                let mut trail = Vec::new();
                Self::dfs_search(graph, from_currency, to_currency, amount_in.clone(), max_hops, &mut trail)
            }
            SearchStrategy::Layered => Self::layered_search(graph, from_currency, to_currency, amount_in, max_hops),
        };

        match found {
            Some((amount_out, hops)) => {
                info!(
                    "Best conversion {} -> {}: {} in {} hops",
                    from_currency, to_currency, amount_out, hops.len()
                );
                Some(ConversionRoute {
                    from_currency: from_currency.to_string(),
                    to_currency: to_currency.to_string(),
                    amount_in: amount_in.clone(),
                    amount_out,
                    hops,
                })
            }
            None => {
                info!("No route {} -> {} within {} hops", from_currency, to_currency, max_hops);
                None
            }
        }
    }

    /// Best converted amount, or `None` when the target is unreachable.
    pub fn best_amount(
        &self,
        graph: &ExchangeGraph,
        amount_in: &BigDecimal,
        from_currency: &str,
        to_currency: &str,
        max_hops: i32,
    ) -> Option<BigDecimal> {
        self.find_route(graph, amount_in, from_currency, to_currency, max_hops)
            .map(|route| route.amount_out)
    }

    /// Legacy numeric contract: every branch answers either an amount or `-1`,
    /// and `-1` competes in the max like any other amount.
    ///
    /// For non-negative amounts this equals [`best_amount`](Self::best_amount)
    /// with `None` read as `-1`. A negative amount can lose to the sentinel:
    /// `-5` A to B yields `-1`, not `-5`. Prefer `best_amount`.
    pub fn best_amount_or_sentinel(
        &self,
        graph: &ExchangeGraph,
        amount_in: &BigDecimal,
        from_currency: &str,
        to_currency: &str,
        max_hops: i32,
    ) -> BigDecimal {
        Self::sentinel_search(graph, from_currency, to_currency, amount_in.clone(), max_hops)
    }

    fn sentinel_search(
        graph: &ExchangeGraph,
        current_currency: &str,
        target_currency: &str,
        current_amount: BigDecimal,
        hops_left: i32,
    ) -> BigDecimal {
        let no_route = BigDecimal::from(NO_ROUTE_SENTINEL);
        if current_currency == target_currency {
            return current_amount;
        }
        if hops_left <= 0 {
            return no_route;
        }

        graph
            .edges_from(current_currency)
            .iter()
            .map(|edge| {
                Self::sentinel_search(
                    graph,
                    &edge.to_currency,
                    target_currency,
                    &current_amount * &edge.rate,
                    hops_left - 1,
                )
            })
            .fold(no_route, |best, amount| if amount > best { amount } else { best })
    }

    fn dfs_search(
        graph: &ExchangeGraph,
        current_currency: &str,
        target_currency: &str,
        current_amount: BigDecimal,
        hops_left: i32,
        trail: &mut Vec<ConversionHop>,
    ) -> Option<Candidate> {
        if current_currency == target_currency {
            return Some((current_amount, trail.clone()));
        }
        if hops_left <= 0 {
            return None;
        }

        let mut best: Option<Candidate> = None;
        for edge in graph.edges_from(current_currency) {
            let hop = ConversionHop::apply(edge, &current_amount);
            let amount_out = hop.amount_out.clone();

            trail.push(hop);
            let candidate = Self::dfs_search(
                graph,
                &edge.to_currency,
                target_currency,
                amount_out,
                hops_left - 1,
                trail,
            );
            trail.pop();

            // strict comparison: on ties the earlier edge keeps its path
            if let Some(candidate) = candidate {
                let improves = match &best {
                    Some((best_amount, _)) => candidate.0 > *best_amount,
                    None => true,
                };
                if improves {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    /// Per-hop relaxation: layer `i` holds the best amount reachable at each
    /// currency with at most `i` hops. The target is never relaxed out of, so
    /// paths stop at first arrival just like the recursive search.
    ///
    /// Keeping one best amount per currency per layer relies on rates being
    /// positive.
    fn layered_search(
        graph: &ExchangeGraph,
        from_currency: &str,
        to_currency: &str,
        amount_in: &BigDecimal,
        max_hops: i32,
    ) -> Option<Candidate> {
        let mut layer: BTreeMap<String, Candidate> = BTreeMap::new();
        layer.insert(from_currency.to_string(), (amount_in.clone(), Vec::new()));

        for depth in 1..=max_hops.max(0) {
            let mut next = layer.clone();

            for (currency, (amount, hops)) in &layer {
                if currency == to_currency {
                    continue;
                }
                for edge in graph.edges_from(currency) {
                    let hop = ConversionHop::apply(edge, amount);
                    let improves = match next.get(&edge.to_currency) {
                        Some((best_amount, _)) => hop.amount_out > *best_amount,
                        None => true,
                    };
                    if improves {
                        let mut path = hops.clone();
                        let amount_out = hop.amount_out.clone();
                        path.push(hop);
                        next.insert(edge.to_currency.clone(), (amount_out, path));
                    }
                }
            }

            match next.get(to_currency) {
                Some((best_amount, _)) => debug!("best amount with {} hops: {}", depth, best_amount),
                None => debug!("best amount with {} hops: unreachable", depth),
            }
            layer = next;
        }

        layer.remove(to_currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ConversionEdge;
    use std::str::FromStr;

    fn dec(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn sample_graph() -> ExchangeGraph {
        ExchangeGraph::from_edges(&[
            ConversionEdge::new("A", "B", dec("1")),
            ConversionEdge::new("B", "C", dec("2")),
            ConversionEdge::new("A", "C", dec("1.5")),
            ConversionEdge::new("B", "D", dec("2")),
            ConversionEdge::new("D", "A", dec("3")),
        ])
    }

    fn finders() -> [BestConversionFinder; 2] {
        [
            BestConversionFinder::new(SearchStrategy::Recursive),
            BestConversionFinder::new(SearchStrategy::Layered),
        ]
    }

    #[test]
    fn test_identity_ignores_hop_budget() {
        let graph = sample_graph();
        for finder in finders() {
            for hops in [-2, 0, 1, 3] {
                let route = finder.find_route(&graph, &dec("10"), "A", "A", hops).unwrap();
                assert_eq!(route, ConversionRoute::identity(&dec("10"), "A"));
            }
            // unknown currencies too: no lookup happens
            assert_eq!(finder.best_amount(&graph, &dec("4"), "ZZZ", "ZZZ", 0), Some(dec("4")));
        }
    }

    #[test]
    fn test_zero_or_negative_budget_fails() {
        let graph = sample_graph();
        for finder in finders() {
            assert_eq!(finder.best_amount(&graph, &dec("10"), "A", "B", 0), None);
            assert_eq!(finder.best_amount(&graph, &dec("10"), "A", "B", -1), None);
        }
    }

    #[test]
    fn test_source_without_edges_fails() {
        let graph = sample_graph();
        for finder in finders() {
            assert_eq!(finder.best_amount(&graph, &dec("10"), "C", "A", 3), None);
            assert_eq!(finder.best_amount(&graph, &dec("10"), "X", "A", 3), None);
        }
    }

    #[test]
    fn test_fixture_scenarios() {
        let graph = sample_graph();
        for finder in finders() {
            let best = |from: &str, to: &str| finder.best_amount(&graph, &dec("10"), from, to, DEFAULT_MAX_HOPS);
            assert_eq!(best("A", "B"), Some(dec("10")));
            assert_eq!(best("A", "C"), Some(dec("20")));
            assert_eq!(best("B", "C"), Some(dec("90")));
            assert_eq!(best("B", "A"), Some(dec("60")));
        }
    }

    #[test]
    fn test_route_reports_best_path() {
        let graph = sample_graph();
        let finder = BestConversionFinder::default();

        let route = finder.find_route(&graph, &dec("10"), "B", "C", 3).unwrap();
        assert_eq!(route.path(), vec!["B", "D", "A", "C"]);
        assert_eq!(route.hops[0].amount_out, dec("20"));
        assert_eq!(route.hops[1].amount_out, dec("60"));
        assert_eq!(route.hops[2].amount_out, dec("90"));

        // with two hops only the direct edge remains
        let short = finder.find_route(&graph, &dec("10"), "B", "C", 2).unwrap();
        assert_eq!(short.path(), vec!["B", "C"]);
        assert_eq!(short.amount_out, dec("20"));
    }

    #[test]
    fn test_tie_keeps_first_edge_in_insertion_order() {
        let graph = ExchangeGraph::from_edges(&[
            ConversionEdge::new("X", "M", dec("2")),
            ConversionEdge::new("X", "N", dec("4")),
            ConversionEdge::new("M", "Y", dec("2")),
            ConversionEdge::new("N", "Y", dec("1")),
        ]);
        let route = BestConversionFinder::default()
            .find_route(&graph, &dec("1"), "X", "Y", 2)
            .unwrap();
        assert_eq!(route.amount_out, dec("4"));
        assert_eq!(route.path(), vec!["X", "M", "Y"]);
    }

    #[test]
    fn test_sentinel_adaptor() {
        let graph = sample_graph();
        let finder = BestConversionFinder::default();
        assert_eq!(finder.best_amount_or_sentinel(&graph, &dec("10"), "C", "A", 3), dec("-1"));
        assert_eq!(finder.best_amount_or_sentinel(&graph, &dec("10"), "A", "B", 3), dec("10"));
    }

    #[test]
    fn test_sentinel_competes_in_the_max() {
        let graph = sample_graph();
        let finder = BestConversionFinder::default();
        // -5 is reachable, but the failing branches answer -1, which is larger
        assert_eq!(finder.best_amount_or_sentinel(&graph, &dec("-5"), "A", "B", 3), dec("-1"));
        assert_eq!(finder.best_amount(&graph, &dec("-5"), "A", "B", 3), Some(dec("-5")));
        // identity returns the amount before any comparison
        assert_eq!(finder.best_amount_or_sentinel(&graph, &dec("-5"), "A", "A", 0), dec("-5"));

        let currencies = ["A", "B", "C", "D"];
        for from in currencies {
            for to in currencies {
                for hops in 0..=4 {
                    let expected = finder
                        .best_amount(&graph, &dec("10"), from, to, hops)
                        .unwrap_or_else(|| BigDecimal::from(NO_ROUTE_SENTINEL));
                    assert_eq!(
                        finder.best_amount_or_sentinel(&graph, &dec("10"), from, to, hops),
                        expected,
                        "{} -> {} within {} hops",
                        from,
                        to,
                        hops
                    );
                }
            }
        }
    }

    #[test]
    fn test_negative_amounts_are_not_confused_with_failure() {
        let graph = sample_graph();
        let finder = BestConversionFinder::default();
        // -1 * 1 = -1 is a genuine result, not "no route"
        assert_eq!(finder.best_amount(&graph, &dec("-1"), "A", "B", 1), Some(dec("-1")));
    }

    #[test]
    fn test_cycles_terminate_within_budget() {
        let graph = ExchangeGraph::from_edges(&[
            ConversionEdge::new("P", "Q", dec("1.1")),
            ConversionEdge::new("Q", "P", dec("1.1")),
            ConversionEdge::new("Q", "R", dec("1")),
        ]);
        for finder in finders() {
            // P->Q->P->Q->R beats P->Q->R once the budget allows the loop
            assert_eq!(finder.best_amount(&graph, &dec("100"), "P", "R", 2), Some(dec("110")));
            assert_eq!(finder.best_amount(&graph, &dec("100"), "P", "R", 4), Some(dec("133.1")));
        }
    }

    #[test]
    fn test_target_is_not_left_once_reached() {
        // T->U->T would multiply by 4, but a path stops at its first arrival
        let graph = ExchangeGraph::from_edges(&[
            ConversionEdge::new("S", "T", dec("1")),
            ConversionEdge::new("T", "U", dec("2")),
            ConversionEdge::new("U", "T", dec("2")),
        ]);
        for finder in finders() {
            assert_eq!(finder.best_amount(&graph, &dec("1"), "S", "T", 5), Some(dec("1")));
        }
    }
}
