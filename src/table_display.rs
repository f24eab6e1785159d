use tabled::settings::Style;
use tabled::Table;

use crate::core::{ConversionRoute, ExchangeGraph};
use crate::utils::format_amount;

/// Hop-by-hop table followed by a one-line summary.
pub fn render_route(route: &ConversionRoute) -> String {
    let summary = format!(
        "{} {} -> {} {} ({} hops, effective rate {})",
        format_amount(&route.amount_in),
        route.from_currency,
        format_amount(&route.amount_out),
        route.to_currency,
        route.hop_count(),
        format_amount(&route.effective_rate()),
    );

    if route.hops.is_empty() {
        return summary;
    }

    let mut table = Table::new(&route.hops);
    table.with(Style::rounded());
    format!("{}\n{}", table, summary)
}

/// All loaded conversion pairs, in insertion order.
pub fn render_pairs(graph: &ExchangeGraph) -> String {
    let mut table = Table::new(graph.edges());
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BestConversionFinder, ConversionEdge};
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn graph() -> ExchangeGraph {
        ExchangeGraph::from_edges(&[
            ConversionEdge::new("A", "B", BigDecimal::from(1)),
            ConversionEdge::new("B", "C", BigDecimal::from(2)),
            ConversionEdge::new("A", "C", BigDecimal::from_str("1.5").unwrap()),
        ])
    }

    #[test]
    fn test_route_table_lists_hops_and_summary() {
        let route = BestConversionFinder::default()
            .find_route(&graph(), &BigDecimal::from(10), "A", "C", 3)
            .unwrap();
        let rendered = render_route(&route);

        assert!(rendered.contains("Amount out"));
        assert!(rendered.contains("10 A -> 20 C (2 hops, effective rate 2)"));
    }

    #[test]
    fn test_identity_route_has_no_table() {
        let route = ConversionRoute::identity(&BigDecimal::from(3), "A");
        assert_eq!(render_route(&route), "3 A -> 3 A (0 hops, effective rate 1)");
    }

    #[test]
    fn test_pairs_table_keeps_rates_readable() {
        let rendered = render_pairs(&graph());
        assert!(rendered.contains("Rate"));
        assert!(rendered.contains("1.5"));
    }
}
