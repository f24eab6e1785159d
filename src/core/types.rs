use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tabled::Tabled;

use crate::error::SwapError;
use crate::utils::format_amount;

/// Numeric value the legacy contract returns when no route exists.
pub const NO_ROUTE_SENTINEL: i64 = -1;

fn display_amount(amount: &BigDecimal) -> String {
    format_amount(amount)
}

/// A directed, rated conversion link. Not assumed symmetric or invertible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct ConversionEdge {
    #[tabled(rename = "From")]
    pub from_currency: String, // source currency code
    #[tabled(rename = "To")]
    pub to_currency: String, // destination currency code
    #[tabled(rename = "Rate", display_with = "display_amount")]
    pub rate: BigDecimal, // units of to_currency per unit of from_currency
}

impl ConversionEdge {
    pub fn new(from_currency: impl Into<String>, to_currency: impl Into<String>, rate: BigDecimal) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            rate,
        }
    }
}

/// One applied edge inside a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct ConversionHop {
    #[tabled(rename = "From")]
    pub from_currency: String,
    #[tabled(rename = "To")]
    pub to_currency: String,
    #[tabled(rename = "Rate", display_with = "display_amount")]
    pub rate: BigDecimal,
    #[tabled(rename = "Amount in", display_with = "display_amount")]
    pub amount_in: BigDecimal,
    #[tabled(rename = "Amount out", display_with = "display_amount")]
    pub amount_out: BigDecimal,
}

impl ConversionHop {
    pub fn apply(edge: &ConversionEdge, amount_in: &BigDecimal) -> Self {
        Self {
            from_currency: edge.from_currency.clone(),
            to_currency: edge.to_currency.clone(),
            rate: edge.rate.clone(),
            amount_in: amount_in.clone(),
            amount_out: amount_in * &edge.rate,
        }
    }
}

/// The best conversion found for a query, including the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRoute {
    pub from_currency: String,
    pub to_currency: String,
    pub amount_in: BigDecimal,
    pub amount_out: BigDecimal,
    pub hops: Vec<ConversionHop>,
}

impl ConversionRoute {
    /// Zero-hop route for a query whose source and target are the same currency.
    pub fn identity(amount: &BigDecimal, currency: &str) -> Self {
        Self {
            from_currency: currency.to_string(),
            to_currency: currency.to_string(),
            amount_in: amount.clone(),
            amount_out: amount.clone(),
            hops: Vec::new(),
        }
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Currencies visited in order, source first.
    pub fn path(&self) -> Vec<&str> {
        let mut path = vec![self.from_currency.as_str()];
        path.extend(self.hops.iter().map(|hop| hop.to_currency.as_str()));
        path
    }

    /// Product of the hop rates, or one for the identity route.
    pub fn effective_rate(&self) -> BigDecimal {
        self.hops
            .iter()
            .fold(BigDecimal::from(1), |acc, hop| acc * &hop.rate)
    }
}

impl fmt::Display for ConversionRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {} via {}",
            format_amount(&self.amount_in),
            self.from_currency,
            format_amount(&self.amount_out),
            self.to_currency,
            self.path().join(" -> ")
        )
    }
}

/// How the best conversion is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Depth-bounded exhaustive DFS.
    #[default]
    Recursive,
    /// Per-hop relaxation over a frontier of best amounts.
    Layered,
}

impl FromStr for SearchStrategy {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recursive" => Ok(Self::Recursive),
            "layered" => Ok(Self::Layered),
            other => Err(SwapError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Layered => write!(f, "layered"),
        }
    }
}
