//! The four hardcoded sanity checks printed on a bare run.
//!
//! Expected values are worked out by hand from the default pair list:
//!
//! | query      | best path    | amount |
//! |------------|--------------|--------|
//! | 10 A to B  | A-B          | 10     |
//! | 10 A to C  | A-B-C        | 20     |
//! | 10 B to C  | B-D-A-C      | 90     |
//! | 10 B to A  | B-D-A        | 60     |

use anyhow::Result;
use bigdecimal::BigDecimal;
use log::warn;
use std::io::Write;

use crate::core::{BestConversionFinder, ExchangeGraph};
use crate::utils::{format_amount, format_outcome};

/// A fixed query and the amount it should produce (`None` = unreachable).
#[derive(Debug, Clone)]
pub struct Scenario {
    pub amount: BigDecimal,
    pub from_currency: String,
    pub to_currency: String,
    pub expected: Option<BigDecimal>,
}

impl Scenario {
    fn new(amount: i64, from_currency: &str, to_currency: &str, expected: Option<i64>) -> Self {
        Self {
            amount: BigDecimal::from(amount),
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
            expected: expected.map(BigDecimal::from),
        }
    }
}

/// Outcome of running one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub actual: Option<BigDecimal>,
}

impl ScenarioResult {
    pub fn matches(&self) -> bool {
        self.scenario.expected == self.actual
    }

    /// `10 A to B, expected: 10, got: 10`
    pub fn report_line(&self) -> String {
        format!(
            "{} {} to {}, expected: {}, got: {}",
            format_amount(&self.scenario.amount),
            self.scenario.from_currency,
            self.scenario.to_currency,
            format_outcome(self.scenario.expected.as_ref()),
            format_outcome(self.actual.as_ref()),
        )
    }
}

pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(10, "A", "B", Some(10)),
        Scenario::new(10, "A", "C", Some(20)),
        Scenario::new(10, "B", "C", Some(90)),
        Scenario::new(10, "B", "A", Some(60)),
    ]
}

pub fn run_scenarios(
    graph: &ExchangeGraph,
    finder: &BestConversionFinder,
    scenarios: &[Scenario],
    max_hops: i32,
) -> Vec<ScenarioResult> {
    scenarios
        .iter()
        .map(|scenario| {
            let actual = finder.best_amount(
                graph,
                &scenario.amount,
                &scenario.from_currency,
                &scenario.to_currency,
                max_hops,
            );
            ScenarioResult {
                scenario: scenario.clone(),
                actual,
            }
        })
        .collect()
}

/// Writes one line per scenario and returns how many did not match. A
/// mismatch is logged, never turned into an error.
pub fn print_report<W: Write>(results: &[ScenarioResult], out: &mut W) -> Result<usize> {
    let mut mismatches = 0;
    for result in results {
        writeln!(out, "{}", result.report_line())?;
        if !result.matches() {
            mismatches += 1;
            warn!("Sanity check mismatch: {}", result.report_line());
        }
    }
    Ok(mismatches)
}
