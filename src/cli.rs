use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::core::{BestConversionFinder, ExchangeGraph, SearchStrategy};
use crate::sanity::{default_scenarios, print_report, run_scenarios};
use crate::table_display::{render_pairs, render_route};
use crate::utils::str_to_bigdecimal;

const CONFIG_ARG: &str = "config";
const VERBOSE_ARG: &str = "verbose";
const FROM_ARG: &str = "from";
const TO_ARG: &str = "to";
const AMOUNT_ARG: &str = "amount";
const MAX_HOPS_ARG: &str = "max-hops";
const STRATEGY_ARG: &str = "strategy";
const JSON_ARG: &str = "json";
const PAIRS_ARG: &str = "pairs";

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// The four sanity-check lines.
    Report,
    /// List the loaded conversion pairs.
    Pairs,
    /// One best-conversion query.
    Quote {
        from_currency: String,
        to_currency: String,
        amount: String,
        json: bool,
    },
}

/// Loaded configuration plus the rate graph built from it.
pub struct CliApp {
    config: Config,
    graph: ExchangeGraph,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let edges = config
            .conversion_edges()
            .context("invalid conversion pairs in configuration")?;
        let graph = ExchangeGraph::from_edges(&edges);
        Ok(Self { config, graph })
    }

    /// Loads configuration (optionally from `--config`) and builds the graph.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let config = match matches.get_one::<PathBuf>(CONFIG_ARG) {
            Some(path) => Config::load_from(Some(path.as_path()))
                .with_context(|| format!("loading {}", path.display()))?,
            None => Config::load()?,
        };
        info!("Configuration loaded: {} pairs", config.pairs.len());
        Self::new(config)
    }

    pub fn graph(&self) -> &ExchangeGraph {
        &self.graph
    }

    pub fn build_cli() -> Command {
        Command::new("best-swap")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Best multi-hop currency conversion within a hop budget")
            .arg(
                Arg::new(CONFIG_ARG)
                    .long(CONFIG_ARG)
                    .short('c')
                    .help("TOML file with [search] settings and [[pairs]]")
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new(VERBOSE_ARG)
                    .long(VERBOSE_ARG)
                    .short('v')
                    .help("Log search progress to stderr")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new(FROM_ARG)
                    .long(FROM_ARG)
                    .help("Currency to convert from")
                    .value_name("CURRENCY")
                    .requires(TO_ARG)
                    .conflicts_with(PAIRS_ARG),
            )
            .arg(
                Arg::new(TO_ARG)
                    .long(TO_ARG)
                    .help("Currency to convert to")
                    .value_name("CURRENCY")
                    .requires(FROM_ARG),
            )
            .arg(
                Arg::new(AMOUNT_ARG)
                    .long(AMOUNT_ARG)
                    .short('a')
                    .help("Amount to convert (default: 1)")
                    .value_name("AMOUNT")
                    .requires(FROM_ARG),
            )
            .arg(
                Arg::new(MAX_HOPS_ARG)
                    .long(MAX_HOPS_ARG)
                    .help("Maximum number of conversions (default: from config)")
                    .value_name("HOPS")
                    .allow_negative_numbers(true)
                    .value_parser(clap::value_parser!(i32)),
            )
            .arg(
                Arg::new(STRATEGY_ARG)
                    .long(STRATEGY_ARG)
                    .help("Search strategy: recursive or layered")
                    .value_name("STRATEGY")
                    .value_parser(["recursive", "layered"]),
            )
            .arg(
                Arg::new(JSON_ARG)
                    .long(JSON_ARG)
                    .help("Print the route as JSON")
                    .action(ArgAction::SetTrue)
                    .requires(FROM_ARG),
            )
            .arg(
                Arg::new(PAIRS_ARG)
                    .long(PAIRS_ARG)
                    .help("List the loaded conversion pairs")
                    .action(ArgAction::SetTrue),
            )
    }

    pub fn mode(matches: &ArgMatches) -> Mode {
        if matches.get_flag(PAIRS_ARG) {
            return Mode::Pairs;
        }

        match (matches.get_one::<String>(FROM_ARG), matches.get_one::<String>(TO_ARG)) {
            (Some(from), Some(to)) => Mode::Quote {
                from_currency: from.clone(),
                to_currency: to.clone(),
                amount: matches
                    .get_one::<String>(AMOUNT_ARG)
                    .cloned()
                    .unwrap_or_else(|| "1".to_string()),
                json: matches.get_flag(JSON_ARG),
            },
            _ => Mode::Report,
        }
    }

    fn max_hops(&self, matches: &ArgMatches) -> i32 {
        matches
            .get_one::<i32>(MAX_HOPS_ARG)
            .copied()
            .unwrap_or(self.config.search.default_max_hops)
    }

    fn finder(&self, matches: &ArgMatches) -> Result<BestConversionFinder> {
        let strategy = match matches.get_one::<String>(STRATEGY_ARG) {
            Some(name) => name.parse::<SearchStrategy>()?,
            None => self.config.search.strategy,
        };
        Ok(BestConversionFinder::new(strategy))
    }

    /// Runs the mode selected by `matches`, writing results to `out`.
    pub fn run<W: Write>(&self, matches: &ArgMatches, out: &mut W) -> Result<()> {
        let finder = self.finder(matches)?;
        let max_hops = self.max_hops(matches);

        match Self::mode(matches) {
            Mode::Report => {
                let results = run_scenarios(&self.graph, &finder, &default_scenarios(), max_hops);
                let mismatches = print_report(&results, out)?;
                info!("Sanity checks done, {} mismatches", mismatches);
            }
            Mode::Pairs => {
                writeln!(out, "{}", render_pairs(&self.graph))?;
            }
            Mode::Quote {
                from_currency,
                to_currency,
                amount,
                json,
            } => {
                let amount = str_to_bigdecimal(&amount).context("invalid --amount")?;
                match finder.find_route(&self.graph, &amount, &from_currency, &to_currency, max_hops) {
                    Some(route) if json => writeln!(out, "{}", serde_json::to_string_pretty(&route)?)?,
                    Some(route) => writeln!(out, "{}", render_route(&route))?,
                    None => writeln!(
                        out,
                        "no route from {} to {} within {} hops",
                        from_currency, to_currency, max_hops
                    )?,
                }
            }
        }

        Ok(())
    }

    pub fn run_stdout(&self, matches: &ArgMatches) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run(matches, &mut handle)
    }

    pub fn is_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag(VERBOSE_ARG)
    }
}
