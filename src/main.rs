use anyhow::Result;
use log::debug;
use std::io;

use best_swap::cli::CliApp;
use best_swap::log_adapter::LogAdapter;

fn main() -> Result<()> {
    // load .env before config reads BEST_SWAP__* variables
    dotenv::dotenv().ok();

    let matches = CliApp::build_cli().get_matches();

    LogAdapter::init_or_report(CliApp::is_verbose(&matches), &mut io::stderr());

    let app = CliApp::from_matches(&matches)?;
    let (currency_count, edge_count) = app.graph().get_stats();
    debug!("Graph ready: {} currencies, {} edges", currency_count, edge_count);

    app.run_stdout(&matches)
}
