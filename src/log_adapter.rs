use log::LevelFilter;
use std::io::Write;

/// Default filter for a bare run: only problems, so stdout/stderr stay quiet.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Logger setup. Everything goes to stderr through `env_logger`; `RUST_LOG`
/// overrides the level picked here.
pub struct LogAdapter;

impl LogAdapter {
    /// Installs the global logger; fails if one is already set.
    pub fn init(verbose: bool) -> Result<(), log::SetLoggerError> {
        env_logger::Builder::new()
            .filter_level(Self::level_for(verbose))
            .parse_default_env()
            .format_timestamp(None)
            .try_init()
    }

    /// Like [`init`](Self::init), but a failure is written to `err_out`
    /// directly, since no logger of ours would receive it. Returns whether the
    /// logger was installed.
    pub fn init_or_report<W: Write>(verbose: bool, err_out: &mut W) -> bool {
        match Self::init(verbose) {
            Ok(()) => true,
            Err(e) => {
                let _ = writeln!(err_out, "best-swap: logger already initialised: {}", e);
                false
            }
        }
    }

    pub fn level_for(verbose: bool) -> LevelFilter {
        if verbose {
            LevelFilter::Info
        } else {
            DEFAULT_LEVEL
        }
    }
}
