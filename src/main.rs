use anyhow::Result;
use clap::Parser;
use par_shape::cli::{Cli, LogLevelArg};
use par_shape::{app, debug};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize unified logging; routes all log::info!() etc. to /tmp/par_shape_debug.log.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config (applied later).
    debug::init_log_bridge(cli.log_level.map(LogLevelArg::to_level_filter));

    log::info!("Starting par-shape {}", par_shape::VERSION);

    let result = app::run(cli);
    if let Err(ref e) = result {
        log::error!("{e:#}");
        eprintln!("par-shape: error: {e:#}");
        std::process::exit(1);
    }
    result
}
