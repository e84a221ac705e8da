use anyhow::Result;
use clap::Parser;
use tabs_extra::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes all log::info!() etc. to /tmp/tabs_extra_debug.log.
    // --log-level takes precedence over RUST_LOG.
    tabs_extra::debug::init_log_bridge(cli.log_level.map(|l| l.to_level_filter()));

    log::info!("Starting tabs-extra {}", tabs_extra::VERSION);

    let result = cli::run(cli.command);
    if let Err(ref e) = result {
        log::error!("{e:#}");
    }
    result
}
