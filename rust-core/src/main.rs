use clap::Parser;
use env_logger::Env;
use log::info;

use crystalsystems::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log.as_filter())).init();

    info!("Starting crystalsystems v{}", crystalsystems::VERSION);

    run(&cli)
}
