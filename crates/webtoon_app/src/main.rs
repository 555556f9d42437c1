mod cli;
mod commands;
mod logging;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::initialize(cli.log.into());
    commands::run(cli)
}
