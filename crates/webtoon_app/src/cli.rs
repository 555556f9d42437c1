use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::logging::LogDestination;

/// Track a webtoon's episode listing and mirror it locally.
#[derive(Debug, Parser)]
#[command(name = "webtoon_app", version, about)]
pub struct Cli {
    /// Numeric series id from the listing site (the titleId parameter).
    #[arg(long)]
    pub series: u32,

    /// Directory holding per-series state snapshots.
    #[arg(long, default_value = "./db")]
    pub data_dir: PathBuf,

    /// Directory receiving the index page, thumbnails, and exports.
    #[arg(long, default_value = "./webtoon")]
    pub out_dir: PathBuf,

    /// Listing site base url.
    #[arg(long, default_value = webtoon_engine::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "terminal")]
    pub log: LogTarget,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch new episodes, save state, then write thumbnails and the index.
    Sync {
        /// Update and save state only, skipping thumbnails and the index.
        #[arg(long)]
        no_assets: bool,
    },
    /// Replace local state with the full remote listing.
    Bootstrap,
    /// Report the local episode count against the remote total.
    Status,
    /// Rebuild the HTML index from saved state, without fetching.
    Render,
    /// Write the text listing and JSON manifest from saved state.
    Export,
}
