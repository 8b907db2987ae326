//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::feed::FeedArgs;
use crate::commands::probe::ProbeArgs;

/// 311 report dashboards for a fixed location.
#[derive(Parser, Debug)]
#[command(name = "radius-watch")]
#[command(author, version = env!("RADIUS_WATCH_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the image feed of nearby reports
    Feed(FeedArgs),

    /// Probe the first portal link among nearby reports
    Probe(ProbeArgs),
}
