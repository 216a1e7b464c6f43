use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "landgraph")]
#[command(about = "Collaboration graph, network indices and activity tables for a landscape of git repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Read contributions from a snapshot JSON file instead of scanning")]
    pub snapshot: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the landscape's git repositories")]
    pub landscape: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to a JSON configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Date treated as today (YYYY-MM-DD)")]
    pub today: Option<String>,

    #[arg(long, global = true, help = "Only scan commits from this commit or date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub since: Option<String>,

    #[arg(long, global = true, help = "Only scan commits up to this commit or date (RFC3339, YYYY-MM-DD, or natural language)")]
    pub until: Option<String>,

    #[arg(long, global = true, help = "Include merge commits when scanning")]
    pub include_merges: bool,

    #[arg(long, global = true, help = "Minimum commits for a contributor to be counted")]
    pub threshold_commits: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the landscape and write a contribution snapshot
    Scan {
        #[arg(long, short, help = "Write the snapshot to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Collaboration graph and C/P indices per window
    People {
        #[arg(long = "window", help = "Window in days; repeat for several (default 30, 90, 180)")]
        windows: Vec<i64>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Committers, commits and files per file extension
    Extensions {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Contributor, recent contributor and rookie counts per project
    Projects {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commit totals per contributor across the landscape
    Contributors {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Every table and graph as a single JSON document
    Report,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Scan { output } => crate::scan::exec(self.common, output),
            Commands::People { windows, json, ndjson } => {
                crate::people::exec(self.common, windows, json, ndjson)
            }
            Commands::Extensions { json, ndjson } => {
                crate::extensions::exec(self.common, json, ndjson)
            }
            Commands::Projects { json, ndjson } => crate::projects::exec(self.common, json, ndjson),
            Commands::Contributors { json, ndjson } => {
                crate::contributors::exec(self.common, json, ndjson)
            }
            Commands::Report => crate::report::exec(self.common),
        }
    }
}
