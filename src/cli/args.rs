use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docref")]
#[command(
    about = "Insert include references for undocumented public declarations",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve documentation and insert references for every configured project
    Run {
        /// Configuration file (defaults to the nearest .docref.toml)
        #[arg(short, long, env = "DOCREF_CONFIG")]
        config: Option<PathBuf>,

        /// Compute edits without modifying source files
        #[arg(long)]
        dry_run: bool,

        /// Analyze declarations on a single thread
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = one per CPU)
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Print the run reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter .docref.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
