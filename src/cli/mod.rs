//! CLI module for docref
//!
//! - Argument parsing (`args`)
//! - Command handlers (`commands`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod commands;
pub mod setup;

pub use args::{Cli, Commands};
pub use commands::{handle_init_command, handle_run_command, RunOptions};
pub use setup::{configure_thread_pool, get_worker_count, init_logging};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    use clap::Parser;
    Cli::parse()
}
