use anyhow::Result;
use docref::cli::{
    handle_init_command, handle_run_command, init_logging, parse_args, Commands, RunOptions,
};

fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            dry_run,
            no_parallel,
            jobs,
            json,
        } => handle_run_command(RunOptions {
            config,
            dry_run,
            no_parallel,
            jobs,
            json,
        }),
        Commands::Init { force } => handle_init_command(force),
    }
}
