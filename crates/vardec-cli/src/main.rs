//! vardec CLI — hints on blank lines naming the variables still live across them.
//!
//! See `vardec --help` for usage.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn vardec_output::OutputFormatter> = if cli.json {
        Box::new(vardec_output::json::JsonFormatter)
    } else {
        Box::new(vardec_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Annotate {
            paths,
            tab_size,
            counts,
        } => commands::annotate::run(&*formatter, paths, tab_size, counts),
        Commands::Watch { path } => commands::watch::run(path),
        Commands::Config { key, value } => commands::config::run(key, value),
        Commands::Completion { shell } => commands::completion::run(&shell),
    };

    std::process::exit(exit_code);
}

/// Log to stderr. `VARDEC_LOG` takes an `EnvFilter` directive and overrides
/// the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("VARDEC_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
