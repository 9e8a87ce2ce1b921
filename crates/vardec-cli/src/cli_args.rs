use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vardec", version, about = "Blank-line variable liveness hints")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log analysis details to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Print hints for files or directories
    Annotate {
        /// Files or directories (default: current directory)
        paths: Vec<PathBuf>,
        /// Tab width used to compute hint indentation
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=16))]
        tab_size: Option<u32>,
        /// Show how many uses remain after each blank line
        #[arg(long)]
        counts: bool,
    },

    /// Re-annotate files as they change
    Watch {
        /// Directory to watch (default: current directory)
        path: Option<PathBuf>,
    },

    /// Show or set configuration values
    Config {
        /// Config key (e.g. tab_size)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, elvish, powershell)
        shell: String,
    },
}
