use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli_args::Cli;

/// Run `vardec completion <shell>` -- generate shell completion scripts for the given shell.
pub fn run(shell: &str) -> i32 {
    let Some(shell) = parse_shell(shell) else {
        eprintln!("error: unsupported shell '{shell}'");
        eprintln!("supported: bash, zsh, fish, elvish, powershell");
        return 2;
    };

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "vardec", &mut std::io::stdout());
    0
}

fn parse_shell(shell: &str) -> Option<Shell> {
    match shell.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "elvish" => Some(Shell::Elvish),
        "powershell" | "ps" => Some(Shell::PowerShell),
        _ => None,
    }
}
