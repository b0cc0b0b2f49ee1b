//! partyctl - view and edit a creature party stored behind a REST API
//!
//! - `partyctl tui`: interactive party view (rename, pick up to four moves, release)
//! - `partyctl list|rename|moves|delete`: one-shot commands for scripts
//! - `partyctl config`: inspect ~/.partyctl/config.toml

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use partyctl_core::PartyConfig;

mod commands;
mod config;
mod tracing_setup;
mod tui;

use commands::party::{DeleteArgs, ListArgs, MovesArgs, RenameArgs};
use commands::Session;

#[derive(Parser, Debug)]
#[command(
    name = "partyctl",
    author,
    version,
    about = "View and edit your party: rename members, pick their moves, release them",
    long_about = "Terminal client for a party REST store (GET /party, PATCH /party/{id}, \
                  DELETE /party/{id}). Changes are applied locally only after the store \
                  accepts them."
)]
struct Cli {
    /// Party store base URL (default: https://pokemon-data.adaptable.app)
    #[arg(long, env = "PARTYCTL_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Don't play the notification sound after changes
    #[arg(long, global = true)]
    no_sound: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive party view
    Tui,
    /// List party members
    List(ListArgs),
    /// Rename a party member
    Rename(RenameArgs),
    /// Replace a member's selected moves
    Moves(MovesArgs),
    /// Release (delete) a party member
    Delete(DeleteArgs),
    /// Inspect configuration (path, show)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = matches!(cli.command, Commands::Tui)
        .then(|| PartyConfig::config_dir().join("partyctl.log"));
    if let Err(e) = tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        log_file,
    }) {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let endpoint = cli.endpoint.as_deref();
    let session = || -> Result<Session> {
        let config = PartyConfig::load().context("Failed to load ~/.partyctl/config.toml")?;
        Ok(Session::new(config, endpoint, cli.no_sound))
    };

    match cli.command {
        Commands::Tui => tui::run(session()?.view()?).await?,
        Commands::List(args) => commands::party::run_list(&session()?, args).await?,
        Commands::Rename(args) => commands::party::run_rename(&session()?, args).await?,
        Commands::Moves(args) => commands::party::run_moves(&session()?, args).await?,
        Commands::Delete(args) => commands::party::run_delete(&session()?, args).await?,
        Commands::Config(args) => config::run_config(args, endpoint)?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
