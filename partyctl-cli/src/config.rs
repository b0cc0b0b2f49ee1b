use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use partyctl_core::PartyConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show effective configuration (file values plus resolved endpoint)
    Show,
}

pub fn run_config(args: ConfigArgs, endpoint_flag: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(endpoint_flag),
    }
}

fn run_path() -> Result<()> {
    let path = PartyConfig::config_path();
    println!("{}", path.display());

    if !path.exists() {
        eprintln!("(file does not exist yet; defaults are in effect)");
    }

    Ok(())
}

fn run_show(endpoint_flag: Option<&str>) -> Result<()> {
    let config = PartyConfig::load().context("Failed to load config")?;

    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config as TOML")?;

    println!("# {}", PartyConfig::config_path().display());
    println!("# effective endpoint: {}", config.resolve_endpoint(endpoint_flag));
    print!("{}", toml_str);

    Ok(())
}
