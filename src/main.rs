mod catalogue;
mod cli;
mod commands;
mod config;
mod error;
mod executor;
mod system;
mod utils;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::Cli;
use std::process;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    // Setup logging; RUST_LOG still overrides the level
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if cli.show_profile {
        return commands::profile::run();
    }

    if !cli.has_selection() {
        Cli::command().print_help()?;
        return Ok(());
    }

    utils::interrupt::install_handler();

    commands::install::run(&cli)
}
