//! Stanza CLI
//!
//! Command-line front end for reading and editing stanza files.

mod cli;
mod commands;
mod error;
mod settings;

use std::io;

use clap::Parser;
use colored::Colorize;
use stanza_core::ParseOptions;
use stanza_fs::LocalFs;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;
use settings::Settings;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("{} tracing already initialised", "warning:".yellow().bold());
        }
        tracing::debug!("Verbose mode enabled");
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let options = settings.parse_options(cli.comment_char);

    match cli.command {
        Some(cmd) => execute_command(cmd, options),
        None => {
            println!("{} stanza file editor", "stanza".green().bold());
            println!();
            println!("Run {} for available commands.", "stanza --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, options: ParseOptions) -> Result<()> {
    let store = LocalFs::new();
    let mut stdout = io::stdout().lock();

    match cmd {
        Commands::Show { file } => commands::run_show(&store, &file, options, &mut stdout),
        Commands::List { file } => commands::run_list(&store, &file, options, &mut stdout),
        Commands::Get { file, stanza, attr } => {
            commands::run_get(&store, &file, options, &stanza, attr.as_deref(), &mut stdout)
        }
        Commands::Set {
            file,
            stanza,
            attr,
            value,
            output,
        } => commands::run_set(
            &store,
            &file,
            options,
            &stanza,
            &attr,
            &value,
            output.as_deref(),
        ),
        Commands::Unset {
            file,
            stanza,
            attr,
            output,
        } => commands::run_unset(&store, &file, options, &stanza, &attr, output.as_deref()),
        Commands::Add {
            file,
            stanza,
            attrs,
            comment,
            output,
        } => commands::run_add(
            &store,
            &file,
            options,
            &stanza,
            &attrs,
            &comment,
            output.as_deref(),
        ),
        Commands::Remove {
            file,
            stanza,
            output,
        } => commands::run_remove(&store, &file, options, &stanza, output.as_deref()),
        Commands::Copy { file, dest } => commands::run_copy(&store, &file, &dest, options),
    }
}
