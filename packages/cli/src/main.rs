mod commands;
mod config;
mod pipeline;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{filter, init, list, render, FilterArgs, InitArgs, ListArgs, RenderArgs};
use folio_filter::panic_message;
use std::panic::{self, AssertUnwindSafe};
use tracing_subscriber::EnvFilter;

/// Folio - document filters for pandoc JSON ASTs
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a filter to a JSON AST
    Filter(FilterArgs),

    /// Convert markup, run filters, and render the result
    ///
    /// Top-level includes resolve relative to the input file's directory,
    /// not the working directory, unless `baseDir` is set in folio.config.json.
    Render(RenderArgs),

    /// List available filters
    List(ListArgs),

    /// Write a default folio.config.json
    Init(InitArgs),
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Send panic messages to the log instead of stderr
///
/// A panic inside a filter pass is already reported once by its failure
/// boundary, and a panic anywhere else ends up as the `Error:` line.
/// `-v` shows the full message with its location.
fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        tracing::debug!(target: "folio::panic", "{}", info);
    }));
}

fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    match command {
        Command::Filter(args) => filter(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::List(args) => list(args, &cwd),
        Command::Init(args) => init(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    install_panic_hook();

    let command = cli.command;
    let result = panic::catch_unwind(AssertUnwindSafe(move || run(command)))
        .unwrap_or_else(|payload| {
            Err(anyhow::anyhow!(
                "internal error: {}",
                panic_message(payload.as_ref())
            ))
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
