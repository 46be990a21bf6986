use crate::config::Config;
use crate::pipeline::{registry, ALL, FILTER_NAMES};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print names only, one per line
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn list(args: ListArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = registry(&config, cwd, None);

    if args.quiet {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    println!("{}", "Available filters:".bright_blue().bold());
    for filter in registry.filters() {
        println!(
            "  {:<10} {}",
            filter.name().green(),
            filter.description()
        );
    }
    println!(
        "  {:<10} {}",
        ALL.green(),
        format!("Run {} in that order", FILTER_NAMES.join(", "))
    );

    Ok(())
}
