use super::{read_input, write_output};
use crate::config::Config;
use crate::pipeline::{build, print_summary, registry};
use anyhow::{Context, Result};
use clap::Args;
use folio_filter::{Filter, MemorySink};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Filter to apply (include, exec, diagram, all)
    pub name: String,

    /// JSON AST to read (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where to write the filtered JSON AST (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn filter(args: FilterArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let sink = MemorySink::new();
    let pipeline = build(
        std::slice::from_ref(&args.name),
        registry(&config, cwd, None),
        &sink,
    )?;

    let input_path = args.input.map(|p| cwd.join(p));
    let input = read_input(input_path.as_deref())?;
    let ast: Value = serde_json::from_str(&input).context("Input is not a JSON document")?;

    info!(chain = pipeline.name(), "Filtering document");
    let out = pipeline.apply(ast)?;

    let json = serde_json::to_string(&out)?;
    let output_path = args.output.map(|p| cwd.join(p));
    write_output(output_path.as_deref(), &json)?;

    print_summary(&sink, &out);
    Ok(())
}
