use super::{read_input, write_output};
use crate::config::Config;
use crate::pipeline::{build, print_summary, registry};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_converter::{DocumentConverter, Pandoc};
use folio_filter::{Filter, MemorySink};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markup file or directory of markup files
    pub input: PathBuf,

    /// Output format (overrides config)
    #[arg(short, long)]
    pub to: Option<String>,

    /// Output file, or output directory when rendering a directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Filters to run, in order
    #[arg(short, long, value_delimiter = ',', default_value = "all")]
    pub filters: Vec<String>,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let to = args.to.clone().unwrap_or_else(|| config.to.clone());
    let input = cwd.join(&args.input);

    if input.is_dir() {
        let out_dir = args
            .output
            .as_ref()
            .map(|p| cwd.join(p))
            .ok_or_else(|| anyhow!("Rendering a directory needs --output <dir>"))?;
        return render_dir(&input, &out_dir, &to, &args.filters, &config, cwd);
    }

    if !input.exists() {
        return Err(anyhow!("Input does not exist: {}", input.display()));
    }

    let output = args.output.as_ref().map(|p| cwd.join(p));
    let sink = MemorySink::new();
    let rendered = render_file(&input, &to, &args.filters, &config, cwd, &sink)?;
    write_output(output.as_deref(), &rendered)?;
    Ok(())
}

fn render_dir(
    dir: &Path,
    out_dir: &Path,
    to: &str,
    filters: &[String],
    config: &Config,
    cwd: &Path,
) -> Result<()> {
    let files = find_documents(dir, config);

    if files.is_empty() {
        eprintln!("{}", "⚠️  No documents found".yellow());
        return Ok(());
    }

    eprintln!(
        "{}",
        format!("Rendering {} documents...", files.len()).bright_blue().bold()
    );

    let mut success_count = 0;
    let mut error_count = 0;

    for file in &files {
        let relative_path = file.strip_prefix(dir).unwrap_or(file);
        let output_file = out_dir
            .join(relative_path)
            .with_extension(output_extension(to));
        let sink = MemorySink::new();

        let result = render_file(file, to, filters, config, cwd, &sink)
            .and_then(|rendered| write_output(Some(&output_file), &rendered));

        match result {
            Ok(()) => {
                success_count += 1;
                eprintln!(
                    "  {} {} → {}",
                    "✓".green(),
                    relative_path.display(),
                    output_file.display()
                );
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    eprintln!();
    if error_count == 0 {
        eprintln!(
            "{} Rendered {} documents successfully",
            "✅".green(),
            success_count
        );
    } else {
        eprintln!(
            "{} Rendered {} documents, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

/// markup -> AST -> filters -> output format
fn render_file(
    path: &Path,
    to: &str,
    filters: &[String],
    config: &Config,
    cwd: &Path,
    sink: &MemorySink,
) -> Result<String> {
    let markup = read_input(Some(path))?;
    let converter = Pandoc::new(&config.pandoc, &config.from);
    let pipeline = build(filters, registry(config, cwd, Some(path)), sink)?;

    info!(path = %path.display(), chain = pipeline.name(), "Rendering document");
    render_with(&converter, &pipeline, &markup, to, sink)
}

fn render_with(
    converter: &dyn DocumentConverter,
    pipeline: &dyn Filter,
    markup: &str,
    to: &str,
    sink: &MemorySink,
) -> Result<String> {
    let ast = converter.parse(markup)?;
    let filtered = pipeline.apply(ast)?;
    print_summary(sink, &filtered);
    Ok(converter.render(&filtered, to)?)
}

fn find_documents(dir: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && config.matches_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn output_extension(to: &str) -> &str {
    match to {
        "latex" | "beamer" => "tex",
        "markdown" | "gfm" | "commonmark" | "commonmark_x" => "md",
        "plain" => "txt",
        "html" | "html4" | "html5" => "html",
        other => other,
    }
}
