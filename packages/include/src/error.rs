use std::path::PathBuf;
use thiserror::Error;

/// Why an include node could not be expanded.
///
/// These never propagate out of the filter; their `Display` text becomes the
/// payload of the error node left in the document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IncludeError {
    #[error("include block has no file reference")]
    EmptyReference,

    #[error("include cycle detected: {}", render_chain(.chain))]
    Cycle { chain: Vec<PathBuf> },

    #[error("unknown include mode '{mode}' (expected parse, code or raw)")]
    UnknownMode { mode: String },

    #[error("include file not found: {reference} (resolved to {})", .path.display())]
    NotFound { reference: String, path: PathBuf },

    #[error("could not read include file {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("could not parse include file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

fn render_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
