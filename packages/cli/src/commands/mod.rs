pub mod filter;
pub mod init;
pub mod list;
pub mod render;

pub use filter::{filter, FilterArgs};
pub use init::{init, InitArgs};
pub use list::{list, ListArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

/// Read a file, or stdin when no path is given
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Cannot read stdin")?;
            Ok(input)
        }
    }
}

/// Write to a file (creating parent directories), or stdout when no path is given
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)
                .with_context(|| format!("Cannot write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
