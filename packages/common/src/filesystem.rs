use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// File system abstraction for include resolution and testing
pub trait FileSystem {
    /// Read a whole file as UTF-8
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Directory relative references resolve against when nothing else is given
    fn current_dir(&self) -> io::Result<PathBuf>;
}

/// Real file system implementation
#[derive(Clone, Copy, Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// In-memory file system for testing
#[derive(Clone, Debug)]
pub struct MockFileSystem {
    pub files: HashMap<PathBuf, String>,
    pub cwd: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            cwd: PathBuf::from("/"),
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}
