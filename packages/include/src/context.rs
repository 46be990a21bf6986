use std::path::{Path, PathBuf};

/// Default bound on nested includes
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// State threaded through one inclusion pass
///
/// Built fresh for every top-level `apply` and never mutated afterwards:
/// [`InclusionContext::descend`] returns a new context for the nested pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionContext {
    base_path: PathBuf,
    stack: Vec<PathBuf>,
    depth: usize,
    max_depth: usize,
}

impl InclusionContext {
    /// Context for a document with no file of its own (e.g. JSON on stdin)
    pub fn root(base_path: impl Into<PathBuf>, max_depth: usize) -> Self {
        Self {
            base_path: base_path.into(),
            stack: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Context for a document read from `source`: includes resolve next to
    /// it, and including it again is a cycle.
    pub fn for_source(source: &Path, max_depth: usize) -> Self {
        Self {
            base_path: parent_dir(source),
            stack: vec![source.to_path_buf()],
            depth: 0,
            max_depth,
        }
    }

    /// Same stack and depth, different resolution base
    pub fn rebased(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Absolute paths currently being included, outermost first
    pub fn stack(&self) -> &[PathBuf] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.stack.iter().any(|p| p == path)
    }

    /// No further includes may be expanded in this pass
    pub fn exhausted(&self) -> bool {
        self.depth >= self.max_depth
    }

    /// The stack followed by `repeated`
    pub fn cycle_chain(&self, repeated: &Path) -> Vec<PathBuf> {
        let mut chain = self.stack.clone();
        chain.push(repeated.to_path_buf());
        chain
    }

    /// Context for expanding the contents of `included`
    pub fn descend(&self, included: &Path) -> Self {
        let mut stack = Vec::with_capacity(self.stack.len() + 1);
        stack.extend(self.stack.iter().cloned());
        stack.push(included.to_path_buf());

        Self {
            base_path: parent_dir(included),
            stack,
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"))
}
