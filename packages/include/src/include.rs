use crate::context::{InclusionContext, DEFAULT_MAX_DEPTH};
use crate::error::IncludeError;
use crate::resolver::{IncludeMode, IncludeRequest, INCLUDE_CLASS};
use folio_ast::{take_blocks, walk, walk_array, Attr, Block};
use folio_common::path::resolve;
use folio_common::{CommonError, FileSystem, RealFileSystem};
use folio_converter::DocumentConverter;
use folio_filter::{error_block, Filter, FilterResult};
use serde_json::Value;
use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

pub const INCLUDE_FILTER: &str = "include";

/// Replaces `include` code blocks with the contents of the file they name
///
/// Failures never escape: a missing file, a cycle or a bad mode leaves an
/// error node where the include was. Once the depth bound is reached,
/// remaining include nodes are left as they are.
pub struct IncludeFilter {
    converter: Box<dyn DocumentConverter>,
    fs: Box<dyn FileSystem>,
    base_dir: Option<PathBuf>,
    source: Option<PathBuf>,
    max_depth: usize,
}

impl IncludeFilter {
    pub fn new(converter: impl DocumentConverter + 'static) -> Self {
        Self {
            converter: Box::new(converter),
            fs: Box::new(RealFileSystem),
            base_dir: None,
            source: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_fs(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Directory top-level references resolve against (default: cwd)
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// File the document was read from. Its directory becomes the default
    /// base, and including it from itself is reported as a cycle.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Context for a fresh top-level pass
    pub fn root_context(&self) -> FilterResult<InclusionContext> {
        let cwd = self.fs.current_dir().map_err(CommonError::from)?;

        let ctx = match &self.source {
            Some(source) => InclusionContext::for_source(&resolve(&cwd, source), self.max_depth),
            None => InclusionContext::root(cwd.clone(), self.max_depth),
        };

        Ok(match &self.base_dir {
            Some(dir) => ctx.rebased(resolve(&cwd, dir)),
            None => ctx,
        })
    }

    /// Expand every include in `ast` under `ctx`
    pub fn expand(&self, ast: Value, ctx: &InclusionContext) -> Value {
        let out: Result<Value, Infallible> = walk(ast, &mut |node| Ok(Some(self.visit(node, ctx))));
        match out {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    fn expand_blocks(&self, blocks: Vec<Value>, ctx: &InclusionContext) -> Vec<Value> {
        let out: Result<Vec<Value>, Infallible> =
            walk_array(blocks, &mut |node| Ok(Some(self.visit(node, ctx))));
        match out {
            Ok(blocks) => blocks,
            Err(never) => match never {},
        }
    }

    fn visit(&self, node: Value, ctx: &InclusionContext) -> Value {
        let (attr, text) = match Block::from_value(&node) {
            Some(Block::CodeBlock(attr, text)) if attr.has_class(INCLUDE_CLASS) => (attr, text),
            _ => return node,
        };

        match self.include(&attr, &text, ctx) {
            Ok(Some(replacement)) => replacement,
            Ok(None) => node,
            Err(err) => {
                warn!(reference = text.trim(), error = %err, "Include failed");
                error_block(INCLUDE_FILTER, err.to_string())
            }
        }
    }

    /// `Ok(None)` leaves the node untouched
    fn include(
        &self,
        attr: &Attr,
        text: &str,
        ctx: &InclusionContext,
    ) -> Result<Option<Value>, IncludeError> {
        let request = IncludeRequest::from_node(attr, text);
        let path = request.has_reference().then(|| request.resolve(ctx));

        if let Some(path) = &path {
            if ctx.contains(path) {
                return Err(IncludeError::Cycle {
                    chain: ctx.cycle_chain(path),
                });
            }
        }

        if ctx.exhausted() {
            warn!(
                reference = %request.reference,
                max_depth = ctx.max_depth(),
                "Include depth limit reached, leaving node unexpanded"
            );
            return Ok(None);
        }

        let path = path.ok_or(IncludeError::EmptyReference)?;
        let mode = request.mode()?;

        let content = self.read(&request, &path)?;
        debug!(
            path = %path.display(),
            mode = mode.as_str(),
            depth = ctx.depth(),
            "Including file"
        );

        let replacement = match mode {
            IncludeMode::Parse => self.splice(&request, &path, &content, ctx)?,
            IncludeMode::Code => {
                let attr = Attr::new(
                    request.identifier.clone(),
                    request.lang.iter().cloned().collect(),
                    Vec::new(),
                );
                Block::code_block(attr, content).into_value()
            }
            IncludeMode::Raw => Block::raw_block(request.format.clone(), content).into_value(),
        };
        Ok(Some(replacement))
    }

    fn read(&self, request: &IncludeRequest, path: &Path) -> Result<String, IncludeError> {
        self.fs.read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => IncludeError::NotFound {
                reference: request.reference.clone(),
                path: path.to_path_buf(),
            },
            _ => IncludeError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        })
    }

    /// Parse mode: the file's blocks, expanded one level deeper, grouped in
    /// a div that records where they came from
    fn splice(
        &self,
        request: &IncludeRequest,
        path: &Path,
        content: &str,
        ctx: &InclusionContext,
    ) -> Result<Value, IncludeError> {
        let document = self
            .converter
            .parse(content)
            .map_err(|err| IncludeError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        let blocks = self.expand_blocks(take_blocks(document), &ctx.descend(path));
        let attr = Attr::new(request.identifier.clone(), vec!["included".to_string()], Vec::new())
            .with_key_value("source", path.display().to_string());

        Ok(Block::div(attr, blocks).into_value())
    }
}

impl Filter for IncludeFilter {
    fn name(&self) -> &str {
        INCLUDE_FILTER
    }

    fn description(&self) -> &str {
        "Splice the contents of other files into the document"
    }

    #[instrument(skip_all, fields(filter = INCLUDE_FILTER))]
    fn apply(&self, ast: Value) -> FilterResult<Value> {
        let ctx = self.root_context()?;
        Ok(self.expand(ast, &ctx))
    }
}
