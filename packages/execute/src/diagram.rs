use crate::error::ExecuteResult;
use crate::runner::run_checked;
use folio_ast::{Attr, Block};
use folio_filter::{error_block, FilterResult, NodeFilter};
use serde_json::Value;
use tracing::{debug, warn};

pub const DIAGRAM_FILTER: &str = "diagram";
pub const DIAGRAM_CLASSES: &[&str] = &["diagram", "dot"];
pub const DEFAULT_ENGINE: &str = "dot";

/// Renders graph descriptions to inline SVG
///
/// The engine is read from the block's `engine` attribute, falling back to
/// the filter's default, and invoked as `<engine> -Tsvg`.
#[derive(Clone, Debug)]
pub struct DiagramFilter {
    engine: String,
    format_args: Vec<String>,
}

impl DiagramFilter {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            format_args: vec!["-Tsvg".to_string()],
        }
    }

    /// Replace the arguments passed after the engine name
    pub fn with_format_args(mut self, args: Vec<String>) -> Self {
        self.format_args = args;
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    fn command(&self, attr: &Attr) -> Vec<String> {
        let engine = attr.get("engine").unwrap_or(self.engine.as_str());
        let mut argv = Vec::with_capacity(self.format_args.len() + 1);
        argv.push(engine.to_string());
        argv.extend(self.format_args.iter().cloned());
        argv
    }

    fn render(&self, attr: &Attr, source: &str) -> ExecuteResult<Value> {
        let argv = self.command(attr);
        debug!(engine = %argv[0], "Rendering diagram");
        let svg = run_checked(&argv, source)?;
        Ok(Block::raw_block("html", svg_fragment(&svg)).into_value())
    }
}

impl Default for DiagramFilter {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

/// Drop any XML prolog or doctype ahead of the `<svg` element so the
/// output can sit inside HTML
fn svg_fragment(output: &str) -> &str {
    match output.find("<svg") {
        Some(start) => &output[start..],
        None => output,
    }
}

impl NodeFilter for DiagramFilter {
    fn name(&self) -> &'static str {
        DIAGRAM_FILTER
    }

    fn description(&self) -> &'static str {
        "Render `diagram`/`dot` code blocks to SVG"
    }

    fn matches(&self, block: &Block) -> bool {
        DIAGRAM_CLASSES
            .iter()
            .any(|class| block.is_code_block_with_class(class))
    }

    fn transform(&self, block: Block) -> FilterResult<Option<Value>> {
        let (attr, source) = match block {
            Block::CodeBlock(attr, source) => (attr, source),
            other => return Ok(Some(other.into_value())),
        };

        match self.render(&attr, &source) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) => {
                warn!(error = %err, "Diagram block failed");
                Ok(Some(error_block(DIAGRAM_FILTER, err.to_string())))
            }
        }
    }
}
