use crate::error::{ConvertError, ConvertResult};
use folio_common::{display_command, run_with_input, CommonError};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Something that turns markup into a JSON AST and back
pub trait DocumentConverter {
    /// Parse markup into a full JSON document (`{"pandoc-api-version", "meta", "blocks"}`)
    fn parse(&self, markup: &str) -> ConvertResult<Value>;

    /// Render a JSON document into the given output format
    fn render(&self, document: &Value, to: &str) -> ConvertResult<String>;
}

/// Pandoc run as a subprocess
#[derive(Clone, Debug)]
pub struct Pandoc {
    /// Program to run
    pub program: String,

    /// Input format handed to `-f` when parsing
    pub from: String,
}

impl Pandoc {
    pub fn new(program: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            from: from.into(),
        }
    }

    fn run(&self, args: &[&str], input: &str) -> ConvertResult<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(args.iter().map(|a| a.to_string()));
        let command = display_command(&argv);

        let output = run_with_input(&argv, input).map_err(|e| match e {
            CommonError::Process { message, .. } => ConvertError::launch(&command, message),
            other => ConvertError::launch(&command, other.to_string()),
        })?;

        if !output.success {
            return Err(ConvertError::failed(command, output.status, output.stderr));
        }
        Ok(output.stdout)
    }
}

impl Default for Pandoc {
    fn default() -> Self {
        Self::new("pandoc", "markdown")
    }
}

impl DocumentConverter for Pandoc {
    #[instrument(skip(self, markup), fields(program = %self.program, from = %self.from, bytes = markup.len()))]
    fn parse(&self, markup: &str) -> ConvertResult<Value> {
        let json = self.run(&["-f", &self.from, "-t", "json"], markup)?;
        let document: Value = serde_json::from_str(&json)?;
        debug!("Parsed markup into JSON AST");
        Ok(document)
    }

    #[instrument(skip_all, fields(program = %self.program, to = %to))]
    fn render(&self, document: &Value, to: &str) -> ConvertResult<String> {
        let json = serde_json::to_string(document)?;
        self.run(&["-f", "json", "-t", to], &json)
    }
}

/// Converter returning canned documents, for tests and offline use
///
/// Markup is matched after trimming surrounding whitespace. Rendering
/// serializes the document back to JSON regardless of the target format.
#[derive(Clone, Debug, Default)]
pub struct StaticConverter {
    documents: HashMap<String, Value>,
}

impl StaticConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, markup: &str, document: Value) -> Self {
        self.documents.insert(markup.trim().to_string(), document);
        self
    }

    /// Register markup whose parse result is a document with these blocks
    pub fn with_blocks(self, markup: &str, blocks: Vec<Value>) -> Self {
        self.with_document(markup, document(blocks))
    }
}

impl DocumentConverter for StaticConverter {
    fn parse(&self, markup: &str) -> ConvertResult<Value> {
        self.documents
            .get(markup.trim())
            .cloned()
            .ok_or_else(|| ConvertError::Unsupported(markup.trim().to_string()))
    }

    fn render(&self, document: &Value, _to: &str) -> ConvertResult<String> {
        Ok(serde_json::to_string(document)?)
    }
}

/// Wrap blocks in a pandoc document envelope
pub fn document(blocks: Vec<Value>) -> Value {
    serde_json::json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": blocks,
    })
}
