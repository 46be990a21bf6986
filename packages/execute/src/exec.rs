use crate::error::{ExecuteError, ExecuteResult};
use crate::runner::run_checked;
use folio_ast::{Attr, Block};
use folio_filter::{error_block, FilterResult, NodeFilter};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const EXEC_FILTER: &str = "exec";
pub const EXEC_CLASS: &str = "exec";
pub const EXEC_RESULT_CLASS: &str = "exec-result";
pub const OUTPUT_CLASS: &str = "output";

/// Language name -> argv of the program that reads source on stdin
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interpreters {
    table: BTreeMap<String, Vec<String>>,
}

impl Interpreters {
    /// No languages at all
    pub fn empty() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    pub fn get(&self, lang: &str) -> Option<&[String]> {
        self.table.get(lang).map(Vec::as_slice)
    }

    pub fn insert(&mut self, lang: impl Into<String>, argv: Vec<String>) {
        self.table.insert(lang.into(), argv);
    }

    /// Entries from `other` win; empty argvs are ignored
    pub fn merge(&mut self, other: impl IntoIterator<Item = (String, Vec<String>)>) {
        for (lang, argv) in other {
            if !argv.is_empty() {
                self.table.insert(lang, argv);
            }
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }
}

impl Default for Interpreters {
    fn default() -> Self {
        let mut interpreters = Self::empty();
        for (lang, program) in [
            ("sh", "sh"),
            ("bash", "bash"),
            ("python", "python3"),
            ("ruby", "ruby"),
            ("node", "node"),
        ] {
            interpreters.insert(lang, vec![program.to_string()]);
        }
        interpreters
    }
}

/// Runs `exec` code blocks and shows their output
///
/// The language is the first class other than `exec`. With `echo=false`
/// only the output is kept.
#[derive(Clone, Debug, Default)]
pub struct CodeExecFilter {
    interpreters: Interpreters,
}

impl CodeExecFilter {
    pub fn new(interpreters: Interpreters) -> Self {
        Self { interpreters }
    }

    pub fn interpreters(&self) -> &Interpreters {
        &self.interpreters
    }

    fn execute(&self, attr: &Attr, source: &str) -> ExecuteResult<Value> {
        let lang = attr
            .classes()
            .iter()
            .find(|class| *class != EXEC_CLASS)
            .ok_or(ExecuteError::NoLanguage)?;
        let argv = self
            .interpreters
            .get(lang)
            .ok_or_else(|| ExecuteError::UnknownLanguage { lang: lang.clone() })?;

        debug!(lang = %lang, "Executing block");
        let stdout = run_checked(argv, source)?;

        let mut children = Vec::with_capacity(2);
        if attr.get("echo") != Some("false") {
            children.push(
                Block::code_block(Attr::empty().with_class(lang.as_str()), source).into_value(),
            );
        }
        children.push(Block::code_block(Attr::empty().with_class(OUTPUT_CLASS), stdout).into_value());

        let result_attr = Attr::new(attr.identifier(), vec![EXEC_RESULT_CLASS.to_string()], Vec::new());
        Ok(Block::div(result_attr, children).into_value())
    }
}

impl NodeFilter for CodeExecFilter {
    fn name(&self) -> &'static str {
        EXEC_FILTER
    }

    fn description(&self) -> &'static str {
        "Run `exec` code blocks and insert their output"
    }

    fn matches(&self, block: &Block) -> bool {
        block.is_code_block_with_class(EXEC_CLASS)
    }

    fn transform(&self, block: Block) -> FilterResult<Option<Value>> {
        let (attr, source) = match block {
            Block::CodeBlock(attr, source) => (attr, source),
            other => return Ok(Some(other.into_value())),
        };

        match self.execute(&attr, &source) {
            Ok(result) => Ok(Some(result)),
            Err(err) => {
                warn!(error = %err, "Exec block failed");
                Ok(Some(error_block(EXEC_FILTER, err.to_string())))
            }
        }
    }
}
