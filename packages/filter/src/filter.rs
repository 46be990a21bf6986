use crate::error::FilterResult;
use folio_ast::{walk, Attr, Block};
use serde_json::Value;
use tracing::{debug, instrument};

/// A whole-document transformation: `AST -> AST`
pub trait Filter {
    /// Unique identifier for this filter
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str {
        ""
    }

    /// Transform the document
    fn apply(&self, ast: Value) -> FilterResult<Value>;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn apply(&self, ast: Value) -> FilterResult<Value> {
        (**self).apply(ast)
    }
}

/// A per-node rewrite: predicate plus transform
///
/// Run over a document with [`node_filter`]. Nodes are decoded into
/// [`Block`]s only at the boundary; anything the predicate rejects is left
/// byte-identical.
pub trait NodeFilter {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// Is this node mine to transform
    fn matches(&self, block: &Block) -> bool;

    /// Rewrite a matched node. `Ok(None)` removes it from the document.
    fn transform(&self, block: Block) -> FilterResult<Option<Value>>;
}

/// Drives a [`NodeFilter`] over a whole document
#[derive(Debug, Clone)]
pub struct NodeFilterRunner<R> {
    rule: R,
}

/// `filter(ast) = walk(n -> matches(n) ? transform(n) : n, ast)`
pub fn node_filter<R: NodeFilter>(rule: R) -> NodeFilterRunner<R> {
    NodeFilterRunner { rule }
}

impl<R: NodeFilter> NodeFilterRunner<R> {
    pub fn rule(&self) -> &R {
        &self.rule
    }
}

impl<R: NodeFilter> Filter for NodeFilterRunner<R> {
    fn name(&self) -> &str {
        self.rule.name()
    }

    fn description(&self) -> &str {
        self.rule.description()
    }

    #[instrument(skip_all, fields(filter = self.rule.name()))]
    fn apply(&self, ast: Value) -> FilterResult<Value> {
        let mut matched = 0usize;
        let out = walk(ast, &mut |node| match Block::from_value(&node) {
            Some(block) if self.rule.matches(&block) => {
                matched += 1;
                self.rule.transform(block)
            }
            _ => Ok(Some(node)),
        })?;
        debug!(matched, "Filter pass complete");
        Ok(out)
    }
}

/// Filter backed by a closure
pub struct FnFilter<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a named filter
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnFilter<F>
where
    F: Fn(Value) -> FilterResult<Value>,
{
    FnFilter {
        name: name.into(),
        f,
    }
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(Value) -> FilterResult<Value>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, ast: Value) -> FilterResult<Value> {
        (self.f)(ast)
    }
}

/// Visible error node left in the document in place of a failed node
///
/// A code block with class `error`, the reporting filter under the `filter`
/// key, and the message as its text.
pub fn error_block(filter: &str, message: impl Into<String>) -> Value {
    Block::code_block(
        Attr::empty()
            .with_class("error")
            .with_key_value("filter", filter),
        message,
    )
    .into_value()
}

/// True if the value is an error node produced by [`error_block`]
pub fn is_error_block(value: &Value) -> bool {
    Block::from_value(value).is_some_and(|block| block.is_code_block_with_class("error"))
}
