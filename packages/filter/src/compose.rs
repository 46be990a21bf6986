use crate::error::FilterResult;
use crate::filter::Filter;
use serde_json::Value;
use tracing::{debug, instrument};

/// Filters applied left to right, each to the output of the previous one
///
/// There is no rollback: an error from a member aborts the chain and is
/// returned as-is. Wrap members in [`crate::safe`] to contain failures per
/// stage instead.
#[derive(Default)]
pub struct Compose {
    name: String,
    filters: Vec<Box<dyn Filter>>,
}

/// `compose([f1, f2, ..., fn])(ast) == fn(...f2(f1(ast))...)`
pub fn compose(filters: Vec<Box<dyn Filter>>) -> Compose {
    filters
        .into_iter()
        .fold(Compose::new(), |chain, filter| chain.then_boxed(filter))
}

impl Compose {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter to the end of the chain
    pub fn then<F: Filter + 'static>(self, filter: F) -> Self {
        self.then_boxed(Box::new(filter))
    }

    pub fn then_boxed(mut self, filter: Box<dyn Filter>) -> Self {
        if !self.name.is_empty() {
            self.name.push('+');
        }
        self.name.push_str(filter.name());
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for Compose {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(chain = %self.name))]
    fn apply(&self, ast: Value) -> FilterResult<Value> {
        let mut current = ast;
        for filter in &self.filters {
            debug!(filter = filter.name(), "Applying filter");
            current = filter.apply(current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::MemorySink;
    use crate::error::FilterError;
    use crate::filter::from_fn;
    use crate::safe::safe_with;
    use serde_json::json;

    fn push(tag: &'static str) -> impl Filter {
        from_fn(tag, move |mut ast: Value| {
            if let Some(blocks) = ast["blocks"].as_array_mut() {
                blocks.push(json!({"t": "Para", "c": [{"t": "Str", "c": tag}]}));
            }
            Ok(ast)
        })
    }

    fn words(ast: &Value) -> Vec<String> {
        ast["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["c"][0]["c"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_left_to_right() {
        let chain = Compose::new().then(push("first")).then(push("second"));
        assert_eq!(chain.name(), "first+second");

        let out = chain.apply(json!({"blocks": []})).unwrap();
        assert_eq!(words(&out), vec!["first", "second"]);
    }

    #[test]
    fn test_compose_equals_sequential_application() {
        let ast = json!({"blocks": []});
        let composed = compose(vec![Box::new(push("a")), Box::new(push("b"))])
            .apply(ast.clone())
            .unwrap();
        let sequential = push("b").apply(push("a").apply(ast).unwrap()).unwrap();
        assert_eq!(composed, sequential);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let ast = json!({"blocks": [{"t": "HorizontalRule"}]});
        let chain = compose(Vec::new());
        assert!(chain.is_empty());
        assert_eq!(chain.apply(ast.clone()).unwrap(), ast);
    }

    #[test]
    fn test_safe_members_keep_the_chain_going() {
        let sink = MemorySink::new();
        let chain = Compose::new()
            .then(push("first"))
            .then(safe_with(
                from_fn("broken", |_| Err(FilterError::Other("nope".to_string()))),
                sink.clone(),
            ))
            .then(push("third"));

        let out = chain.apply(json!({"blocks": []})).unwrap();
        assert_eq!(words(&out), vec!["first", "third"]);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_unwrapped_error_aborts_chain() {
        let chain = Compose::new()
            .then(from_fn("broken", |_| Err(FilterError::Other("nope".to_string()))))
            .then(push("never"));
        assert!(chain.apply(json!({"blocks": []})).is_err());
    }
}
