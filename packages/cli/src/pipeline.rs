use crate::config::Config;
use anyhow::{anyhow, Result};
use colored::Colorize;
use folio_ast::filter_nodes;
use folio_converter::Pandoc;
use folio_execute::{CodeExecFilter, DiagramFilter};
use folio_filter::{
    is_error_block, node_filter, safe_with, Compose, FanoutSink, FilterRegistry, MemorySink,
    TracingSink,
};
use folio_include::IncludeFilter;
use serde_json::Value;
use std::path::Path;

/// Every filter, in the order `all` runs them
pub const FILTER_NAMES: &[&str] = &["include", "exec", "diagram"];
pub const ALL: &str = "all";

/// All filters configured from `config`
///
/// `source` is the file the document came from, if any; includes then
/// resolve next to it unless the config names a base directory.
pub fn registry(config: &Config, cwd: &Path, source: Option<&Path>) -> FilterRegistry {
    let include = IncludeFilter::new(Pandoc::new(&config.pandoc, &config.from))
        .with_max_depth(config.max_include_depth);
    let include = match (source, &config.base_dir) {
        (Some(source), None) => include.with_source(source),
        (Some(source), Some(_)) => include
            .with_source(source)
            .with_base_dir(config.get_base_dir(cwd)),
        (None, _) => include.with_base_dir(config.get_base_dir(cwd)),
    };

    let mut registry = FilterRegistry::new();
    registry.register(Box::new(include));
    registry.register(Box::new(node_filter(CodeExecFilter::new(
        config.interpreters(),
    ))));
    registry.register(Box::new(node_filter(DiagramFilter::new(
        config.diagram_engine.as_str(),
    ))));
    registry
}

/// Expand `all` and reject unknown names
pub fn resolve_names(names: &[String]) -> Result<Vec<String>> {
    let mut resolved: Vec<String> = Vec::new();

    for name in names {
        let expanded: Vec<&str> = if name == ALL {
            FILTER_NAMES.to_vec()
        } else if FILTER_NAMES.contains(&name.as_str()) {
            vec![name.as_str()]
        } else {
            return Err(anyhow!(
                "Unknown filter '{}'. Available: {}, {}",
                name,
                FILTER_NAMES.join(", "),
                ALL
            ));
        };

        for name in expanded {
            if resolved.iter().any(|r| r == name) {
                return Err(anyhow!("Filter '{}' listed more than once", name));
            }
            resolved.push(name.to_string());
        }
    }

    if resolved.is_empty() {
        return Err(anyhow!("No filters given"));
    }
    Ok(resolved)
}

/// Chain the named filters, each behind its own failure boundary
/// reporting to both `tracing` and `sink`
pub fn build(names: &[String], mut registry: FilterRegistry, sink: &MemorySink) -> Result<Compose> {
    let mut chain = Compose::new();

    for name in resolve_names(names)? {
        let filter = registry
            .take(&name)
            .ok_or_else(|| anyhow!("Filter '{}' is not available", name))?;
        let reports = FanoutSink::new(vec![Box::new(TracingSink), Box::new(sink.clone())]);
        chain = chain.then(safe_with(filter, reports));
    }

    Ok(chain)
}

/// Error nodes left anywhere in `document`
pub fn count_error_nodes(document: &Value) -> usize {
    filter_nodes(document, "CodeBlock")
        .into_iter()
        .filter(|node| is_error_block(node))
        .count()
}

/// One stderr line per failed filter pass and per error node, nothing when
/// the run was clean
pub fn print_summary(sink: &MemorySink, document: &Value) {
    for report in sink.reports() {
        eprintln!(
            "  {} {} failed, document passed through unchanged: {}",
            "✗".red(),
            report.filter.bright_white(),
            report.message
        );
    }

    let errors = count_error_nodes(document);
    if errors > 0 {
        eprintln!(
            "  {} {} block(s) replaced with error nodes",
            "⚠️".yellow(),
            errors
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_filter::{error_block, Filter};
    use serde_json::json;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_names() {
        assert_eq!(
            resolve_names(&names(&["all"])).unwrap(),
            names(&["include", "exec", "diagram"])
        );
        assert_eq!(
            resolve_names(&names(&["diagram", "include"])).unwrap(),
            names(&["diagram", "include"])
        );
        assert!(resolve_names(&names(&["sql"])).is_err());
        assert!(resolve_names(&names(&["exec", "all"])).is_err());
        assert!(resolve_names(&[]).is_err());
    }

    #[test]
    fn test_registry_has_every_filter() {
        let registry = registry(&Config::default(), Path::new("/book"), None);
        assert_eq!(registry.names(), FILTER_NAMES.to_vec());
        for name in FILTER_NAMES {
            assert!(!registry.get(name).unwrap().description().is_empty());
        }
    }

    #[test]
    fn test_build_chain_name() {
        let sink = MemorySink::new();
        let registry = registry(&Config::default(), Path::new("/book"), None);
        let chain = build(&names(&["all"]), registry, &sink).unwrap();
        assert_eq!(chain.name(), "include+exec+diagram");
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_count_error_nodes() {
        let document = json!({
            "blocks": [
                error_block("exec", "boom"),
                {"t": "Div", "c": [["", [], []], [error_block("include", "missing")]]},
                {"t": "CodeBlock", "c": [["", ["sh"], []], "echo"]}
            ]
        });
        assert_eq!(count_error_nodes(&document), 2);
    }
}
