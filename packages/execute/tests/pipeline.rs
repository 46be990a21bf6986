#![cfg(unix)]

use folio_ast::{Attr, Block};
use folio_converter::{document, StaticConverter};
use folio_execute::{CodeExecFilter, DiagramFilter, EXEC_RESULT_CLASS};
use folio_filter::{compose, is_error_block, node_filter, safe_with, Filter, MemorySink};
use folio_include::{IncludeFilter, INCLUDE_CLASS};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn exec_block(lang: &str, source: &str) -> Value {
    Block::code_block(Attr::empty().with_class("exec").with_class(lang), source).into_value()
}

fn include(reference: &str) -> Value {
    Block::code_block(Attr::empty().with_class(INCLUDE_CLASS), reference).into_value()
}

#[test]
fn included_exec_block_runs_after_inclusion() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("demo.md"), "DEMO").unwrap();
    let converter =
        StaticConverter::new().with_blocks("DEMO", vec![exec_block("sh", "echo from-include")]);

    let sink = MemorySink::new();
    let pipeline = compose(vec![
        Box::new(safe_with(
            IncludeFilter::new(converter).with_base_dir(dir.path()),
            sink.clone(),
        )),
        Box::new(safe_with(node_filter(CodeExecFilter::default()), sink.clone())),
    ]);

    let out = pipeline.apply(document(vec![include("demo.md")])).unwrap();

    let included = &out["blocks"][0]["c"][1];
    let result = Block::from_value(&included[0]).unwrap();
    assert!(result.attr().unwrap().has_class(EXEC_RESULT_CLASS));
    assert_eq!(included[0]["c"][1][1]["c"][1], "from-include\n");
    assert!(sink.is_empty());
}

#[test]
fn failing_block_does_not_stop_its_neighbours() {
    let input = document(vec![
        exec_block("sh", "exit 1"),
        json!({"t": "Para", "c": [{"t": "Str", "c": "between"}]}),
        exec_block("sh", "echo second"),
    ]);

    let out = node_filter(CodeExecFilter::default()).apply(input).unwrap();

    assert!(is_error_block(&out["blocks"][0]));
    assert_eq!(out["blocks"][1]["c"][0]["c"], "between");
    assert_eq!(out["blocks"][2]["c"][1][1]["c"][1], "second\n");
}

#[test]
fn exec_then_diagram() {
    let input = document(vec![
        exec_block("sh", "printf ok"),
        Block::code_block(Attr::empty().with_class("dot"), "<svg>g</svg>").into_value(),
    ]);

    let pipeline = compose(vec![
        Box::new(node_filter(CodeExecFilter::default())),
        Box::new(node_filter(
            DiagramFilter::new("cat").with_format_args(Vec::new()),
        )),
    ]);
    let out = pipeline.apply(input).unwrap();

    assert_eq!(out["blocks"][0]["c"][1][1]["c"][1], "ok");
    assert_eq!(
        out["blocks"][1],
        Block::raw_block("html", "<svg>g</svg>").into_value()
    );
}
