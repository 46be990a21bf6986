use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_ast::{filter_nodes, walk, Block};
use serde_json::{json, Value};
use std::convert::Infallible;

fn chapter(sections: usize) -> Value {
    let mut blocks = Vec::new();
    for i in 0..sections {
        blocks.push(json!({"t": "Header", "c": [2, [format!("s{}", i), [], []], [{"t": "Str", "c": "Section"}]]}));
        blocks.push(json!({"t": "Para", "c": [
            {"t": "Str", "c": "Lorem"}, {"t": "Space"}, {"t": "Emph", "c": [{"t": "Str", "c": "ipsum"}]}
        ]}));
        blocks.push(json!({"t": "CodeBlock", "c": [["", ["exec", "sh"], []], "echo hi"]}));
        blocks.push(json!({"t": "BlockQuote", "c": [{"t": "Para", "c": [{"t": "Str", "c": "quote"}]}]}));
    }
    json!({"pandoc-api-version": [1, 23, 1], "meta": {}, "blocks": blocks})
}

fn walk_identity(c: &mut Criterion) {
    let doc = chapter(200);

    c.bench_function("walk_identity_800_blocks", |b| {
        b.iter(|| walk(black_box(doc.clone()), &mut |n| Ok::<_, Infallible>(Some(n))))
    });
}

fn walk_decode_blocks(c: &mut Criterion) {
    let doc = chapter(200);

    c.bench_function("walk_decode_blocks_800_blocks", |b| {
        b.iter(|| {
            walk(black_box(doc.clone()), &mut |n| {
                let matched = Block::from_value(&n)
                    .map(|block| block.is_code_block_with_class("exec"))
                    .unwrap_or(false);
                Ok::<_, Infallible>(Some(if matched { json!({"t": "HorizontalRule"}) } else { n }))
            })
        })
    });
}

fn collect_code_blocks(c: &mut Criterion) {
    let doc = chapter(200);

    c.bench_function("filter_nodes_code_blocks", |b| {
        b.iter(|| filter_nodes(black_box(&doc), "CodeBlock").len())
    });
}

criterion_group!(benches, walk_identity, walk_decode_blocks, collect_code_blocks);
criterion_main!(benches);
