use crate::attr::Attr;
use crate::node::type_of;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed view of the block kinds filters pattern-match on.
///
/// Children stay as raw `Value`s so that anything a filter does not touch is
/// carried through verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    Plain(Vec<Value>),
    Para(Vec<Value>),
    Header(u32, Attr, Vec<Value>),
    CodeBlock(Attr, String),
    RawBlock(String, String),
    BlockQuote(Vec<Value>),
    Div(Attr, Vec<Value>),
    HorizontalRule,
}

/// Tags that `Block::from_value` will attempt to decode
pub const KNOWN_TAGS: &[&str] = &[
    "Plain",
    "Para",
    "Header",
    "CodeBlock",
    "RawBlock",
    "BlockQuote",
    "Div",
    "HorizontalRule",
];

impl Block {
    /// Decode a node into a typed block.
    ///
    /// Returns `None` for non-nodes, unknown tags and payloads that do not
    /// have the expected shape.
    pub fn from_value(value: &Value) -> Option<Block> {
        let tag = type_of(value)?;
        if !KNOWN_TAGS.contains(&tag) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn into_value(self) -> Value {
        // Every variant serializes to plain JSON; this cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Block::Plain(_) => "Plain",
            Block::Para(_) => "Para",
            Block::Header(..) => "Header",
            Block::CodeBlock(..) => "CodeBlock",
            Block::RawBlock(..) => "RawBlock",
            Block::BlockQuote(_) => "BlockQuote",
            Block::Div(..) => "Div",
            Block::HorizontalRule => "HorizontalRule",
        }
    }

    pub fn attr(&self) -> Option<&Attr> {
        match self {
            Block::Header(_, attr, _) | Block::CodeBlock(attr, _) | Block::Div(attr, _) => {
                Some(attr)
            }
            _ => None,
        }
    }

    /// True for a code block carrying the given class
    pub fn is_code_block_with_class(&self, class: &str) -> bool {
        matches!(self, Block::CodeBlock(attr, _) if attr.has_class(class))
    }

    pub fn code_block(attr: Attr, text: impl Into<String>) -> Self {
        Block::CodeBlock(attr, text.into())
    }

    pub fn raw_block(format: impl Into<String>, text: impl Into<String>) -> Self {
        Block::RawBlock(format.into(), text.into())
    }

    pub fn div(attr: Attr, blocks: Vec<Value>) -> Self {
        Block::Div(attr, blocks)
    }
}
