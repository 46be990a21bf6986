/// Include request parsing and path resolution
///
/// Turns a matched `include` code block into an [`IncludeRequest`] and
/// resolves its file reference to a normalized absolute path.
use crate::context::InclusionContext;
use crate::error::IncludeError;
use folio_ast::Attr;
use folio_common::path::resolve;
use std::path::{Path, PathBuf};

pub const INCLUDE_CLASS: &str = "include";
pub const BASE_DIR_KEY: &str = "base-dir";
pub const MODE_KEY: &str = "mode";
pub const LANG_KEY: &str = "lang";
pub const FORMAT_KEY: &str = "format";

/// Raw mode output format when the node names none
pub const DEFAULT_RAW_FORMAT: &str = "html";

/// How an included file's contents enter the document
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncludeMode {
    /// Parse as markup and splice the resulting blocks in
    Parse,
    /// Verbatim code block
    Code,
    /// Raw passthrough block
    Raw,
}

impl IncludeMode {
    pub fn from_attr(value: Option<&str>) -> Result<Self, IncludeError> {
        match value {
            None | Some("parse") => Ok(IncludeMode::Parse),
            Some("code") => Ok(IncludeMode::Code),
            Some("raw") => Ok(IncludeMode::Raw),
            Some(other) => Err(IncludeError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IncludeMode::Parse => "parse",
            IncludeMode::Code => "code",
            IncludeMode::Raw => "raw",
        }
    }
}

/// Everything an include node asks for, read off its attributes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncludeRequest {
    /// The file reference exactly as written, trimmed
    pub reference: String,
    /// The `mode` attribute as written; see [`IncludeRequest::mode`]
    pub mode: Option<String>,
    pub base_dir: Option<String>,
    pub lang: Option<String>,
    pub format: String,
    /// Identifier of the include node, carried onto the replacement
    pub identifier: String,
}

impl IncludeRequest {
    /// Read the request off the node. Nothing is validated here: an empty
    /// reference or unknown mode is only an error once expansion proceeds.
    pub fn from_node(attr: &Attr, text: &str) -> Self {
        Self {
            reference: text.trim().to_string(),
            mode: attr.get(MODE_KEY).map(str::to_string),
            base_dir: attr.get(BASE_DIR_KEY).map(str::to_string),
            lang: attr.get(LANG_KEY).map(str::to_string),
            format: attr
                .get(FORMAT_KEY)
                .unwrap_or(DEFAULT_RAW_FORMAT)
                .to_string(),
            identifier: attr.identifier().to_string(),
        }
    }

    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    pub fn mode(&self) -> Result<IncludeMode, IncludeError> {
        IncludeMode::from_attr(self.mode.as_deref())
    }

    /// Directory the reference resolves against: the node's `base-dir`
    /// (itself relative to the context base) or the context base.
    pub fn effective_base(&self, ctx: &InclusionContext) -> PathBuf {
        match &self.base_dir {
            Some(dir) => resolve(ctx.base_path(), Path::new(dir)),
            None => ctx.base_path().to_path_buf(),
        }
    }

    /// Normalized absolute path of the requested file
    pub fn resolve(&self, ctx: &InclusionContext) -> PathBuf {
        resolve(&self.effective_base(ctx), Path::new(&self.reference))
    }
}
