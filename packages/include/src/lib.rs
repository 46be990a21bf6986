//! File inclusion for JSON ASTs.
//!
//! A code block with class `include` names a file; [`IncludeFilter`] replaces
//! it with that file's contents. In `parse` mode (the default) the file is
//! converted to blocks and expanded recursively, one level deeper each time,
//! until the depth bound is hit. An inclusion stack catches cycles.

pub mod context;
pub mod error;
pub mod include;
pub mod resolver;

pub use context::{InclusionContext, DEFAULT_MAX_DEPTH};
pub use error::IncludeError;
pub use include::{IncludeFilter, INCLUDE_FILTER};
pub use resolver::{IncludeMode, IncludeRequest, INCLUDE_CLASS};
