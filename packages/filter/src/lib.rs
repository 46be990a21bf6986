//! The filter contract.
//!
//! A [`Filter`] turns one JSON AST into another. Most filters are written as
//! a [`NodeFilter`] (a predicate plus a per-node transform) and driven over
//! the document with [`node_filter`]. [`safe`] isolates a filter's failure
//! from the rest of a pipeline, and [`compose`] threads a document through
//! several filters left to right.
//!
//! Per-node failures are not errors at this level: filters replace the node
//! with an [`error_block`] so the problem is visible in the output.

mod compose;
mod diagnostic;
mod error;
mod filter;
mod registry;
mod safe;

pub use compose::{compose, Compose};
pub use diagnostic::{DiagnosticSink, FanoutSink, FilterReport, MemorySink, TracingSink};
pub use error::{FilterError, FilterResult};
pub use filter::{
    error_block, from_fn, is_error_block, node_filter, Filter, FnFilter, NodeFilter,
    NodeFilterRunner,
};
pub use registry::FilterRegistry;
pub use safe::{panic_message, safe, safe_with, Safe};
