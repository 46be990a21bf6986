//! Filters that hand code blocks to external programs: `exec` runs source
//! through an interpreter, `diagram` renders graph descriptions to SVG.
//! Failures turn into error nodes in place of the block.

mod diagram;
mod error;
mod exec;
mod runner;

pub use diagram::{DiagramFilter, DEFAULT_ENGINE, DIAGRAM_CLASSES, DIAGRAM_FILTER};
pub use error::{ExecuteError, ExecuteResult};
pub use exec::{
    CodeExecFilter, Interpreters, EXEC_CLASS, EXEC_FILTER, EXEC_RESULT_CLASS, OUTPUT_CLASS,
};
