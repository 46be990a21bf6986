pub mod error;
pub mod filesystem;
pub mod path;
pub mod process;

pub use error::*;
pub use filesystem::*;
pub use process::{display_command, run_with_input, ProcessOutput};
