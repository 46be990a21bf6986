use crate::error::{ExecuteError, ExecuteResult};
use folio_common::{display_command, run_with_input};

/// Run `argv` with `input` on stdin and return its stdout, treating a
/// non-zero exit as a failure
pub(crate) fn run_checked(argv: &[String], input: &str) -> ExecuteResult<String> {
    let output = run_with_input(argv, input)?;
    if !output.success {
        return Err(ExecuteError::failed(
            display_command(argv),
            output.status,
            &output.stderr,
        ));
    }
    Ok(output.stdout)
}
