use crate::error::{CommonError, CommonResult};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of a finished subprocess
#[derive(Clone, Debug)]
pub struct ProcessOutput {
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Render an argv as a single line for messages
pub fn display_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Run `argv`, write `input` to its stdin and wait for it to finish.
///
/// Fails only if the program cannot be started or its pipes break; a
/// non-zero exit is reported through `ProcessOutput::success`.
/// Blocks until the process exits; there is no timeout.
pub fn run_with_input(argv: &[String], input: &str) -> CommonResult<ProcessOutput> {
    let command_line = display_command(argv);
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| CommonError::process(&command_line, "empty command"))?;

    debug!(command = %command_line, input_bytes = input.len(), "Spawning process");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CommonError::process(&command_line, e.to_string()))?;

    // Write on a separate thread so a child that fills its stdout pipe before
    // draining stdin cannot deadlock us.
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| CommonError::process(&command_line, "stdin not captured"))?;
    let input = input.to_string();
    let writer = std::thread::spawn(move || stdin.write_all(input.as_bytes()));

    let output = child
        .wait_with_output()
        .map_err(|e| CommonError::process(&command_line, e.to_string()))?;

    match writer.join() {
        Ok(Ok(())) => {}
        // The child may exit without reading all of its input; its exit status says what happened.
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        Ok(Err(e)) => return Err(CommonError::process(&command_line, e.to_string())),
        Err(_) => return Err(CommonError::process(&command_line, "stdin writer panicked")),
    }

    debug!(command = %command_line, status = ?output.status.code(), "Process finished");

    Ok(ProcessOutput {
        status: output.status.code(),
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pipes_stdin_to_stdout() {
        let output = run_with_input(&argv(&["cat"]), "hello\n").unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, "hello\n");
    }

    #[test]
    fn test_non_zero_exit_is_not_an_error() {
        let output = run_with_input(&argv(&["sh", "-c", "echo oops >&2; exit 3"]), "").unwrap();
        assert!(!output.success);
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_missing_program() {
        let err = run_with_input(&argv(&["folio-no-such-program"]), "").unwrap_err();
        assert!(matches!(err, CommonError::Process { .. }));
        assert!(run_with_input(&[], "").is_err());
    }
}
