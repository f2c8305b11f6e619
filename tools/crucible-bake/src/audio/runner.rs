//! External tool invocation seam.
//!
//! Audio conversion shells out to ffmpeg and ffprobe. The [`ToolRunner`]
//! trait keeps that process boundary swappable so conversion logic can be
//! exercised without the tools installed.

use std::process::Command;

use thiserror::Error;

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, or -1 when the process died without one.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Failure to launch a tool at all.
///
/// A tool that launches and exits nonzero is not a [`ToolError`]; callers
/// inspect [`ToolOutput::exit_code`] for that.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0} not found on PATH")]
    NotFound(String),
    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs external command line tools.
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, ToolError>;
}

/// Runs tools resolved from the host PATH.
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, ToolError> {
        let resolved =
            which::which(program).map_err(|_| ToolError::NotFound(program.to_string()))?;
        let output = Command::new(resolved)
            .args(args)
            .output()
            .map_err(|source| ToolError::Io {
                program: program.to_string(),
                source,
            })?;
        Ok(ToolOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_runner_captures_streams_and_exit_code() {
        let args = vec![
            "-c".to_string(),
            "echo out; echo err >&2; exit 3".to_string(),
        ];
        let output = SystemToolRunner.run("sh", &args).unwrap();
        assert_eq!(output.exit_code, 3);
        assert!(!output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn test_missing_program_reports_not_found() {
        let err = SystemToolRunner
            .run("crucible-no-such-tool", &[])
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
