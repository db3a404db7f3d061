use crate::types::StageError;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

fn render(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

fn spawn_error(err: std::io::Error, program: &str, command: &str) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        StageError::ToolNotFound(program.to_string()).into()
    } else {
        anyhow::Error::new(err).context(format!("failed to spawn `{}`", command))
    }
}

/// Runs an external command with inherited stdio, so the operator sees the
/// underlying tool's own output. Non-zero exit becomes an error carrying the
/// full command line.
pub fn run(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let command = render(program, args);
    log::debug!("running `{}`", command);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let status = cmd
        .status()
        .map_err(|e| spawn_error(e, program, &command))?;

    if !status.success() {
        return Err(StageError::CommandFailed {
            command,
            status: status.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Runs an external command and captures stdout. Stderr is folded into the
/// error on failure.
pub fn run_capture(program: &str, args: &[&str], cwd: Option<&Path>) -> Result<String> {
    let command = render(program, args);
    log::debug!("running `{}`", command);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd
        .output()
        .map_err(|e| spawn_error(e, program, &command))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StageError::CommandFailed {
            command,
            status: output.status.to_string(),
        })
        .with_context(|| format!("stderr: {}", stderr.trim_end()));
    }

    String::from_utf8(output.stdout).context("command produced non-UTF-8 output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_missing_tool_is_classified() {
        let err = run("gpad-definitely-not-a-real-tool", &[], None).unwrap_err();
        let stage_err = err.downcast_ref::<StageError>();
        assert!(matches!(stage_err, Some(StageError::ToolNotFound(_))));
    }

    #[test]
    fn test_run_nonzero_exit_reports_command_line() {
        let err = run("false", &[], None).unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("false"));
    }

    #[test]
    fn test_run_capture_returns_stdout() {
        let out = run_capture("echo", &["hello"], None).unwrap();
        assert_eq!(out.trim(), "hello");
    }
}
