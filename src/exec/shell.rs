// src/exec/shell.rs

//! Production runner: spawns the build tool through the host shell.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{BuildError, Result};
use crate::exec::runner::{LaunchError, ProcessRequest, ProcessResult, ProcessRunner};

const READ_CHUNK: usize = 8 * 1024;

/// Shell exit codes that mean the command itself could not be run.
#[cfg(not(windows))]
const LAUNCH_FAILURE_CODES: &[i32] = &[126, 127];
#[cfg(windows)]
const LAUNCH_FAILURE_CODES: &[i32] = &[9009];

/// Runs requests via `sh -c` (or `cmd /C` on Windows).
#[derive(Debug, Clone, Default)]
pub struct ShellProcessRunner;

impl ProcessRunner for ShellProcessRunner {
    fn run(
        &self,
        request: ProcessRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + '_>> {
        Box::pin(run_in_shell(request))
    }
}

/// Render command and arguments as one shell command line.
#[cfg(not(windows))]
pub fn shell_command_line(command: &str, args: &[String]) -> String {
    let mut line = quote_arg(command);
    for arg in args {
        line.push(' ');
        line.push_str(&quote_arg(arg));
    }
    line
}

/// Render command and arguments as one `cmd.exe` command line.
///
/// Every argument is quoted for the child's argv parser, then each `cmd`
/// metacharacter (quotes included) is `^`-escaped so `cmd` never enters
/// quote mode and never expands `%VAR%`. Batch files re-parse their
/// arguments, so they get a second round of escaping.
#[cfg(windows)]
pub fn shell_command_line(command: &str, args: &[String]) -> String {
    let lower = command.to_ascii_lowercase();
    let batch = lower.ends_with(".cmd") || lower.ends_with(".bat");

    let mut line = escape_cmd_meta(command);
    for arg in args {
        line.push(' ');
        let mut quoted = escape_cmd_meta(&quote_arg(arg));
        if batch {
            quoted = escape_cmd_meta(&quoted);
        }
        line.push_str(&quoted);
    }
    line
}

#[cfg(not(windows))]
fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

/// Quote `arg` the way the MSVC runtime splits argv.
#[cfg(windows)]
fn quote_arg(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    let mut backslashes = 0usize;
    for c in arg.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                out.extend(std::iter::repeat_n('\\', backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat_n('\\', backslashes));
                out.push(c);
                backslashes = 0;
            }
        }
    }
    // trailing backslashes must not escape the closing quote
    out.extend(std::iter::repeat_n('\\', backslashes * 2));
    out.push('"');
    out
}

#[cfg(windows)]
fn escape_cmd_meta(text: &str) -> String {
    const META: &str = "()[]%!^\"`<>&|;, *?";
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if META.contains(c) {
            out.push('^');
        }
        out.push(c);
    }
    out
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut c = Command::new("cmd");
    c.raw_arg(format!("/d /s /c \"{line}\""));
    c
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut c = Command::new("sh");
    c.arg("-c").arg(line);
    c
}

async fn run_in_shell(request: ProcessRequest) -> Result<ProcessResult> {
    let command_name = request.spec.command.clone();
    let line = shell_command_line(&request.spec.command, &request.spec.args);

    info!(
        command = %command_name,
        cwd = %request.working_dir.display(),
        "starting build tool process"
    );
    debug!(line = %line, "shell command line");

    let mut cmd = shell_command(&line);
    cmd.current_dir(&request.working_dir)
        .env_clear()
        .envs(&request.environment)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            warn!(command = %command_name, error = %err, "failed to spawn build tool");
            return Ok(ProcessResult::launch_failed(command_name, err.to_string()));
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("stdout pipe missing for '{command_name}'"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("stderr pipe missing for '{command_name}'"))?;

    let capture = capture_capped(stdout, stderr, request.output_cap).await?;

    if capture.truncated {
        warn!(
            command = %command_name,
            cap = request.output_cap,
            "output cap exceeded; stopping process"
        );
        if let Err(e) = child.kill().await {
            debug!(command = %command_name, error = %e, "kill after truncation failed");
        }
    }

    let status = child.wait().await.map_err(BuildError::from)?;
    let code = status.code();

    info!(
        command = %command_name,
        exit_code = ?code,
        success = status.success(),
        truncated = capture.truncated,
        "build tool process exited"
    );

    let stdout = String::from_utf8_lossy(&capture.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&capture.stderr).into_owned();

    let launch_error = match code {
        Some(c) if !capture.truncated && LAUNCH_FAILURE_CODES.contains(&c) => Some(LaunchError {
            command: command_name,
            reason: first_line_or(&stderr, &format!("shell exited with {c}")),
        }),
        _ => None,
    };

    Ok(ProcessResult {
        status: code,
        stdout,
        stderr,
        truncated: capture.truncated,
        launch_error,
    })
}

fn first_line_or(text: &str, fallback: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

struct Capture {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    truncated: bool,
}

/// Drain both pipes, keeping at most `cap` bytes in total.
async fn capture_capped<O, E>(mut stdout: O, mut stderr: E, cap: usize) -> Result<Capture>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut out_chunk = [0u8; READ_CHUNK];
    let mut err_chunk = [0u8; READ_CHUNK];
    let mut out_open = true;
    let mut err_open = true;
    let mut remaining = cap;

    while out_open || err_open {
        tokio::select! {
            n = stdout.read(&mut out_chunk), if out_open => {
                let n = n?;
                if n == 0 {
                    out_open = false;
                } else if !keep(&mut out, &out_chunk[..n], &mut remaining) {
                    return Ok(Capture { stdout: out, stderr: err, truncated: true });
                }
            }
            n = stderr.read(&mut err_chunk), if err_open => {
                let n = n?;
                if n == 0 {
                    err_open = false;
                } else if !keep(&mut err, &err_chunk[..n], &mut remaining) {
                    return Ok(Capture { stdout: out, stderr: err, truncated: true });
                }
            }
        }
    }

    Ok(Capture {
        stdout: out,
        stderr: err,
        truncated: false,
    })
}

/// Append as much of `chunk` as the budget allows; `false` once it overflows.
fn keep(buf: &mut Vec<u8>, chunk: &[u8], remaining: &mut usize) -> bool {
    let take = chunk.len().min(*remaining);
    buf.extend_from_slice(&chunk[..take]);
    *remaining -= take;
    take == chunk.len()
}
