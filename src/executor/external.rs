// src/executor/external.rs
//
// Fallback for anything that is not a builtin: hand the untouched line to the
// host interpreter, capture both streams, and give up after the timeout.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command as Proc, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::ExecutionResult;
use crate::error::{ShellError, ShellResult};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub fn run(line: &str, cwd: &Path, timeout: Duration) -> ShellResult<ExecutionResult> {
    let mut child = interpreter(line)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ShellError::Launch(friendly_error(e)))?;

    log::debug!("spawned pid {} for {:?}", child.id(), line);

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let Some(status) = wait_with_timeout(&mut child, timeout)? else {
        log::debug!("pid {} timed out after {:?}, killing", child.id(), timeout);
        let _ = child.kill();
        let _ = child.wait();
        // Readers are left detached: a grandchild may still hold the pipes.
        return Err(ShellError::Timeout(timeout.as_secs()));
    };

    let output = collect(stdout);
    let error = collect(stderr);

    if status.success() {
        return Ok(if error.is_empty() {
            ExecutionResult::ok(output)
        } else {
            ExecutionResult::warn(output, error)
        });
    }

    let error = if error.trim().is_empty() {
        format!("Command exited with {}", describe_status(status))
    } else {
        error
    };
    Ok(ExecutionResult { success: false, output, error })
}

/// Run through `sh -c` / `cmd /C` so quoting and operators behave natively.
fn interpreter(line: &str) -> Proc {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Proc::new("cmd");
        cmd.args(["/C", line]);
        cmd
    }
    #[cfg(not(target_os = "windows"))]
    {
        let mut cmd = Proc::new("sh");
        cmd.args(["-c", line]);
        cmd
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle.and_then(|h| h.join().ok()).unwrap_or_default();
    String::from_utf8_lossy(&bytes).trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> ShellResult<Option<ExitStatus>> {
    // A timeout too large to represent means there is no deadline at all.
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(unix)]
fn describe_status(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => format!("status {}", code),
        (None, Some(sig)) => format!("signal {}", sig),
        _ => "unknown status".to_string(),
    }
}

#[cfg(not(unix))]
fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("status {}", code),
        None => "unknown status".to_string(),
    }
}

fn friendly_error(e: std::io::Error) -> String {
    match e.kind() {
        std::io::ErrorKind::NotFound => "command interpreter not available".to_string(),
        std::io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => e.to_string(),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn tmp() -> std::path::PathBuf {
        std::env::temp_dir()
    }

    #[test]
    fn test_captures_stdout() {
        let r = run("echo hello", &tmp(), Duration::from_secs(5)).unwrap();
        assert!(r.success);
        assert_eq!(r.output, "hello");
        assert!(r.error.is_empty());
    }

    #[test]
    fn test_stderr_on_success_is_warning() {
        let r = run("echo careful 1>&2", &tmp(), Duration::from_secs(5)).unwrap();
        assert!(r.is_warning());
        assert_eq!(r.error, "careful");
    }

    #[test]
    fn test_nonzero_exit_without_stderr() {
        let r = run("exit 3", &tmp(), Duration::from_secs(5)).unwrap();
        assert!(!r.success);
        assert_eq!(r.error, "Command exited with status 3");
    }

    #[test]
    fn test_unknown_program() {
        let r = run("zzzznotacommand", &tmp(), Duration::from_secs(5)).unwrap();
        assert!(!r.success);
        assert!(r.error.contains("not found"), "got {:?}", r.error);
    }

    #[test]
    fn test_runs_in_given_dir() {
        let r = run("pwd", Path::new("/"), Duration::from_secs(5)).unwrap();
        assert_eq!(r.output, "/");
    }

    #[test]
    fn test_timeout() {
        let start = Instant::now();
        let err = run("sleep 5", &tmp(), Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, ShellError::Timeout(_)));
        assert!(err.to_string().starts_with("Command timed out"));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_unrepresentable_timeout_waits_normally() {
        let r = run("echo done", &tmp(), Duration::from_secs(u64::MAX)).unwrap();
        assert!(r.success);
        assert_eq!(r.output, "done");
    }
}
