// src/shell.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::executor::{self, ExecutionResult};

/// The only mutable context commands see: where the user currently is.
#[derive(Debug, Clone)]
pub struct Session {
    cwd: PathBuf,
}

impl Session {
    pub fn new(cwd: PathBuf) -> Self {
        Session { cwd }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Absolute arguments are used as given, anything else hangs off the cwd.
    pub fn resolve(&self, arg: &str) -> PathBuf {
        let p = Path::new(arg);
        if p.is_absolute() { p.to_path_buf() } else { self.cwd.join(p) }
    }

    /// Only `cd` calls this, after it has validated `dir`.
    pub(crate) fn set_cwd(&mut self, dir: PathBuf) {
        self.cwd = dir;
    }
}

/// Dispatch engine: owns the session and runs one line at a time.
pub struct Shell {
    pub session: Session,
    pub timeout: Duration,
}

impl Shell {
    pub fn new() -> Self {
        Shell::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Shell {
            session: Session::new(cwd),
            timeout: config.command_timeout(),
        }
    }

    /// Start in `dir` instead of the process working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Shell {
            session: Session::new(dir.into()),
            timeout: Config::default().command_timeout(),
        }
    }

    pub fn cwd(&self) -> &Path {
        self.session.cwd()
    }

    pub fn execute(&mut self, line: &str) -> ExecutionResult {
        executor::execute(self, line)
    }

    pub fn build_prompt(&self) -> String {
        let cwd = self.cwd();
        let name = cwd
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| cwd.display().to_string());
        format!("{}> ", name)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new()
    }
}
