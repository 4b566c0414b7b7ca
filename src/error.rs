// src/error.rs
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a command can fail with.
///
/// Every variant except `Io` is a classified failure whose message goes to the
/// user as-is. A bare `Io` error gets the dispatcher's catch-all prefix instead.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("{what} '{}' does not exist", .path.display())]
    NotFound { what: &'static str, path: PathBuf },

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("'{}' is a directory", .0.display())]
    IsADirectory(PathBuf),

    #[error("'{}' is a directory. Use -r flag to remove directories", .0.display())]
    NeedsRecursive(PathBuf),

    #[error("Directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Directory '{}' is not empty. Use 'rm -r' to remove non-empty directories", .0.display())]
    NotEmpty(PathBuf),

    #[error("Destination path '{}' already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error("Cannot {verb} '{}' into itself", .path.display())]
    IntoItself { verb: &'static str, path: PathBuf },

    #[error("Permission denied accessing '{}'", .0.display())]
    PermissionDenied(PathBuf),

    #[error("'{}': {source}", .path.display())]
    Path { path: PathBuf, source: io::Error },

    #[error("Command timed out after {0} seconds")]
    Timeout(u64),

    #[error("Command not found: {0}")]
    Launch(String),

    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// True for faults no handler classified; the dispatcher wraps these.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, ShellError::Io(_))
    }

    /// Attach a path to an I/O error, mapping the kinds users care about.
    pub fn io(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::PermissionDenied => ShellError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => ShellError::NotFound { what: "Path", path: path.to_path_buf() },
            _ => ShellError::Path { path: path.to_path_buf(), source: e },
        }
    }

    pub fn not_found(what: &'static str, path: &Path) -> Self {
        ShellError::NotFound { what, path: path.to_path_buf() }
    }
}

pub type ShellResult<T> = std::result::Result<T, ShellError>;
