// src/executor/builtin/core.rs
use std::path::PathBuf;

use super::util::strip_verbatim;
use crate::error::{ShellError, ShellResult};
use crate::executor::{ExecutionResult, CLEAR_SCREEN, EXIT};
use crate::shell::Session;

pub fn builtin_pwd(_args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    Ok(ExecutionResult::ok(session.cwd().display().to_string()))
}

pub fn builtin_cd(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    let target: PathBuf = match args.first().map(|s| s.as_str()) {
        None | Some("~") => home()?,
        Some(path) if path.starts_with("~/") || path.starts_with("~\\") => home()?.join(&path[2..]),
        Some(path) => session.resolve(path),
    };

    if !target.exists() {
        return Err(ShellError::not_found("Directory", &target));
    }
    if !target.is_dir() {
        return Err(ShellError::NotADirectory(target));
    }

    let target = target.canonicalize().map_err(|e| ShellError::io(&target, e))?;
    let target = strip_verbatim(&target);

    // Keep the process in step so child processes inherit it.
    std::env::set_current_dir(&target).map_err(|e| ShellError::io(&target, e))?;
    session.set_cwd(target);

    Ok(ExecutionResult::ok(format!("Changed directory to: {}", session.cwd().display())))
}

fn home() -> ShellResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| ShellError::Unavailable("cd: cannot find home directory".to_string()))
}

pub fn builtin_echo(args: &[String], _session: &mut Session) -> ShellResult<ExecutionResult> {
    Ok(ExecutionResult::ok(args.join(" ")))
}

pub fn builtin_whoami(_args: &[String], _session: &mut Session) -> ShellResult<ExecutionResult> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.is_empty())
        .map(ExecutionResult::ok)
        .ok_or_else(|| ShellError::Unavailable("whoami: cannot determine current user".to_string()))
}

pub fn builtin_date(_args: &[String], _session: &mut Session) -> ShellResult<ExecutionResult> {
    Ok(ExecutionResult::ok(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()))
}

pub fn builtin_clear(_args: &[String], _session: &mut Session) -> ShellResult<ExecutionResult> {
    Ok(ExecutionResult::ok(CLEAR_SCREEN))
}

pub fn builtin_exit(_args: &[String], _session: &mut Session) -> ShellResult<ExecutionResult> {
    Ok(ExecutionResult::ok(EXIT))
}

pub fn builtin_help(_args: &[String], _session: &mut Session) -> ShellResult<ExecutionResult> {
    Ok(ExecutionResult::ok(HELP.trim()))
}

const HELP: &str = r#"
Available Commands:
==================
File Operations:
  ls, dir [path]         List directory contents
  pwd                    Print working directory
  cd [path]              Change directory (no path or ~ for home)
  mkdir <name>...        Create directories
  rmdir <name>...        Remove empty directories
  rm, del [-rf] <path>   Remove files (-r for directories, -f to ignore missing)
  touch <file>...        Create empty files
  cat, type <file>       Show file content
  cp, copy <src> <dst>   Copy a file or directory tree
  mv, move <src> <dst>   Move or rename

Search:
  find <pattern> [dir]   Find files whose name contains pattern
  grep <pattern> [file]  Search for text in files (globs allowed)

Session:
  echo <text>            Print text
  whoami                 Show current user
  date                   Show current date and time
  clear, cls             Clear screen
  help                   Show this help
  exit, quit             Leave the shell

Anything else is run by the system command interpreter.

Examples:
  cd ..                  Go to parent directory
  mkdir test             Create 'test' directory
  rm -rf build           Remove 'build' and its contents
  grep todo *.rs         Search Rust sources for 'todo'
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::builtin::testutil::{args, scratch};

    #[test]
    fn test_echo_joins_with_single_space() {
        let mut s = Session::new(std::env::temp_dir());
        assert_eq!(builtin_echo(&args(&["a", "b"]), &mut s).unwrap().output, "a b");
        assert_eq!(builtin_echo(&[], &mut s).unwrap().output, "");
    }

    #[test]
    fn test_cd_relative_and_repeat() {
        let root = scratch("cd_rel");
        std::fs::create_dir(root.join("inner")).unwrap();
        let mut s = Session::new(root.clone());

        builtin_cd(&args(&["inner"]), &mut s).unwrap();
        assert_eq!(s.cwd(), root.join("inner"));

        let mut again = Session::new(root.clone());
        builtin_cd(&args(&["inner"]), &mut again).unwrap();
        builtin_cd(&args(&[root.join("inner").to_str().unwrap()]), &mut again).unwrap();
        assert_eq!(again.cwd(), s.cwd());

        builtin_cd(&args(&[".."]), &mut s).unwrap();
        assert_eq!(s.cwd(), root);
    }

    #[test]
    fn test_cd_rejects_missing_and_files() {
        let root = scratch("cd_bad");
        std::fs::write(root.join("file.txt"), "x").unwrap();
        let mut s = Session::new(root.clone());

        let err = builtin_cd(&args(&["nope"]), &mut s).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        let err = builtin_cd(&args(&["file.txt"]), &mut s).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
        assert_eq!(s.cwd(), root);
    }

    #[test]
    fn test_sentinels_and_help() {
        let mut s = Session::new(std::env::temp_dir());
        assert!(builtin_exit(&[], &mut s).unwrap().is_exit());
        assert!(builtin_clear(&[], &mut s).unwrap().is_clear());
        let help = builtin_help(&args(&["whatever"]), &mut s).unwrap();
        assert!(help.output.contains("Available Commands"));
    }

    #[test]
    fn test_date_format() {
        let mut s = Session::new(std::env::temp_dir());
        let out = builtin_date(&[], &mut s).unwrap().output;
        assert_eq!(out.len(), "2024-01-01 00:00:00".len());
        assert!(chrono::NaiveDateTime::parse_from_str(&out, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
