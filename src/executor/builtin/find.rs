// src/executor/builtin/find.rs
// find <pattern> [dir]: files whose name contains pattern, any case

use std::path::{Path, PathBuf};

use crate::error::{ShellError, ShellResult};
use crate::executor::ExecutionResult;
use crate::shell::Session;

pub fn builtin_find(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    let Some(pattern) = args.first() else {
        return Err(ShellError::MissingArgument("find: missing pattern"));
    };
    let start = match args.get(1) {
        Some(dir) => session.resolve(dir),
        None => session.cwd().to_path_buf(),
    };
    if !start.exists() {
        return Err(ShellError::not_found("Path", &start));
    }

    let needle = pattern.to_lowercase();
    let mut results = Vec::new();
    walk_find(&start, &needle, &mut results);

    if results.is_empty() {
        return Ok(ExecutionResult::ok("No files found matching pattern"));
    }
    let lines: Vec<String> = results.iter().map(|p| p.display().to_string()).collect();
    Ok(ExecutionResult::ok(lines.join("\n")))
}

fn walk_find(dir: &Path, needle: &str, results: &mut Vec<PathBuf>) {
    // Unreadable directories are skipped, not reported.
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    let mut entries: Vec<std::fs::DirEntry> = entries.flatten().collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let Ok(file_type) = entry.file_type() else { continue };
        if file_type.is_dir() {
            walk_find(&entry.path(), needle, results);
        } else if file_type.is_symlink() && entry.path().is_dir() {
            // Linked directories are neither matched nor followed.
            continue;
        } else if entry.file_name().to_string_lossy().to_lowercase().contains(needle) {
            results.push(entry.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::builtin::testutil::{args, scratch};

    #[test]
    fn test_find_recursive_case_insensitive() {
        let root = scratch("find_walk");
        std::fs::create_dir_all(root.join("src/deep")).unwrap();
        std::fs::write(root.join("README.md"), "").unwrap();
        std::fs::write(root.join("src/deep/readme.txt"), "").unwrap();
        std::fs::write(root.join("src/main.rs"), "").unwrap();
        std::fs::create_dir(root.join("readme_dir")).unwrap();
        let mut s = Session::new(root.clone());

        let out = builtin_find(&args(&["ReadMe"]), &mut s).unwrap().output;
        let found: Vec<&str> = out.lines().collect();
        assert_eq!(found, vec![
            root.join("README.md").display().to_string(),
            root.join("src/deep/readme.txt").display().to_string(),
        ]);
    }

    #[test]
    fn test_find_start_dir_and_no_match() {
        let root = scratch("find_start");
        std::fs::create_dir(root.join("sub")).unwrap();
        std::fs::write(root.join("top.log"), "").unwrap();
        std::fs::write(root.join("sub/inner.log"), "").unwrap();
        let mut s = Session::new(root.clone());

        let out = builtin_find(&args(&[".log", "sub"]), &mut s).unwrap().output;
        assert_eq!(out, root.join("sub/inner.log").display().to_string());
        let out = builtin_find(&args(&["zzz"]), &mut s).unwrap().output;
        assert_eq!(out, "No files found matching pattern");
        assert!(builtin_find(&[], &mut s).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn test_find_skips_linked_directories() {
        let root = scratch("find_links");
        std::fs::create_dir(root.join("real")).unwrap();
        std::fs::write(root.join("real/notes.txt"), "").unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("notes_link")).unwrap();
        std::os::unix::fs::symlink(root.join("real/notes.txt"), root.join("notes_file_link")).unwrap();
        let mut s = Session::new(root.clone());

        let out = builtin_find(&args(&["notes"]), &mut s).unwrap().output;
        let found: Vec<&str> = out.lines().collect();
        assert_eq!(found, vec![
            root.join("notes_file_link").display().to_string(),
            root.join("real/notes.txt").display().to_string(),
        ]);
    }
}
