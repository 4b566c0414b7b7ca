// src/executor/builtin/grep.rs
// grep <pattern> [file|glob ...]: case-insensitive substring search

use std::path::PathBuf;

use super::util::{has_glob_chars, read_lossy};
use crate::error::{ShellError, ShellResult};
use crate::executor::ExecutionResult;
use crate::shell::Session;

pub fn builtin_grep(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    let Some(pattern) = args.first() else {
        return Err(ShellError::MissingArgument("grep: missing pattern"));
    };
    let needle = pattern.to_lowercase();

    let default = ["*".to_string()];
    let targets = if args.len() > 1 { &args[1..] } else { &default[..] };

    let mut matches = Vec::new();
    for target in targets {
        for path in expand(session, target) {
            // Directories and unreadable files are skipped silently.
            if !path.is_file() { continue; }
            let Ok(content) = read_lossy(&path) else { continue };
            for (i, line) in content.lines().enumerate() {
                if line.to_lowercase().contains(&needle) {
                    matches.push(format!("{}:{}:{}", path.display(), i + 1, line.trim()));
                }
            }
        }
    }

    if matches.is_empty() {
        return Ok(ExecutionResult::ok("No matches found"));
    }
    Ok(ExecutionResult::ok(matches.join("\n")))
}

fn expand(session: &Session, target: &str) -> Vec<PathBuf> {
    let full = session.resolve(target);
    if !has_glob_chars(target) {
        return vec![full];
    }
    let pattern = full.display().to_string();
    match glob::glob(&pattern) {
        Ok(paths) => {
            let mut found: Vec<PathBuf> = paths.flatten().collect();
            found.sort();
            found
        }
        Err(e) => {
            log::debug!("grep: bad glob {:?}: {}", pattern, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::builtin::testutil::{args, scratch};

    #[test]
    fn test_grep_default_scans_cwd() {
        let root = scratch("grep_default");
        std::fs::write(root.join("a.txt"), "nothing\n  Hello World  \n").unwrap();
        std::fs::write(root.join("b.txt"), "HELLO again\n").unwrap();
        std::fs::create_dir(root.join("dir")).unwrap();
        let mut s = Session::new(root.clone());

        let out = builtin_grep(&args(&["hello"]), &mut s).unwrap().output;
        let expected = format!(
            "{}:2:Hello World\n{}:1:HELLO again",
            root.join("a.txt").display(),
            root.join("b.txt").display(),
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_grep_glob_and_explicit_file() {
        let root = scratch("grep_glob");
        std::fs::write(root.join("keep.rs"), "// todo: fix\n").unwrap();
        std::fs::write(root.join("skip.md"), "todo list\n").unwrap();
        let mut s = Session::new(root.clone());

        let out = builtin_grep(&args(&["TODO", "*.rs"]), &mut s).unwrap().output;
        assert!(out.ends_with("keep.rs:1:// todo: fix"));
        assert!(!out.contains("skip.md"));

        let out = builtin_grep(&args(&["todo", "skip.md", "missing.txt"]), &mut s).unwrap().output;
        assert!(out.ends_with("skip.md:1:todo list"));
    }

    #[test]
    fn test_grep_no_match_and_missing_pattern() {
        let root = scratch("grep_none");
        std::fs::write(root.join("a"), "abc").unwrap();
        let mut s = Session::new(root);
        assert_eq!(builtin_grep(&args(&["xyz"]), &mut s).unwrap().output, "No matches found");
        assert!(matches!(builtin_grep(&[], &mut s), Err(ShellError::MissingArgument(_))));
    }
}
