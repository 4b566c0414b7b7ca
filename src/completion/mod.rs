// src/completion/mod.rs
// Tab completion engine - completes builtin names, PATH commands and paths

use std::path::{Path, PathBuf};

use crate::executor::builtin;

/// Given a partial word, return a list of completions
pub fn complete(partial: &str, is_first_word: bool) -> Vec<String> {
    if is_first_word {
        let mut results = complete_builtins(partial);
        if !partial.is_empty() {
            results.extend(complete_commands(partial));
        }
        results.sort();
        results.dedup();
        return results;
    }
    if partial.is_empty() {
        return vec![];
    }
    complete_path(partial)
}

pub fn complete_builtins(partial: &str) -> Vec<String> {
    let partial = partial.to_lowercase();
    builtin::names()
        .filter(|name| name.starts_with(&partial))
        .map(String::from)
        .collect()
}

/// Complete file and directory names relative to the process working
/// directory, which `cd` keeps equal to the session directory.
pub fn complete_path(partial: &str) -> Vec<String> {
    let (dir, prefix) = match partial.rfind(|c: char| c == '/' || c == '\\') {
        Some(i) => (PathBuf::from(&partial[..=i]), partial[i + 1..].to_string()),
        None => (PathBuf::from("."), partial.to_string()),
    };

    let read_dir = match std::fs::read_dir(&dir) {
        Ok(rd) => rd,
        Err(_) => return vec![],
    };

    let mut matches = Vec::new();
    for entry in read_dir.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(&prefix) { continue; }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let base = if dir == Path::new(".") { String::new() } else { dir.display().to_string() };
        let trail = if is_dir { std::path::MAIN_SEPARATOR_STR } else { "" };
        matches.push(format!("{}{}{}", base, name, trail));
    }

    matches.sort();
    matches
}

/// Complete command names from PATH
pub fn complete_commands(partial: &str) -> Vec<String> {
    let Some(path_var) = std::env::var_os("PATH") else { return vec![] };
    let mut commands = Vec::new();

    for dir in std::env::split_paths(&path_var) {
        let Ok(entries) = std::fs::read_dir(dir) else { continue };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(partial) && is_executable(&entry.path()) {
                commands.push(name);
            }
        }
    }

    commands.sort();
    commands.dedup();
    commands
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)] {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
    }
    #[cfg(windows)] {
        path.extension().map(|e| matches!(e.to_str(), Some("exe") | Some("bat") | Some("cmd"))).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_complete() {
        let got = complete_builtins("c");
        for name in ["cat", "cd", "clear", "cls", "copy", "cp"] {
            assert!(got.contains(&name.to_string()), "missing {name}");
        }
        assert_eq!(complete_builtins("RMD"), vec!["rmdir"]);
    }

    #[test]
    fn test_empty_argument_offers_nothing() {
        assert!(complete("", false).is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_absolute_path_completion() {
        let dir = std::env::temp_dir().join(format!("termshell_{}_complete", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("notes_dir")).unwrap();
        std::fs::write(dir.join("notes.txt"), "").unwrap();

        let partial = format!("{}/no", dir.display());
        let got = complete_path(&partial);
        assert_eq!(got, vec![
            format!("{}/notes.txt", dir.display()),
            format!("{}/notes_dir/", dir.display()),
        ]);
    }
}
