// src/executor/builtin/util.rs
use std::path::{Path, PathBuf};

/// Drop the `\\?\` prefix Windows puts on canonical paths.
pub fn strip_verbatim(p: &Path) -> PathBuf {
    let s = p.display().to_string();
    match s.strip_prefix("\\\\?\\") {
        Some(rest) => PathBuf::from(rest),
        None => p.to_path_buf(),
    }
}

/// Read a file as text, replacing invalid UTF-8 with U+FFFD.
/// Lossy on purpose: binary junk should not stop `cat` or `grep`.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn copy_dir_all(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dest)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let dest_path = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &dest_path)?;
        } else {
            std::fs::copy(entry.path(), dest_path)?;
        }
    }
    Ok(())
}

/// A destination that is an existing directory receives `src` by name.
pub fn into_dir_target(src: &Path, dest: &Path) -> PathBuf {
    if dest.is_dir() {
        dest.join(src.file_name().unwrap_or_default())
    } else {
        dest.to_path_buf()
    }
}

/// True when `dest` is `src` itself or would land somewhere below it.
///
/// `dest` need not exist yet: its nearest existing ancestor is canonicalized
/// and the missing components are appended back.
pub fn is_within(src: &Path, dest: &Path) -> bool {
    let Ok(src) = src.canonicalize() else { return false };
    match canonical_prefix(dest) {
        Some(dest) => dest.starts_with(&src),
        None => false,
    }
}

fn canonical_prefix(path: &Path) -> Option<PathBuf> {
    let mut missing = Vec::new();
    let mut cur = path;
    loop {
        if let Ok(base) = cur.canonicalize() {
            return Some(missing.iter().rev().fold(base, |acc, name| acc.join(name)));
        }
        missing.push(cur.file_name()?);
        cur = cur.parent()?;
    }
}

pub fn has_glob_chars(s: &str) -> bool {
    s.contains('*') || s.contains('?') || s.contains('[')
}
