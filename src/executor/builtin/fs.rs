// src/executor/builtin/fs.rs
use std::path::Path;

use super::util::{copy_dir_all, into_dir_target, is_within, read_lossy};
use crate::error::{ShellError, ShellResult};
use crate::executor::ExecutionResult;
use crate::shell::Session;

pub fn builtin_ls(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    // Flags like -l/-a are accepted and ignored; everything is always shown.
    let target = match args.iter().find(|a| !a.starts_with('-')) {
        Some(arg) => session.resolve(arg),
        None => session.cwd().to_path_buf(),
    };

    if !target.exists() {
        return Err(ShellError::not_found("Path", &target));
    }
    if !target.is_dir() {
        return Err(ShellError::NotADirectory(target));
    }

    let entries = std::fs::read_dir(&target).map_err(|e| ShellError::io(&target, e))?;
    let mut items: Vec<std::fs::DirEntry> = entries.flatten().collect();
    items.sort_by_key(|e| e.file_name());

    if items.is_empty() {
        return Ok(ExecutionResult::ok("Directory is empty"));
    }

    let lines: Vec<String> = items.iter().map(|item| {
        let name = item.file_name().to_string_lossy().to_string();
        let path = item.path();
        if path.is_dir() {
            format!("[DIR]  {}", name)
        } else {
            let size = path.metadata().map(|m| m.len()).unwrap_or(0);
            format!("[FILE] {} ({} bytes)", name, size)
        }
    }).collect();

    Ok(ExecutionResult::ok(lines.join("\n")))
}

pub fn builtin_mkdir(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    if args.is_empty() { return Err(ShellError::MissingArgument("mkdir: missing directory name")); }
    for dir in args {
        let path = session.resolve(dir);
        if path.exists() {
            return Err(ShellError::AlreadyExists(path));
        }
        std::fs::create_dir_all(&path).map_err(|e| ShellError::io(&path, e))?;
    }
    Ok(ExecutionResult::ok(format!("Created directory(s): {}", args.join(", "))))
}

pub fn builtin_rmdir(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    if args.is_empty() { return Err(ShellError::MissingArgument("rmdir: missing directory name")); }
    for dir in args {
        let path = session.resolve(dir);
        if !path.exists() {
            return Err(ShellError::not_found("Directory", &path));
        }
        if !path.is_dir() {
            return Err(ShellError::NotADirectory(path));
        }
        let mut entries = std::fs::read_dir(&path).map_err(|e| ShellError::io(&path, e))?;
        if entries.next().is_some() {
            return Err(ShellError::NotEmpty(path));
        }
        std::fs::remove_dir(&path).map_err(|e| ShellError::io(&path, e))?;
    }
    Ok(ExecutionResult::ok(format!("Removed directory(s): {}", args.join(", "))))
}

pub fn builtin_rm(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    let mut recursive = false;
    let mut force = false;
    let mut targets = Vec::new();
    for arg in args {
        if arg.starts_with('-') && arg.len() > 1 {
            for ch in arg.chars().skip(1) {
                match ch { 'r'|'R' => recursive = true, 'f' => force = true, _ => {} }
            }
        } else { targets.push(arg); }
    }
    if targets.is_empty() { return Err(ShellError::MissingArgument("rm: missing file/directory name")); }

    let mut removed = Vec::new();
    for target in targets {
        let path = session.resolve(target);
        // symlink_metadata so a dangling link still counts as present
        if path.symlink_metadata().is_err() {
            if force { continue; }
            return Err(ShellError::not_found("File/directory", &path));
        }
        if path.is_dir() && !is_symlink(&path) {
            if !recursive { return Err(ShellError::NeedsRecursive(path)); }
            std::fs::remove_dir_all(&path).map_err(|e| ShellError::io(&path, e))?;
            removed.push(format!("directory '{}' and its contents", target));
        } else {
            std::fs::remove_file(&path).map_err(|e| ShellError::io(&path, e))?;
            removed.push(format!("file '{}'", target));
        }
    }

    if removed.is_empty() {
        return Ok(ExecutionResult::empty());
    }
    Ok(ExecutionResult::ok(format!("Removed: {}", removed.join(", "))))
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata().map(|m| m.file_type().is_symlink()).unwrap_or(false)
}

pub fn builtin_touch(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    if args.is_empty() { return Err(ShellError::MissingArgument("touch: missing filename")); }
    for filename in args {
        let path = session.resolve(filename);
        if path.exists() { continue; }
        std::fs::File::create(&path).map_err(|e| ShellError::io(&path, e))?;
    }
    Ok(ExecutionResult::ok(format!("Created file(s): {}", args.join(", "))))
}

pub fn builtin_cat(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    let Some(filename) = args.first() else {
        return Err(ShellError::MissingArgument("cat: missing filename"));
    };
    let path = session.resolve(filename);
    if !path.exists() {
        return Err(ShellError::not_found("File", &path));
    }
    if path.is_dir() {
        return Err(ShellError::IsADirectory(path));
    }
    let content = read_lossy(&path).map_err(|e| ShellError::io(&path, e))?;
    Ok(ExecutionResult::ok(content))
}

pub fn builtin_cp(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    if args.len() < 2 { return Err(ShellError::MissingArgument("cp: missing source or destination")); }
    let src = session.resolve(&args[0]);
    let dest = session.resolve(&args[1]);
    if !src.exists() {
        return Err(ShellError::not_found("Source", &src));
    }
    let dest = into_dir_target(&src, &dest);
    if is_within(&src, &dest) {
        return Err(ShellError::IntoItself { verb: "copy", path: src });
    }
    let result = if src.is_dir() {
        copy_dir_all(&src, &dest)
    } else {
        std::fs::copy(&src, &dest).map(|_| ())
    };
    result.map_err(|e| ShellError::io(&dest, e))?;
    Ok(ExecutionResult::ok(format!("Copied '{}' to '{}'", args[0], args[1])))
}

pub fn builtin_mv(args: &[String], session: &mut Session) -> ShellResult<ExecutionResult> {
    if args.len() < 2 { return Err(ShellError::MissingArgument("mv: missing source or destination")); }
    let src = session.resolve(&args[0]);
    let dest = session.resolve(&args[1]);
    if src.symlink_metadata().is_err() {
        return Err(ShellError::not_found("Source", &src));
    }
    let target = into_dir_target(&src, &dest);
    if is_within(&src, &target) {
        return Err(ShellError::IntoItself { verb: "move", path: src });
    }
    // Moving into a directory never replaces what is already in there.
    if target != dest && target.symlink_metadata().is_ok() {
        return Err(ShellError::DestinationExists(target));
    }

    match std::fs::rename(&src, &target) {
        Ok(()) => {}
        Err(e) if crosses_devices(&e) => {
            log::debug!("rename {} crosses devices, copying instead", src.display());
            move_by_copy(&src, &target).map_err(|e| ShellError::io(&src, e))?;
        }
        Err(e) => return Err(ShellError::io(&src, e)),
    }
    Ok(ExecutionResult::ok(format!("Moved '{}' to '{}'", args[0], args[1])))
}

fn crosses_devices(e: &std::io::Error) -> bool {
    #[cfg(windows)]
    const NOT_SAME_DEVICE: i32 = 17; // ERROR_NOT_SAME_DEVICE
    #[cfg(not(windows))]
    const NOT_SAME_DEVICE: i32 = 18; // EXDEV
    e.raw_os_error() == Some(NOT_SAME_DEVICE)
}

fn move_by_copy(src: &Path, dest: &Path) -> std::io::Result<()> {
    if src.is_dir() {
        copy_dir_all(src, dest)?;
        std::fs::remove_dir_all(src)
    } else {
        std::fs::copy(src, dest)?;
        std::fs::remove_file(src)
    }
}
