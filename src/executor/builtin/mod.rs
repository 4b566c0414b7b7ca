// src/executor/builtin/mod.rs
mod core;
mod find;
mod fs;
mod grep;
mod util;

use crate::error::ShellResult;
use crate::executor::ExecutionResult;
use crate::shell::Session;

pub type Handler = fn(&[String], &mut Session) -> ShellResult<ExecutionResult>;

pub struct Builtin {
    pub names: &'static [&'static str],
    pub handler: Handler,
}

/// Every builtin and its aliases. Names are lowercase.
pub static BUILTINS: &[Builtin] = &[
    // filesystem
    Builtin { names: &["ls", "dir"], handler: fs::builtin_ls },
    Builtin { names: &["pwd"], handler: core::builtin_pwd },
    Builtin { names: &["cd"], handler: core::builtin_cd },
    Builtin { names: &["mkdir"], handler: fs::builtin_mkdir },
    Builtin { names: &["rmdir"], handler: fs::builtin_rmdir },
    Builtin { names: &["rm", "del"], handler: fs::builtin_rm },
    Builtin { names: &["touch"], handler: fs::builtin_touch },
    Builtin { names: &["cat", "type"], handler: fs::builtin_cat },
    Builtin { names: &["cp", "copy"], handler: fs::builtin_cp },
    Builtin { names: &["mv", "move"], handler: fs::builtin_mv },
    // search
    Builtin { names: &["find"], handler: find::builtin_find },
    Builtin { names: &["grep"], handler: grep::builtin_grep },
    // session
    Builtin { names: &["echo"], handler: core::builtin_echo },
    Builtin { names: &["whoami"], handler: core::builtin_whoami },
    Builtin { names: &["date"], handler: core::builtin_date },
    Builtin { names: &["clear", "cls"], handler: core::builtin_clear },
    Builtin { names: &["help"], handler: core::builtin_help },
    Builtin { names: &["exit", "quit"], handler: core::builtin_exit },
];

pub fn lookup(name: &str) -> Option<Handler> {
    BUILTINS
        .iter()
        .find(|b| b.names.contains(&name))
        .map(|b| b.handler)
}

/// All names including aliases, for completion.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().flat_map(|b| b.names.iter().copied())
}
