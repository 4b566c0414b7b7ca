// src/executor/mod.rs - Dispatch: builtin table first, host interpreter second
pub mod builtin;
mod external;
mod result;

pub use result::{ExecutionResult, CLEAR_SCREEN, EXIT};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::ShellError;
use crate::parser;
use crate::shell::{Session, Shell};
use builtin::Handler;

pub fn execute(shell: &mut Shell, line: &str) -> ExecutionResult {
    let Some(inv) = parser::parse(line) else {
        return ExecutionResult::empty();
    };

    match builtin::lookup(&inv.name) {
        Some(handler) => {
            log::debug!("builtin {} {:?}", inv.name, inv.args);
            run_handler(handler, &inv.args, &mut shell.session)
        }
        None => {
            log::debug!("passing {:?} to host interpreter", inv.name);
            // The raw line, so native quoting and operators survive.
            match external::run(line, shell.session.cwd(), shell.timeout) {
                Ok(result) => result,
                Err(e) => into_failure(e),
            }
        }
    }
}

fn run_handler(handler: Handler, args: &[String], session: &mut Session) -> ExecutionResult {
    match panic::catch_unwind(AssertUnwindSafe(|| handler(args, session))) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => into_failure(e),
        Err(payload) => unexpected(panic_message(payload.as_ref())),
    }
}

fn into_failure(e: ShellError) -> ExecutionResult {
    if e.is_unexpected() {
        unexpected(e.to_string())
    } else {
        ExecutionResult::fail(e.to_string())
    }
}

fn unexpected(message: String) -> ExecutionResult {
    log::debug!("unexpected failure: {message}");
    ExecutionResult::fail(format!("Error executing command: {message}"))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boom(_: &[String], _: &mut Session) -> crate::error::ShellResult<ExecutionResult> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire").into())
    }

    fn explode(_: &[String], _: &mut Session) -> crate::error::ShellResult<ExecutionResult> {
        panic!("index out of range")
    }

    fn refuse(_: &[String], _: &mut Session) -> crate::error::ShellResult<ExecutionResult> {
        Err(ShellError::MissingArgument("cat: missing filename"))
    }

    #[test]
    fn test_blank_line_is_noop() {
        let mut shell = Shell::in_dir(std::env::temp_dir());
        assert_eq!(execute(&mut shell, "   \t "), ExecutionResult::ok(""));
    }

    #[test]
    fn test_unclassified_error_gets_prefix() {
        let mut session = Session::new(std::env::temp_dir());
        let r = run_handler(boom, &[], &mut session);
        assert!(!r.success);
        assert_eq!(r.error, "Error executing command: disk on fire");
    }

    #[test]
    fn test_panic_is_contained() {
        let mut session = Session::new(std::env::temp_dir());
        let r = run_handler(explode, &[], &mut session);
        assert_eq!(r.error, "Error executing command: index out of range");
    }

    #[test]
    fn test_classified_error_verbatim() {
        let mut session = Session::new(std::env::temp_dir());
        let r = run_handler(refuse, &[], &mut session);
        assert_eq!(r, ExecutionResult::fail("cat: missing filename"));
    }

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let mut shell = Shell::in_dir(std::env::temp_dir());
        assert_eq!(execute(&mut shell, "ECHO Hi There").output, "Hi There");
    }
}
