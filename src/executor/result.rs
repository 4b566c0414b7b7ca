// src/executor/result.rs

/// Output value that asks the front-end to clear the terminal.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Output value that asks the front-end to end the session.
pub const EXIT: &str = "exit";

/// Uniform outcome of every command, built-in or external.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
    pub error: String,
}

impl ExecutionResult {
    pub fn ok(output: impl Into<String>) -> Self {
        ExecutionResult { success: true, output: output.into(), error: String::new() }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        ExecutionResult { success: false, output: String::new(), error: error.into() }
    }

    /// Success that still carries a diagnostic for the user.
    pub fn warn(output: impl Into<String>, error: impl Into<String>) -> Self {
        ExecutionResult { success: true, output: output.into(), error: error.into() }
    }

    pub fn empty() -> Self {
        Self::ok("")
    }

    pub fn is_warning(&self) -> bool {
        self.success && !self.error.is_empty()
    }

    pub fn is_exit(&self) -> bool {
        self.success && self.output == EXIT
    }

    pub fn is_clear(&self) -> bool {
        self.success && self.output == CLEAR_SCREEN
    }
}
