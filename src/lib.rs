// src/lib.rs
pub mod completion;
pub mod config;
pub mod error;
pub mod executor;
pub mod parser;
pub mod shell;

pub use executor::{ExecutionResult, CLEAR_SCREEN, EXIT};
pub use config::Config;
pub use shell::{Session, Shell};
