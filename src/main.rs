// src/main.rs
mod readline;

use colored::Colorize;
use readline::{ShellReadline, ReadlineError};
use termshell::{Config, ExecutionResult, Shell};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("TERMSHELL_LOG", "warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::load();
    let mut shell = Shell::with_config(&config);
    let mut readline = ShellReadline::new(config.history_size)?;

    if config.show_banner {
        println!("{}", "termshell".cyan().bold());
        println!("{}", "Type 'help' for available commands or 'exit' to quit".bright_black());
        println!("{}", "-".repeat(50));
    }

    loop {
        let prompt = shell.build_prompt().green().to_string();

        match readline.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() { continue; }
                let result = shell.execute(line.trim());
                if result.is_exit() {
                    println!("Goodbye!");
                    return Ok(());
                }
                render(&result);
            }

            // ── Ctrl+C ────────────────────────────────────────────
            // Cancel current input, print a new prompt - do NOT exit
            Err(ReadlineError::Interrupted) => {}

            // ── Ctrl+D ────────────────────────────────────────────
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                return Ok(());
            }

            Err(ReadlineError::Other(e)) => anyhow::bail!("readline error: {e}"),
        }
    }
}

fn render(result: &ExecutionResult) {
    if result.is_clear() {
        readline::clear_screen();
        return;
    }
    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    if result.error.is_empty() {
        return;
    }
    if result.success {
        eprintln!("{}", result.error.yellow());
    } else {
        eprintln!("{}", format!("Error: {}", result.error).red());
    }
}
