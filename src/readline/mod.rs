// src/readline/mod.rs
// Line editor with Ctrl+C, Ctrl+L, and tab completion

use reedline::{
    DefaultHinter, FileBackedHistory, Reedline, ReedlineEvent, Signal,
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Completer, Suggestion, Span, KeyCode, KeyModifiers,
    ReedlineMenu, ColumnarMenu, MenuBuilder,
};
use std::borrow::Cow;
use termshell::completion;

const CLEAR_EVENT: &str = "__clear__";

// ── Prompt ───────────────────────────────────────────────────────────────────

pub struct ShellPrompt {
    pub text: String,
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let indicator = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            indicator, history_search.term
        ))
    }
}

// ── Tab Completer ─────────────────────────────────────────────────────────────

pub struct ShellCompleter;

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);

        let partial = &before_cursor[word_start..];
        let is_first_word = before_cursor[..word_start].trim().is_empty();
        let builtins = completion::complete_builtins(partial);

        completion::complete(partial, is_first_word)
            .into_iter()
            .map(|value| {
                let is_builtin = is_first_word && builtins.contains(&value);
                Suggestion {
                    append_whitespace: is_first_word,
                    description: is_builtin.then(|| "builtin".to_string()),
                    value,
                    style: None,
                    extra: None,
                    span: Span::new(word_start, pos),
                }
            })
            .collect()
    }
}

// ── Main readline struct ──────────────────────────────────────────────────────

pub struct ShellReadline {
    editor: Reedline,
}

impl ShellReadline {
    /// History lives in memory only and is gone when the shell exits.
    pub fn new(history_size: usize) -> anyhow::Result<Self> {
        let history = FileBackedHistory::new(history_size)
            .map_err(|e| anyhow::anyhow!("history init failed: {e}"))?;

        // Tab completion menu (shows list of options when multiple matches)
        let completion_menu = Box::new(
            ColumnarMenu::default().with_name("completion_menu")
        );

        let mut keybindings = reedline::default_emacs_keybindings();

        // Ctrl+L → clear screen
        keybindings.add_binding(
            KeyModifiers::CONTROL,
            KeyCode::Char('l'),
            ReedlineEvent::ExecuteHostCommand(CLEAR_EVENT.to_string()),
        );

        // Tab → open completion menu
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(Box::new(ShellCompleter))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(reedline::Emacs::new(keybindings)))
            .with_hinter(Box::new(
                DefaultHinter::default().with_style(
                    nu_ansi_term::Style::new()
                        .italic()
                        .fg(nu_ansi_term::Color::DarkGray),
                ),
            ));

        Ok(ShellReadline { editor })
    }

    pub fn readline(&mut self, prompt_text: &str) -> Result<String, ReadlineError> {
        let prompt = ShellPrompt {
            text: prompt_text.to_string(),
        };
        match self.editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                if line.trim() == CLEAR_EVENT {
                    clear_screen();
                    return Err(ReadlineError::Interrupted);
                }
                Ok(line)
            }
            Ok(Signal::CtrlC) => Err(ReadlineError::Interrupted),
            Ok(Signal::CtrlD) => Err(ReadlineError::Eof),
            Err(e) => Err(ReadlineError::Other(e.to_string())),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Cross-platform clear screen
pub fn clear_screen() {
    use crossterm::{cursor::MoveTo, execute, terminal::{Clear, ClearType}};
    let _ = execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}

#[derive(Debug)]
pub enum ReadlineError {
    Interrupted,
    Eof,
    Other(String),
}
