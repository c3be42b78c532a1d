//! Line input for interactive commands

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Reads answers from the terminal (or piped stdin)
pub struct Prompter {
    editor: DefaultEditor,
}

impl Prompter {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Read one line; `None` when input ends or the user presses Ctrl-C/Ctrl-D
    pub fn ask(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Some(line.trim().to_string()),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                None
            }
        }
    }

    /// Ask a yes/no question; anything but `y`/`Y` counts as no
    pub fn confirm(&mut self, prompt: &str) -> bool {
        self.ask(prompt)
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y"))
    }

    /// Ask for the five movie fields in order, stopping if input ends
    pub fn ask_fields(&mut self, prompts: [&str; 5]) -> Option<[String; 5]> {
        let [title, director, genre, year, rating] = prompts;
        Some([
            self.ask(title)?,
            self.ask(director)?,
            self.ask(genre)?,
            self.ask(year)?,
            self.ask(rating)?,
        ])
    }
}
