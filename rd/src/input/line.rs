//! Line-based command input

use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::{Command, CommandSource, InputMode};

/// Reads commands one line at a time with editing and history
pub struct LineReader {
    editor: DefaultEditor,
}

impl LineReader {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor })
    }
}

impl CommandSource for LineReader {
    fn next_command(&mut self, prompt: &str) -> Result<Option<Command>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(input);
                    return Ok(input.parse().ok());
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show a new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    return Ok(Some(Command::Exit));
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }
    }

    fn toggle_mode(&mut self) -> InputMode {
        InputMode::Line
    }
}
