//! Single-key chord input

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use eyre::Result;

use super::{Command, CommandSource, InputMode};

/// Reads one command per keypress using the terminal's raw mode.
///
/// Raw mode is enabled only for the duration of a single read so regular
/// printing elsewhere stays cooked and line-buffered.
#[derive(Debug, Default)]
pub struct ChordReader;

impl ChordReader {
    pub fn new() -> Self {
        Self
    }
}

impl CommandSource for ChordReader {
    fn next_command(&mut self, prompt: &str) -> Result<Option<Command>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        terminal::enable_raw_mode()?;
        let pressed = read_key();
        terminal::disable_raw_mode()?;
        println!();

        let (code, modifiers) = pressed?;
        Ok(decode_key(code, modifiers))
    }

    fn toggle_mode(&mut self) -> InputMode {
        InputMode::Chord
    }
}

/// Block until an actual key press arrives
fn read_key() -> Result<(KeyCode, KeyModifiers)> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok((key.code, key.modifiers));
        }
    }
}

/// Map a keypress to the shared command vocabulary.
///
/// `e` and `Esc` only leave chord mode; ending the whole session from chord
/// mode is `q` or `Ctrl+C`.
fn decode_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Exit);
    }

    match code {
        KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right => Some(Command::Next),
        KeyCode::Char('p') | KeyCode::Left => Some(Command::Previous),
        KeyCode::Char('s') => Some(Command::ShowSolution),
        KeyCode::Char('c') => Some(Command::JumpToCurrent),
        KeyCode::Char('m') | KeyCode::Char('e') | KeyCode::Esc => Some(Command::ToggleInput),
        KeyCode::Char('q') => Some(Command::Exit),
        _ => None,
    }
}
