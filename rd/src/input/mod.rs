//! Command input: one vocabulary, two interchangeable sources
//!
//! Both input modes produce the same [`Command`] values: a line-based reader
//! with editing and history, and a single-key chord reader. The active mode
//! can be toggled mid-session without touching the rest of the state
//! machine.

mod chord;
mod line;

pub use chord::ChordReader;
pub use line::LineReader;

use eyre::Result;

/// Session commands shared by every input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// End the session
    Exit,
    /// Advance to the next task, drawing a new one at the frontier
    Next,
    /// Step back to the previously shown task
    Previous,
    /// Open the current task's solution
    ShowSolution,
    /// Jump forward to the newest task shown so far
    JumpToCurrent,
    /// Switch between line input and chord input
    ToggleInput,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "e" | "exit" | "q" | "quit" => Ok(Self::Exit),
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "s" | "solution" => Ok(Self::ShowSolution),
            "c" | "current" => Ok(Self::JumpToCurrent),
            "m" | "mode" | "keys" => Ok(Self::ToggleInput),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// Which input source is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Line-based textual commands
    Line,
    /// Single-key chords
    Chord,
}

impl InputMode {
    /// The other mode
    pub fn other(self) -> Self {
        match self {
            Self::Line => Self::Chord,
            Self::Chord => Self::Line,
        }
    }
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Chord => write!(f, "chord"),
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "line" | "text" => Ok(Self::Line),
            "chord" | "keys" => Ok(Self::Chord),
            _ => Err(format!("Unknown input mode: {}. Use: line or chord", s)),
        }
    }
}

/// A source of session commands.
///
/// `next_command` blocks until the user produces input; unrecognized input
/// yields `None` so the caller can warn and re-prompt. Sources with a single
/// fixed mode return it unchanged from `toggle_mode`.
pub trait CommandSource {
    /// Read the next command, prompting as appropriate
    fn next_command(&mut self, prompt: &str) -> Result<Option<Command>>;

    /// Switch input mode where supported, returning the now-active mode
    fn toggle_mode(&mut self) -> InputMode;
}

/// Composite source holding both readers and the active mode
pub struct CommandInput {
    mode: InputMode,
    line: LineReader,
    chord: ChordReader,
}

impl CommandInput {
    pub fn new(mode: InputMode) -> Result<Self> {
        Ok(Self {
            mode,
            line: LineReader::new()?,
            chord: ChordReader::new(),
        })
    }

    /// Currently active mode
    pub fn mode(&self) -> InputMode {
        self.mode
    }
}

impl CommandSource for CommandInput {
    fn next_command(&mut self, prompt: &str) -> Result<Option<Command>> {
        match self.mode {
            InputMode::Line => self.line.next_command(prompt),
            InputMode::Chord => self.chord.next_command(prompt),
        }
    }

    fn toggle_mode(&mut self) -> InputMode {
        self.mode = self.mode.other();
        self.mode
    }
}
