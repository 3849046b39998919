//! Session controller: the command-loop state machine
//!
//! Drives one review session as an explicit state machine. Each pass through
//! the loop ensures a task exists at the cursor (drawing one when the cursor
//! sits at the frontier), persists the session, shows the task, and applies
//! one command.

use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use deckstore::{Snapshot, SnapshotStore, TaskPair};

use crate::input::{Command, CommandSource};
use crate::session::{History, RotationPool};
use crate::viewer::{Viewer, ViewerHandle};

/// Mutable session aggregate: pools, history, cursor, and the snapshot store
pub struct Session {
    pool: RotationPool,
    history: History,
    index: usize,
    store: SnapshotStore,
}

impl Session {
    /// Fresh session over a newly discovered catalog
    pub fn fresh(catalog: Vec<TaskPair>, store: SnapshotStore) -> Self {
        Self {
            pool: RotationPool::new(catalog),
            history: History::new(),
            index: 0,
            store,
        }
    }

    /// Session restored from a snapshot
    pub fn resume(snapshot: Snapshot, store: SnapshotStore) -> Self {
        Self {
            pool: RotationPool::from_parts(snapshot.pending, snapshot.done),
            history: History::from_entries(snapshot.history),
            index: snapshot.index,
            store,
        }
    }

    /// Current cursor position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        let (pending, done) = self.pool.to_parts();
        Snapshot {
            index: self.index,
            pending,
            done,
            history: self.history.entries().to_vec(),
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.snapshot()).context("Failed to persist session progress")
    }
}

/// Controller states; the loop runs until `Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitIndex,
    Displaying,
    AwaitCommand,
    Terminated,
}

/// The command-loop state machine.
///
/// Holds at most two viewer handles at a time (the task slot and the
/// solution slot); a slot is always closed before a replacement is spawned,
/// and every transition away from the command wait releases both.
pub struct Controller<S: CommandSource> {
    session: Session,
    viewer: Viewer,
    input: S,
    task_view: Option<ViewerHandle>,
    solution_view: Option<ViewerHandle>,
}

impl<S: CommandSource> Controller<S> {
    pub fn new(session: Session, viewer: Viewer, input: S) -> Self {
        Self {
            session,
            viewer,
            input,
            task_view: None,
            solution_view: None,
        }
    }

    /// Run the session until the user exits
    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut state = State::AwaitIndex;
        while state != State::Terminated {
            state = match state {
                State::AwaitIndex => self.await_index()?,
                State::Displaying => self.display()?,
                State::AwaitCommand => self.await_command()?,
                State::Terminated => State::Terminated,
            };
        }

        self.close_viewers();
        println!("Bye!");
        Ok(())
    }

    /// Ensure a task exists at the cursor, drawing one at the frontier
    fn await_index(&mut self) -> Result<State> {
        if self.session.index == self.session.history.len() {
            let task = self.session.pool.draw(&mut rand::rng())?;
            let index = self.session.history.append(task);
            debug!(index, "drew new task");
        }
        Ok(State::Displaying)
    }

    /// Persist, then open the task artifact and print where we are
    fn display(&mut self) -> Result<State> {
        // Persist before showing anything: resuming from the snapshot is the
        // only durability guarantee, so an unsaved cursor must never be shown.
        self.session.persist()?;

        let task = self.session.history.get(self.session.index)?.clone();

        self.close_task_view();
        self.task_view = Some(self.viewer.open(&task.task)?);

        println!();
        println!(
            "{} {} of {}  {}",
            "Task".bright_cyan().bold(),
            self.session.index + 1,
            self.session.history.len(),
            format!("({}% of deck seen)", self.session.pool.percent_done()).dimmed()
        );
        info!(index = self.session.index, task = %task.task.display(), "displaying task");

        Ok(State::AwaitCommand)
    }

    /// Read one command and apply its transition
    fn await_command(&mut self) -> Result<State> {
        let Some(command) = self.input.next_command("> ")? else {
            println!(
                "{}",
                "No matching command! Use: next, previous, solution, current, mode, exit.".yellow()
            );
            return Ok(State::AwaitCommand);
        };

        match command {
            Command::Exit => {
                self.close_viewers();
                Ok(State::Terminated)
            }
            Command::Next => {
                self.close_viewers();
                self.session.index += 1;
                Ok(State::AwaitIndex)
            }
            Command::Previous => {
                if self.session.index == 0 {
                    println!("{}", "No previous task!".yellow());
                    return Ok(State::AwaitCommand);
                }
                self.close_viewers();
                self.session.index -= 1;
                Ok(State::AwaitIndex)
            }
            Command::JumpToCurrent => {
                self.close_viewers();
                self.session.index = self.session.history.len() - 1;
                Ok(State::AwaitIndex)
            }
            Command::ShowSolution => {
                let task = self.session.history.get(self.session.index)?.clone();
                if let Some(view) = self.solution_view.as_mut() {
                    view.close();
                }
                self.solution_view = Some(self.viewer.open(&task.solution)?);
                println!("{}", "Solution opened.".dimmed());
                Ok(State::AwaitCommand)
            }
            Command::ToggleInput => {
                let mode = self.input.toggle_mode();
                println!("Input mode: {}", mode.to_string().cyan());
                Ok(State::AwaitCommand)
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "RevDeck review session".bright_cyan().bold());
        println!(
            "Commands: {} {} {} {} {} {}",
            "next".yellow(),
            "previous".yellow(),
            "solution".yellow(),
            "current".yellow(),
            "mode".yellow(),
            "exit".yellow()
        );
        println!("{}", "Single letters work too: n p s c m e.".dimmed());
    }

    fn close_task_view(&mut self) {
        if let Some(mut view) = self.task_view.take() {
            view.close();
        }
    }

    fn close_viewers(&mut self) {
        self.close_task_view();
        if let Some(mut view) = self.solution_view.take() {
            view.close();
        }
    }

    /// Final session state, for inspection after the run
    pub fn into_session(self) -> Session {
        self.session
    }
}
