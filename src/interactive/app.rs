//! TUI application state and logic

use crate::solver::{Query, Round, Solver, SolverError};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io;

/// State snapshot for undo functionality
#[derive(Clone)]
pub struct StateSnapshot {
    solver: Solver,
    round: Option<Round>,
    round_number: usize,
    pending: VecDeque<Query>,
    history: Vec<HistoryEntry>,
    input_mode: InputMode,
}

/// Application state
pub struct App {
    /// Solver as first constructed, for restarts
    initial: Solver,
    pub solver: Solver,
    pub round: Option<Round>,
    pub round_number: usize,
    /// Queries of the current round still to ask
    pub pending: VecDeque<Query>,
    pub history: Vec<HistoryEntry>,
    pub messages: Vec<Message>,
    pub input_mode: InputMode,
    pub should_quit: bool,
    pub undo_stack: Vec<StateSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Answering,
    Solved,
    /// Contradiction or no informative query left
    Stuck,
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub round: usize,
    pub query: Query,
    pub result: bool,
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    #[must_use]
    pub fn new(solver: Solver) -> Self {
        let mut app = Self {
            initial: solver.clone(),
            solver,
            round: None,
            round_number: 0,
            pending: VecDeque::new(),
            history: Vec::new(),
            messages: Vec::new(),
            input_mode: InputMode::Answering,
            should_quit: false,
            undo_stack: Vec::new(),
        };
        app.add_message(
            &format!(
                "{} possible assignments. Answer 1 (check) or 0 (cross).",
                app.solver.belief().len()
            ),
            MessageStyle::Info,
        );
        app.plan_next_round();
        app
    }

    /// The query awaiting an answer
    #[must_use]
    pub fn current_query(&self) -> Option<Query> {
        if self.input_mode == InputMode::Answering {
            self.pending.front().copied()
        } else {
            None
        }
    }

    /// Bits of information gained so far
    #[must_use]
    pub fn bits_gained(&self) -> f64 {
        let remaining = self.solver.belief().len().max(1) as f64;
        (self.solver.initial_size() as f64).log2() - remaining.log2()
    }

    /// Bits needed to single out one initial assignment
    #[must_use]
    pub fn total_bits(&self) -> f64 {
        (self.solver.initial_size() as f64).log2()
    }

    fn plan_next_round(&mut self) {
        self.pending.clear();
        self.round = None;
        match self.solver.plan_round() {
            Ok(Some(round)) => {
                self.round_number += 1;
                self.pending = round.queries().into();
                self.round = Some(round);
                self.input_mode = InputMode::Answering;
            }
            Ok(None) => self.finish(),
            Err(err) => self.stuck(&err),
        }
    }

    fn finish(&mut self) {
        self.input_mode = InputMode::Solved;
        if let Some(solution) = self.solver.solution() {
            let text = format!(
                "Solved in {} rounds: code {} (criteria {})",
                self.round_number,
                solution.code(),
                solution.hidden()
            );
            self.add_message(&text, MessageStyle::Success);
        }
        self.add_message("Press 'r' to restart or 'q' to quit.", MessageStyle::Info);
    }

    fn stuck(&mut self, err: &SolverError) {
        self.input_mode = InputMode::Stuck;
        self.add_message(&err.to_string(), MessageStyle::Error);
        self.add_message("Press 'u' to undo or 'r' to restart.", MessageStyle::Info);
    }

    /// Drop queries the current belief state already answers
    fn advance_pending(&mut self) {
        if self.solver.solved() {
            self.finish();
            return;
        }
        while let Some(&query) = self.pending.front() {
            if self.solver.check_should_query(query.code, query.validator) {
                return;
            }
            self.pending.pop_front();
            self.add_message(
                &format!("Skipped {query}: answer already known"),
                MessageStyle::Info,
            );
        }
        self.plan_next_round();
    }

    fn snapshot(&mut self) {
        self.undo_stack.push(StateSnapshot {
            solver: self.solver.clone(),
            round: self.round.clone(),
            round_number: self.round_number,
            pending: self.pending.clone(),
            history: self.history.clone(),
            input_mode: self.input_mode,
        });
    }

    /// Record an answer to the current query
    pub fn answer(&mut self, result: bool) {
        let Some(query) = self.current_query() else {
            return;
        };
        self.snapshot();

        let before = self.solver.belief().len();
        let outcome = self.solver.update_observation(query.code, query.validator, result);
        self.pending.pop_front();
        self.history.push(HistoryEntry {
            round: self.round_number,
            query,
            result,
            before,
            after: self.solver.belief().len(),
        });

        match outcome {
            Ok(remaining) => {
                self.add_message(
                    &format!("{remaining} possible assignments remain"),
                    MessageStyle::Info,
                );
                self.advance_pending();
            }
            Err(err) => self.stuck(&err),
        }
    }

    /// Skip the current query without answering it
    pub fn skip(&mut self) {
        let Some(query) = self.current_query() else {
            return;
        };
        self.snapshot();
        self.pending.pop_front();
        self.add_message(&format!("Skipped {query}"), MessageStyle::Info);
        self.advance_pending();
    }

    pub fn undo_last(&mut self) {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.solver = snapshot.solver;
            self.round = snapshot.round;
            self.round_number = snapshot.round_number;
            self.pending = snapshot.pending;
            self.history = snapshot.history;
            self.input_mode = snapshot.input_mode;
            self.add_message("Undone!", MessageStyle::Info);
        } else {
            self.add_message("Nothing to undo!", MessageStyle::Error);
        }
    }

    pub fn restart(&mut self) {
        self.solver = self.initial.clone();
        self.round_number = 0;
        self.history.clear();
        self.undo_stack.clear();
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
        self.plan_next_round();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('u') => self.undo_last(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('1' | 'y') => self.answer(true),
            KeyCode::Char('0' | 'n') => self.answer(false),
            KeyCode::Char('s') => self.skip(),
            _ => {}
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
