//! TUI application state and logic
//!
//! State changes are plain methods returning the background work to start,
//! so the key handling can be exercised without a terminal.

use crate::commands::{SolveConfig, SolveResult, define_word, solve_puzzle};
use crate::core::PuzzleSpec;
use crate::definitions::DefinitionService;
use crate::output::DefinitionView;
use crate::wordlists::WordListCache;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// Which widget receives typed keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Outer,
    Center,
    Results,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionState {
    Loading,
    Loaded(DefinitionView),
    Failed(String),
}

/// The definition pane for the selected word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionPanel {
    pub word: String,
    pub state: DefinitionState,
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

/// Background work requested by a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Solve { generation: u64, outer: String, center: String },
    Define { word: String },
}

/// Completed background work
#[derive(Debug)]
pub enum Completion {
    Solved {
        generation: u64,
        result: std::result::Result<SolveResult, String>,
    },
    Defined {
        word: String,
        result: std::result::Result<DefinitionView, String>,
    },
}

/// Application state
pub struct App {
    pub outer: String,
    pub center: String,
    pub focus: Focus,
    pub results: Vec<String>,
    pub selected: Option<usize>,
    pub definition: Option<DefinitionPanel>,
    pub status: Option<String>,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    generation: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outer: String::new(),
            center: String::new(),
            focus: Focus::Outer,
            results: Vec::new(),
            selected: None,
            definition: None,
            status: None,
            messages: vec![Message {
                text: "Type the six outer letters, TAB, then the center letter and Enter."
                    .to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
            generation: 0,
        }
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

    /// Validate the inputs and, when they form a puzzle, request a solve
    ///
    /// Invalid input is reported immediately and clears the result list.
    pub fn request_solve(&mut self) -> Option<Task> {
        // Any solve still in flight belongs to the previous input
        self.generation += 1;
        if let Err(e) = PuzzleSpec::validate(&self.outer, &self.center) {
            self.status = None;
            self.clear_results();
            self.add_message(&e.to_string(), MessageStyle::Error);
            return None;
        }

        self.status = Some("Loading dictionary...".to_string());
        Some(Task::Solve {
            generation: self.generation,
            outer: self.outer.clone(),
            center: self.center.clone(),
        })
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.selected = None;
        self.definition = None;
    }

    /// Apply a finished solve; results from superseded requests are dropped
    pub fn apply_solve(&mut self, generation: u64, result: std::result::Result<SolveResult, String>) {
        if generation != self.generation {
            return;
        }
        self.status = None;
        self.clear_results();

        match result {
            Ok(solved) => {
                let summary = solved.summary();
                self.results = solved.words;
                if !self.results.is_empty() {
                    self.selected = Some(0);
                    self.focus = Focus::Results;
                }
                self.add_message(&summary, MessageStyle::Success);
            }
            Err(message) => self.add_message(&message, MessageStyle::Error),
        }
    }

    /// Show the definition pane for a result and request its lookup
    pub fn open_definition(&mut self, index: usize) -> Option<Task> {
        let word = self.results.get(index)?.clone();
        self.selected = Some(index);
        self.definition = Some(DefinitionPanel {
            word: word.clone(),
            state: DefinitionState::Loading,
        });
        Some(Task::Define { word })
    }

    /// Step to the previous or next result, clamped to the list
    pub fn navigate(&mut self, delta: isize) -> Option<Task> {
        let current = self.selected?;
        let next = current.checked_add_signed(delta)?;
        if next >= self.results.len() {
            return None;
        }

        if self.definition.is_some() {
            self.open_definition(next)
        } else {
            self.selected = Some(next);
            None
        }
    }

    /// Apply a finished lookup unless the pane has moved to another word
    pub fn apply_definition(&mut self, word: &str, result: std::result::Result<DefinitionView, String>) {
        let Some(panel) = self.definition.as_mut() else {
            return;
        };
        if panel.word != word {
            return;
        }
        panel.state = match result {
            Ok(view) => DefinitionState::Loaded(view),
            Err(message) => DefinitionState::Failed(message),
        };
    }

    pub fn close_definition(&mut self) {
        self.definition = None;
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Outer => Focus::Center,
            Focus::Center if self.results.is_empty() => Focus::Outer,
            Focus::Center => Focus::Results,
            Focus::Results => Focus::Outer,
        };
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Outer => Some(&mut self.outer),
            Focus::Center => Some(&mut self.center),
            Focus::Results => None,
        }
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Task> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Tab => {
                self.cycle_focus();
                None
            }
            KeyCode::Esc => {
                if self.definition.is_some() {
                    self.close_definition();
                } else {
                    self.should_quit = true;
                }
                None
            }
            KeyCode::Enter => match self.focus {
                Focus::Results => self.selected.and_then(|i| self.open_definition(i)),
                Focus::Outer | Focus::Center => self.request_solve(),
            },
            KeyCode::Left | KeyCode::Up if self.focus == Focus::Results => self.navigate(-1),
            KeyCode::Right | KeyCode::Down if self.focus == Focus::Results => self.navigate(1),
            KeyCode::Char('q') if self.focus == Focus::Results => {
                self.should_quit = true;
                None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.input_mut() {
                    input.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.input_mut() {
                    input.pop();
                }
                None
            }
            _ => None,
        }
    }
}

/// Start a task on the runtime; its completion arrives on `tx`
fn spawn_task(
    task: Task,
    words: &Arc<WordListCache>,
    definitions: &Arc<DefinitionService>,
    tx: &Sender<Completion>,
) {
    let tx = tx.clone();
    match task {
        Task::Solve {
            generation,
            outer,
            center,
        } => {
            let words = Arc::clone(words);
            tokio::spawn(async move {
                let config = SolveConfig::new(outer, center);
                let result = solve_puzzle(&config, &words)
                    .await
                    .map_err(|e| e.to_string());
                // The receiver is gone only when the UI has quit
                let _ = tx.send(Completion::Solved { generation, result });
            });
        }
        Task::Define { word } => {
            let definitions = Arc::clone(definitions);
            tokio::spawn(async move {
                let result = define_word(&definitions, &word)
                    .await
                    .map(|found| DefinitionView::from_entries(&found.word, &found.entries))
                    .map_err(|e| e.to_string());
                let _ = tx.send(Completion::Defined { word, result });
            });
        }
    }
}

/// Run the TUI application
///
/// Must be called from inside a Tokio runtime; lookups run as tasks on it
/// while this thread drives the terminal.
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(
    app: App,
    words: Arc<WordListCache>,
    definitions: Arc<DefinitionService>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, &words, &definitions);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    words: &Arc<WordListCache>,
    definitions: &Arc<DefinitionService>,
) -> Result<()> {
    let (tx, rx): (Sender<Completion>, Receiver<Completion>) = mpsc::channel();

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        while let Ok(done) = rx.try_recv() {
            match done {
                Completion::Solved { generation, result } => app.apply_solve(generation, result),
                Completion::Defined { word, result } => app.apply_definition(&word, result),
            }
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(task) = app.handle_key(key) {
                spawn_task(task, words, definitions, &tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
