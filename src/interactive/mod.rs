//! Interactive TUI for solving puzzles and browsing definitions

mod app;
mod rendering;

pub use app::{
    App, Completion, DefinitionPanel, DefinitionState, Focus, Message, MessageStyle, Task,
    run_tui,
};
