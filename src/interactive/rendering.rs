//! TUI rendering with ratatui

use super::app::{App, DefinitionState, Focus, MessageStyle};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Letter inputs
            Constraint::Min(10),   // Results + definition
            Constraint::Length(7), // Messages
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_inputs(f, app, chunks[1]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);

    render_results(f, app, main_chunks[0]);
    render_definition(f, app, main_chunks[1]);
    render_messages(f, app, chunks[3]);
    render_status(f, app, chunks[4]);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Yellow } else { Color::White };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(color))
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🐝 HONEYCOMB - Spelling Bee Solver")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(header, area);
}

fn render_inputs(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let outer = Paragraph::new(app.outer.as_str())
        .block(panel(" Outer letters (6) ", app.focus == Focus::Outer));
    f.render_widget(outer, chunks[0]);

    let center = Paragraph::new(app.center.as_str())
        .block(panel(" Center letter ", app.focus == Focus::Center));
    f.render_widget(center, chunks[1]);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let title = if let Some(status) = &app.status {
        format!(" {status} ")
    } else {
        format!(" Results ({}) ", app.results.len())
    };

    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|word| ListItem::new(format!("{word} ({})", word.chars().count())))
        .collect();

    let list = List::new(items)
        .block(panel(&title, app.focus == Focus::Results))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(app.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_definition(f: &mut Frame, app: &App, area: Rect) {
    let Some(definition) = &app.definition else {
        let hint = Paragraph::new("Select a word and press Enter to look up its definition.")
            .style(Style::default().fg(Color::Gray))
            .block(panel(" Definition ", false))
            .wrap(Wrap { trim: true });
        f.render_widget(hint, area);
        return;
    };

    let title = format!(" {} ", definition.word);
    let lines: Vec<Line> = match &definition.state {
        DefinitionState::Loading => vec![Line::from(Span::styled(
            "Loading definition...",
            Style::default().fg(Color::Gray),
        ))],
        DefinitionState::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        DefinitionState::Loaded(view) => {
            let mut lines = vec![Line::from(Span::styled(
                view.heading(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))];
            lines.extend(view.to_lines().into_iter().map(Line::from));
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(panel(&title, false))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .messages
        .iter()
        .map(|msg| {
            let color = match msg.style {
                MessageStyle::Info => Color::Cyan,
                MessageStyle::Success => Color::Green,
                MessageStyle::Error => Color::Red,
            };
            ListItem::new(msg.text.as_str()).style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items).block(panel(" Messages ", false));
    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help = match app.focus {
        Focus::Outer | Focus::Center => "TAB: switch field | ENTER: solve | ESC: quit",
        Focus::Results if app.definition.is_some() => {
            "←/→: previous/next word | ESC: close definition | TAB: edit letters"
        }
        Focus::Results => "↑/↓: select | ENTER: define | TAB: edit letters | q: quit",
    };

    let status = Paragraph::new(help)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(status, area);
}
