//! TUI rendering with ratatui
//!
//! Panels for the proposed round, the belief state, history and progress.

use super::app::{App, InputMode, MessageStyle};
use crate::solver::Game;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Show individual assignments when at most this many remain
const ASSIGNMENT_LIMIT: usize = 12;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let ids = app
        .solver
        .game()
        .ids()
        .iter()
        .enumerate()
        .map(|(position, id)| format!("{}={id}", Game::label(position)))
        .collect::<Vec<_>>()
        .join(" ");

    let header = Paragraph::new(format!("TURING MACHINE SOLVER  |  {ids}"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Current round
            Constraint::Percentage(35), // Assignments
            Constraint::Percentage(30), // History
        ])
        .split(area);

    render_round(f, app, chunks[0]);
    render_assignments(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
}

fn render_round(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Round {} ", app.round_number))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(round) = &app.round else {
        f.render_widget(Paragraph::new("No round planned").block(block), area);
        return;
    };

    let current = app.current_query();
    let mut content = vec![
        Line::from(vec![
            Span::raw("Code: "),
            Span::styled(
                round.code.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   Expected: {:.3} bits", round.entropy)),
        ]),
        Line::from(""),
    ];

    for query in round.queries() {
        let pending = app.pending.contains(&query);
        let (marker, style) = if Some(query) == current {
            let style = Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            ("▶", style)
        } else if pending {
            (" ", Style::default().fg(Color::White))
        } else {
            ("✓", Style::default().fg(Color::DarkGray))
        };
        let criteria = app
            .solver
            .game()
            .validator(query.validator)
            .criteria()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ");
        content.push(Line::from(vec![
            Span::styled(format!("{marker} {query}  "), style),
            Span::styled(criteria, Style::default().fg(Color::Cyan)),
        ]));
    }

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_assignments(f: &mut Frame, app: &App, area: Rect) {
    let belief = app.solver.belief();
    let content = if belief.is_empty() {
        vec![Line::from(Span::styled(
            "No assignment fits the answers",
            Style::default().fg(Color::Red),
        ))]
    } else if belief.len() <= ASSIGNMENT_LIMIT {
        belief
            .iter()
            .map(|assignment| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        assignment.code().to_string(),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!("  criteria {}", assignment.hidden()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    } else {
        vec![
            Line::from(format!("{} possible assignments", belief.len())),
            Line::from(format!(
                "Information needed: {:.2} bits",
                (belief.len() as f64).log2()
            )),
        ]
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Possible Assignments ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );

    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history_items: Vec<ListItem> = app
        .history
        .iter()
        .rev()
        .take(8)
        .map(|entry| {
            let (mark, color) = if entry.result {
                ("✔", Color::Green)
            } else {
                ("✘", Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("R{}: {} ", entry.round, entry.query)),
                Span::styled(mark, Style::default().fg(color)),
                Span::raw(format!("  {} → {}", entry.before, entry.after)),
            ]))
        })
        .collect();

    let history =
        List::new(history_items).block(Block::default().title(" History ").borders(Borders::ALL));

    f.render_widget(history, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_search_progress(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_search_progress(f: &mut Frame, app: &App, area: Rect) {
    let total_bits = app.total_bits();
    let bits_gained = app.bits_gained();
    let ratio = if total_bits > 0.0 {
        (bits_gained / total_bits).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Information Gained ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{bits_gained:.2}/{total_bits:.2} bits"));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match (app.input_mode, app.current_query()) {
        (InputMode::Answering, Some(query)) => (
            " Does the code pass? 1/y = check  0/n = cross  s = skip ",
            format!("> {query}"),
            Color::Yellow,
        ),
        (InputMode::Solved, _) => (
            " Solved! | Press 'r' to restart or 'q' to quit ",
            app.solver
                .solution()
                .map(|s| format!("Code {}", s.code()))
                .unwrap_or_default(),
            Color::Green,
        ),
        _ => (
            " Stuck | Press 'u' to undo or 'r' to restart ",
            String::new(),
            Color::Red,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let status = Paragraph::new(format!("Status: {}", app.solver.status()))
        .alignment(Alignment::Center);
    f.render_widget(status, chunks[0]);

    let remaining = Paragraph::new(format!("Remaining: {}", app.solver.belief().len()))
        .alignment(Alignment::Center);
    f.render_widget(remaining, chunks[1]);

    let help = Paragraph::new("1/0: Answer | s: Skip | u: Undo | r: Restart | q: Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
