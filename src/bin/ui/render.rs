//! Frame composition. `ratatui` owns the diff-against-previous-frame
//! logic this crate would otherwise have to hand-roll.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use anagram_live::history::Field;

use super::app::{App, ColorMode, SearchOutcomeSummary};

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    let state = app.history.current();
    draw_field(frame, chunks[0], "input", &state.input, state.field == Field::Input, app.color_mode);
    draw_field(frame, chunks[1], "include", &state.include, state.field == Field::Include, app.color_mode);
    draw_field(frame, chunks[2], "exclude", &state.exclude, state.field == Field::Exclude, app.color_mode);

    draw_status(frame, chunks[3], app);
    draw_results(frame, chunks[4], app);

    if app.show_debug {
        draw_debug(frame, area, app);
    }
    if app.show_help {
        draw_help(frame, area);
    }
}

fn draw_field(frame: &mut Frame, area: Rect, title: &str, text: &str, focused: bool, mode: ColorMode) {
    let border_color = match (focused, mode) {
        (true, ColorMode::Monochrome) => Color::White,
        (true, _) => Color::Cyan,
        (false, _) => Color::DarkGray,
    };
    let block = Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(border_color));
    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.outcome {
        None => Line::from("ready"),
        Some(SearchOutcomeSummary::Empty) => Line::from("empty input"),
        Some(SearchOutcomeSummary::Shortfall { missing_count, suggestions }) => Line::from(format!(
            "include needs {missing_count} more letters, {} possible additions",
            suggestions.len()
        )),
        Some(SearchOutcomeSummary::Searching) => {
            let spinner = ["searching.", "searching..", "searching..."]
                [(app.scroll.unsigned_abs() as usize) % 3];
            let style = if app.driver.is_finished() {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let label = if app.driver.is_finished() {
                format!("{} results", app.driver.store.records.len())
            } else {
                spinner.to_string()
            };
            Line::from(Span::styled(label, style))
        }
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(SearchOutcomeSummary::Shortfall { suggestions, .. }) = &app.outcome {
        let items: Vec<ListItem> =
            suggestions.iter().take(area.height as usize).map(|s| ListItem::new(s.as_str())).collect();
        let title = format!("possible additions ({})", suggestions.len());
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, area);
        return;
    }

    let skip = app.scroll.max(0) as usize;
    let include = &app.history.current().include;
    let items: Vec<ListItem> = app
        .driver
        .store
        .records
        .iter()
        .skip(skip)
        .take(area.height as usize)
        .map(|record| {
            let mut words: Vec<&str> = Vec::with_capacity(record.words.len() + 1);
            if !include.is_empty() {
                words.push(include);
            }
            words.extend(record.words.iter().map(|&id| app.render_word(id)));
            ListItem::new(words.join(" "))
        })
        .collect();
    let title = format!("results ({})", app.driver.store.records.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_debug(frame: &mut Frame, area: Rect, app: &App) {
    let width = 36.min(area.width);
    let height = 5.min(area.height);
    let popup = Rect { x: area.x + area.width.saturating_sub(width), y: area.y, width, height };
    let lines = vec![
        Line::from(format!("results: {}", app.driver.store.records.len())),
        Line::from(format!("finished: {}", app.driver.is_finished())),
        Line::from(format!("scroll: {}", app.scroll)),
        Line::from(format!("undo depth: {}", app.history.undo_depth())),
    ];
    let block = Block::default().borders(Borders::ALL).title("debug");
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let width = 50.min(area.width);
    let height = 10.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let text = vec![
        Line::from("Tab / Shift+Tab   switch field"),
        Line::from("\u{2190} \u{2192}             move cursor"),
        Line::from("\u{2191} \u{2193} / wheel      scroll results"),
        Line::from("Ctrl+Z / Ctrl+Y   undo / redo"),
        Line::from("Ctrl+F            cycle color mode"),
        Line::from("Ctrl+D / F12      toggle debug info"),
        Line::from("F1 / Esc          toggle this help"),
    ];
    let block = Block::default().borders(Borders::ALL).title("help");
    frame.render_widget(ratatui::widgets::Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}
