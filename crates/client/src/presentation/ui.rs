//! Frame layout and panel rendering with Ratatui.
use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListDirection, ListItem, Paragraph},
};
use realm_core::WorldSnapshot;

use crate::{presentation::terminal::Tui, state::AppState};

pub const MESSAGE_PANEL_HEIGHT: u16 = 5;

const EMPTY_CELL: char = '·';

pub fn render(terminal: &mut Tui, state: &AppState) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, state))?;
    Ok(())
}

pub fn render_frame(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(MESSAGE_PANEL_HEIGHT),
            Constraint::Length(2),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state);
    render_map(frame, chunks[1], state.snapshot());
    render_messages(frame, chunks[2], state);
    render_footer(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let snapshot = state.snapshot();
    let status = if state.player_alive() {
        Span::styled("alive", Style::default().fg(Color::Green))
    } else {
        Span::styled("destroyed", Style::default().fg(Color::Red))
    };

    let line = Line::from(vec![
        Span::styled(
            snapshot.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | {}x{} | things: {} | agent: ",
            snapshot.width,
            snapshot.height,
            snapshot.things.len()
        )),
        status,
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("World")),
        area,
    );
}

fn render_map(frame: &mut Frame, area: Rect, snapshot: &WorldSnapshot) {
    frame.render_widget(
        Paragraph::new(map_lines(snapshot)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// One styled line per world row.
pub fn map_lines(snapshot: &WorldSnapshot) -> Vec<Line<'static>> {
    snapshot
        .glyph_rows()
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|cell| match cell {
                    Some(thing) => {
                        let color = Color::Rgb(thing.color.r, thing.color.g, thing.color.b);
                        Span::styled(thing.glyph.to_string(), Style::default().fg(color))
                    }
                    None => Span::styled(
                        EMPTY_CELL.to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_messages(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut items: Vec<ListItem> = state
        .messages()
        .take(MESSAGE_PANEL_HEIGHT as usize)
        .map(|text| ListItem::new(text.to_string()))
        .collect();

    // Pad with empty lines to maintain consistent height
    while items.len() < MESSAGE_PANEL_HEIGHT as usize {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::raw("[hjkl/Arrows] Move | "),
        Span::raw("[q/Esc] Quit"),
    ]);
    frame.render_widget(Paragraph::new(line).block(Block::default().borders(Borders::TOP)), area);
}
