//! Layout rendering (top bar, footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, Route, SearchState, UiState};
use super::utils::spinner_frame;

/// Draw the search input and location box; returns the input's area
pub fn render_top_bar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    search: &SearchState,
    route: &Route,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(30), // Current route
        ])
        .split(area);

    let focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = if search.query.is_empty() {
        vec![Span::styled("Search for music...", Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::styled(search.query.clone(), search_style)]
    };
    if search.is_loading {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            spinner_frame(ui_state.started_at.elapsed()),
            Style::default().fg(Color::Yellow),
        ));
    }

    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(if focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, chunks[0]);

    let location = Paragraph::new(route.path())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Location "));
    frame.render_widget(location, chunks[1]);

    chunks[0]
}

pub fn render_footer(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hint = match ui_state.active_section {
        ActiveSection::Search => {
            "Type to search · ←/→ category · ↓ select · Enter open/see all · Esc clear · Tab focus · F1 help"
        }
        ActiveSection::MainContent => {
            "↑/↓ select · ←/→ category · Enter open · Esc back · / search · h help · q quit"
        }
    };
    let footer = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}
