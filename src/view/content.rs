//! Main content area rendering (home, full results, detail pages)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    ActiveSection, FullResultsState, Route, SearchCategory, SummaryCard, UiState,
};
use super::search_bar::card_line;
use super::utils::{calculate_num_width, render_scrollable_list};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    route: &Route,
    full_results: &FullResultsState,
    detail: Option<&SummaryCard>,
) {
    let is_focused = ui_state.active_section == ActiveSection::MainContent;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    match route {
        Route::Home => {
            let content = Paragraph::new("Type in the search bar to discover music\n\nResults appear as you type\nUse ←/→ to switch between tracks, albums and artists\nPress Enter to see all results")
                .style(Style::default().fg(Color::DarkGray))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Discover ")
                        .padding(Padding::horizontal(1))
                        .border_style(border_style),
                );
            frame.render_widget(content, area);
        }
        Route::SearchResults { .. } => {
            render_full_results(frame, area, full_results, is_focused);
        }
        Route::Track { id } | Route::Album { id } | Route::Artist { id } => {
            render_detail(frame, area, id, detail, border_style);
        }
    }
}

fn render_full_results(frame: &mut Frame, area: Rect, state: &FullResultsState, is_focused: bool) {
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Content ")
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs
            Constraint::Min(0),    // Results list
        ])
        .split(area);

    let tabs_content: Vec<Span> = SearchCategory::ALL
        .iter()
        .flat_map(|&category| {
            let style = if category == state.category {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![
                Span::styled(format!(" {} ({}) ", category.label(), state.results.len_of(category)), style),
                Span::raw("  "),
            ]
        })
        .collect();

    let tabs = Paragraph::new(Line::from(tabs_content)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results for \"{}\" ", state.query))
            .border_style(border_style),
    );
    frame.render_widget(tabs, chunks[0]);

    let cards = state.results.cards(state.category, usize::MAX);
    if cards.is_empty() {
        let empty = Paragraph::new("  No results found")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let num_width = calculate_num_width(cards.len());
    let content_width = chunks[1].width.saturating_sub(4) as usize;
    let card_width = content_width.saturating_sub(num_width + 1);

    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let style = if i == state.selected_index && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == state.selected_index {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(format!("{:<width$} ", i + 1, width = num_width), Style::default().fg(Color::DarkGray)),
                Span::raw(card_line(card, card_width)),
            ]);
            ListItem::new(line).style(style)
        })
        .collect();

    let list_block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, chunks[1], items, state.selected_index, list_block);
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    id: &str,
    card: Option<&SummaryCard>,
    border_style: Style,
) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = match card {
        Some(card) => {
            let mut lines = vec![
                Line::from(Span::styled(card.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
                Line::raw(""),
            ];
            if !card.secondary.is_empty() {
                lines.push(Line::from(vec![Span::styled("Artists: ", label), Span::raw(card.secondary.clone())]));
            }
            if let Some(year) = &card.release_year {
                lines.push(Line::from(vec![Span::styled("Released: ", label), Span::raw(year.clone())]));
            }
            lines.push(Line::from(vec![
                Span::styled("Image: ", label),
                Span::raw(card.image_url.clone().unwrap_or_else(|| "-".to_string())),
            ]));
            lines.push(Line::from(vec![Span::styled("ID: ", label), Span::raw(card.id.clone())]));
            lines
        }
        None => vec![Line::raw(format!("No details loaded for {}", id))],
    };

    let title = match card.map(|c| c.category) {
        Some(SearchCategory::Tracks) => " Track ",
        Some(SearchCategory::Albums) => " Album ",
        Some(SearchCategory::Artists) => " Artist ",
        None => " Details ",
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(detail, area);
}
