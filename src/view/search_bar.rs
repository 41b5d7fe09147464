//! Search bar dropdown: category tabs, preview cards and "see all"

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{preview, SearchCategory, SearchState, SummaryCard};
use super::utils::truncate_string;

/// Height of the dropdown for `cards` preview rows
fn dropdown_height(cards: usize) -> u16 {
    // tabs (3) + cards + borders (2) + "see all" line
    3 + cards as u16 + 2 + 1
}

/// Draw the dropdown under `anchor` (the search input).
///
/// Nothing is drawn while a search is loading or when the selected
/// category has no results.
pub fn render_dropdown(frame: &mut Frame, anchor: Rect, search: &SearchState) {
    if search.is_loading {
        return;
    }
    let cards = preview(&search.results, search.category);
    if cards.is_empty() {
        return;
    }

    let screen = frame.area();
    let top = anchor.y + anchor.height;
    let height = dropdown_height(cards.len()).min(screen.height.saturating_sub(top));
    if height < 4 {
        return;
    }
    let area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height,
    };
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs
            Constraint::Min(0),    // Cards + see all
        ])
        .split(area);

    frame.render_widget(render_tabs(search), chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let mut items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| card_item(card, search.preview_selected == Some(i), width))
        .collect();
    items.push(
        ListItem::new("» See all results")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(Color::Green))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(list, chunks[1]);
}

fn render_tabs(search: &SearchState) -> Paragraph<'static> {
    let spans: Vec<Span> = SearchCategory::ALL
        .iter()
        .flat_map(|&category| {
            let style = if category == search.category {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let count = search.results.len_of(category);
            vec![
                Span::styled(format!(" {} ({}) ", category.label(), count), style),
                Span::raw("  "),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Results (←/→ to switch) ")
            .border_style(Style::default().fg(Color::Green))
            .style(Style::default().bg(Color::Black)),
    )
}

/// One compact card: name, secondary label and an image marker
pub(super) fn card_item(card: &SummaryCard, selected: bool, width: usize) -> ListItem<'static> {
    let style = if selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(card_line(card, width)).style(style)
}

pub(super) fn card_line(card: &SummaryCard, width: usize) -> String {
    let image_marker = if card.image_url.is_some() { "▣" } else { "□" };
    let secondary = match (&card.release_year, card.secondary.is_empty()) {
        (Some(year), true) => year.clone(),
        (Some(year), false) => format!("{} · {}", card.secondary, year),
        (None, _) => card.secondary.clone(),
    };

    let text_width = width.saturating_sub(2);
    if secondary.is_empty() {
        return format!("{} {}", image_marker, truncate_string(&card.name, text_width));
    }

    let name_width = (text_width * 55) / 100;
    let secondary_width = text_width.saturating_sub(name_width).saturating_sub(3);
    format!(
        "{} {}   {}",
        image_marker,
        truncate_string(&card.name, name_width),
        truncate_string(&secondary, secondary_width)
    )
}
