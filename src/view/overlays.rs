//! Overlay rendering (help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const KEYBINDINGS: [(&str, &str); 11] = [
    ("Type", "Search as you type"),
    ("←/→", "Switch tracks / albums / artists"),
    ("↑/↓", "Select a result"),
    ("Enter", "Open result, or see all results"),
    ("Esc", "Clear search / go back"),
    ("Tab", "Switch focus"),
    ("/", "Focus search"),
    ("h, F1", "Toggle this help"),
    ("Backspace", "Delete / go back"),
    ("q", "Quit (outside the search bar)"),
    ("Ctrl+Q", "Quit"),
];

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let popup_height = (KEYBINDINGS.len() as u16 + 4).min(area.height.saturating_sub(2));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let key_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![Line::raw("")];
    lines.extend(KEYBINDINGS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {:<11}", key), key_style),
            Span::raw(*action),
        ])
    }));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help (Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help, popup_area);
}
