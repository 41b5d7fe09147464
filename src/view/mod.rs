//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists, spinner)
//! - `layout`: Top bar and footer
//! - `search_bar`: Search dropdown with preview cards
//! - `content`: Main content area (home, full results, detail)
//! - `overlays`: Help popup

mod utils;
mod layout;
mod search_bar;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ActiveSection, FullResultsState, Route, SearchState, SummaryCard, UiState};

/// Everything one frame needs, snapshotted from the model
pub struct ViewState {
    pub ui_state: UiState,
    pub search: SearchState,
    pub full_results: FullResultsState,
    pub route: Route,
    pub detail: Option<SummaryCard>,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + location
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        let search_input =
            layout::render_top_bar(frame, chunks[0], &state.ui_state, &state.search, &state.route);

        content::render_main_content(
            frame,
            chunks[1],
            &state.ui_state,
            &state.route,
            &state.full_results,
            state.detail.as_ref(),
        );

        layout::render_footer(frame, chunks[2], &state.ui_state);

        // Dropdown overlays the content while the search bar has focus
        if state.ui_state.active_section == ActiveSection::Search {
            search_bar::render_dropdown(frame, search_input, &state.search);
        }

        if state.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
