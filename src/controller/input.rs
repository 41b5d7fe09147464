//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Route};
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = &self.model;

        // Ctrl+C / Ctrl+Q quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Help popup blocks everything else
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Enter) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab => model.cycle_section().await,
                KeyCode::Enter => self.submit_search().await,
                KeyCode::Esc => self.clear_search().await,
                KeyCode::Backspace => self.backspace_search().await,
                KeyCode::Left => model.navigate_search_category(false).await,
                KeyCode::Right => model.navigate_search_category(true).await,
                KeyCode::Down => model.preview_move_down().await,
                KeyCode::Up => model.preview_move_up().await,
                KeyCode::F(1) => model.show_help_popup().await,
                KeyCode::Char(c) => self.append_to_search(c).await,
                _ => {}
            }
            return Ok(());
        }

        // MainContent section
        let on_results_page = matches!(model.current_route().await, Route::SearchResults { .. });
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
            KeyCode::Tab | KeyCode::BackTab => model.cycle_section().await,
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => model.show_help_popup().await,
            KeyCode::Backspace | KeyCode::Esc => self.navigate_back().await,
            KeyCode::Up if on_results_page => model.content_move_up().await,
            KeyCode::Down if on_results_page => model.content_move_down().await,
            KeyCode::Left if on_results_page => model.navigate_full_results_category(false).await,
            KeyCode::Right if on_results_page => model.navigate_full_results_category(true).await,
            KeyCode::Enter if on_results_page => {
                if let Some(card) = model.get_selected_result_card().await {
                    self.open_card(card).await;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
