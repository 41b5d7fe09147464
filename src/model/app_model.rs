//! Main application model with state management

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::content::{preview, FullResultsState, ResultSet, SearchState, SummaryCard, PREVIEW_LIMIT};
use super::types::{ActiveSection, Navigation, Route, UiState};

/// Main application model containing all state.
///
/// Cloning is cheap; every clone shares the same state.
#[derive(Clone)]
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub search: Arc<Mutex<SearchState>>,
    pub full_results: Arc<Mutex<FullResultsState>>,
    pub navigation: Arc<Mutex<Navigation>>,
    /// Cards opened so far, keyed by their route path
    detail_cards: Arc<Mutex<HashMap<String, SummaryCard>>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            search: Arc::new(Mutex::new(SearchState::default())),
            full_results: Arc::new(Mutex::new(FullResultsState::default())),
            navigation: Arc::new(Mutex::new(Navigation::default())),
            detail_cards: Arc::new(Mutex::new(HashMap::new())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Search bar
    // ========================================================================

    pub async fn get_search_state(&self) -> SearchState {
        self.search.lock().await.clone()
    }

    pub async fn set_search_query(&self, query: String) {
        let mut state = self.search.lock().await;
        state.query = query;
        state.preview_selected = None;
    }

    pub async fn navigate_search_category(&self, forward: bool) {
        let mut state = self.search.lock().await;
        state.category = if forward { state.category.next() } else { state.category.prev() };
        state.preview_selected = None;
    }

    pub async fn preview_move_down(&self) {
        let mut state = self.search.lock().await;
        let count = state.results.len_of(state.category).min(PREVIEW_LIMIT);
        if count == 0 {
            return;
        }
        state.preview_selected = Some(match state.preview_selected {
            None => 0,
            Some(i) => (i + 1).min(count - 1),
        });
    }

    pub async fn preview_move_up(&self) {
        let mut state = self.search.lock().await;
        state.preview_selected = match state.preview_selected {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub async fn get_selected_preview_card(&self) -> Option<SummaryCard> {
        let state = self.search.lock().await;
        let index = state.preview_selected?;
        preview(&state.results, state.category).into_iter().nth(index)
    }

    // ========================================================================
    // Full results page
    // ========================================================================

    pub async fn get_full_results(&self) -> FullResultsState {
        self.full_results.lock().await.clone()
    }

    pub async fn begin_full_results(&self, query: &str) {
        let mut state = self.full_results.lock().await;
        if state.query != query {
            state.selected_index = 0;
        }
        state.query = query.to_string();
        state.is_loading = true;
    }

    /// Store results for `query` unless the page has moved on to another query
    pub async fn finish_full_results(&self, query: &str, results: ResultSet) -> bool {
        let mut state = self.full_results.lock().await;
        if state.query != query {
            return false;
        }
        state.results = results;
        state.is_loading = false;
        let count = state.results.len_of(state.category);
        state.selected_index = state.selected_index.min(count.saturating_sub(1));
        true
    }

    pub async fn navigate_full_results_category(&self, forward: bool) {
        let mut state = self.full_results.lock().await;
        state.category = if forward { state.category.next() } else { state.category.prev() };
        state.selected_index = 0;
    }

    pub async fn content_move_up(&self) {
        let mut state = self.full_results.lock().await;
        state.selected_index = state.selected_index.saturating_sub(1);
    }

    pub async fn content_move_down(&self) {
        let mut state = self.full_results.lock().await;
        let count = state.results.len_of(state.category);
        if state.selected_index + 1 < count {
            state.selected_index += 1;
        }
    }

    pub async fn get_selected_result_card(&self) -> Option<SummaryCard> {
        let state = self.full_results.lock().await;
        state
            .results
            .cards(state.category, state.selected_index + 1)
            .into_iter()
            .nth(state.selected_index)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub async fn current_route(&self) -> Route {
        self.navigation.lock().await.current.clone()
    }

    /// Move to `route`; returns the route that was left
    pub async fn push_route(&self, route: Route) -> Route {
        self.navigation.lock().await.push(route)
    }

    /// Go back one step; returns `(left, entered)`
    pub async fn pop_route(&self) -> Option<(Route, Route)> {
        self.navigation.lock().await.pop()
    }

    pub async fn remember_card(&self, route: &Route, card: SummaryCard) {
        self.detail_cards.lock().await.insert(route.path(), card);
    }

    pub async fn card_for(&self, route: &Route) -> Option<SummaryCard> {
        self.detail_cards.lock().await.get(&route.path()).cloned()
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
