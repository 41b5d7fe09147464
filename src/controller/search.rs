//! Search bar: debounced query handling and result aggregation

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::model::{
    ActiveSection, ResultSet, Route, SearchResponse, SearchSource, SearchState, ServiceError,
};
use super::AppController;

/// Bookkeeping for the latest dispatched search
#[derive(Default)]
struct Dispatch {
    generation: u64,
    in_flight: Option<CancellationToken>,
}

/// Turns settled queries into result sets.
///
/// Every dispatch gets a new generation number; an outcome is applied only
/// while its generation is still the latest one, so late responses for an
/// older query (or for a query that was reset) are dropped.
#[derive(Clone)]
pub struct SearchAggregator {
    source: Arc<dyn SearchSource>,
    state: Arc<Mutex<SearchState>>,
    dispatch: Arc<Mutex<Dispatch>>,
}

impl SearchAggregator {
    pub fn new(source: Arc<dyn SearchSource>, state: Arc<Mutex<SearchState>>) -> Self {
        Self {
            source,
            state,
            dispatch: Arc::new(Mutex::new(Dispatch::default())),
        }
    }

    pub async fn on_settled_query(&self, query: String) {
        if query.trim().is_empty() {
            self.reset().await;
            return;
        }

        let (generation, token) = self.begin_dispatch().await;
        tracing::debug!(query = %query, generation, "Performing search");

        let outcome = tokio::select! {
            _ = token.cancelled() => Err(ServiceError::Cancelled),
            result = self.source.search(&query) => result,
        };

        self.apply(generation, &query, outcome).await;
    }

    /// Drop results and invalidate anything still in flight
    pub async fn reset(&self) {
        let mut dispatch = self.dispatch.lock().await;
        dispatch.generation += 1;
        if let Some(token) = dispatch.in_flight.take() {
            token.cancel();
        }

        let mut state = self.state.lock().await;
        state.results = ResultSet::default();
        state.is_loading = false;
        state.preview_selected = None;
    }

    async fn begin_dispatch(&self) -> (u64, CancellationToken) {
        let mut dispatch = self.dispatch.lock().await;
        dispatch.generation += 1;
        if let Some(previous) = dispatch.in_flight.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        dispatch.in_flight = Some(token.clone());

        self.state.lock().await.is_loading = true;
        (dispatch.generation, token)
    }

    async fn apply(
        &self,
        generation: u64,
        query: &str,
        outcome: Result<SearchResponse, ServiceError>,
    ) {
        let mut dispatch = self.dispatch.lock().await;
        if dispatch.generation != generation {
            tracing::debug!(query, generation, latest = dispatch.generation, "Discarding stale search result");
            return;
        }
        dispatch.in_flight = None;

        let results = match outcome {
            Ok(response) => {
                let results = ResultSet::from(response);
                tracing::info!(
                    query,
                    tracks = results.tracks.len(),
                    albums = results.albums.len(),
                    artists = results.artists.len(),
                    "Search completed successfully"
                );
                results
            }
            Err(e) => {
                tracing::error!(query, error = %e, "Search failed");
                ResultSet::default()
            }
        };

        let mut state = self.state.lock().await;
        state.results = results;
        state.is_loading = false;
        state.preview_selected = None;
    }
}

impl AppController {
    /// Query changed: update it synchronously, then debounce the fetch
    pub async fn on_query_change(&self, query: String) {
        self.model.set_search_query(query.clone()).await;

        let mut debouncer = self.debouncer.lock().await;
        if query.trim().is_empty() {
            debouncer.cancel();
            drop(debouncer);
            self.aggregator.reset().await;
            return;
        }

        let aggregator = self.aggregator.clone();
        debouncer.schedule(move || async move {
            aggregator.on_settled_query(query).await;
        });
    }

    pub async fn append_to_search(&self, c: char) {
        let mut query = self.model.get_search_state().await.query;
        query.push(c);
        self.on_query_change(query).await;
    }

    pub async fn backspace_search(&self) {
        let mut query = self.model.get_search_state().await.query;
        query.pop();
        self.on_query_change(query).await;
    }

    pub async fn clear_search(&self) {
        self.on_query_change(String::new()).await;
    }

    /// Clear query, timer and results without touching the route
    pub async fn reset_search(&self) {
        let mut debouncer = self.debouncer.lock().await;
        if debouncer.is_pending() {
            tracing::debug!("Dropping pending search");
        }
        debouncer.cancel();
        drop(debouncer);
        self.model.set_search_query(String::new()).await;
        self.aggregator.reset().await;
    }

    /// "See all": open the full results page for the current query
    pub async fn see_all_results(&self) {
        let query = self.model.get_search_state().await.query;
        self.navigate(Route::search(&query)).await;
        // Navigating to the same path does not fire the reset hook
        self.reset_search().await;
        self.model.set_active_section(ActiveSection::MainContent).await;
    }

    /// Enter in the search bar: open the highlighted card, or see all
    pub async fn submit_search(&self) {
        match self.model.get_selected_preview_card().await {
            Some(card) => self.open_card(card).await,
            None => self.see_all_results().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::controller::test_support::{response_for, track, Scripted, ScriptedSource};
    use crate::model::Page;

    fn aggregator(source: &ScriptedSource) -> (SearchAggregator, Arc<Mutex<SearchState>>) {
        let state = Arc::new(Mutex::new(SearchState::default()));
        (SearchAggregator::new(Arc::new(source.clone()), state.clone()), state)
    }

    #[tokio::test]
    async fn empty_query_never_dispatches() {
        let source = ScriptedSource::new();
        let (aggregator, state) = aggregator(&source);
        state.lock().await.results.tracks.push(track("old", "old"));

        aggregator.on_settled_query("   ".to_string()).await;

        assert!(source.calls().await.is_empty());
        let state = state.lock().await;
        assert_eq!(state.results, ResultSet::default());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn response_is_applied_verbatim() {
        let source = ScriptedSource::new().reply("beatles", 0, Scripted::Reply(response_for("beatles")));
        let (aggregator, state) = aggregator(&source);

        aggregator.on_settled_query("beatles".to_string()).await;

        let state = state.lock().await;
        assert_eq!(state.results, ResultSet::from(response_for("beatles")));
        assert!(!state.is_loading);
        assert_eq!(source.calls().await, ["beatles"]);
    }

    #[tokio::test]
    async fn raw_query_is_sent_untrimmed() {
        let source = ScriptedSource::new();
        let (aggregator, _state) = aggregator(&source);

        aggregator.on_settled_query(" abbey ".to_string()).await;

        assert_eq!(source.calls().await, [" abbey "]);
    }

    #[tokio::test]
    async fn missing_keys_give_empty_triple() {
        let source = ScriptedSource::new().reply("x", 0, Scripted::Reply(SearchResponse::default()));
        let (aggregator, state) = aggregator(&source);

        aggregator.on_settled_query("x".to_string()).await;

        assert_eq!(state.lock().await.results, ResultSet::default());
    }

    #[tokio::test]
    async fn failures_fall_back_to_empty_results() {
        let source = ScriptedSource::new()
            .reply("good", 0, Scripted::Reply(response_for("good")))
            .reply("bad-status", 0, Scripted::Status(500))
            .reply("bad-body", 0, Scripted::Garbage);
        let (aggregator, state) = aggregator(&source);

        for failing in ["bad-status", "bad-body"] {
            aggregator.on_settled_query("good".to_string()).await;
            assert!(!state.lock().await.results.is_empty());

            aggregator.on_settled_query(failing.to_string()).await;
            let state = state.lock().await;
            assert_eq!(state.results, ResultSet::default());
            assert!(!state.is_loading);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn loading_spans_the_request() {
        let source = ScriptedSource::new().reply("slow", 300, Scripted::Reply(response_for("slow")));
        let (aggregator, state) = aggregator(&source);

        let task = tokio::spawn({
            let aggregator = aggregator.clone();
            async move { aggregator.on_settled_query("slow".to_string()).await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(state.lock().await.is_loading);

        task.await.unwrap();
        assert!(!state.lock().await.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn latest_dispatch_wins_over_late_response() {
        // "abbey" resolves after "abbey road" was dispatched and resolved
        let source = ScriptedSource::new()
            .reply("abbey", 500, Scripted::Reply(response_for("abbey")))
            .reply("abbey road", 50, Scripted::Reply(response_for("abbey road")));
        let (aggregator, state) = aggregator(&source);

        let first = tokio::spawn({
            let aggregator = aggregator.clone();
            async move { aggregator.on_settled_query("abbey".to_string()).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        aggregator.on_settled_query("abbey road".to_string()).await;
        first.await.unwrap();

        let state = state.lock().await;
        assert_eq!(state.results, ResultSet::from(response_for("abbey road")));
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_discards_in_flight_response() {
        let source = ScriptedSource::new().reply("abbey", 300, Scripted::Reply(response_for("abbey")));
        let (aggregator, state) = aggregator(&source);

        let task = tokio::spawn({
            let aggregator = aggregator.clone();
            async move { aggregator.on_settled_query("abbey".to_string()).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        aggregator.reset().await;

        task.await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;

        let state = state.lock().await;
        assert_eq!(state.results, ResultSet::default());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn order_within_a_category_is_preserved() {
        let tracks: Vec<_> = (0..12).map(|i| track(&i.to_string(), "t")).collect();
        let response = SearchResponse {
            tracks: Some(Page { items: tracks.clone() }),
            ..Default::default()
        };
        let source = ScriptedSource::new().reply("many", 0, Scripted::Reply(response));
        let (aggregator, state) = aggregator(&source);

        aggregator.on_settled_query("many".to_string()).await;

        assert_eq!(state.lock().await.results.tracks, tracks);
    }
}
