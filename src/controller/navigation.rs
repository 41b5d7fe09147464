//! Route changes, the reset hook and the full results page

use crate::model::{ActiveSection, ResultSet, Route, SummaryCard};
use super::AppController;

impl AppController {
    pub async fn navigate(&self, route: Route) {
        let previous = self.model.push_route(route.clone()).await;
        tracing::debug!(from = %previous.path(), to = %route.path(), "Navigating");
        self.on_route_change(&previous, &route).await;
    }

    pub async fn navigate_back(&self) {
        if let Some((left, entered)) = self.model.pop_route().await {
            tracing::debug!(from = %left.path(), to = %entered.path(), "Navigating back");
            self.on_route_change(&left, &entered).await;
        }
    }

    /// Reset hook: any change of path clears the search bar.
    async fn on_route_change(&self, previous: &Route, current: &Route) {
        if previous.path() == current.path() {
            return;
        }

        self.reset_search().await;

        if let Route::SearchResults { query } = current {
            self.load_full_results(query.clone()).await;
        }
    }

    /// Issue the query again for the full, untruncated view
    pub async fn load_full_results(&self, query: String) {
        self.model.begin_full_results(&query).await;

        if query.trim().is_empty() {
            self.model.finish_full_results(&query, ResultSet::default()).await;
            return;
        }

        let source = self.source.clone();
        let model = self.model.clone();
        tokio::spawn(async move {
            let results = match source.search(&query).await {
                Ok(response) => ResultSet::from(response),
                Err(e) => {
                    tracing::error!(query = %query, error = %e, "Full results search failed");
                    ResultSet::default()
                }
            };
            if !model.finish_full_results(&query, results).await {
                tracing::debug!(query = %query, "Discarding full results for a previous query");
            }
        });
    }

    /// Open the detail page for a card
    pub async fn open_card(&self, card: SummaryCard) {
        let route = Route::detail(card.category, &card.id);
        self.model.remember_card(&route, card).await;
        self.navigate(route).await;
        self.model.set_active_section(ActiveSection::MainContent).await;
    }
}
