//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the search requests.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `debounce`: Cancellable delayed task for the search bar
//! - `search`: Query handling and result aggregation
//! - `navigation`: Route changes, reset hook and full results page

mod input;
mod debounce;
mod search;
mod navigation;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::model::{AppModel, SearchSource};
use debounce::Debouncer;
use search::SearchAggregator;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) source: Arc<dyn SearchSource>,
    aggregator: SearchAggregator,
    debouncer: Arc<Mutex<Debouncer>>,
}

impl AppController {
    pub fn new(model: AppModel, source: Arc<dyn SearchSource>, debounce: Duration) -> Self {
        let aggregator = SearchAggregator::new(source.clone(), model.search.clone());
        Self {
            model,
            source,
            aggregator,
            debouncer: Arc::new(Mutex::new(Debouncer::new(debounce))),
        }
    }
}
