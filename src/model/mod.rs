//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (sections, categories, routes, UI state)
//! - `content`: Search payload schema, result sets and preview selection
//! - `service_client`: HTTP client for the backend and music services
//! - `app_model`: Main application model with state management methods

mod types;
mod content;
mod service_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ActiveSection, Route, SearchCategory, UiState};

pub use content::{preview, FullResultsState, ResultSet, SearchResponse, SearchState, SummaryCard};

#[cfg(test)]
pub use content::{Album, Artist, Page, Track};

pub use service_client::{SearchSource, ServiceClient, ServiceError, Session};

pub use app_model::AppModel;
