//! Core type definitions for the application

use std::time::Instant;

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Search,
        }
    }
}

/// Which result category is displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchCategory {
    #[default]
    Tracks,
    Albums,
    Artists,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 3] = [Self::Tracks, Self::Albums, Self::Artists];

    pub fn next(self) -> Self {
        match self {
            Self::Tracks => Self::Albums,
            Self::Albums => Self::Artists,
            Self::Artists => Self::Tracks,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Tracks => Self::Artists,
            Self::Albums => Self::Tracks,
            Self::Artists => Self::Albums,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tracks => "Tracks",
            Self::Albums => "Albums",
            Self::Artists => "Artists",
        }
    }
}

/// A navigable location in the app.
///
/// Routes mirror the paths of the web client so that `path()` and
/// `parse()` round-trip, e.g. `/search?query=abbey%20road`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    SearchResults { query: String },
    Track { id: String },
    Album { id: String },
    Artist { id: String },
}

impl Route {
    pub fn search(query: &str) -> Self {
        Route::SearchResults { query: query.to_string() }
    }

    pub fn detail(category: SearchCategory, id: &str) -> Self {
        let id = id.to_string();
        match category {
            SearchCategory::Tracks => Route::Track { id },
            SearchCategory::Albums => Route::Album { id },
            SearchCategory::Artists => Route::Artist { id },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::SearchResults { query } => format!("/search?query={}", urlencoding::encode(query)),
            Route::Track { id } => format!("/track/{}", id),
            Route::Album { id } => format!("/album/{}", id),
            Route::Artist { id } => format!("/artist/{}", id),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        if path == "/" || path.is_empty() {
            return Some(Route::Home);
        }

        if let Some(rest) = path.strip_prefix("/search") {
            let query = rest
                .strip_prefix('?')
                .into_iter()
                .flat_map(|params| params.split('&'))
                .find_map(|pair| pair.strip_prefix("query="))
                .map(|raw| urlencoding::decode(&raw.replace('+', " ")).map(|q| q.into_owned()))
                .transpose()
                .ok()?
                .unwrap_or_default();
            return Some(Route::SearchResults { query });
        }

        let mut segments = path.trim_start_matches('/').splitn(2, '/');
        let (kind, id) = (segments.next()?, segments.next()?);
        if id.is_empty() {
            return None;
        }
        match kind {
            "track" => Some(Route::Track { id: id.to_string() }),
            "album" => Some(Route::Album { id: id.to_string() }),
            "artist" => Some(Route::Artist { id: id.to_string() }),
            _ => None,
        }
    }
}

/// Current route plus the routes to go back to
#[derive(Clone, Debug, Default)]
pub struct Navigation {
    pub current: Route,
    pub history: Vec<Route>,
}

impl Navigation {
    /// Move to `route`, returning the route that was left
    pub fn push(&mut self, route: Route) -> Route {
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous.clone());
        previous
    }

    /// Go back one step, returning `(left, entered)`
    pub fn pop(&mut self) -> Option<(Route, Route)> {
        let previous = self.history.pop()?;
        let left = std::mem::replace(&mut self.current, previous.clone());
        Some((left, previous))
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub show_help_popup: bool,
    /// Drives the spinner frame
    pub started_at: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            show_help_popup: false,
            started_at: Instant::now(),
        }
    }
}
