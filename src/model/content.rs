//! Search payload schema, result sets and preview selection

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::types::SearchCategory;

/// Number of cards shown per category in the search bar dropdown
pub const PREVIEW_LIMIT: usize = 5;

/// Present-but-null fields decode like missing ones
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A null list is empty; null entries inside it are skipped
fn list_skipping_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().flatten().collect())
}

/// An image reference attached to an album or artist
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Artist credit as embedded in tracks and albums
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArtistRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// The album a track belongs to (only what the cards need)
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackAlbum {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "list_skipping_nulls")]
    pub images: Vec<Image>,
}

/// A track from search results
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: TrackAlbum,
    #[serde(default, deserialize_with = "list_skipping_nulls")]
    pub artists: Vec<ArtistRef>,
}

/// An album from search results
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Album {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "list_skipping_nulls")]
    pub images: Vec<Image>,
    #[serde(default, deserialize_with = "list_skipping_nulls")]
    pub artists: Vec<ArtistRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date_precision: String,
}

impl Album {
    /// Release year for display.
    ///
    /// Year-precision dates are shown as given; anything else is parsed as a
    /// calendar date (or a `YYYY-MM` month) and reduced to its year.
    pub fn release_year(&self) -> String {
        if self.release_date_precision == "year" {
            return self.release_date.clone();
        }

        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", self.release_date), "%Y-%m-%d"))
            .map(|date| date.year().to_string())
            .unwrap_or_else(|_| self.release_date.chars().take(4).collect())
    }
}

/// An artist from search results
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Artist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "list_skipping_nulls")]
    pub images: Vec<Image>,
}

/// One paged collection as returned by the music service
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "list_skipping_nulls")]
    pub items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Raw body of `GET /search`. Every key may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Page<Track>>,
    #[serde(default)]
    pub albums: Option<Page<Album>>,
    #[serde(default)]
    pub artists: Option<Page<Artist>>,
}

/// The three result collections produced by one search call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.albums.is_empty() && self.artists.is_empty()
    }

    pub fn len_of(&self, category: SearchCategory) -> usize {
        match category {
            SearchCategory::Tracks => self.tracks.len(),
            SearchCategory::Albums => self.albums.len(),
            SearchCategory::Artists => self.artists.len(),
        }
    }

    /// Cards for one category, in server order, at most `limit` of them
    pub fn cards(&self, category: SearchCategory, limit: usize) -> Vec<SummaryCard> {
        match category {
            SearchCategory::Tracks => self.tracks.iter().take(limit).map(SummaryCard::from).collect(),
            SearchCategory::Albums => self.albums.iter().take(limit).map(SummaryCard::from).collect(),
            SearchCategory::Artists => self.artists.iter().take(limit).map(SummaryCard::from).collect(),
        }
    }
}

impl From<SearchResponse> for ResultSet {
    fn from(response: SearchResponse) -> Self {
        Self {
            tracks: response.tracks.unwrap_or_default().items,
            albums: response.albums.unwrap_or_default().items,
            artists: response.artists.unwrap_or_default().items,
        }
    }
}

/// Compact, render-ready view of one search result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryCard {
    pub category: SearchCategory,
    pub id: String,
    pub name: String,
    pub secondary: String,
    pub image_url: Option<String>,
    pub release_year: Option<String>,
}

fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_image(images: &[Image]) -> Option<String> {
    images.first().map(|i| i.url.clone()).filter(|url| !url.is_empty())
}

impl From<&Track> for SummaryCard {
    fn from(track: &Track) -> Self {
        Self {
            category: SearchCategory::Tracks,
            id: track.id.clone(),
            name: track.name.clone(),
            secondary: join_artists(&track.artists),
            image_url: first_image(&track.album.images),
            release_year: None,
        }
    }
}

impl From<&Album> for SummaryCard {
    fn from(album: &Album) -> Self {
        Self {
            category: SearchCategory::Albums,
            id: album.id.clone(),
            name: album.name.clone(),
            secondary: join_artists(&album.artists),
            image_url: first_image(&album.images),
            release_year: Some(album.release_year()).filter(|y| !y.is_empty()),
        }
    }
}

impl From<&Artist> for SummaryCard {
    fn from(artist: &Artist) -> Self {
        Self {
            category: SearchCategory::Artists,
            id: artist.id.clone(),
            name: artist.name.clone(),
            secondary: String::new(),
            image_url: first_image(&artist.images),
            release_year: None,
        }
    }
}

/// Dropdown preview: the first `PREVIEW_LIMIT` cards of the selected category
pub fn preview(results: &ResultSet, category: SearchCategory) -> Vec<SummaryCard> {
    results.cards(category, PREVIEW_LIMIT)
}

/// State of the search bar component
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub results: ResultSet,
    pub category: SearchCategory,
    pub is_loading: bool,
    /// Highlighted preview card, if the user moved into the dropdown
    pub preview_selected: Option<usize>,
}

/// State of the full results page
#[derive(Clone, Debug, Default)]
pub struct FullResultsState {
    pub query: String,
    pub results: ResultSet,
    pub category: SearchCategory,
    pub is_loading: bool,
    pub selected_index: usize,
}
