use serde::{Deserialize, Serialize};

use crate::media::MediaType;

/// One entry of a metadata-API result page.
///
/// Multi-search mixes movies, tv shows and people, so `media_type` is kept as
/// the raw string. Similar-item results omit it entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>, // Movies
    #[serde(default)]
    pub name: Option<String>, // Tv shows and people
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

impl SearchResult {
    /// The media category of this result, if it is one that can be saved
    pub fn kind(&self) -> Option<MediaType> {
        self.media_type.as_deref().and_then(|t| t.parse().ok())
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Release year taken from whichever date field is present
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .and_then(|date| date.get(..4))
    }
}

/// A page of results as returned by the search and similar endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// The subset of the detail endpoint needed to build a list entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaDetail {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl MediaDetail {
    pub fn title_for(&self, media_type: MediaType) -> Option<&str> {
        match media_type {
            MediaType::Movie => self.title.as_deref(),
            MediaType::Tv => self.name.as_deref(),
        }
    }
}
