use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The two media categories the metadata API can return details for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Name of the detail field holding the item's title.
    /// Movies carry `title`, tv shows carry `name`.
    pub fn title_field(&self) -> &'static str {
        match self {
            MediaType::Movie => "title",
            MediaType::Tv => "name",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(ModelError::InvalidMediaType(other.to_string())),
        }
    }
}

/// Parse a metadata-API identifier from a path segment.
///
/// Only plain ASCII digits are accepted; signs, whitespace and anything else
/// are rejected rather than stripped.
pub fn parse_media_id(raw: &str) -> Result<u64, ModelError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::InvalidId(raw.to_string()));
    }
    raw.parse::<u64>()
        .map_err(|_| ModelError::InvalidId(raw.to_string()))
}
