use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Watch status of a list entry.
///
/// Persisted as the short string codes used in URLs (`/list/update/{id}/2`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WatchStatus {
    #[default]
    #[serde(rename = "1")]
    NotStarted,
    #[serde(rename = "2")]
    Watching,
    #[serde(rename = "3")]
    Watched,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 3] = [
        WatchStatus::NotStarted,
        WatchStatus::Watching,
        WatchStatus::Watched,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            WatchStatus::NotStarted => "1",
            WatchStatus::Watching => "2",
            WatchStatus::Watched => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WatchStatus::NotStarted => "Not started",
            WatchStatus::Watching => "Watching",
            WatchStatus::Watched => "Watched",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for WatchStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WatchStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| ModelError::InvalidStatus(s.to_string()))
    }
}
