use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A document id paired with the revision it was read at.
///
/// Travels through URLs as a single `{id}.{rev}` segment. Every write to the
/// store must carry the revision from the most recent read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocRef {
    pub id: String,
    pub rev: String,
}

impl DocRef {
    pub fn new(id: impl Into<String>, rev: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rev: rev.into(),
        }
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.id, self.rev)
    }
}

impl FromStr for DocRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Revisions look like "3-9f2c..." and never contain dots, so split on the last one
        let (id, rev) = s
            .rsplit_once('.')
            .ok_or_else(|| ModelError::InvalidDocRef(s.to_string()))?;

        if id.is_empty() || rev.is_empty() {
            return Err(ModelError::InvalidDocRef(s.to_string()));
        }

        Ok(DocRef::new(id, rev))
    }
}
