//! Listing order for workspace views.

use super::ParseViewOrderingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order applied when listing the views of a workspace.
///
/// Every ordering breaks ties on the view identifier so listings are
/// deterministic even when timestamps collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOrdering {
    /// Descending `created_at`.
    #[default]
    NewestFirst,
    /// Ascending `created_at`.
    OldestFirst,
    /// Descending `updated_at`.
    RecentlyUpdated,
    /// Ascending name.
    NameAscending,
}

impl ViewOrdering {
    /// Returns the canonical keyword for this ordering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "-created_at",
            Self::OldestFirst => "created_at",
            Self::RecentlyUpdated => "-updated_at",
            Self::NameAscending => "name",
        }
    }
}

impl fmt::Display for ViewOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ViewOrdering {
    type Error = ParseViewOrderingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "-created_at" => Ok(Self::NewestFirst),
            "created_at" => Ok(Self::OldestFirst),
            "-updated_at" => Ok(Self::RecentlyUpdated),
            "name" => Ok(Self::NameAscending),
            _ => Err(ParseViewOrderingError(value.to_owned())),
        }
    }
}
