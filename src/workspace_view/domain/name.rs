//! Validated view name type.

use super::ViewDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a view name, matching the `VARCHAR(255)` column.
pub const MAX_VIEW_NAME_LENGTH: usize = 255;

/// Display name of a saved view.
///
/// Names are trimmed and must be between 1 and 255 characters. Length is
/// counted in characters, not bytes, because `VARCHAR(n)` limits characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewName(String);

impl ViewName {
    /// Creates a validated view name.
    ///
    /// # Errors
    ///
    /// Returns [`ViewDomainError::EmptyViewName`] when the value is empty
    /// after trimming, or [`ViewDomainError::ViewNameTooLong`] when it
    /// exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ViewDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ViewDomainError::EmptyViewName);
        }

        let length = trimmed.chars().count();
        if length > MAX_VIEW_NAME_LENGTH {
            return Err(ViewDomainError::ViewNameTooLong(length));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ViewName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
