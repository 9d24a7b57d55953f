//! View visibility level.

use super::ViewDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who may see a saved view.
///
/// Stored as a small integer: `0` for private, `1` for public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewAccess {
    /// Visible to its creator only.
    Private,
    /// Visible to every member of the workspace.
    #[default]
    Public,
}

impl ViewAccess {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Private => 0,
            Self::Public => 1,
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Public => "Public",
        }
    }
}

impl fmt::Display for ViewAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i16> for ViewAccess {
    type Error = ViewDomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Private),
            1 => Ok(Self::Public),
            other => Err(ViewDomainError::InvalidAccess(other)),
        }
    }
}

impl From<ViewAccess> for i16 {
    fn from(access: ViewAccess) -> Self {
        access.as_i16()
    }
}
