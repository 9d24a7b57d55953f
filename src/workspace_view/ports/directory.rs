//! Ports onto the host application's workspace and user records.
//!
//! The store never owns workspaces or users. It only asks whether one
//! exists before linking a view to it.

use crate::workspace_view::domain::{UserId, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Existence checks against the host application's workspaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceDirectory: Send + Sync {
    /// Returns `true` when the workspace exists.
    async fn workspace_exists(&self, workspace_id: WorkspaceId) -> DirectoryResult<bool>;
}

/// Existence checks against the host application's users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `true` when the user exists.
    async fn user_exists(&self, user_id: UserId) -> DirectoryResult<bool>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The lookup could not be performed.
    #[error("directory lookup failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
