//! Repository port for workspace view persistence.

use crate::workspace_view::domain::{
    UserId, ViewDomainError, ViewOrdering, WorkspaceId, WorkspaceView, WorkspaceViewId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace view repository operations.
pub type WorkspaceViewRepositoryResult<T> = Result<T, WorkspaceViewRepositoryError>;

/// Change applied to a stored view while the repository holds it locked.
pub type ViewMutation =
    Box<dyn FnOnce(&mut WorkspaceView) -> Result<(), ViewDomainError> + Send + 'static>;

/// Workspace view persistence contract.
///
/// Single-record operations are atomic. The bulk operations
/// [`delete_by_workspace`](Self::delete_by_workspace) and
/// [`clear_user_references`](Self::clear_user_references) either apply to
/// every matching view or to none.
#[async_trait]
pub trait WorkspaceViewRepository: Send + Sync {
    /// Stores a new view.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewRepositoryError::DuplicateView`] when a view
    /// with the same identifier already exists.
    async fn insert(&self, view: &WorkspaceView) -> WorkspaceViewRepositoryResult<()>;

    /// Applies `mutation` to the stored view and persists the result.
    ///
    /// The read, the mutation and the write form one atomic step, so
    /// concurrent updates of the same view are serialized. Returns the view
    /// as stored.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewRepositoryError::NotFound`] when the view does
    /// not exist, or [`WorkspaceViewRepositoryError::Rejected`] when the
    /// mutation fails; nothing is written in either case.
    async fn update(
        &self,
        id: WorkspaceViewId,
        mutation: ViewMutation,
    ) -> WorkspaceViewRepositoryResult<WorkspaceView>;

    /// Finds a view by identifier.
    ///
    /// Returns `None` when the view does not exist.
    async fn find_by_id(
        &self,
        id: WorkspaceViewId,
    ) -> WorkspaceViewRepositoryResult<Option<WorkspaceView>>;

    /// Returns every view owned by `workspace_id`, sorted by `ordering`.
    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
        ordering: ViewOrdering,
    ) -> WorkspaceViewRepositoryResult<Vec<WorkspaceView>>;

    /// Deletes a single view.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewRepositoryError::NotFound`] when the view does
    /// not exist.
    async fn delete(&self, id: WorkspaceViewId) -> WorkspaceViewRepositoryResult<()>;

    /// Deletes every view owned by `workspace_id` and returns how many were
    /// removed.
    async fn delete_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> WorkspaceViewRepositoryResult<usize>;

    /// Nulls `created_by` and `updated_by` wherever they reference `user_id`
    /// and returns how many views were affected.
    async fn clear_user_references(&self, user_id: UserId)
    -> WorkspaceViewRepositoryResult<usize>;
}

/// Errors returned by workspace view repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceViewRepositoryError {
    /// A view with the same identifier already exists.
    #[error("duplicate workspace view identifier: {0}")]
    DuplicateView(WorkspaceViewId),

    /// The view was not found.
    #[error("workspace view not found: {0}")]
    NotFound(WorkspaceViewId),

    /// The mutation passed to an update rejected the change.
    #[error(transparent)]
    Rejected(ViewDomainError),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkspaceViewRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
