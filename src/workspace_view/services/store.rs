//! Service layer for saved workspace views.
//!
//! Provides [`WorkspaceViewStore`] which validates requests, checks
//! references against the host directories, stamps actors and timestamps,
//! and coordinates the workspace and user cleanup hooks.

use crate::workspace_view::{
    domain::{
        NewViewData, UserId, ViewAccess, ViewChanges, ViewDomainError, ViewName, ViewOrdering,
        WorkspaceId, WorkspaceView, WorkspaceViewId, empty_query_data,
    },
    ports::{
        DirectoryError, UserDirectory, WorkspaceDirectory, WorkspaceViewRepository,
        WorkspaceViewRepositoryError,
    },
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a workspace view.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewRequest {
    workspace_id: WorkspaceId,
    name: String,
    description: String,
    query: Value,
    query_data: Option<Value>,
    access: i16,
}

impl CreateViewRequest {
    /// Creates a request with the required fields.
    ///
    /// The description defaults to empty, `query_data` to `{}` and access
    /// to public.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId, name: impl Into<String>, query: Value) -> Self {
        Self {
            workspace_id,
            name: name.into(),
            description: String::new(),
            query,
            query_data: None,
            access: ViewAccess::default().as_i16(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the auxiliary query payload.
    #[must_use]
    pub fn with_query_data(mut self, query_data: Value) -> Self {
        self.query_data = Some(query_data);
        self
    }

    /// Sets the raw access value (`0` private, `1` public).
    #[must_use]
    pub const fn with_access(mut self, access: i16) -> Self {
        self.access = access;
        self
    }
}

/// Request payload for updating a workspace view.
///
/// Only the fields that were set are replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateViewRequest {
    name: Option<String>,
    description: Option<String>,
    query: Option<Value>,
    query_data: Option<Value>,
    access: Option<i16>,
}

impl UpdateViewRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the query definition.
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    /// Replaces the auxiliary query payload.
    #[must_use]
    pub fn with_query_data(mut self, query_data: Value) -> Self {
        self.query_data = Some(query_data);
        self
    }

    /// Replaces the raw access value.
    #[must_use]
    pub const fn with_access(mut self, access: i16) -> Self {
        self.access = Some(access);
        self
    }

    fn into_changes(self) -> Result<ViewChanges, ViewDomainError> {
        let Self {
            name,
            description,
            query,
            query_data,
            access,
        } = self;
        Ok(ViewChanges {
            name: name.map(ViewName::new).transpose()?,
            description,
            query,
            query_data,
            access: access.map(ViewAccess::try_from).transpose()?,
        })
    }
}

/// Service-level errors for workspace view operations.
#[derive(Debug, Error)]
pub enum WorkspaceViewServiceError {
    /// Field validation failed.
    #[error(transparent)]
    Domain(#[from] ViewDomainError),
    /// The referenced workspace does not exist.
    #[error("workspace not found: {0}")]
    UnknownWorkspace(WorkspaceId),
    /// The acting user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkspaceViewRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl WorkspaceViewServiceError {
    /// Returns `true` for rejected input: bad fields or dangling references.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::UnknownWorkspace(_) | Self::UnknownUser(_)
        )
    }

    /// Returns `true` when the addressed view does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Repository(WorkspaceViewRepositoryError::NotFound(_))
        )
    }
}

/// Result type for workspace view service operations.
pub type WorkspaceViewServiceResult<T> = Result<T, WorkspaceViewServiceError>;

/// Workspace view persistence and lifecycle service.
#[derive(Clone)]
pub struct WorkspaceViewStore<R, W, U, C>
where
    R: WorkspaceViewRepository,
    W: WorkspaceDirectory,
    U: UserDirectory,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    workspaces: Arc<W>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<R, W, U, C> WorkspaceViewStore<R, W, U, C>
where
    R: WorkspaceViewRepository,
    W: WorkspaceDirectory,
    U: UserDirectory,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new workspace view store.
    #[must_use]
    pub const fn new(repository: Arc<R>, workspaces: Arc<W>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            workspaces,
            users,
            clock,
        }
    }

    /// Creates a view in an existing workspace on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Domain`] when a field is invalid,
    /// [`WorkspaceViewServiceError::UnknownWorkspace`] or
    /// [`WorkspaceViewServiceError::UnknownUser`] when a reference dangles,
    /// or a repository/directory error when persistence fails.
    pub async fn create(
        &self,
        request: CreateViewRequest,
        actor: Option<UserId>,
    ) -> WorkspaceViewServiceResult<WorkspaceView> {
        let CreateViewRequest {
            workspace_id,
            name,
            description,
            query,
            query_data,
            access,
        } = request;

        let data = NewViewData {
            workspace_id,
            name: ViewName::new(name)?,
            description,
            query,
            query_data: query_data.unwrap_or_else(empty_query_data),
            access: ViewAccess::try_from(access)?,
        };

        if !self.workspaces.workspace_exists(workspace_id).await? {
            warn!(%workspace_id, "rejected view for unknown workspace");
            return Err(WorkspaceViewServiceError::UnknownWorkspace(workspace_id));
        }
        self.ensure_actor_exists(actor).await?;

        let view = WorkspaceView::new(data, actor, &*self.clock)?;
        self.repository.insert(&view).await?;
        info!(
            view_id = %view.id(),
            %workspace_id,
            access = %view.access(),
            "created workspace view"
        );
        Ok(view)
    }

    /// Returns the view with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewRepositoryError::NotFound`] (wrapped) when the
    /// view does not exist, or a repository error when lookup fails.
    pub async fn get(&self, id: WorkspaceViewId) -> WorkspaceViewServiceResult<WorkspaceView> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| WorkspaceViewRepositoryError::NotFound(id).into())
    }

    /// Finds a view by identifier.
    ///
    /// Returns `Ok(None)` when no view has the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn find_by_id(
        &self,
        id: WorkspaceViewId,
    ) -> WorkspaceViewServiceResult<Option<WorkspaceView>> {
        debug!(view_id = %id, "looking up workspace view");
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists a workspace's views, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> WorkspaceViewServiceResult<Vec<WorkspaceView>> {
        self.list_by_workspace_ordered(workspace_id, ViewOrdering::default())
            .await
    }

    /// Lists a workspace's views in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_by_workspace_ordered(
        &self,
        workspace_id: WorkspaceId,
        ordering: ViewOrdering,
    ) -> WorkspaceViewServiceResult<Vec<WorkspaceView>> {
        debug!(%workspace_id, %ordering, "listing workspace views");
        Ok(self
            .repository
            .list_by_workspace(workspace_id, ordering)
            .await?)
    }

    /// Applies `request` to an existing view on behalf of `actor`.
    ///
    /// The change is applied atomically by the repository, so concurrent
    /// updates of one view never overwrite each other's fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Domain`] when a replacement field
    /// is invalid, [`WorkspaceViewServiceError::UnknownUser`] when the actor
    /// does not exist, or a wrapped
    /// [`WorkspaceViewRepositoryError::NotFound`] when the view does not
    /// exist.
    pub async fn update(
        &self,
        id: WorkspaceViewId,
        request: UpdateViewRequest,
        actor: Option<UserId>,
    ) -> WorkspaceViewServiceResult<WorkspaceView> {
        let changes = request.into_changes()?;
        self.ensure_actor_exists(actor).await?;

        let clock = Arc::clone(&self.clock);
        let view = self
            .repository
            .update(
                id,
                Box::new(move |view: &mut WorkspaceView| {
                    view.apply_changes(changes, actor, &*clock)
                }),
            )
            .await
            .map_err(|err| match err {
                WorkspaceViewRepositoryError::Rejected(domain) => {
                    WorkspaceViewServiceError::Domain(domain)
                }
                other => WorkspaceViewServiceError::Repository(other),
            })?;
        info!(view_id = %id, "updated workspace view");
        Ok(view)
    }

    /// Deletes a view.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`WorkspaceViewRepositoryError::NotFound`] when the
    /// view does not exist.
    pub async fn delete(&self, id: WorkspaceViewId) -> WorkspaceViewServiceResult<()> {
        self.repository.delete(id).await?;
        info!(view_id = %id, "deleted workspace view");
        Ok(())
    }

    /// Deletes every view of a workspace that is being deleted.
    ///
    /// Called by the host's workspace-deletion workflow. Returns the number
    /// of removed views.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Repository`] when the bulk delete
    /// fails; no view is removed in that case.
    pub async fn on_workspace_deleted(
        &self,
        workspace_id: WorkspaceId,
    ) -> WorkspaceViewServiceResult<usize> {
        let removed = self.repository.delete_by_workspace(workspace_id).await?;
        info!(%workspace_id, removed, "cascaded workspace deletion to views");
        Ok(removed)
    }

    /// Clears creator and modifier references to a user that is being
    /// deleted.
    ///
    /// Called by the host's user-deletion workflow. Views are kept. Returns
    /// the number of views that referenced the user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceViewServiceError::Repository`] when the bulk update
    /// fails; no reference is cleared in that case.
    pub async fn on_user_deleted(&self, user_id: UserId) -> WorkspaceViewServiceResult<usize> {
        let affected = self.repository.clear_user_references(user_id).await?;
        info!(%user_id, affected, "cleared deleted user from views");
        Ok(affected)
    }

    async fn ensure_actor_exists(&self, actor: Option<UserId>) -> WorkspaceViewServiceResult<()> {
        let Some(user_id) = actor else {
            return Ok(());
        };
        if self.users.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(WorkspaceViewServiceError::UnknownUser(user_id))
        }
    }
}
