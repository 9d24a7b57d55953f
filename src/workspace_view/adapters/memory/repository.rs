//! In-memory workspace view repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::workspace_view::{
    domain::{UserId, ViewOrdering, WorkspaceId, WorkspaceView, WorkspaceViewId},
    ports::{
        ViewMutation, WorkspaceViewRepository, WorkspaceViewRepositoryError,
        WorkspaceViewRepositoryResult,
    },
};

/// Thread-safe in-memory workspace view repository.
///
/// Updates and bulk operations hold the write lock for their whole
/// duration, so concurrent updates are serialized and other callers never
/// observe a partially applied cascade.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceViewRepository {
    state: Arc<RwLock<HashMap<WorkspaceViewId, WorkspaceView>>>,
}

impl InMemoryWorkspaceViewRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> WorkspaceViewRepositoryResult<RwLockReadGuard<'_, HashMap<WorkspaceViewId, WorkspaceView>>>
    {
        self.state.read().map_err(|err| {
            WorkspaceViewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> WorkspaceViewRepositoryResult<RwLockWriteGuard<'_, HashMap<WorkspaceViewId, WorkspaceView>>>
    {
        self.state.write().map_err(|err| {
            WorkspaceViewRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl WorkspaceViewRepository for InMemoryWorkspaceViewRepository {
    async fn insert(&self, view: &WorkspaceView) -> WorkspaceViewRepositoryResult<()> {
        let mut views = self.write()?;
        if views.contains_key(&view.id()) {
            return Err(WorkspaceViewRepositoryError::DuplicateView(view.id()));
        }
        views.insert(view.id(), view.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: WorkspaceViewId,
        mutation: ViewMutation,
    ) -> WorkspaceViewRepositoryResult<WorkspaceView> {
        let mut views = self.write()?;
        let stored = views
            .get_mut(&id)
            .ok_or(WorkspaceViewRepositoryError::NotFound(id))?;
        let mut updated = stored.clone();
        mutation(&mut updated).map_err(WorkspaceViewRepositoryError::Rejected)?;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn find_by_id(
        &self,
        id: WorkspaceViewId,
    ) -> WorkspaceViewRepositoryResult<Option<WorkspaceView>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
        ordering: ViewOrdering,
    ) -> WorkspaceViewRepositoryResult<Vec<WorkspaceView>> {
        let mut listed: Vec<WorkspaceView> = self
            .read()?
            .values()
            .filter(|view| view.workspace_id() == workspace_id)
            .cloned()
            .collect();
        listed.sort_by(|left, right| compare_views(left, right, ordering));
        Ok(listed)
    }

    async fn delete(&self, id: WorkspaceViewId) -> WorkspaceViewRepositoryResult<()> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(WorkspaceViewRepositoryError::NotFound(id))
    }

    async fn delete_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> WorkspaceViewRepositoryResult<usize> {
        let mut views = self.write()?;
        let before = views.len();
        views.retain(|_, view| view.workspace_id() != workspace_id);
        Ok(before - views.len())
    }

    async fn clear_user_references(
        &self,
        user_id: UserId,
    ) -> WorkspaceViewRepositoryResult<usize> {
        let mut views = self.write()?;
        let affected = views
            .values_mut()
            .map(|view| view.forget_user(user_id))
            .filter(|cleared| *cleared)
            .count();
        Ok(affected)
    }
}

/// Follows the `ORDER BY` clauses of the `PostgreSQL` adapter.
///
/// `NameAscending` compares names by code point, whereas `PostgreSQL` sorts
/// by the database collation, so mixed-case names may order differently.
fn compare_views(left: &WorkspaceView, right: &WorkspaceView, ordering: ViewOrdering) -> Ordering {
    let primary = match ordering {
        ViewOrdering::NewestFirst => right.created_at().cmp(&left.created_at()),
        ViewOrdering::OldestFirst => left.created_at().cmp(&right.created_at()),
        ViewOrdering::RecentlyUpdated => right.updated_at().cmp(&left.updated_at()),
        ViewOrdering::NameAscending => left.name().as_str().cmp(right.name().as_str()),
    };
    primary.then_with(|| left.id().cmp(&right.id()))
}
