//! In-memory workspace and user directory.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::workspace_view::{
    domain::{UserId, WorkspaceId},
    ports::{DirectoryError, DirectoryResult, UserDirectory, WorkspaceDirectory},
};

/// Directory of known workspaces and users held in memory.
///
/// Hosts that keep their own records elsewhere register ids as they create
/// them; tests use it in place of the host tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    workspaces: HashSet<WorkspaceId>,
    users: HashSet<UserId>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn add_workspace(&self, workspace_id: WorkspaceId) -> DirectoryResult<()> {
        self.with_state(|state| {
            state.workspaces.insert(workspace_id);
        })
    }

    /// Forgets a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn remove_workspace(&self, workspace_id: WorkspaceId) -> DirectoryResult<()> {
        self.with_state(|state| {
            state.workspaces.remove(&workspace_id);
        })
    }

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn add_user(&self, user_id: UserId) -> DirectoryResult<()> {
        self.with_state(|state| {
            state.users.insert(user_id);
        })
    }

    /// Forgets a user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] when the state lock is
    /// poisoned.
    pub fn remove_user(&self, user_id: UserId) -> DirectoryResult<()> {
        self.with_state(|state| {
            state.users.remove(&user_id);
        })
    }

    fn with_state<F>(&self, f: F) -> DirectoryResult<()>
    where
        F: FnOnce(&mut DirectoryState),
    {
        let mut state = self
            .state
            .write()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        f(&mut state);
        Ok(())
    }

    fn contains<F>(&self, f: F) -> DirectoryResult<bool>
    where
        F: FnOnce(&DirectoryState) -> bool,
    {
        let state = self
            .state
            .read()
            .map_err(|err| DirectoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(f(&state))
    }
}

#[async_trait]
impl WorkspaceDirectory for InMemoryDirectory {
    async fn workspace_exists(&self, workspace_id: WorkspaceId) -> DirectoryResult<bool> {
        self.contains(|state| state.workspaces.contains(&workspace_id))
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn user_exists(&self, user_id: UserId) -> DirectoryResult<bool> {
        self.contains(|state| state.users.contains(&user_id))
    }
}
