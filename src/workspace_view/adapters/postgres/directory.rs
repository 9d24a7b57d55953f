//! `PostgreSQL` directory over the host application's `workspaces` and
//! `users` tables.

use super::{
    repository::ViewPgPool,
    schema::{users, workspaces},
};
use crate::workspace_view::{
    domain::{UserId, WorkspaceId},
    ports::{DirectoryError, DirectoryResult, UserDirectory, WorkspaceDirectory},
};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// Existence checks against host tables sharing the view database.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: ViewPgPool,
}

impl PostgresDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ViewPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F>(&self, f: F) -> DirectoryResult<bool>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<bool> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection).map_err(DirectoryError::persistence)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl WorkspaceDirectory for PostgresDirectory {
    async fn workspace_exists(&self, workspace_id: WorkspaceId) -> DirectoryResult<bool> {
        let key = workspace_id.into_inner();
        self.run_blocking(move |connection| {
            diesel::select(exists(workspaces::table.filter(workspaces::id.eq(key))))
                .get_result(connection)
        })
        .await
    }
}

#[async_trait]
impl UserDirectory for PostgresDirectory {
    async fn user_exists(&self, user_id: UserId) -> DirectoryResult<bool> {
        let key = user_id.into_inner();
        self.run_blocking(move |connection| {
            diesel::select(exists(users::table.filter(users::id.eq(key)))).get_result(connection)
        })
        .await
    }
}
