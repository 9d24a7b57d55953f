//! `PostgreSQL` repository implementation for workspace views.

use super::{
    models::{NewWorkspaceViewRow, WorkspaceViewChangeset, WorkspaceViewRow},
    schema::workspace_views,
};
use crate::workspace_view::{
    domain::{
        PersistedViewData, UserId, ViewAccess, ViewName, ViewOrdering, WorkspaceId, WorkspaceView,
        WorkspaceViewId,
    },
    ports::{
        ViewMutation, WorkspaceViewRepository, WorkspaceViewRepositoryError,
        WorkspaceViewRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by workspace view adapters.
pub type ViewPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workspace view repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkspaceViewRepository {
    pool: ViewPgPool,
}

impl PostgresWorkspaceViewRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ViewPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkspaceViewRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkspaceViewRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(WorkspaceViewRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkspaceViewRepositoryError::persistence)?
    }
}

#[async_trait]
impl WorkspaceViewRepository for PostgresWorkspaceViewRepository {
    async fn insert(&self, view: &WorkspaceView) -> WorkspaceViewRepositoryResult<()> {
        let view_id = view.id();
        let new_row = to_new_row(view);

        self.run_blocking(move |connection| {
            diesel::insert_into(workspace_views::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkspaceViewRepositoryError::DuplicateView(view_id)
                    }
                    _ => WorkspaceViewRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        id: WorkspaceViewId,
        mutation: ViewMutation,
    ) -> WorkspaceViewRepositoryResult<WorkspaceView> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, UpdateFailure, _>(|tx| {
                    let row = workspace_views::table
                        .filter(workspace_views::id.eq(id.into_inner()))
                        .select(WorkspaceViewRow::as_select())
                        .for_update()
                        .get_result::<WorkspaceViewRow>(tx)
                        .optional()?
                        .ok_or(UpdateFailure::Repository(
                            WorkspaceViewRepositoryError::NotFound(id),
                        ))?;
                    let mut view = row_to_view(row).map_err(UpdateFailure::Repository)?;
                    mutation(&mut view).map_err(|err| {
                        UpdateFailure::Repository(WorkspaceViewRepositoryError::Rejected(err))
                    })?;

                    diesel::update(
                        workspace_views::table.filter(workspace_views::id.eq(id.into_inner())),
                    )
                    .set(&to_changeset(&view))
                    .execute(tx)?;
                    Ok(view)
                })
                .map_err(UpdateFailure::into_repository_error)
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: WorkspaceViewId,
    ) -> WorkspaceViewRepositoryResult<Option<WorkspaceView>> {
        self.run_blocking(move |connection| {
            let row = workspace_views::table
                .filter(workspace_views::id.eq(id.into_inner()))
                .select(WorkspaceViewRow::as_select())
                .first::<WorkspaceViewRow>(connection)
                .optional()
                .map_err(WorkspaceViewRepositoryError::persistence)?;
            row.map(row_to_view).transpose()
        })
        .await
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
        ordering: ViewOrdering,
    ) -> WorkspaceViewRepositoryResult<Vec<WorkspaceView>> {
        self.run_blocking(move |connection| {
            let query = workspace_views::table
                .filter(workspace_views::workspace_id.eq(workspace_id.into_inner()))
                .select(WorkspaceViewRow::as_select())
                .into_boxed();
            let sorted = match ordering {
                ViewOrdering::NewestFirst => query.order(workspace_views::created_at.desc()),
                ViewOrdering::OldestFirst => query.order(workspace_views::created_at.asc()),
                ViewOrdering::RecentlyUpdated => query.order(workspace_views::updated_at.desc()),
                ViewOrdering::NameAscending => query.order(workspace_views::name.asc()),
            };
            let rows = sorted
                .then_order_by(workspace_views::id.asc())
                .load::<WorkspaceViewRow>(connection)
                .map_err(WorkspaceViewRepositoryError::persistence)?;
            rows.into_iter().map(row_to_view).collect()
        })
        .await
    }

    async fn delete(&self, id: WorkspaceViewId) -> WorkspaceViewRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                workspace_views::table.filter(workspace_views::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(WorkspaceViewRepositoryError::persistence)?;

            if deleted == 0 {
                return Err(WorkspaceViewRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> WorkspaceViewRepositoryResult<usize> {
        let workspace_uuid = workspace_id.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::delete(
                        workspace_views::table
                            .filter(workspace_views::workspace_id.eq(workspace_uuid)),
                    )
                    .execute(tx)
                })
                .map_err(WorkspaceViewRepositoryError::persistence)
        })
        .await
    }

    async fn clear_user_references(
        &self,
        user_id: UserId,
    ) -> WorkspaceViewRepositoryResult<usize> {
        let user_uuid = user_id.into_inner();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    let affected: Vec<Uuid> = workspace_views::table
                        .filter(
                            workspace_views::created_by
                                .eq(user_uuid)
                                .or(workspace_views::updated_by.eq(user_uuid)),
                        )
                        .select(workspace_views::id)
                        .for_update()
                        .load(tx)?;

                    diesel::update(
                        workspace_views::table.filter(workspace_views::created_by.eq(user_uuid)),
                    )
                    .set(workspace_views::created_by.eq(None::<Uuid>))
                    .execute(tx)?;

                    diesel::update(
                        workspace_views::table.filter(workspace_views::updated_by.eq(user_uuid)),
                    )
                    .set(workspace_views::updated_by.eq(None::<Uuid>))
                    .execute(tx)?;

                    Ok(affected.len())
                })
                .map_err(WorkspaceViewRepositoryError::persistence)
        })
        .await
    }
}

/// Failure inside the update transaction: either a database error, which
/// rolls back, or a repository-level rejection.
enum UpdateFailure {
    Database(DieselError),
    Repository(WorkspaceViewRepositoryError),
}

impl From<DieselError> for UpdateFailure {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl UpdateFailure {
    fn into_repository_error(self) -> WorkspaceViewRepositoryError {
        match self {
            Self::Database(err) => WorkspaceViewRepositoryError::persistence(err),
            Self::Repository(err) => err,
        }
    }
}

fn to_new_row(view: &WorkspaceView) -> NewWorkspaceViewRow {
    NewWorkspaceViewRow {
        id: view.id().into_inner(),
        created_at: view.created_at(),
        updated_at: view.updated_at(),
        name: view.name().as_str().to_owned(),
        description: view.description().to_owned(),
        view_query: view.query().clone(),
        query_data: view.query_data().clone(),
        access: view.access().as_i16(),
        created_by: view.created_by().map(UserId::into_inner),
        updated_by: view.updated_by().map(UserId::into_inner),
        workspace_id: view.workspace_id().into_inner(),
    }
}

fn to_changeset(view: &WorkspaceView) -> WorkspaceViewChangeset {
    WorkspaceViewChangeset {
        updated_at: view.updated_at(),
        name: view.name().as_str().to_owned(),
        description: view.description().to_owned(),
        view_query: view.query().clone(),
        query_data: view.query_data().clone(),
        access: view.access().as_i16(),
        updated_by: view.updated_by().map(UserId::into_inner),
    }
}

fn row_to_view(row: WorkspaceViewRow) -> WorkspaceViewRepositoryResult<WorkspaceView> {
    let WorkspaceViewRow {
        id,
        created_at,
        updated_at,
        name,
        description,
        view_query,
        query_data,
        access,
        created_by,
        updated_by,
        workspace_id,
    } = row;

    let parsed_name =
        ViewName::new(name).map_err(WorkspaceViewRepositoryError::invalid_persisted_data)?;
    let parsed_access =
        ViewAccess::try_from(access).map_err(WorkspaceViewRepositoryError::invalid_persisted_data)?;

    let data = PersistedViewData {
        id: WorkspaceViewId::from_uuid(id),
        workspace_id: WorkspaceId::from_uuid(workspace_id),
        name: parsed_name,
        description,
        query: view_query,
        query_data,
        access: parsed_access,
        created_by: created_by.map(UserId::from_uuid),
        updated_by: updated_by.map(UserId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(WorkspaceView::from_persisted(data))
}
