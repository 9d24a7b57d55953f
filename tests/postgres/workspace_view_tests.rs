//! Workspace view store behaviour against `PostgreSQL`.

use super::helpers::{BoxError, PgContext, pg_context};
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use workspace_views::workspace_view::{
    adapters::postgres::PostgresDirectory,
    domain::{ViewAccess, ViewOrdering},
    ports::WorkspaceViewRepository,
    services::{
        CreateViewRequest, UpdateViewRequest, WorkspaceViewServiceError, WorkspaceViewStore,
    },
};

fn sprint_request(
    workspace: workspace_views::workspace_view::domain::WorkspaceId,
) -> CreateViewRequest {
    CreateViewRequest::new(workspace, "My Sprint", json!({"status": "open"})).with_access(1)
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_create_get_and_update(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let creator = ctx.insert_user()?;
    let editor = ctx.insert_user()?;

    let created = ctx
        .store
        .create(
            sprint_request(workspace).with_query_data(json!({"filters": {"state": "open"}})),
            Some(creator),
        )
        .await?;
    let fetched = ctx.store.get(created.id()).await?;
    assert_eq!(fetched, created);
    assert_eq!(fetched.created_at(), fetched.updated_at());

    let updated = ctx
        .store
        .update(
            created.id(),
            UpdateViewRequest::new()
                .with_name("Active Sprint")
                .with_access(0),
            Some(editor),
        )
        .await?;
    let reloaded = ctx.store.get(created.id()).await?;

    assert_eq!(reloaded, updated);
    assert_eq!(reloaded.name().as_str(), "Active Sprint");
    assert_eq!(reloaded.access(), ViewAccess::Private);
    assert_eq!(reloaded.created_by(), Some(creator));
    assert_eq!(reloaded.updated_by(), Some(editor));
    assert!(reloaded.updated_at() > reloaded.created_at());
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_listing_orders(pg_context: Result<PgContext, BoxError>) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let other = ctx.insert_workspace()?;
    let zeta = ctx
        .store
        .create(CreateViewRequest::new(workspace, "Zeta", json!({})), None)
        .await?;
    let alpha = ctx
        .store
        .create(CreateViewRequest::new(workspace, "Alpha", json!({})), None)
        .await?;
    ctx.store
        .create(CreateViewRequest::new(other, "Elsewhere", json!({})), None)
        .await?;

    let newest: Vec<_> = ctx
        .store
        .list_by_workspace(workspace)
        .await?
        .iter()
        .map(|view| view.id())
        .collect();
    let by_name: Vec<_> = ctx
        .store
        .list_by_workspace_ordered(workspace, ViewOrdering::NameAscending)
        .await?
        .iter()
        .map(|view| view.id())
        .collect();

    assert_eq!(newest, vec![alpha.id(), zeta.id()]);
    assert_eq!(by_name, vec![alpha.id(), zeta.id()]);
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_rejects_dangling_references(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;

    let unknown_workspace = ctx
        .store
        .create(
            sprint_request(workspace_views::workspace_view::domain::WorkspaceId::new()),
            None,
        )
        .await;
    let unknown_user = ctx
        .store
        .create(
            sprint_request(workspace),
            Some(workspace_views::workspace_view::domain::UserId::new()),
        )
        .await;

    assert!(matches!(
        unknown_workspace,
        Err(WorkspaceViewServiceError::UnknownWorkspace(_))
    ));
    assert!(matches!(
        unknown_user,
        Err(WorkspaceViewServiceError::UnknownUser(_))
    ));
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_delete_and_not_found(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let created = ctx.store.create(sprint_request(workspace), None).await?;

    ctx.store.delete(created.id()).await?;

    let missing = ctx.store.get(created.id()).await;
    assert!(missing.is_err_and(|err| err.is_not_found()));
    let second = ctx.store.delete(created.id()).await;
    assert!(second.is_err_and(|err| err.is_not_found()));
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_workspace_hook_deletes_views(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let doomed = ctx.insert_workspace()?;
    let kept = ctx.insert_workspace()?;
    for _ in 0..3 {
        ctx.store.create(sprint_request(doomed), None).await?;
    }
    let survivor = ctx.store.create(sprint_request(kept), None).await?;

    let removed = ctx.store.on_workspace_deleted(doomed).await?;
    ctx.delete_workspace_row(doomed)?;

    assert_eq!(removed, 3);
    assert!(ctx.store.list_by_workspace(doomed).await?.is_empty());
    assert_eq!(ctx.store.get(survivor.id()).await?, survivor);
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_user_hook_nulls_references(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let doomed = ctx.insert_user()?;
    let other = ctx.insert_user()?;
    let created = ctx.store.create(sprint_request(workspace), Some(doomed)).await?;
    let edited = ctx.store.create(sprint_request(workspace), Some(other)).await?;
    ctx.store
        .update(edited.id(), UpdateViewRequest::new(), Some(doomed))
        .await?;

    let affected = ctx.store.on_user_deleted(doomed).await?;
    ctx.delete_user_row(doomed)?;

    assert_eq!(affected, 2);
    let first = ctx.store.get(created.id()).await?;
    assert_eq!(first.created_by(), None);
    assert_eq!(first.updated_by(), None);
    assert_eq!(first.updated_at(), created.updated_at());
    let second = ctx.store.get(edited.id()).await?;
    assert_eq!(second.created_by(), Some(other));
    assert_eq!(second.updated_by(), None);
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_foreign_keys_back_the_hooks(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let user = ctx.insert_user()?;
    let created = ctx.store.create(sprint_request(workspace), Some(user)).await?;

    ctx.delete_user_row(user)?;
    let orphaned = ctx.store.get(created.id()).await?;
    assert_eq!(orphaned.created_by(), None);

    ctx.delete_workspace_row(workspace)?;
    assert!(ctx.repository.find_by_id(created.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_check_constraint_rejects_undefined_access(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let mut conn = ctx.pool.get()?;

    let result = diesel::sql_query(concat!(
        "INSERT INTO workspace_views (id, name, query, access, workspace_id) ",
        "VALUES (gen_random_uuid(), 'Raw', '{}', 5, $1)",
    ))
    .bind::<diesel::sql_types::Uuid, _>(workspace.into_inner())
    .execute(&mut conn);

    assert!(result.is_err());
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_concurrent_updates_are_serialized(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let created = ctx.store.create(sprint_request(workspace), None).await?;

    let (renamed, described) = tokio::join!(
        ctx.store.update(
            created.id(),
            UpdateViewRequest::new().with_name("Active Sprint"),
            None,
        ),
        ctx.store.update(
            created.id(),
            UpdateViewRequest::new().with_description("Open work this sprint"),
            None,
        ),
    );
    renamed?;
    described?;

    let stored = ctx.store.get(created.id()).await?;
    assert_eq!(stored.name().as_str(), "Active Sprint");
    assert_eq!(stored.description(), "Open work this sprint");
    Ok(())
}

#[rstest]
#[ignore = "starts an embedded PostgreSQL cluster"]
#[tokio::test(flavor = "multi_thread")]
async fn postgres_round_trip_is_exact_with_system_clock(
    pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context?;
    let workspace = ctx.insert_workspace()?;
    let directory = Arc::new(PostgresDirectory::new(ctx.pool.clone()));
    let store = WorkspaceViewStore::new(
        Arc::clone(&ctx.repository),
        Arc::clone(&directory),
        directory,
        Arc::new(DefaultClock),
    );

    let created = store.create(sprint_request(workspace), None).await?;
    assert_eq!(store.get(created.id()).await?, created);

    let updated = store
        .update(
            created.id(),
            UpdateViewRequest::new().with_name("Active Sprint"),
            None,
        )
        .await?;
    assert_eq!(store.get(created.id()).await?, updated);
    Ok(())
}
