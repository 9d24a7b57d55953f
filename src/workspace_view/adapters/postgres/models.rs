//! Diesel row models for workspace view persistence.

use super::schema::workspace_views;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

/// Query result row for workspace view records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workspace_views)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkspaceViewRow {
    /// View identifier.
    pub id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Filter and sort definition.
    pub view_query: Value,
    /// Auxiliary query payload.
    pub query_data: Value,
    /// Visibility level.
    pub access: i16,
    /// Creating user.
    pub created_by: Option<Uuid>,
    /// Last modifying user.
    pub updated_by: Option<Uuid>,
    /// Owning workspace.
    pub workspace_id: Uuid,
}

/// Insert model for workspace view records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workspace_views)]
pub struct NewWorkspaceViewRow {
    /// View identifier.
    pub id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Filter and sort definition.
    pub view_query: Value,
    /// Auxiliary query payload.
    pub query_data: Value,
    /// Visibility level.
    pub access: i16,
    /// Creating user.
    pub created_by: Option<Uuid>,
    /// Last modifying user.
    pub updated_by: Option<Uuid>,
    /// Owning workspace.
    pub workspace_id: Uuid,
}

/// Changeset for the mutable columns of a workspace view.
///
/// `treat_none_as_null` makes a cleared modifier reach the database as
/// `NULL` instead of being skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = workspace_views)]
#[diesel(treat_none_as_null = true)]
pub struct WorkspaceViewChangeset {
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Filter and sort definition.
    pub view_query: Value,
    /// Auxiliary query payload.
    pub query_data: Value,
    /// Visibility level.
    pub access: i16,
    /// Last modifying user.
    pub updated_by: Option<Uuid>,
}
