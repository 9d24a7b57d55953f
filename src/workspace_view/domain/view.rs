//! Workspace view aggregate root.

use super::{UserId, ViewAccess, ViewDomainError, ViewName, WorkspaceId, WorkspaceViewId};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A saved, named query definition scoped to a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceView {
    id: WorkspaceViewId,
    workspace_id: WorkspaceId,
    name: ViewName,
    description: String,
    query: Value,
    query_data: Value,
    access: ViewAccess,
    created_by: Option<UserId>,
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated field values for a view that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewViewData {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub name: ViewName,
    /// Free-text description, empty when not supplied.
    pub description: String,
    /// Filter and sort definition.
    pub query: Value,
    /// Auxiliary query payload.
    pub query_data: Value,
    /// Visibility level.
    pub access: ViewAccess,
}

impl NewViewData {
    /// Creates view data with an empty description, empty `query_data`
    /// object and public access.
    #[must_use]
    pub fn new(workspace_id: WorkspaceId, name: ViewName, query: Value) -> Self {
        Self {
            workspace_id,
            name,
            description: String::new(),
            query,
            query_data: empty_query_data(),
            access: ViewAccess::default(),
        }
    }
}

/// A set of field replacements applied by an update.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewChanges {
    /// Replacement display name.
    pub name: Option<ViewName>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement query definition.
    pub query: Option<Value>,
    /// Replacement auxiliary payload.
    pub query_data: Option<Value>,
    /// Replacement visibility level.
    pub access: Option<ViewAccess>,
}

impl ViewChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.query.is_none()
            && self.query_data.is_none()
            && self.access.is_none()
    }
}

/// Parameter object for reconstructing a persisted view.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedViewData {
    /// Persisted view identifier.
    pub id: WorkspaceViewId,
    /// Persisted owning workspace.
    pub workspace_id: WorkspaceId,
    /// Persisted display name.
    pub name: ViewName,
    /// Persisted description.
    pub description: String,
    /// Persisted query definition.
    pub query: Value,
    /// Persisted auxiliary payload.
    pub query_data: Value,
    /// Persisted visibility level.
    pub access: ViewAccess,
    /// Persisted creator, if still present.
    pub created_by: Option<UserId>,
    /// Persisted last modifier, if still present.
    pub updated_by: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceView {
    /// Creates a new view owned by `data.workspace_id`.
    ///
    /// The actor, when known, is recorded as both creator and last modifier.
    ///
    /// # Errors
    ///
    /// Returns [`ViewDomainError::NullQuery`] when the query is JSON `null`.
    pub fn new(
        data: NewViewData,
        actor: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, ViewDomainError> {
        ensure_query_present(&data.query)?;
        let timestamp = stamp(clock);
        Ok(Self {
            id: WorkspaceViewId::new(),
            workspace_id: data.workspace_id,
            name: data.name,
            description: data.description,
            query: data.query,
            query_data: data.query_data,
            access: data.access,
            created_by: actor,
            updated_by: actor,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a view from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedViewData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            name: data.name,
            description: data.description,
            query: data.query,
            query_data: data.query_data,
            access: data.access,
            created_by: data.created_by,
            updated_by: data.updated_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the view identifier.
    #[must_use]
    pub const fn id(&self) -> WorkspaceViewId {
        self.id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ViewName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the query definition.
    #[must_use]
    pub const fn query(&self) -> &Value {
        &self.query
    }

    /// Returns the auxiliary query payload.
    #[must_use]
    pub const fn query_data(&self) -> &Value {
        &self.query_data
    }

    /// Returns the visibility level.
    #[must_use]
    pub const fn access(&self) -> ViewAccess {
        self.access
    }

    /// Returns the creator, unless that user has since been deleted.
    #[must_use]
    pub const fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    /// Returns the last modifier, unless that user has since been deleted.
    #[must_use]
    pub const fn updated_by(&self) -> Option<UserId> {
        self.updated_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies field replacements and stamps the modifier and timestamp.
    ///
    /// The modifier is stamped even when `changes` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ViewDomainError::NullQuery`] when the replacement query is
    /// JSON `null`. The view is left unchanged in that case.
    pub fn apply_changes(
        &mut self,
        changes: ViewChanges,
        actor: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<(), ViewDomainError> {
        if let Some(query) = changes.query.as_ref() {
            ensure_query_present(query)?;
        }

        let ViewChanges {
            name,
            description,
            query,
            query_data,
            access,
        } = changes;

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = query {
            self.query = value;
        }
        if let Some(value) = query_data {
            self.query_data = value;
        }
        if let Some(value) = access {
            self.access = value;
        }

        self.updated_by = actor;
        self.touch(clock);
        Ok(())
    }

    /// Nulls the creator and modifier references that point at `user`.
    ///
    /// Returns `true` when at least one reference was cleared. The
    /// modification timestamp is left untouched because the view itself did
    /// not change.
    pub fn forget_user(&mut self, user: UserId) -> bool {
        let mut cleared = false;
        if self.created_by == Some(user) {
            self.created_by = None;
            cleared = true;
        }
        if self.updated_by == Some(user) {
            self.updated_by = None;
            cleared = true;
        }
        cleared
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    ///
    /// The timestamp never moves backwards past `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = stamp(clock).max(self.created_at);
    }
}

/// Returns the default `query_data` payload, an empty JSON object.
#[must_use]
pub fn empty_query_data() -> Value {
    Value::Object(Map::new())
}

/// Reads the clock at the microsecond precision `timestamptz` stores, so a
/// view read back from storage equals the one that was written.
fn stamp(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}

fn ensure_query_present(query: &Value) -> Result<(), ViewDomainError> {
    if query.is_null() {
        return Err(ViewDomainError::NullQuery);
    }
    Ok(())
}
