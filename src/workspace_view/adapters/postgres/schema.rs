//! Diesel schema for workspace view persistence.

diesel::table! {
    /// Saved workspace views.
    workspace_views (id) {
        /// View identifier.
        id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Filter and sort definition.
        #[sql_name = "query"]
        view_query -> Jsonb,
        /// Auxiliary query payload.
        query_data -> Jsonb,
        /// Visibility level (0 private, 1 public).
        access -> Int2,
        /// Creating user, nulled when the user is deleted.
        created_by -> Nullable<Uuid>,
        /// Last modifying user, nulled when the user is deleted.
        updated_by -> Nullable<Uuid>,
        /// Owning workspace.
        workspace_id -> Uuid,
    }
}

diesel::table! {
    /// Host application workspaces; only the key is read.
    workspaces (id) {
        /// Workspace identifier.
        id -> Uuid,
    }
}

diesel::table! {
    /// Host application users; only the key is read.
    users (id) {
        /// User identifier.
        id -> Uuid,
    }
}
