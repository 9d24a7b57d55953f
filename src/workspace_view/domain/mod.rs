//! Domain model for saved workspace views.
//!
//! A workspace view is a named query definition that belongs to exactly one
//! workspace. Workspaces and users live in the host application; the domain
//! only refers to them by identifier.

mod access;
mod error;
mod ids;
mod name;
mod ordering;
mod view;

pub use access::ViewAccess;
pub use error::{ParseViewOrderingError, ViewDomainError};
pub use ids::{UserId, WorkspaceId, WorkspaceViewId};
pub use name::{MAX_VIEW_NAME_LENGTH, ViewName};
pub use ordering::ViewOrdering;
pub use view::{NewViewData, PersistedViewData, ViewChanges, WorkspaceView, empty_query_data};
