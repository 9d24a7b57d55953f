//! Application services for saved workspace views.

mod store;

pub use store::{
    CreateViewRequest, UpdateViewRequest, WorkspaceViewServiceError, WorkspaceViewServiceResult,
    WorkspaceViewStore,
};
