//! Port contracts for workspace view persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by
//! [`WorkspaceViewStore`](crate::workspace_view::services::WorkspaceViewStore).

pub mod directory;
pub mod repository;

pub use directory::{DirectoryError, DirectoryResult, UserDirectory, WorkspaceDirectory};
pub use repository::{
    ViewMutation, WorkspaceViewRepository, WorkspaceViewRepositoryError, WorkspaceViewRepositoryResult,
};
