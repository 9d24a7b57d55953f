//! Workspace views: saved, shareable query definitions scoped to a workspace.
//!
//! This crate owns the `workspace_views` table and the lifecycle of its rows,
//! including the cleanup hooks the host application calls when a workspace
//! or user is removed.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and directories
//! - **Adapters**: `PostgreSQL` and in-memory implementations of the ports
//! - **Services**: The [`workspace_view::services::WorkspaceViewStore`]
//!   orchestration layer
//!
//! # Modules
//!
//! - [`workspace_view`]: Workspace view domain, ports, adapters and store
//! - [`config`]: Connection pool configuration loaded from the environment

pub mod config;
pub mod workspace_view;
