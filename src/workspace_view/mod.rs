//! Saved workspace views.
//!
//! A workspace view is a named filter/sort definition that members of a
//! workspace can save and share. This module persists views, scopes them to
//! their workspace, and exposes the cleanup hooks the host application runs
//! when a workspace or user is deleted. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
