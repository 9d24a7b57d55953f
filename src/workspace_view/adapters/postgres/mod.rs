//! `PostgreSQL` adapters for workspace view persistence.

mod directory;
mod models;
mod repository;
mod schema;

pub use directory::PostgresDirectory;
pub use repository::{PostgresWorkspaceViewRepository, ViewPgPool};
