//! In-memory adapters for workspace view persistence.

mod directory;
mod repository;

pub use directory::InMemoryDirectory;
pub use repository::InMemoryWorkspaceViewRepository;
