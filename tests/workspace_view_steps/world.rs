//! Shared world state for workspace view BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::SteppingClock;
use rstest::fixture;
use workspace_views::workspace_view::{
    adapters::memory::{InMemoryDirectory, InMemoryWorkspaceViewRepository},
    domain::{UserId, WorkspaceId, WorkspaceView},
    services::{WorkspaceViewServiceError, WorkspaceViewStore},
};

/// Store type used by the BDD world.
pub type TestViewStore = WorkspaceViewStore<
    InMemoryWorkspaceViewRepository,
    InMemoryDirectory,
    InMemoryDirectory,
    SteppingClock,
>;

/// Scenario world for workspace view behaviour tests.
pub struct ViewWorld {
    /// The store under test.
    pub store: TestViewStore,
    /// Directory backing workspace and user lookups.
    pub directory: Arc<InMemoryDirectory>,
    /// Workspace the scenario operates in.
    pub workspace: WorkspaceId,
    /// User acting in the scenario.
    pub actor: UserId,
    /// Second user, registered on demand.
    pub editor: Option<UserId>,
    /// Most recently created or updated view.
    pub last_view: Option<WorkspaceView>,
    /// Result of the last create attempt.
    pub last_create_result: Option<Result<WorkspaceView, WorkspaceViewServiceError>>,
    /// Result of the last listing.
    pub last_listing: Vec<WorkspaceView>,
    /// Count reported by the last cleanup hook.
    pub last_removed: Option<usize>,
}

impl ViewWorld {
    /// Creates a world with an empty store and unregistered ids.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let store = WorkspaceViewStore::new(
            Arc::new(InMemoryWorkspaceViewRepository::new()),
            Arc::clone(&directory),
            Arc::clone(&directory),
            Arc::new(SteppingClock::new()),
        );
        Self {
            store,
            directory,
            workspace: WorkspaceId::new(),
            actor: UserId::new(),
            editor: None,
            last_view: None,
            last_create_result: None,
            last_listing: Vec::new(),
            last_removed: None,
        }
    }

    /// Returns the most recent view or an error naming the missing step.
    pub fn view(&self) -> Result<&WorkspaceView, eyre::Report> {
        self.last_view
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no view recorded in scenario world"))
    }
}

impl Default for ViewWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ViewWorld {
    ViewWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
