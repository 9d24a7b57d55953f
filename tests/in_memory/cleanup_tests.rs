//! Workspace cascade and user reference cleanup.

use super::helpers::{Seeded, seeded, sprint_request};
use rstest::rstest;
use workspace_views::workspace_view::services::UpdateViewRequest;

#[rstest]
#[case(0)]
#[case(1)]
#[case(7)]
#[tokio::test(flavor = "multi_thread")]
async fn workspace_deletion_removes_every_view(seeded: Seeded, #[case] count: usize) {
    for _ in 0..count {
        seeded
            .store
            .create(sprint_request(seeded.workspace), None)
            .await
            .expect("create should succeed");
    }

    let removed = seeded
        .store
        .on_workspace_deleted(seeded.workspace)
        .await
        .expect("cascade should succeed");
    seeded
        .directory
        .remove_workspace(seeded.workspace)
        .expect("workspace removal should succeed");

    assert_eq!(removed, count);
    assert!(
        seeded
            .store
            .list_by_workspace(seeded.workspace)
            .await
            .expect("listing should succeed")
            .is_empty()
    );
    let late = seeded
        .store
        .create(sprint_request(seeded.workspace), None)
        .await;
    assert!(late.is_err_and(|err| err.is_validation()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_deletion_only_touches_that_user(seeded: Seeded) {
    let bystander = seeded.new_user();
    let mine = seeded
        .store
        .create(sprint_request(seeded.workspace), Some(seeded.actor))
        .await
        .expect("create should succeed");
    let theirs = seeded
        .store
        .create(sprint_request(seeded.workspace), Some(bystander))
        .await
        .expect("create should succeed");
    let shared = seeded
        .store
        .create(sprint_request(seeded.workspace), Some(bystander))
        .await
        .expect("create should succeed");
    seeded
        .store
        .update(shared.id(), UpdateViewRequest::new(), Some(seeded.actor))
        .await
        .expect("update should succeed");

    let affected = seeded
        .store
        .on_user_deleted(seeded.actor)
        .await
        .expect("cleanup should succeed");

    assert_eq!(affected, 2);
    let views = seeded
        .store
        .list_by_workspace(seeded.workspace)
        .await
        .expect("listing should succeed");
    assert_eq!(views.len(), 3);
    for view in views {
        assert_ne!(view.created_by(), Some(seeded.actor));
        assert_ne!(view.updated_by(), Some(seeded.actor));
    }
    let untouched = seeded.store.get(theirs.id()).await.expect("get");
    assert_eq!(untouched, theirs);
    let orphaned = seeded.store.get(mine.id()).await.expect("get");
    assert_eq!(orphaned.created_by(), None);
    let edited = seeded.store.get(shared.id()).await.expect("get");
    assert_eq!(edited.created_by(), Some(bystander));
    assert_eq!(edited.updated_by(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_cleanup_without_references_is_a_no_op(seeded: Seeded) {
    seeded
        .store
        .create(sprint_request(seeded.workspace), Some(seeded.actor))
        .await
        .expect("create should succeed");
    let stranger = seeded.new_user();

    let affected = seeded
        .store
        .on_user_deleted(stranger)
        .await
        .expect("cleanup should succeed");

    assert_eq!(affected, 0);
}
