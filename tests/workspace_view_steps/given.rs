//! Given steps for workspace view BDD scenarios.

use super::world::{ViewWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use workspace_views::workspace_view::services::CreateViewRequest;

#[given("a workspace with a registered user")]
fn workspace_with_user(world: &mut ViewWorld) -> Result<(), eyre::Report> {
    world
        .directory
        .add_workspace(world.workspace)
        .wrap_err("register scenario workspace")?;
    world
        .directory
        .add_user(world.actor)
        .wrap_err("register scenario user")?;
    Ok(())
}

#[given(r#"views named "{first}" and "{second}" created in that order"#)]
fn views_created_in_order(
    world: &mut ViewWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    for name in [first, second] {
        let request = CreateViewRequest::new(world.workspace, name, json!({}));
        let created = run_async(world.store.create(request, Some(world.actor)))
            .wrap_err("create view for scenario")?;
        world.last_view = Some(created);
    }
    Ok(())
}
