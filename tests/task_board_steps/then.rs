//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status};
use rstest_bdd_macros::then;
use taskboard::{
    board::{BoardProjection, DropOutcome},
    task::{
        domain::{OwnerId, Task, TaskDomainError, TaskId, TaskStatus},
        ports::{KeyValueStore, StorageKey},
        services::TaskStoreError,
    },
};

fn column_contains(
    world: &TaskBoardWorld,
    status: TaskStatus,
    id: &TaskId,
) -> Result<(), eyre::Report> {
    let column = BoardProjection::new(&world.store).by_status(status);
    eyre::ensure!(
        column.iter().any(|task| task.id() == id),
        "task {id} missing from the {status} column"
    );
    Ok(())
}

#[then("the board shows {count} tasks")]
fn board_shows_tasks(world: &TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let total = BoardProjection::new(&world.store).board().total();
    eyre::ensure!(total == count, "expected {count} tasks, found {total}");
    Ok(())
}

#[then(r#"the "{status}" column contains task "{id}""#)]
fn column_contains_task(
    world: &TaskBoardWorld,
    status: String,
    id: String,
) -> Result<(), eyre::Report> {
    column_contains(world, parse_status(&status)?, &TaskId::new(id)?)
}

#[then(r#"the "{status}" column contains the created task"#)]
fn column_contains_created_task(
    world: &TaskBoardWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let task = world
        .last_created_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing created task"))?;
    column_contains(world, parse_status(&status)?, task.id())
}

#[then(r#"the "{status}" column is empty"#)]
fn column_is_empty(world: &TaskBoardWorld, status: String) -> Result<(), eyre::Report> {
    let status = parse_status(&status)?;
    let column = BoardProjection::new(&world.store).by_status(status);
    eyre::ensure!(column.is_empty(), "the {status} column holds {} tasks", column.len());
    Ok(())
}

#[then("no drag is in progress")]
fn no_drag_in_progress(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.controller.dragging().is_none(),
        "drag marker still set"
    );
    Ok(())
}

#[then("the drop is ignored")]
fn drop_is_ignored(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.last_drop == Some(DropOutcome::Ignored),
        "expected an ignored drop, got {:?}",
        world.last_drop
    );
    Ok(())
}

#[then(r#"tasks are stored for "{user}""#)]
fn tasks_are_stored_for(world: &TaskBoardWorld, user: String) -> Result<(), eyre::Report> {
    let key = StorageKey::for_owner(&OwnerId::new(user)?);
    let document = world
        .storage
        .get(&key)?
        .ok_or_else(|| eyre::eyre!("nothing stored under {key}"))?;
    let stored: Vec<Task> = serde_json::from_str(&document)?;
    eyre::ensure!(stored == world.store.list_all(), "stored tasks differ from the board");
    Ok(())
}

#[then("creation fails with a validation error")]
fn creation_fails_with_validation_error(world: &TaskBoardWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_create_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("creation unexpectedly succeeded"))?;
    eyre::ensure!(
        matches!(
            error,
            TaskStoreError::Validation(TaskDomainError::EmptyTitle)
        ),
        "expected an empty title error, got {error:?}"
    );
    Ok(())
}

#[then(r#"moving task "{id}" to "{status}" fails because nobody is signed in"#)]
fn moving_task_fails_without_owner(
    world: &mut TaskBoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let result = world
        .store
        .set_status(&TaskId::new(id)?, parse_status(&status)?);
    eyre::ensure!(
        matches!(result, Err(TaskStoreError::NoActiveOwner)),
        "expected NoActiveOwner, got {result:?}"
    );
    Ok(())
}
