//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::{
    domain::{OwnerId, TaskId, TaskPriority},
    services::CreateTaskRequest,
};

#[when(r#""{user}" signs in"#)]
fn user_signs_in(world: &mut TaskBoardWorld, user: String) -> Result<(), eyre::Report> {
    world
        .store
        .on_identity_change(Some(OwnerId::new(user)?))
        .wrap_err("sign in")?;
    Ok(())
}

#[when("the user signs out")]
fn user_signs_out(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    world.store.on_identity_change(None).wrap_err("sign out")?;
    Ok(())
}

#[when(r#"task "{id}" is dragged onto the "{status}" column"#)]
fn task_dragged_onto_column(
    world: &mut TaskBoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id)?;
    let target = parse_status(&status)?;
    world.controller.begin_drag(task_id.clone());
    let outcome = world
        .controller
        .complete_drop(&mut world.store, &task_id, target)
        .wrap_err("drop dragged task")?;
    world.last_drop = Some(outcome);
    Ok(())
}

#[when(r#"task "{id}" is dropped onto the "{status}" column without a drag"#)]
fn task_dropped_without_drag(
    world: &mut TaskBoardWorld,
    id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id)?;
    let target = parse_status(&status)?;
    let outcome = world
        .controller
        .complete_drop(&mut world.store, &task_id, target)
        .wrap_err("drop without drag")?;
    world.last_drop = Some(outcome);
    Ok(())
}

#[when(r#"a task titled "{title}" is created"#)]
fn task_titled_is_created(world: &mut TaskBoardWorld, title: String) -> Result<(), eyre::Report> {
    let created = world
        .store
        .create(CreateTaskRequest::new(title, TaskPriority::Medium))
        .wrap_err("create task")?;
    world.last_created_task = Some(created);
    Ok(())
}

#[when("a task with a blank title is created")]
fn task_with_blank_title_is_created(world: &mut TaskBoardWorld) {
    match world
        .store
        .create(CreateTaskRequest::new("   ", TaskPriority::Medium))
    {
        Ok(task) => world.last_created_task = Some(task),
        Err(err) => world.last_create_error = Some(err),
    }
}
