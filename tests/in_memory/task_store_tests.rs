//! In-memory integration tests for task store operations.

use super::helpers::{PinnedClock, clock, owner, storage, store_over};
use chrono::NaiveDate;
use rstest::rstest;
use taskboard::task::{
    adapters::{identity::StaticIdentity, memory::InMemoryKeyValueStore},
    domain::{TaskPatch, TaskPriority, TaskStatus},
    ports::{KeyValueStore, StorageKey},
    services::{CreateTaskRequest, TaskStoreError},
};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| eyre::eyre!("invalid date"))
}

#[rstest]
fn first_sign_in_seeds_sample_board(
    storage: InMemoryKeyValueStore,
    clock: PinnedClock,
) -> Result<(), eyre::Report> {
    let mut store = store_over(&storage, clock);

    let tasks = store.initialize(owner("alice"))?.to_vec();

    let titles: Vec<_> = tasks.iter().map(|task| task.title().as_str()).collect();
    eyre::ensure!(
        titles
            == [
                "Welcome to Task Manager",
                "Try dragging tasks",
                "Set task priorities"
            ],
        "unexpected seed titles {titles:?}"
    );
    let due: Vec<_> = tasks.iter().map(|task| task.due_date()).collect();
    eyre::ensure!(
        due == [
            Some(date(2026, 6, 2)?),
            Some(date(2026, 6, 3)?),
            Some(date(2026, 5, 31)?)
        ],
        "unexpected seed due dates {due:?}"
    );
    let key = StorageKey::for_owner(&owner("alice"));
    eyre::ensure!(key.as_str() == "tasks-alice");
    eyre::ensure!(storage.get(&key)?.is_some(), "seed was not persisted");
    Ok(())
}

#[rstest]
fn deletions_survive_a_restart(
    storage: InMemoryKeyValueStore,
    clock: PinnedClock,
) -> Result<(), eyre::Report> {
    let mut first = store_over(&storage, clock);
    first.initialize(owner("alice"))?;
    let created = first.create(CreateTaskRequest::new("Buy milk", TaskPriority::Low))?;
    first.delete(created.id())?;
    drop(first);

    let mut second = store_over(&storage, clock);
    second.initialize(owner("alice"))?;

    eyre::ensure!(second.list_all().len() == 3);
    eyre::ensure!(second.get(created.id()).is_none());
    Ok(())
}

#[rstest]
fn edits_are_reloaded_verbatim(
    storage: InMemoryKeyValueStore,
    clock: PinnedClock,
) -> Result<(), eyre::Report> {
    let mut first = store_over(&storage, clock);
    first.initialize(owner("alice"))?;
    let created = first.create(
        CreateTaskRequest::new("Buy milk", TaskPriority::Low).with_due_date(date(2026, 6, 5)?),
    )?;
    let updated = first.update(
        created.id(),
        TaskPatch::new()
            .with_description("Semi-skimmed")
            .with_status(TaskStatus::InProgress),
    )?;

    let mut second = store_over(&storage, clock);
    second.initialize(owner("alice"))?;

    eyre::ensure!(second.list_all() == first.list_all());
    eyre::ensure!(second.get(created.id()) == Some(&updated));
    Ok(())
}

#[rstest]
fn owners_never_see_each_others_tasks(
    storage: InMemoryKeyValueStore,
    clock: PinnedClock,
) -> Result<(), eyre::Report> {
    let mut store = store_over(&storage, clock);
    store.sync_identity(&StaticIdentity::signed_in(owner("alice")))?;
    let private = store.create(CreateTaskRequest::new("Alice's secret", TaskPriority::High))?;

    store.sync_identity(&StaticIdentity::signed_in(owner("bob")))?;
    eyre::ensure!(store.get(private.id()).is_none());
    eyre::ensure!(
        store
            .list_all()
            .iter()
            .all(|task| task.owner_id().as_str() == "bob")
    );

    store.sync_identity(&StaticIdentity::signed_out())?;
    eyre::ensure!(store.list_all().is_empty());
    let result = store.create(CreateTaskRequest::new("Orphan", TaskPriority::Low));
    eyre::ensure!(matches!(result, Err(TaskStoreError::NoActiveOwner)));
    Ok(())
}

#[rstest]
fn emptied_board_is_not_reseeded(
    storage: InMemoryKeyValueStore,
    clock: PinnedClock,
) -> Result<(), eyre::Report> {
    let mut first = store_over(&storage, clock);
    let ids: Vec<_> = first
        .initialize(owner("alice"))?
        .iter()
        .map(|task| task.id().clone())
        .collect();
    for id in &ids {
        first.delete(id)?;
    }

    let mut second = store_over(&storage, clock);
    second.initialize(owner("alice"))?;

    eyre::ensure!(second.list_all().is_empty());
    Ok(())
}
