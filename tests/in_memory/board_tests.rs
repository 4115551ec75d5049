//! In-memory integration tests for the board projection and drag-and-drop.

use super::helpers::{PinnedClock, TestStore, clock, owner, storage, store_over};
use chrono::NaiveDate;
use rstest::{fixture, rstest};
use taskboard::{
    board::{BoardProjection, DropOutcome, TransitionController},
    task::{
        adapters::memory::InMemoryKeyValueStore,
        domain::{TaskId, TaskStatus},
    },
};

#[fixture]
fn alice_store(storage: InMemoryKeyValueStore, clock: PinnedClock) -> TestStore {
    let mut store = store_over(&storage, clock);
    store
        .initialize(owner("alice"))
        .expect("initialise alice's board");
    store
}

fn column_ids(store: &TestStore, status: TaskStatus) -> Vec<String> {
    BoardProjection::new(store)
        .by_status(status)
        .iter()
        .map(|task| task.id().to_string())
        .collect()
}

#[rstest]
fn seeded_board_has_one_task_per_column(alice_store: TestStore) {
    let board = BoardProjection::new(&alice_store).board();

    for column in board.columns() {
        assert_eq!(column.len(), 1, "column {}", column.title());
    }
    assert_eq!(column_ids(&alice_store, TaskStatus::InProgress), vec!["2"]);
}

#[rstest]
fn drag_to_completed_moves_welcome_task(
    mut alice_store: TestStore,
) -> Result<(), eyre::Report> {
    let welcome = TaskId::new("1")?;
    let mut controller = TransitionController::new();

    controller.begin_drag(welcome.clone());
    let outcome = controller.complete_drop(&mut alice_store, &welcome, TaskStatus::Completed)?;

    eyre::ensure!(matches!(outcome, DropOutcome::Moved(_)));
    eyre::ensure!(controller.dragging().is_none());
    eyre::ensure!(column_ids(&alice_store, TaskStatus::Todo).is_empty());
    eyre::ensure!(column_ids(&alice_store, TaskStatus::Completed) == ["1", "3"]);
    Ok(())
}

#[rstest]
fn moved_task_is_no_longer_overdue(mut alice_store: TestStore) -> Result<(), eyre::Report> {
    let later = NaiveDate::from_ymd_opt(2026, 6, 10).ok_or_else(|| eyre::eyre!("bad date"))?;
    let overdue_before = BoardProjection::new(&alice_store).overdue(later).len();

    let id = TaskId::new("2")?;
    let mut controller = TransitionController::new();
    controller.begin_drag(id.clone());
    controller.complete_drop(&mut alice_store, &id, TaskStatus::Completed)?;

    let overdue_after = BoardProjection::new(&alice_store).overdue(later).len();
    eyre::ensure!(overdue_before == 2, "expected two overdue, got {overdue_before}");
    eyre::ensure!(overdue_after == 1, "expected one overdue, got {overdue_after}");
    Ok(())
}
