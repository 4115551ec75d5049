//! The task store: sole owner of the signed-in user's task collection.

use crate::task::{
    domain::{
        NewTask, OwnerId, Task, TaskDomainError, TaskId, TaskPatch, TaskPriority, TaskStatus,
        TaskTitle,
    },
    ports::{IdentityProvider, KeyValueStore, StorageError, StorageKey},
    services::sample_tasks,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
}

impl CreateTaskRequest {
    /// Creates a request for a to-do task with no description or due date.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: TaskPriority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority,
            status: TaskStatus::Todo,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial stage.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        Ok(NewTask {
            title: TaskTitle::new(self.title)?,
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_date: self.due_date,
        })
    }
}

/// Errors returned by task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// Caller input failed domain validation.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// No task with the identifier exists for the signed-in user.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A mutation was attempted while nobody is signed in.
    #[error("no user is signed in")]
    NoActiveOwner,

    /// Durable storage rejected a read or write.
    #[error(transparent)]
    Persistence(#[from] StorageError),

    /// The collection could not be serialised.
    #[error("failed to encode task collection: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The stored collection could not be decoded.
    #[error("stored task collection '{key}' is unreadable: {reason}")]
    CorruptDocument {
        /// Key of the offending document.
        key: StorageKey,
        /// Description of the defect.
        reason: String,
    },
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

#[derive(Debug)]
struct Session {
    owner: OwnerId,
    key: StorageKey,
    tasks: Vec<Task>,
}

/// Task store bound to at most one owner at a time.
///
/// Every mutation is computed on a copy of the collection, written to
/// storage, and only then made visible. A failed write therefore leaves both
/// memory and storage as they were.
pub struct TaskStore<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    storage: Arc<S>,
    clock: Arc<C>,
    session: Option<Session>,
}

impl<S, C> TaskStore<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a store with no signed-in owner.
    #[must_use]
    pub const fn new(storage: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            storage,
            clock,
            session: None,
        }
    }

    /// Loads `owner`'s collection, seeding and persisting the sample tasks
    /// when nothing is stored yet.
    ///
    /// Any previous session is replaced only once loading succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when storage cannot be read or
    /// the seed cannot be written, and [`TaskStoreError::CorruptDocument`]
    /// when the stored collection cannot be decoded.
    pub fn initialize(&mut self, owner: OwnerId) -> TaskStoreResult<&[Task]> {
        let key = StorageKey::for_owner(&owner);
        let tasks = if let Some(document) = self.storage.get(&key)? {
            let loaded = decode(&owner, &key, &document)?;
            info!(owner = %owner, tasks = loaded.len(), "loaded task collection");
            loaded
        } else {
            let seeded = sample_tasks(&owner, &*self.clock)?;
            if let Err(err) = write_collection(&*self.storage, &key, &seeded) {
                warn!(owner = %owner, error = %err, "sample task write failed");
                return Err(err);
            }
            info!(owner = %owner, tasks = seeded.len(), "seeded sample tasks");
            seeded
        };

        let session = self.session.insert(Session { owner, key, tasks });
        Ok(&session.tasks)
    }

    /// Applies an identity change: `None` signs out, a new owner reloads,
    /// the current owner is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`TaskStore::initialize`].
    pub fn on_identity_change(&mut self, owner: Option<OwnerId>) -> TaskStoreResult<()> {
        match owner {
            None => {
                if let Some(previous) = self.session.take() {
                    info!(owner = %previous.owner, "signed out; task collection released");
                }
                Ok(())
            }
            Some(current) if self.owner() == Some(&current) => Ok(()),
            Some(current) => self.initialize(current).map(|_| ()),
        }
    }

    /// Reads the current owner from `identity` and applies it.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`TaskStore::on_identity_change`].
    pub fn sync_identity(&mut self, identity: &impl IdentityProvider) -> TaskStoreResult<()> {
        self.on_identity_change(identity.current_owner())
    }

    /// Returns the signed-in owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&OwnerId> {
        self.session.as_ref().map(|session| &session.owner)
    }

    /// Returns every task in insertion order; empty when nobody is signed in.
    #[must_use]
    pub fn list_all(&self) -> &[Task] {
        self.session
            .as_ref()
            .map(|session| session.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.list_all().iter().find(|task| task.id() == id)
    }

    /// Returns the tasks in `status`, preserving their relative order.
    #[must_use]
    pub fn by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.list_all()
            .iter()
            .filter(|task| task.status() == status)
            .cloned()
            .collect()
    }

    /// Creates a task for the signed-in owner.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] for a blank title,
    /// [`TaskStoreError::NoActiveOwner`] when nobody is signed in, and
    /// persistence errors when the write fails.
    pub fn create(&mut self, request: CreateTaskRequest) -> TaskStoreResult<Task> {
        let fields = request.into_new_task()?;
        let clock = Arc::clone(&self.clock);
        let task = self.commit(|owner, tasks| {
            let task = Task::new(fresh_id(tasks), owner.clone(), fields, &*clock);
            tasks.push(task.clone());
            Ok(task)
        })?;
        debug!(task_id = %task.id(), "created task");
        Ok(task)
    }

    /// Merges `patch` onto the task with `id`.
    ///
    /// An empty patch returns the task as it is without writing to storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no such task exists, leaving
    /// the collection unchanged, and persistence errors when the write fails.
    pub fn update(&mut self, id: &TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        if patch.is_empty() {
            let session = self.session.as_ref().ok_or(TaskStoreError::NoActiveOwner)?;
            return session
                .tasks
                .iter()
                .find(|task| task.id() == id)
                .cloned()
                .ok_or_else(|| TaskStoreError::NotFound(id.clone()));
        }
        let task = self.commit(|_, tasks| {
            let task = find_mut(tasks, id)?;
            task.apply(patch);
            Ok(task.clone())
        })?;
        debug!(task_id = %id, "updated task");
        Ok(task)
    }

    /// Moves the task with `id` to `status`. Every stage accepts every other.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no such task exists and
    /// persistence errors when the write fails.
    pub fn set_status(&mut self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        let task = self.commit(|_, tasks| {
            let task = find_mut(tasks, id)?;
            task.set_status(status);
            Ok(task.clone())
        })?;
        debug!(task_id = %id, status = %status, "moved task");
        Ok(task)
    }

    /// Permanently removes the task with `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no such task exists and
    /// persistence errors when the write fails.
    pub fn delete(&mut self, id: &TaskId) -> TaskStoreResult<Task> {
        let task = self.commit(|_, tasks| {
            let position = tasks
                .iter()
                .position(|task| task.id() == id)
                .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
            Ok(tasks.remove(position))
        })?;
        debug!(task_id = %id, "deleted task");
        Ok(task)
    }

    /// Runs `mutate` against a copy of the collection, persists the copy,
    /// then swaps it in.
    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&OwnerId, &mut Vec<Task>) -> TaskStoreResult<T>,
    ) -> TaskStoreResult<T> {
        let session = self.session.as_mut().ok_or(TaskStoreError::NoActiveOwner)?;
        let mut next = session.tasks.clone();
        let outcome = mutate(&session.owner, &mut next)?;
        if let Err(err) = write_collection(&*self.storage, &session.key, &next) {
            warn!(owner = %session.owner, error = %err, "task collection write failed");
            return Err(err);
        }
        session.tasks = next;
        Ok(outcome)
    }
}

fn fresh_id(tasks: &[Task]) -> TaskId {
    loop {
        let candidate = TaskId::generate();
        if tasks.iter().all(|task| task.id() != &candidate) {
            return candidate;
        }
    }
}

fn find_mut<'a>(tasks: &'a mut [Task], id: &TaskId) -> TaskStoreResult<&'a mut Task> {
    tasks
        .iter_mut()
        .find(|task| task.id() == id)
        .ok_or_else(|| TaskStoreError::NotFound(id.clone()))
}

fn write_collection(
    storage: &impl KeyValueStore,
    key: &StorageKey,
    tasks: &[Task],
) -> TaskStoreResult<()> {
    let document = serde_json::to_string(tasks).map_err(TaskStoreError::Encoding)?;
    storage.set(key, &document)?;
    Ok(())
}

fn decode(owner: &OwnerId, key: &StorageKey, document: &str) -> TaskStoreResult<Vec<Task>> {
    let corrupt = |reason: String| TaskStoreError::CorruptDocument {
        key: key.clone(),
        reason,
    };
    let tasks: Vec<Task> =
        serde_json::from_str(document).map_err(|err| corrupt(err.to_string()))?;

    if let Some(foreign) = tasks.iter().find(|task| task.owner_id() != owner) {
        return Err(corrupt(format!(
            "task {} belongs to {}",
            foreign.id(),
            foreign.owner_id()
        )));
    }

    let mut seen = HashSet::with_capacity(tasks.len());
    if let Some(duplicate) = tasks.iter().find(|task| !seen.insert(task.id())) {
        return Err(corrupt(format!("duplicate task id {}", duplicate.id())));
    }
    Ok(tasks)
}
