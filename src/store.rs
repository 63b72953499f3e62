//! In-memory task store.
//!
//! Process-wide shared collection guarded by a `RwLock`: mutations take the
//! write lock, so id assignment and status side effects are atomic with
//! respect to concurrent requests; reads work on a snapshot and never
//! observe a partially-applied mutation.

use std::sync::RwLock;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Result, TaskError};
use crate::model::{Priority, Status, Task};

/// Validated input for creating a task. Status is always forced to
/// `pending`; there is no way to create a task as completed.
#[derive(Debug)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub user_id: i64,
}

/// Partial update. `None` means "leave the field unchanged" — a patch can
/// never null out a field by omission.
#[derive(Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub deadline: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
}

/// In-memory task collection
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
        }
    }

    /// Store pre-seeded with the demo tasks (`--demo`).
    pub fn with_demo_data() -> Self {
        Self {
            tasks: RwLock::new(demo_tasks()),
        }
    }

    /// Snapshot of the full collection. Read transforms (list/stats)
    /// operate on this copy, never on the live Vec.
    pub fn snapshot(&self) -> Result<Vec<Task>> {
        Ok(self.read()?.clone())
    }

    /// Look up a single task by id.
    pub fn get(&self, id: u64) -> Result<Task> {
        self.read()?
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TaskError::not_found("Task not found"))
    }

    /// Insert a new task: assigns the next id (max existing + 1, so ids
    /// stay unique after deletions), forces status to pending, stamps
    /// `created_at`.
    pub fn create(&self, new: NewTask) -> Result<Task> {
        let mut tasks = self.write()?;

        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: Status::Pending,
            user_id: new.user_id,
            created_at: Utc::now(),
            deadline: new.deadline,
            completed_at: None,
            updated_at: None,
        };

        tasks.push(task.clone());
        Ok(task)
    }

    /// Apply a partial patch to an existing task.
    ///
    /// Status transition side effect: moving into `completed` stamps
    /// `completed_at`; moving to any other status clears it. `updated_at`
    /// is stamped on every call.
    pub fn update(&self, id: u64, patch: TaskPatch) -> Result<Task> {
        let mut tasks = self.write()?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found("Task not found"))?;

        let now = Utc::now();

        if let Some(status) = patch.status {
            if status == Status::Completed && task.status != Status::Completed {
                task.completed_at = Some(now);
            } else if status != Status::Completed {
                task.completed_at = None;
            }
            task.status = status;
        }

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = Some(deadline);
        }
        if let Some(user_id) = patch.user_id {
            task.user_id = user_id;
        }

        task.updated_at = Some(now);
        Ok(task.clone())
    }

    /// Remove a task and return its snapshot.
    pub fn delete(&self, id: u64) -> Result<Task> {
        let mut tasks = self.write()?;

        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::not_found("Task not found"))?;

        Ok(tasks.remove(index))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Task>>> {
        self.tasks
            .read()
            .map_err(|_| TaskError::internal("Failed to fetch tasks", "task store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Task>>> {
        self.tasks
            .write()
            .map_err(|_| TaskError::internal("Failed to update tasks", "task store lock poisoned"))
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Demo fixture: the two tasks the service historically shipped with.
fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Implement authentication".to_string(),
            description: "Add user login and registration".to_string(),
            priority: Priority::High,
            status: Status::Completed,
            user_id: 1,
            created_at: Utc.with_ymd_and_hms(2024, 1, 27, 10, 0, 0).unwrap(),
            deadline: Some(Utc.with_ymd_and_hms(2024, 1, 30, 23, 59, 59).unwrap()),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 1, 27, 15, 30, 0).unwrap()),
            updated_at: None,
        },
        Task {
            id: 2,
            title: "Write API documentation".to_string(),
            description: "Create README and endpoint docs".to_string(),
            priority: Priority::Medium,
            status: Status::InProgress,
            user_id: 2,
            created_at: Utc.with_ymd_and_hms(2024, 1, 27, 11, 0, 0).unwrap(),
            deadline: Some(Utc.with_ymd_and_hms(2024, 2, 1, 23, 59, 59).unwrap()),
            completed_at: None,
            updated_at: None,
        },
    ]
}
