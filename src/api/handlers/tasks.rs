//! Task API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::auth::AuthToken;
use crate::api::state::AppState;
use crate::error::{Result, TaskError};
use crate::model::{Priority, Status, Task};
use crate::query::{self, TaskFilter};
use crate::store::{NewTask, TaskPatch};

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Task list query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub user_id: Option<String>,
    pub search: Option<String>,
}

/// Task plus the derived overdue flag
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}

/// Task list response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub count: usize,
    pub tasks: Vec<TaskResponse>,
}

/// Single task response
#[derive(Debug, Serialize)]
pub struct SingleTaskResponse {
    pub success: bool,
    pub task: TaskResponse,
}

/// Create task request. All fields optional so that shape validation (not
/// deserialization) decides what is missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub user_id: Option<i64>,
}

/// Partial update request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub deadline: Option<String>,
    pub user_id: Option<i64>,
}

/// Mutation response (create/update/delete)
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    pub task: Task,
}

/// Per-user task list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTasksResponse {
    pub success: bool,
    /// Echo of the requested user id; null when the path segment wasn't numeric
    pub user_id: Option<i64>,
    pub task_count: usize,
    pub tasks: Vec<Task>,
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate a title field. `required` distinguishes Create (must be
/// present) from Update (validated only when present).
fn validate_title(title: Option<&str>, required: bool) -> Result<Option<String>> {
    match title {
        Some(t) if t.trim().chars().count() >= 3 => Ok(Some(t.to_string())),
        Some(_) => Err(TaskError::validation(
            "Title is required and must be at least 3 characters",
        )),
        None if required => Err(TaskError::validation(
            "Title is required and must be at least 3 characters",
        )),
        None => Ok(None),
    }
}

fn parse_priority(input: Option<&str>) -> Result<Option<Priority>> {
    match input {
        Some(p) => p
            .parse()
            .map(Some)
            .map_err(|_| TaskError::validation("Priority must be: low, medium, high, or critical")),
        None => Ok(None),
    }
}

fn parse_status(input: Option<&str>) -> Result<Option<Status>> {
    match input {
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| TaskError::validation("Status must be: pending, in-progress, or completed")),
        None => Ok(None),
    }
}

/// Parse and validate an optional deadline: must be RFC 3339 and strictly
/// in the future.
fn parse_deadline(input: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match input {
        Some(raw) => {
            let deadline = DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    TaskError::validation("Deadline must be a valid RFC 3339 timestamp")
                })?;
            if deadline <= Utc::now() {
                return Err(TaskError::validation("Deadline must be in the future"));
            }
            Ok(Some(deadline))
        }
        None => Ok(None),
    }
}

/// Parse a task id path segment. A non-numeric id can't match any task, so
/// it reports NotFound rather than a parse error.
fn parse_task_id(raw: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| TaskError::not_found("Task not found"))
}

fn task_to_response(task: Task, now: DateTime<Utc>) -> TaskResponse {
    let is_overdue = task.is_overdue(now);
    TaskResponse {
        id: task.id,
        title: task.title,
        description: task.description,
        priority: task.priority,
        status: task.status,
        user_id: task.user_id,
        created_at: task.created_at,
        deadline: task.deadline,
        completed_at: task.completed_at,
        updated_at: task.updated_at,
        is_overdue,
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/tasks
/// List tasks with optional filters (status, priority, userId, search)
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<TaskListQuery>,
) -> Result<Json<TaskListResponse>> {
    let filter = TaskFilter {
        status: params.status,
        priority: params.priority,
        user_id: params.user_id,
        search: params.search,
    };

    let now = Utc::now();
    let tasks: Vec<TaskResponse> = query::apply(state.store.snapshot()?, &filter)
        .into_iter()
        .map(|t| task_to_response(t, now))
        .collect();

    Ok(Json(TaskListResponse {
        success: true,
        count: tasks.len(),
        tasks,
    }))
}

/// GET /api/tasks/:id
/// Get a single task
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SingleTaskResponse>> {
    let task = state.store.get(parse_task_id(&id)?)?;

    Ok(Json(SingleTaskResponse {
        success: true,
        task: task_to_response(task, Utc::now()),
    }))
}

/// POST /api/tasks
/// Create a new task (protected). Field validation runs before the auth
/// check, so a bad title with a missing token reports 400, not 401.
pub async fn create_task(
    State(state): State<AppState>,
    token: AuthToken,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<MutationResponse>)> {
    let title = validate_title(req.title.as_deref(), true)?.unwrap_or_default();
    let priority = parse_priority(req.priority.as_deref())?.unwrap_or(Priority::Medium);
    let deadline = parse_deadline(req.deadline.as_deref())?;

    state.auth.require(token.0.as_deref(), "create")?;

    let task = state.store.create(NewTask {
        title,
        description: req.description.unwrap_or_default(),
        priority,
        deadline,
        // Default to the first user if not specified
        user_id: req.user_id.unwrap_or(1),
    })?;

    tracing::info!(id = task.id, user_id = task.user_id, "task created");

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            success: true,
            message: "Task created successfully!".to_string(),
            task,
        }),
    ))
}

/// PUT /api/tasks/:id
/// Patch a task (protected). Present fields get the same validation as
/// Create; status transitions manage the completedAt stamp.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: AuthToken,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<MutationResponse>> {
    let patch = TaskPatch {
        title: validate_title(req.title.as_deref(), false)?,
        description: req.description,
        priority: parse_priority(req.priority.as_deref())?,
        status: parse_status(req.status.as_deref())?,
        deadline: parse_deadline(req.deadline.as_deref())?,
        user_id: req.user_id,
    };

    state.auth.require(token.0.as_deref(), "update")?;

    let task = state.store.update(parse_task_id(&id)?, patch)?;

    tracing::info!(id = task.id, status = %task.status, "task updated");

    Ok(Json(MutationResponse {
        success: true,
        message: "Task updated successfully!".to_string(),
        task,
    }))
}

/// DELETE /api/tasks/:id
/// Delete a task (protected) and return its final snapshot
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    token: AuthToken,
) -> Result<Json<MutationResponse>> {
    state.auth.require(token.0.as_deref(), "delete")?;

    let task = state.store.delete(parse_task_id(&id)?)?;

    tracing::info!(id = task.id, "task deleted");

    Ok(Json(MutationResponse {
        success: true,
        message: "Task deleted successfully!".to_string(),
        task,
    }))
}

/// GET /api/tasks/user/:userId
/// List a user's tasks. No existence check on the user id; a non-numeric
/// id matches nothing and is echoed back as null.
pub async fn user_tasks(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserTasksResponse>> {
    let user_id: Option<i64> = user_id.parse().ok();

    let tasks: Vec<Task> = match user_id {
        Some(uid) => state
            .store
            .snapshot()?
            .into_iter()
            .filter(|t| t.user_id == uid)
            .collect(),
        None => Vec::new(),
    };

    Ok(Json(UserTasksResponse {
        success: true,
        user_id,
        task_count: tasks.len(),
        tasks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::ServerAuth;
    use crate::store::TaskStore;
    use chrono::Duration;

    fn state() -> AppState {
        AppState::new(TaskStore::new(), ServerAuth::presence_only())
    }

    fn authed() -> AuthToken {
        AuthToken(Some("tok".to_string()))
    }

    fn anonymous() -> AuthToken {
        AuthToken(None)
    }

    fn create_req(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    async fn seed(state: &AppState, title: &str) -> Task {
        let (_, Json(resp)) = create_task(State(state.clone()), authed(), Json(create_req(title)))
            .await
            .unwrap();
        resp.task
    }

    #[tokio::test]
    async fn test_create_returns_201_pending() {
        let state = state();
        let future = (Utc::now() + Duration::days(30)).to_rfc3339();

        let (status, Json(resp)) = create_task(
            State(state),
            authed(),
            Json(CreateTaskRequest {
                title: Some("Write spec".to_string()),
                priority: Some("high".to_string()),
                deadline: Some(future),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(resp.success);
        assert_eq!(resp.message, "Task created successfully!");
        assert_eq!(resp.task.status, Status::Pending);
        assert_eq!(resp.task.priority, Priority::High);
        assert_eq!(resp.task.user_id, 1);
        assert!(resp.task.deadline.is_some());
    }

    #[tokio::test]
    async fn test_short_title_fails_validation_even_without_token() {
        // Validation runs before the auth check
        let err = create_task(State(state()), anonymous(), Json(create_req("ab")))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Title is required and must be at least 3 characters"
        );
    }

    #[tokio::test]
    async fn test_valid_title_without_token_is_unauthorized() {
        let err = create_task(State(state()), anonymous(), Json(create_req("Write spec")))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::AuthRequired(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_priority_and_deadline() {
        let state = state();

        let err = create_task(
            State(state.clone()),
            authed(),
            Json(CreateTaskRequest {
                title: Some("Write spec".to_string()),
                priority: Some("urgent".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Priority must be: low, medium, high, or critical"
        );

        let past = (Utc::now() - Duration::days(1)).to_rfc3339();
        let err = create_task(
            State(state.clone()),
            authed(),
            Json(CreateTaskRequest {
                title: Some("Write spec".to_string()),
                deadline: Some(past),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Deadline must be in the future");

        let err = create_task(
            State(state),
            authed(),
            Json(CreateTaskRequest {
                title: Some("Write spec".to_string()),
                deadline: Some("next tuesday".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Deadline must be a valid RFC 3339 timestamp"
        );
    }

    #[tokio::test]
    async fn test_update_status_transitions() {
        let state = state();
        let task = seed(&state, "Ship release").await;

        let Json(resp) = update_task(
            State(state.clone()),
            Path(task.id.to_string()),
            authed(),
            Json(UpdateTaskRequest {
                status: Some("completed".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(resp.task.status, Status::Completed);
        assert!(resp.task.completed_at.is_some());
        assert!(resp.task.updated_at.is_some());

        let Json(resp) = update_task(
            State(state),
            Path(task.id.to_string()),
            authed(),
            Json(UpdateTaskRequest {
                status: Some("pending".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(resp.task.status, Status::Pending);
        assert!(resp.task.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_status_is_validation_error() {
        let state = state();
        let task = seed(&state, "Ship release").await;

        let err = update_task(
            State(state),
            Path(task.id.to_string()),
            authed(),
            Json(UpdateTaskRequest {
                status: Some("done".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Status must be: pending, in-progress, or completed"
        );
    }

    #[tokio::test]
    async fn test_update_missing_task_is_not_found() {
        let err = update_task(
            State(state()),
            Path("99".to_string()),
            authed(),
            Json(UpdateTaskRequest::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_store_unchanged() {
        let state = state();
        seed(&state, "Keep me").await;

        let err = delete_task(State(state.clone()), Path("99".to_string()), authed())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));

        let Json(list) = list_tasks(
            State(state),
            Query(TaskListQuery {
                status: None,
                priority: None,
                user_id: None,
                search: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(list.count, 1);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_task() {
        let state = state();
        let task = seed(&state, "Throwaway").await;

        let Json(resp) = delete_task(State(state.clone()), Path(task.id.to_string()), authed())
            .await
            .unwrap();
        assert_eq!(resp.message, "Task deleted successfully!");
        assert_eq!(resp.task.id, task.id);

        let err = get_task(State(state), Path(task.id.to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_not_found() {
        let err = get_task(State(state()), Path("abc".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_flags_overdue() {
        let state = state();
        seed(&state, "Write docs").await;
        let urgent = seed(&state, "Fix login bug").await;
        state
            .store
            .update(
                urgent.id,
                TaskPatch {
                    priority: Some(Priority::Critical),
                    // Bypass request validation to plant an already-past deadline
                    deadline: Some(Utc::now() - Duration::hours(1)),
                    ..Default::default()
                },
            )
            .unwrap();

        let Json(list) = list_tasks(
            State(state),
            Query(TaskListQuery {
                status: None,
                priority: None,
                user_id: None,
                search: Some("login".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(list.count, 1);
        assert_eq!(list.tasks[0].id, urgent.id);
        assert!(list.tasks[0].is_overdue);
    }

    #[tokio::test]
    async fn test_user_tasks_non_numeric_echoes_null() {
        let state = state();
        seed(&state, "Write docs").await;

        let Json(resp) = user_tasks(State(state.clone()), Path("1".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.user_id, Some(1));
        assert_eq!(resp.task_count, 1);

        let Json(resp) = user_tasks(State(state), Path("nobody".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.user_id, None);
        assert_eq!(resp.task_count, 0);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["userId"], serde_json::Value::Null);
    }
}
