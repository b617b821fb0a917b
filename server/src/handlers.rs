// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use crate::routes::AppState;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
};
use common::{
    CreateTaskPayload, ImportTaskRecord, SetAlarmPayload, SetCompletedPayload, SortKey, Task,
    TaskFilter, UpdatePriorityPayload, UpdateTextPayload,
};
use serde::Deserialize;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::{debug, error, info};

/// Query parameters for task listing. Unknown filter or sort values are
/// rejected by deserialization before any handler code runs.
#[derive(Deserialize, Debug, Default)]
pub struct ListTasksParams {
    #[serde(default)]
    pub filter: Option<TaskFilter>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

/// Handler for listing tasks, optionally filtered and sorted.
pub async fn list_tasks(
    State(state): State<AppState>, // State injection (DB pool + event channel)
    Query(params): Query<ListTasksParams>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = database::list_tasks_in_db(
        &state.pool,
        params.filter.unwrap_or_default(),
        params.sort.unwrap_or_default(),
    )
    .await?;
    info!("Successfully retrieved {} tasks.", tasks.len());
    Ok(Json(tasks))
}

/// Handler for creating a new task.
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskPayload>, // Extracting the request body as JSON
) -> Result<(StatusCode, Json<Task>), AppError> {
    debug!("Received request to create task: {:?}", payload.text);
    // Validate the payload: the text must not be empty
    if payload.text.is_empty() {
        error!("Validation failed: Task text is empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Task text cannot be empty.",
        ));
    }

    let new_task = database::create_task_in_db(&state.pool, payload).await?;

    info!("Task created successfully with ID: {}", new_task.id);

    // Return a 201 Created status with the new task as JSON.
    Ok((StatusCode::CREATED, Json(new_task)))
}

/// Handler for deleting a task by ID.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>, // Extract task ID from the URL path
) -> Result<StatusCode, AppError> {
    debug!("Attempting to delete task with ID: {task_id}");

    let deleted = database::delete_task_in_db(&state.pool, task_id).await?;

    if deleted {
        info!("Task with ID {task_id} deleted successfully.");
        Ok(StatusCode::NO_CONTENT) // 204 No Content for successful deletion
    } else {
        error!("Task with ID {task_id} not found for deletion.");
        Err(AppError::new(
            StatusCode::NOT_FOUND,
            &format!("Task with ID {task_id} not found for deletion."),
        ))
    }
}

/// Handler for removing every completed task in one operation.
pub async fn clear_completed(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Received request to clear completed tasks.");

    let num_cleared = database::clear_completed_in_db(&state.pool).await?;

    info!("Successfully cleared {} completed tasks.", num_cleared);

    Ok(Json(serde_json::json!({
        "message": format!("Successfully cleared {} completed tasks.", num_cleared),
        "tasks_cleared": num_cleared
    })))
}

/// Handler for marking a task as completed (or active again).
pub async fn set_completed(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<SetCompletedPayload>,
) -> Result<StatusCode, AppError> {
    let updated = database::set_completed_in_db(&state.pool, task_id, payload.completed).await?;

    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(task_id))
    }
}

/// Handler for editing a task's text in place.
pub async fn update_task_text(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdateTextPayload>,
) -> Result<StatusCode, AppError> {
    if payload.text.is_empty() {
        error!("Validation failed: Task text is empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Task text cannot be empty.",
        ));
    }

    let updated = database::update_task_text_in_db(&state.pool, task_id, &payload.text).await?;

    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(task_id))
    }
}

/// Handler for changing a task's priority. Invalid priority strings never
/// reach this point: deserialization into the `Priority` enum rejects them.
pub async fn update_task_priority(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdatePriorityPayload>,
) -> Result<StatusCode, AppError> {
    let updated =
        database::update_task_priority_in_db(&state.pool, task_id, payload.priority).await?;

    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(task_id))
    }
}

/// Handler for scheduling a task's one-shot alarm.
pub async fn set_alarm(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<SetAlarmPayload>,
) -> Result<StatusCode, AppError> {
    let updated = database::set_alarm_in_db(&state.pool, task_id, payload.alarm_time).await?;

    if updated {
        info!("Alarm set for task {task_id} at {}.", payload.alarm_time);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(task_id))
    }
}

/// Handler for cancelling a task's alarm. Clearing is idempotent, so an
/// already-clear (or unknown) task still answers 204.
pub async fn remove_alarm(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    database::clear_alarm_in_db(&state.pool, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for bulk-importing tasks from an exported JSON document.
pub async fn import_tasks(
    State(state): State<AppState>,
    Json(records): Json<Vec<ImportTaskRecord>>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Received request to import {} task records.", records.len());

    let num_imported = database::import_tasks_in_db(&state.pool, records).await?;

    info!("Successfully imported {} tasks.", num_imported);

    Ok(Json(serde_json::json!({
        "message": format!("Successfully imported {} tasks.", num_imported),
        "tasks_imported": num_imported
    })))
}

/// Handler for listing overdue alarms: active tasks whose alarm time is
/// already in the past. Read-only: the periodic scheduler is the only
/// path that fires and clears.
pub async fn overdue_alarms(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let overdue =
        database::get_overdue_tasks_from_db(&state.pool, database::local_now()).await?;
    Ok(Json(overdue))
}

/// Handler streaming alarm-fired events to the frontend as SSE, in the
/// order the scheduler publishes them.
pub async fn alarm_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.alarm_events.subscribe();
    let stream = BroadcastStream::new(rx)
        // A lagged subscriber just skips the alarms it missed.
        .filter_map(|event| event.ok())
        .map(|fired| Event::default().event("alarm").json_data(&fired));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// --- Custom Error Handling ---
// This is a good practice for transforming our internal errors
// (e.g., from the database) into appropriate HTTP responses.

/// Our custom error type for the application.
pub struct AppError {
    code: StatusCode,
    message: String,
}

impl AppError {
    fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }

    fn not_found(task_id: i64) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            &format!("Task with ID {task_id} not found."),
        )
    }
}

/// Allows converting an `anyhow::Error` (coming from `database.rs`)
/// into our `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log the internal error for debugging.
        tracing::error!("Internal server error: {:?}", err);
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred.".to_string(),
        }
    }
}

/// Allows Axum to convert our `AppError` into an HTTP `Response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            "Responding with error: status_code={}, message={}",
            self.code.as_u16(),
            self.message
        );
        (
            self.code,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
