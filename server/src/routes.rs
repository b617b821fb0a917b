// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use common::AlarmFired;
use sqlx::SqlitePool;
use tokio::sync::broadcast;

/// Shared application state: the store handle plus the alarm event
/// channel the scheduler publishes into.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub alarm_events: broadcast::Sender<AlarmFired>,
}

/// Creates and configures the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Associates the `GET /api/tasks` route with the `list_tasks` handler
        .route("/api/tasks", get(handlers::list_tasks))
        // Associates the `POST /api/tasks` route with the `create_task` handler
        .route("/api/tasks", post(handlers::create_task))
        // Bulk removal of completed tasks (must be routed before `{id}`)
        .route("/api/tasks/completed", delete(handlers::clear_completed))
        // Bulk import of task records from an exported JSON document
        .route("/api/tasks/import", post(handlers::import_tasks))
        // Associates the `DELETE /api/tasks/{id}` route with the `delete_task` handler
        .route("/api/tasks/{id}", delete(handlers::delete_task))
        // Field-level task updates
        .route("/api/tasks/{id}/completed", patch(handlers::set_completed))
        .route("/api/tasks/{id}/text", patch(handlers::update_task_text))
        .route(
            "/api/tasks/{id}/priority",
            patch(handlers::update_task_priority),
        )
        // Alarm scheduling and cancellation
        .route("/api/tasks/{id}/alarm", put(handlers::set_alarm))
        .route("/api/tasks/{id}/alarm", delete(handlers::remove_alarm))
        // Overdue alarms (read-only) and the live alarm event stream
        .route("/api/alarms/overdue", get(handlers::overdue_alarms))
        .route("/api/alarms/events", get(handlers::alarm_events))
        // Adds the shared state to the application
        .with_state(state)
}
