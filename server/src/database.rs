// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use common::{CreateTaskPayload, ImportTaskRecord, Priority, SortKey, Task, TaskFilter};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool}; // Added MigrateDatabase for database_exists/create_database
use tracing::{debug, info, warn};

/// Current local wall-clock time. Every timestamp comparison in the
/// system uses this same clock source.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Establishes the database connection pool.
/// If the database does not exist, it creates it.
/// It also ensures the `tasks` table has the correct schema.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url) // Use the passed URL
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url) // Use the passed URL
        .await
        .context("Failed to connect to database")?;

    create_tasks_table(&pool).await?;

    info!("'tasks' table is ready.");

    Ok(pool)
}

/// Creates the `tasks` table if it is missing. Shared between the main
/// application and the test setup so the schema cannot drift.
pub async fn create_tasks_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT 0,
            priority TEXT NOT NULL DEFAULT 'normal',
            created_at TIMESTAMP NOT NULL,
            alarm_time TIMESTAMP NULL
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'tasks' table")?;

    Ok(())
}

/// Inserts a new task into the database.
pub async fn create_task_in_db(pool: &SqlitePool, payload: CreateTaskPayload) -> Result<Task> {
    let priority = payload.priority.unwrap_or_default();
    let created_at = local_now();

    debug!(
        "Insert values: text={}, priority={}, created_at={}, alarm_time={:?}",
        payload.text, priority, created_at, payload.alarm_time
    );

    let id = sqlx::query(
        "INSERT INTO tasks (text, completed, priority, created_at, alarm_time) VALUES (?, 0, ?, ?, ?)",
    )
    .bind(&payload.text)
    .bind(priority)
    .bind(created_at)
    .bind(payload.alarm_time)
    .execute(pool)
    .await
    .context("Failed to insert task into DB")?
    .last_insert_rowid();

    let new_task = Task {
        id,
        text: payload.text,
        completed: false,
        priority,
        created_at,
        alarm_time: payload.alarm_time,
    };

    Ok(new_task)
}

/// Deletes a task from the database.
/// Returns true if a task was removed, false if no task with the given ID was found.
pub async fn delete_task_in_db(pool: &SqlitePool, task_id: i64) -> Result<bool> {
    debug!("Attempting to delete task with ID: {task_id}");
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete task with ID: {task_id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Deletes every completed task. Returns the number of removed rows.
pub async fn clear_completed_in_db(pool: &SqlitePool) -> Result<usize> {
    let result = sqlx::query("DELETE FROM tasks WHERE completed = 1")
        .execute(pool)
        .await
        .context("Failed to clear completed tasks")?;

    let removed = result.rows_affected() as usize;
    info!("Cleared {} completed tasks.", removed);

    Ok(removed)
}

/// Sets a task's completion flag.
/// Returns true if a task was updated, false if no task with the given ID was found.
pub async fn set_completed_in_db(pool: &SqlitePool, task_id: i64, completed: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE tasks SET completed = ? WHERE id = ?")
        .bind(completed)
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to update completion for task ID: {task_id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Replaces a task's text. Emptiness is validated at the API boundary,
/// not here.
pub async fn update_task_text_in_db(pool: &SqlitePool, task_id: i64, text: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE tasks SET text = ? WHERE id = ?")
        .bind(text)
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to update text for task ID: {task_id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Replaces a task's priority. `Priority` is a closed enum, so invalid
/// values cannot reach this function.
pub async fn update_task_priority_in_db(
    pool: &SqlitePool,
    task_id: i64,
    priority: Priority,
) -> Result<bool> {
    let result = sqlx::query("UPDATE tasks SET priority = ? WHERE id = ?")
        .bind(priority)
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to update priority for task ID: {task_id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Schedules (or reschedules) a task's one-shot alarm.
pub async fn set_alarm_in_db(
    pool: &SqlitePool,
    task_id: i64,
    alarm_time: NaiveDateTime,
) -> Result<bool> {
    let result = sqlx::query("UPDATE tasks SET alarm_time = ? WHERE id = ?")
        .bind(alarm_time)
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to set alarm for task ID: {task_id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Removes a task's alarm. Idempotent: clearing an absent alarm (or an
/// unknown ID) is not an error. Clearing is the sole cancellation
/// mechanism for a scheduled alarm.
pub async fn clear_alarm_in_db(pool: &SqlitePool, task_id: i64) -> Result<()> {
    sqlx::query("UPDATE tasks SET alarm_time = NULL WHERE id = ?")
        .bind(task_id)
        .execute(pool)
        .await
        .context(format!("Failed to clear alarm for task ID: {task_id}"))?;

    Ok(())
}

/// ORDER BY clause for a sort key. Completed tasks always sort after
/// active ones and creation time is the final tie-break.
fn order_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Priority => {
            "completed ASC, CASE priority WHEN 'high' THEN 0 WHEN 'normal' THEN 1 ELSE 2 END, created_at ASC"
        }
        SortKey::Name => "completed ASC, text COLLATE NOCASE ASC, created_at ASC",
        SortKey::Date => "completed ASC, created_at ASC",
    }
}

/// Retrieves tasks, optionally restricted by completion state, in the
/// requested order.
pub async fn list_tasks_in_db(
    pool: &SqlitePool,
    filter: TaskFilter,
    sort: SortKey,
) -> Result<Vec<Task>> {
    let where_clause = match filter {
        TaskFilter::All => "",
        TaskFilter::Active => "WHERE completed = 0",
        TaskFilter::Completed => "WHERE completed = 1",
    };

    // Both fragments come from fixed match arms above, never from user input.
    let query = format!(
        "SELECT * FROM tasks {} ORDER BY {};",
        where_clause,
        order_clause(sort)
    );

    let tasks = sqlx::query_as::<_, Task>(&query)
        .fetch_all(pool)
        .await
        .context("Failed to retrieve tasks from DB")?;

    Ok(tasks)
}

/// Row shape for the alarm scan query. `alarm_time` is read back as raw
/// TEXT so that a malformed stored value degrades to "no alarm" instead
/// of failing the whole scheduler tick.
#[derive(sqlx::FromRow)]
struct AlarmedTaskRow {
    id: i64,
    text: String,
    completed: bool,
    priority: Priority,
    created_at: NaiveDateTime,
    alarm_time: Option<String>,
}

/// Parses a stored alarm timestamp. Accepts both the `T`-separated ISO
/// form used by the JSON API and the space-separated form sqlx writes.
fn parse_alarm_text(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

impl From<AlarmedTaskRow> for Task {
    fn from(row: AlarmedTaskRow) -> Self {
        let alarm_time = match row.alarm_time.as_deref() {
            Some(raw) => {
                let parsed = parse_alarm_text(raw);
                if parsed.is_none() {
                    warn!(
                        "Task {} has an unparseable alarm_time {:?}; treating as not scheduled.",
                        row.id, raw
                    );
                }
                parsed
            }
            None => None,
        };

        Task {
            id: row.id,
            text: row.text,
            completed: row.completed,
            priority: row.priority,
            created_at: row.created_at,
            alarm_time,
        }
    }
}

/// Retrieves every task carrying an alarm, regardless of completion
/// state. The scan engine decides which of them are actually due.
pub async fn get_tasks_with_alarms_from_db(pool: &SqlitePool) -> Result<Vec<Task>> {
    let rows = sqlx::query_as::<_, AlarmedTaskRow>(
        "SELECT * FROM tasks WHERE alarm_time IS NOT NULL ORDER BY id ASC;",
    )
    .fetch_all(pool)
    .await
    .context("Failed to retrieve alarmed tasks from DB")?;

    Ok(rows.into_iter().map(Task::from).collect())
}

/// Retrieves tasks whose alarm crossed its trigger time while the task is
/// still active. Read-only: the alarms stay armed so the periodic
/// scheduler remains the single place that fires and clears them.
pub async fn get_overdue_tasks_from_db(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT * FROM tasks WHERE alarm_time IS NOT NULL AND alarm_time < ? AND completed = 0 ORDER BY id ASC;",
    )
    .bind(now)
    .fetch_all(pool)
    .await
    .context("Failed to retrieve overdue tasks from DB")?;

    Ok(tasks)
}

/// Bulk-inserts imported task records. Records with an empty text are
/// skipped with a warning; unknown priorities fall back to normal.
/// Returns the number of inserted tasks.
pub async fn import_tasks_in_db(pool: &SqlitePool, records: Vec<ImportTaskRecord>) -> Result<usize> {
    let mut imported = 0usize;

    for record in records {
        if record.text.is_empty() {
            warn!("Skipping imported record with empty text.");
            continue;
        }

        let priority = record.resolved_priority();
        let created_at = record.created_at.unwrap_or_else(local_now);

        sqlx::query(
            "INSERT INTO tasks (text, completed, priority, created_at, alarm_time) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.text)
        .bind(record.completed)
        .bind(priority)
        .bind(created_at)
        .bind(record.alarm_time)
        .execute(pool)
        .await
        .context("Failed to insert imported task into DB")?;

        imported += 1;
    }

    info!("Imported {} tasks.", imported);

    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Helper function to set up an in-memory SQLite database for testing.
    /// This creates a fresh, empty database for each test, ensuring they are isolated.
    async fn setup_test_db() -> Result<SqlitePool> {
        // Use :memory: to create an in-memory database
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        create_tasks_table(&pool).await?;
        Ok(pool)
    }

    fn payload(text: &str) -> CreateTaskPayload {
        CreateTaskPayload {
            text: text.to_string(),
            priority: None,
            alarm_time: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_task_defaults() {
        let pool = setup_test_db().await.unwrap();

        // Act: Create a new task with nothing but a text
        let created_task = create_task_in_db(&pool, payload("Buy milk")).await.unwrap();

        // Assert: The created task has the documented defaults
        assert_eq!(created_task.text, "Buy milk");
        assert!(!created_task.completed);
        assert_eq!(created_task.priority, Priority::Normal);
        assert!(created_task.alarm_time.is_none());
        assert!(created_task.id > 0); // Should have been assigned an ID by the DB

        // Act: Retrieve the full list
        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Priority)
            .await
            .unwrap();

        // Assert: The newly created task is in the list
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, created_task.id);
        assert_eq!(tasks[0].priority, Priority::Normal);
    }

    #[tokio::test]
    async fn test_create_task_with_alarm_and_priority() {
        let pool = setup_test_db().await.unwrap();
        let alarm = local_now() + Duration::hours(1);

        let created_task = create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Call the dentist".to_string(),
                priority: Some(Priority::High),
                alarm_time: Some(alarm),
            },
        )
        .await
        .unwrap();

        assert_eq!(created_task.priority, Priority::High);
        assert_eq!(created_task.alarm_time, Some(alarm));

        let tasks = get_tasks_with_alarms_from_db(&pool).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].alarm_time, Some(alarm));
    }

    #[tokio::test]
    async fn test_set_completed_and_filtering() {
        let pool = setup_test_db().await.unwrap();
        let done = create_task_in_db(&pool, payload("Done task")).await.unwrap();
        create_task_in_db(&pool, payload("Open task")).await.unwrap();

        // Act: Mark one task as completed
        let updated = set_completed_in_db(&pool, done.id, true).await.unwrap();
        assert!(updated);

        // Assert: Filters see the split
        let active = list_tasks_in_db(&pool, TaskFilter::Active, SortKey::Priority)
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text, "Open task");

        let completed = list_tasks_in_db(&pool, TaskFilter::Completed, SortKey::Priority)
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].text, "Done task");

        // Assert: Unknown IDs report no update
        let missing = set_completed_in_db(&pool, 9999, true).await.unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn test_update_text_and_priority() {
        let pool = setup_test_db().await.unwrap();
        let task = create_task_in_db(&pool, payload("Tpyo")).await.unwrap();

        assert!(update_task_text_in_db(&pool, task.id, "Typo").await.unwrap());
        assert!(update_task_priority_in_db(&pool, task.id, Priority::Low)
            .await
            .unwrap());

        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Priority)
            .await
            .unwrap();
        assert_eq!(tasks[0].text, "Typo");
        assert_eq!(tasks[0].priority, Priority::Low);

        assert!(!update_task_text_in_db(&pool, 9999, "nobody").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_and_clear_alarm() {
        let pool = setup_test_db().await.unwrap();
        let task = create_task_in_db(&pool, payload("Water the plants"))
            .await
            .unwrap();
        let alarm = local_now() + Duration::minutes(30);

        // Act: Arm, then disarm
        assert!(set_alarm_in_db(&pool, task.id, alarm).await.unwrap());
        let alarmed = get_tasks_with_alarms_from_db(&pool).await.unwrap();
        assert_eq!(alarmed.len(), 1);

        clear_alarm_in_db(&pool, task.id).await.unwrap();
        let alarmed = get_tasks_with_alarms_from_db(&pool).await.unwrap();
        assert!(alarmed.is_empty());

        // Assert: Clearing again (and clearing an unknown ID) stays silent
        clear_alarm_in_db(&pool, task.id).await.unwrap();
        clear_alarm_in_db(&pool, 9999).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_completed_removes_only_completed() {
        let pool = setup_test_db().await.unwrap();
        let done_a = create_task_in_db(&pool, payload("Done A")).await.unwrap();
        let done_b = create_task_in_db(&pool, payload("Done B")).await.unwrap();
        create_task_in_db(&pool, payload("Still open")).await.unwrap();
        set_completed_in_db(&pool, done_a.id, true).await.unwrap();
        set_completed_in_db(&pool, done_b.id, true).await.unwrap();

        // Act
        let removed = clear_completed_in_db(&pool).await.unwrap();

        // Assert
        assert_eq!(removed, 2);
        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Priority)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Still open");
    }

    #[tokio::test]
    async fn test_priority_ordering_completed_last() {
        let pool = setup_test_db().await.unwrap();

        create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Low prio".to_string(),
                priority: Some(Priority::Low),
                alarm_time: None,
            },
        )
        .await
        .unwrap();
        create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Normal prio".to_string(),
                priority: Some(Priority::Normal),
                alarm_time: None,
            },
        )
        .await
        .unwrap();
        create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "High prio".to_string(),
                priority: Some(Priority::High),
                alarm_time: None,
            },
        )
        .await
        .unwrap();
        let done = create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "High but done".to_string(),
                priority: Some(Priority::High),
                alarm_time: None,
            },
        )
        .await
        .unwrap();
        set_completed_in_db(&pool, done.id, true).await.unwrap();

        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Priority)
            .await
            .unwrap();

        // Assert: high, normal, low among active tasks; the completed one
        // sorts last even though its priority is high.
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].text, "High prio");
        assert_eq!(tasks[1].text, "Normal prio");
        assert_eq!(tasks[2].text, "Low prio");
        assert_eq!(tasks[3].id, done.id);
    }

    #[tokio::test]
    async fn test_name_ordering_is_case_insensitive() {
        let pool = setup_test_db().await.unwrap();
        create_task_in_db(&pool, payload("banana")).await.unwrap();
        create_task_in_db(&pool, payload("Apple")).await.unwrap();
        create_task_in_db(&pool, payload("cherry")).await.unwrap();

        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Name)
            .await
            .unwrap();

        let names: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(names, vec!["Apple", "banana", "cherry"]);
    }

    #[tokio::test]
    async fn test_date_ordering_uses_creation_time() {
        let pool = setup_test_db().await.unwrap();
        let base = local_now() - Duration::days(3);

        // Import lets us pin distinct creation times deterministically.
        let records: Vec<ImportTaskRecord> = serde_json::from_value(serde_json::json!([
            { "text": "second", "created_at": (base + Duration::days(1)).format("%Y-%m-%dT%H:%M:%S").to_string() },
            { "text": "third", "created_at": (base + Duration::days(2)).format("%Y-%m-%dT%H:%M:%S").to_string() },
            { "text": "first", "created_at": base.format("%Y-%m-%dT%H:%M:%S").to_string() },
        ]))
        .unwrap();
        import_tasks_in_db(&pool, records).await.unwrap();

        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Date)
            .await
            .unwrap();

        let names: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_tasks_with_alarms_includes_completed() {
        let pool = setup_test_db().await.unwrap();
        let alarm = local_now() - Duration::minutes(5);

        let armed_done = create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Armed but done".to_string(),
                priority: None,
                alarm_time: Some(alarm),
            },
        )
        .await
        .unwrap();
        set_completed_in_db(&pool, armed_done.id, true).await.unwrap();
        create_task_in_db(&pool, payload("No alarm")).await.unwrap();

        // The query returns armed tasks regardless of completion; the scan
        // engine is responsible for skipping completed ones.
        let alarmed = get_tasks_with_alarms_from_db(&pool).await.unwrap();
        assert_eq!(alarmed.len(), 1);
        assert_eq!(alarmed[0].id, armed_done.id);
        assert!(alarmed[0].completed);
    }

    #[tokio::test]
    async fn test_overdue_query_is_read_only() {
        let pool = setup_test_db().await.unwrap();
        let now = local_now();

        let overdue = create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Missed me".to_string(),
                priority: None,
                alarm_time: Some(now - Duration::hours(2)),
            },
        )
        .await
        .unwrap();
        create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Not yet".to_string(),
                priority: None,
                alarm_time: Some(now + Duration::hours(2)),
            },
        )
        .await
        .unwrap();
        let done = create_task_in_db(
            &pool,
            CreateTaskPayload {
                text: "Done anyway".to_string(),
                priority: None,
                alarm_time: Some(now - Duration::hours(2)),
            },
        )
        .await
        .unwrap();
        set_completed_in_db(&pool, done.id, true).await.unwrap();

        // Act
        let overdue_tasks = get_overdue_tasks_from_db(&pool, now).await.unwrap();

        // Assert: only the active, past-alarm task qualifies
        assert_eq!(overdue_tasks.len(), 1);
        assert_eq!(overdue_tasks[0].id, overdue.id);

        // Assert: nothing was cleared; all three alarms are still armed
        let alarmed = get_tasks_with_alarms_from_db(&pool).await.unwrap();
        assert_eq!(alarmed.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_alarm_text_is_treated_as_unscheduled() {
        let pool = setup_test_db().await.unwrap();
        let task = create_task_in_db(&pool, payload("Broken alarm")).await.unwrap();

        // Simulate an external writer corrupting the stored timestamp.
        sqlx::query("UPDATE tasks SET alarm_time = 'tomorrow-ish' WHERE id = ?")
            .bind(task.id)
            .execute(&pool)
            .await
            .unwrap();

        let alarmed = get_tasks_with_alarms_from_db(&pool).await.unwrap();
        assert_eq!(alarmed.len(), 1);
        assert!(alarmed[0].alarm_time.is_none()); // fail-safe, never fail-loud
    }

    #[tokio::test]
    async fn test_import_tasks_lenient_normalization() {
        let pool = setup_test_db().await.unwrap();

        let records: Vec<ImportTaskRecord> = serde_json::from_value(serde_json::json!([
            { "text": "Plain import" },
            { "text": "Done import", "completed": true, "priority": "low" },
            { "text": "Weird priority", "priority": "urgent" },
            { "text": "" }
        ]))
        .unwrap();

        // Act
        let imported = import_tasks_in_db(&pool, records).await.unwrap();

        // Assert: the empty-text record is skipped, not inserted
        assert_eq!(imported, 3);

        let tasks = list_tasks_in_db(&pool, TaskFilter::All, SortKey::Name)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 3);

        let weird = tasks.iter().find(|t| t.text == "Weird priority").unwrap();
        assert_eq!(weird.priority, Priority::Normal); // fallback, not an error

        let done = tasks.iter().find(|t| t.text == "Done import").unwrap();
        assert!(done.completed);
        assert_eq!(done.priority, Priority::Low);
    }

    #[test]
    fn test_parse_alarm_text_accepts_both_forms() {
        assert!(parse_alarm_text("2025-06-01T08:30:00").is_some());
        assert!(parse_alarm_text("2025-06-01 08:30:00").is_some());
        assert!(parse_alarm_text("2025-06-01 08:30:00.123").is_some());
        assert!(parse_alarm_text("not a timestamp").is_none());
        assert!(parse_alarm_text("").is_none());
    }
}
