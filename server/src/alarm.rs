// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use anyhow::Result;
use chrono::NaiveDateTime;
use common::{AlarmFired, Task};
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// How often the scheduler checks for due alarms.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(10);

/// Capacity of the alarm event channel. Fired alarms are rare and small;
/// a subscriber that lags this far behind just skips the missed ones.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Decides which alarms fire. Pure: the caller supplies the task set and
/// the clock reading, and executes the clear-alarm instruction implied by
/// each returned event.
///
/// The input is expected to be pre-filtered to alarm-carrying tasks (the
/// store query does that); completion is re-checked here because a task
/// can be completed while its alarm is still armed. A task without an
/// alarm value is treated as not-due rather than an error, and the input
/// order is preserved in the output.
pub fn scan(tasks: &[Task], now: NaiveDateTime) -> Vec<AlarmFired> {
    tasks
        .iter()
        .filter(|task| !task.completed && task.alarm_time.is_some_and(|at| at <= now))
        .map(|task| AlarmFired {
            task_id: task.id,
            text: task.text.clone(),
        })
        .collect()
}

/// One-shot startup check: tasks whose alarm went off while the process
/// was not running. Read-only: the periodic scheduler remains the single
/// place that fires and clears alarms, so these will additionally fire
/// once through the normal path shortly after startup.
pub async fn startup_overdue(pool: &SqlitePool) -> Result<Vec<Task>> {
    database::get_overdue_tasks_from_db(pool, database::local_now()).await
}

/// Executes one alarm check: read armed tasks, scan, clear every fired
/// alarm, then publish the events. Returns the number of fired alarms.
///
/// Clearing strictly precedes publishing, so a subscriber reacting to an
/// event never observes a still-armed alarm for it. Any store failure
/// abandons the tick before a single event goes out.
async fn run_tick(pool: &SqlitePool, events: &broadcast::Sender<AlarmFired>) -> Result<usize> {
    let tasks = database::get_tasks_with_alarms_from_db(pool).await?;
    let now = database::local_now();
    let fired = scan(&tasks, now);

    for event in &fired {
        database::clear_alarm_in_db(pool, event.task_id).await?;
    }

    let count = fired.len();
    for event in fired {
        debug!("Alarm fired for task {}: {}", event.task_id, event.text);
        // A send error only means there is no subscriber right now.
        let _ = events.send(event);
    }

    Ok(count)
}

/// Drives the alarm scan on a fixed interval, on its own tokio task, and
/// fans the firing events out to subscribers.
pub struct AlarmScheduler {
    pool: SqlitePool,
    interval: Duration,
    events: broadcast::Sender<AlarmFired>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AlarmScheduler {
    pub fn new(pool: SqlitePool) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            pool,
            interval: DEFAULT_CHECK_INTERVAL,
            events,
            cancel: CancellationToken::new(),
            handle: None,
        }
    }

    /// Override the check interval (useful for testing).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// A new receiver for alarm-fired events. Subscribe before `start()`
    /// to be sure not to miss the first tick's events.
    pub fn subscribe(&self) -> broadcast::Receiver<AlarmFired> {
        self.events.subscribe()
    }

    /// Sender half of the event channel, for handing to the HTTP state.
    pub fn events(&self) -> broadcast::Sender<AlarmFired> {
        self.events.clone()
    }

    /// Begins the periodic check. Idempotent: while the background task is
    /// running, further calls do nothing, so there is never a second timer.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            debug!("Alarm scheduler already running; ignoring start().");
            return;
        }

        let pool = self.pool.clone();
        let events = self.events.clone();
        let cancel = self.cancel.clone();
        let period = self.interval;

        self.handle = Some(tokio::spawn(async move {
            info!("Alarm scheduler started, checking every {:?}.", period);
            let mut interval = tokio::time::interval(period);

            // The first tick completes immediately. Skip it to wait for the first interval.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        info!("Alarm scheduler stopped.");
                        break;
                    }
                    _ = interval.tick() => {
                        // Cancellation is only observed between ticks, so a
                        // tick that already started runs its full
                        // clear-then-publish sequence before shutdown.
                        if let Err(e) = run_tick(&pool, &events).await {
                            error!("Alarm check failed, retrying at the next interval: {:?}", e);
                        }
                    }
                }
            }
        }));
    }

    /// Halts the periodic check and waits for the background task to
    /// finish, draining any in-flight tick. Safe to call more than once.
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Alarm scheduler task failed to join: {e}");
            }
        }
        // A fresh token so a later start() is not stillborn.
        self.cancel = CancellationToken::new();
    }
}
