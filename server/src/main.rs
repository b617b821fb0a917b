// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::http::HeaderName;
use server::alarm::AlarmScheduler;
use server::database;
use server::routes::{self, AppState};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

// Define the DB_URL here for the main application's use.
const MAIN_DB_URL: &str = "sqlite://database/tasks.db";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting up the server...");

    let db_pool = match database::establish_connection_pool(MAIN_DB_URL).await {
        Ok(pool) => {
            tracing::info!("Database connection was made successfully.");
            pool
        }
        Err(e) => {
            tracing::error!("Failed to connect with the database: {:?}", e);
            std::process::exit(1);
        }
    };

    // One-shot startup check: alarms that went off while the application
    // was not running. Informational only; the periodic scheduler below
    // stays the single path that fires and clears them.
    match server::alarm::startup_overdue(&db_pool).await {
        Ok(overdue) if !overdue.is_empty() => {
            tracing::info!(
                "{} uncompleted tasks have an alarm time in the past.",
                overdue.len()
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!("Could not check for overdue alarms: {:?}", e);
        }
    }

    let mut scheduler = AlarmScheduler::new(db_pool.clone());
    let mut reminders = scheduler.subscribe();
    scheduler.start();

    // Log every fired alarm on the server side, in addition to the SSE
    // stream the frontend subscribes to.
    tokio::spawn(async move {
        while let Ok(fired) = reminders.recv().await {
            tracing::info!("Reminder for task {}: {}", fired.task_id, fired.text);
        }
    });

    let state = AppState {
        pool: db_pool,
        alarm_events: scheduler.events(),
    };
    let app_routes = routes::create_router(state);

    // Configure CORS here, applying it globally to the router
    let cors = CorsLayer::new()
        .allow_methods(Any) // Allow all HTTP methods
        // Explicit list of headers the frontend may send.
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_origin(Any); // Allow all origins

    let app = app_routes.layer(cors); // Apply the CORS layer

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("The server listens on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    // Drain the scheduler: an in-flight alarm check finishes its
    // clear-and-publish sequence before the process exits.
    scheduler.stop().await;
    tracing::info!("Shutdown complete.");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for the shutdown signal: {:?}", e);
    }
}
