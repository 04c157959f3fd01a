//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Initializes the database
//! - Starts the HTTP server with graceful shutdown support

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

mod database;
mod error;
mod handler;
mod model;
mod notify;
mod route;
mod store;
mod summary;

use database::{init_db, AppState};
use notify::LogNotifier;
use route::create_app;
use store::Store;

/// Application entry point
///
/// Loads environment variables, initializes the embedded database, assembles
/// the application state and serves the router until a shutdown signal
/// arrives.
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `DATABASE_URL` - Path to database file (default: "data.db")
/// - `APP_URL` - Base URL embedded in distributed links
///   (default: "http://localhost:{PORT}")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("partstracker=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port_str.parse().unwrap_or(8080);

    let db_name = env::var("DATABASE_URL").unwrap_or_else(|_| "data.db".to_string());
    let base_url = env::var("APP_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));

    let db = init_db(&db_name).expect("Failed to initialize database");

    // Everything handlers depend on goes through the shared state; the
    // notifier shipped here logs messages instead of delivering them
    let state = AppState {
        store: Store::new(Arc::new(db)),
        notifier: Arc::new(LogNotifier),
        base_url,
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    println!("🚀 Server running at http://localhost:{}", port);
    println!("📂 Using database: {}", db_name);

    // The server keeps running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Waits for a shutdown signal
///
/// Returns when either SIGINT (Ctrl+C) or, on Unix, SIGTERM is received so
/// the server can drain open connections and close the database cleanly.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
