//! Route definitions for the parts tracker API
//!
//! This module configures all HTTP routes and maps them to their respective
//! handlers. It creates the Axum router with the application state.

use axum::routing::{get, post};
use axum::Router;

use crate::database::AppState;
use crate::handler::{
    create_link, get_parts_data, process_pdf, send_notification, submit_parts_data,
};

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/links` - Issues a new distribution link
/// - `GET /api/parts?id=...` - Resolves a link to its parts data
/// - `POST /api/reports` - Submits a completed parts report (other verbs
///   receive 405 from the method router)
/// - `POST /api/notify` - Dispatches a notification email
/// - `POST /api/pdf/process` - PDF processing stub
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use partstracker::database::{init_db, AppState};
/// # use partstracker::notify::LogNotifier;
/// # use partstracker::route::create_app;
/// # use partstracker::store::Store;
/// # let db = init_db("data.db").unwrap();
/// let state = AppState {
///     store: Store::new(Arc::new(db)),
///     notifier: Arc::new(LogNotifier),
///     base_url: "http://localhost:8080".to_string(),
/// };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/links", post(create_link))
        .route("/parts", get(get_parts_data))
        .route("/reports", post(submit_parts_data))
        .route("/notify", post(send_notification))
        .route("/pdf/process", post(process_pdf));

    Router::new()
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
