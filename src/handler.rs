//! HTTP request handlers for the parts tracker API
//!
//! This module implements the core business logic for:
//! - Issuing expiring distribution links for a parts list
//! - Resolving a link id to its parts data with expiration enforcement
//! - Accepting completed parts reports and notifying the manager
//! - Dispatching notification emails and the PDF processing stub

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use rand::{distr::Alphanumeric, Rng};
use serde_json::json;
use tracing::{error, info, warn};

use crate::database::AppState;
use crate::error::AppError;
use crate::model::{
    CompletedReport, CreateLinkRequest, CreateLinkResponse, LinkRecord, LinkStatus,
    NotificationRequest, Part, PartsQuery, ProcessPdfRequest, SubmitReportRequest,
};
use crate::notify::{manager_report_email, parts_update_html, EmailMessage};
use crate::summary::{status_label, summarize};

/// Links stay resolvable for this long after creation
const LINK_TTL_HOURS: i64 = 48;

/// Length of generated link ids; collisions stay negligible at the volume
/// a single shop produces
const LINK_ID_LEN: usize = 12;

/// Length of generated report ids
const REPORT_ID_LEN: usize = 20;

/// Generates a random alphanumeric identifier
fn generate_id(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Issues a new distribution link for a parts list
///
/// This handler:
/// 1. Generates a random opaque link id
/// 2. Fixes the expiration to 48 hours after creation
/// 3. Persists the link record with status `active`
/// 4. Returns the id, the full distribution URL and the expiration
///
/// # Request Body
///
/// ```json
/// {
///   "partsData": [{"qty": 1, "partNumber": "A1", "status": "pending-use"}],
///   "technicianName": "Jane Tech",
///   "technicianEmail": "jane@example.com",
///   "managerEmail": "manager@example.com"
/// }
/// ```
///
/// All fields are optional; the technician name defaults to "Unknown" and
/// the emails to empty strings.
///
/// # Response
///
/// - **201 Created** - Link issued, body carries `linkId`, `secureLink` and
///   `expiresAt`
/// - **500 Internal Server Error** - Storage failure
pub async fn create_link(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link_id = generate_id(LINK_ID_LEN);
    let created_at = Utc::now();
    let expires_at = created_at + Duration::hours(LINK_TTL_HOURS);

    let record = LinkRecord {
        id: link_id.clone(),
        parts_data: payload.parts_data,
        technician_name: payload
            .technician_name
            .unwrap_or_else(|| "Unknown".to_string()),
        technician_email: payload.technician_email.unwrap_or_default(),
        manager_email: payload.manager_email.unwrap_or_default(),
        created_at,
        expires_at,
        status: LinkStatus::Active,
        completed_at: None,
    };

    state.store.insert_link(&record)?;

    // The technician-facing page reads the id back out of the query string
    let secure_link = format!("{}/tech?id={}", state.base_url, link_id);
    info!(%link_id, %secure_link, "generated secure link");

    let response = CreateLinkResponse {
        success: true,
        link_id,
        secure_link,
        expires_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Resolves a link id to its parts data
///
/// Expiration is a wall-clock comparison made at read time; the link's
/// status is deliberately not consulted, so an expired link is rejected even
/// while still marked active.
///
/// # Query Parameters
///
/// - `id` - The link id from the distributed URL
///
/// # Response
///
/// - **200 OK** - `{"success": true, "data": {partsData, technicianName, expiresAt}}`,
///   with each part's status rendered as its human-readable label. The
///   contact emails on the link are submission-only and never returned here.
/// - **400 Bad Request** - Missing or empty id
/// - **404 Not Found** - No link for this id
/// - **410 Gone** - The link's deadline has passed
pub async fn get_parts_data(
    State(state): State<AppState>,
    Query(params): Query<PartsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let link_id = match params.id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(AppError::MissingLinkId),
    };

    let link = match state.store.get_link(&link_id)? {
        Some(link) => link,
        None => {
            warn!(%link_id, "link not found");
            return Err(AppError::LinkNotFound);
        }
    };

    if Utc::now() >= link.expires_at {
        warn!(%link_id, expires_at = %link.expires_at, "rejected expired link");
        return Err(AppError::LinkExpired);
    }

    let parts: Vec<Part> = link
        .parts_data
        .iter()
        .map(|part| Part {
            status: status_label(&part.status),
            ..part.clone()
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "data": {
            "partsData": parts,
            "technicianName": link.technician_name,
            "expiresAt": link.expires_at,
        }
    })))
}

/// Accepts a completed parts report against a link
///
/// The report document is committed first and the link status flip follows;
/// a flip failure after the report landed is logged but not surfaced, since
/// the authoritative record already exists. Exactly one manager notification
/// is dispatched when the link carries a manager email, and a dispatch
/// failure never fails the submission.
///
/// # Request Body
///
/// ```json
/// {
///   "linkId": "x7k2m9qp4a1c",
///   "partsData": [{"qty": 1, "partNumber": "A1", "status": "used"}],
///   "technicianInfo": {"name": "Jane"}
/// }
/// ```
///
/// # Response
///
/// - **200 OK** - Report stored, body `{"success": true, "message": ...}`
/// - **400 Bad Request** - Missing link id or empty parts list; nothing is
///   written
/// - **404 Not Found** - No link for this id
/// - **410 Gone** - The link's deadline has passed
/// - **500 Internal Server Error** - Storage failure
pub async fn submit_parts_data(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let link_id = match payload.link_id {
        Some(id) if !id.is_empty() => id,
        _ => return Err(AppError::MissingSubmissionFields),
    };
    let parts = match payload.parts_data {
        Some(parts) if !parts.is_empty() => parts,
        _ => return Err(AppError::MissingSubmissionFields),
    };

    let link = match state.store.get_link(&link_id)? {
        Some(link) => link,
        None => {
            warn!(%link_id, "submission against unknown link");
            return Err(AppError::LinkNotFound);
        }
    };

    if Utc::now() >= link.expires_at {
        warn!(%link_id, expires_at = %link.expires_at, "submission against expired link");
        return Err(AppError::LinkExpired);
    }

    let completed_at = Utc::now();
    let report = CompletedReport {
        link_id: link_id.clone(),
        technician: payload.technician_info.unwrap_or_default(),
        summary: summarize(&parts),
        parts,
        completed_at,
        manager_email: link.manager_email.clone(),
    };

    let report_id = generate_id(REPORT_ID_LEN);
    state.store.insert_report(&report_id, &report)?;
    info!(%link_id, %report_id, "stored completed report");

    // The report is committed; a failed status flip must not fail the
    // submission and is left for a later retry
    match state.store.complete_link(&link_id, completed_at) {
        Ok(true) => {}
        Ok(false) => warn!(%link_id, "link disappeared before completion"),
        Err(err) => error!(%link_id, "failed to mark link completed: {err}"),
    }

    if !report.manager_email.is_empty() {
        let message =
            manager_report_email(&report.manager_email, &link.technician_name, &report.summary);
        if let Err(err) = state.notifier.send(&message) {
            error!(%link_id, "manager notification failed: {err}");
        }
    }

    Ok(Json(json!({
        "success": true,
        "message": "Parts data submitted successfully"
    })))
}

/// Dispatches a notification email
///
/// When no prebuilt HTML body is supplied, the parts-status-update template
/// is rendered from the technician name and link in the payload.
///
/// # Response
///
/// - **200 OK** - Message handed to the notifier
/// - **400 Bad Request** - Missing recipient
/// - **500 Internal Server Error** - Dispatch failure
pub async fn send_notification(
    State(state): State<AppState>,
    Json(payload): Json<NotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recipient = match payload.email {
        Some(email) if !email.is_empty() => email,
        _ => return Err(AppError::MissingRecipient),
    };

    let subject = payload
        .subject
        .unwrap_or_else(|| "Parts Status Update Required".to_string());
    let html_body = match payload.html_content {
        Some(html) if !html.is_empty() => html,
        _ => parts_update_html(
            payload.technician_name.as_deref().unwrap_or("Technician"),
            payload.link.as_deref().unwrap_or_default(),
        ),
    };

    info!(to = %recipient, %subject, "dispatching notification");
    state.notifier.send(&EmailMessage {
        to: recipient,
        subject,
        html_body,
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Email sent successfully"
    })))
}

/// PDF processing stub
///
/// A real implementation would download the uploaded file, parse the parts
/// table out of it and persist the result with an expiration. This endpoint
/// only echoes the metadata back so the upload flow can be exercised end to
/// end.
pub async fn process_pdf(Json(payload): Json<ProcessPdfRequest>) -> impl IntoResponse {
    info!(file_name = %payload.file_name, "processing PDF");

    let processed_at = Utc::now();
    Json(json!({
        "success": true,
        "message": "PDF processed successfully",
        "data": {
            "fileName": payload.file_name,
            "technicianName": payload
                .technician_name
                .unwrap_or_else(|| "Unknown".to_string()),
            "partsCount": payload.parts_count.unwrap_or(0),
            "processedAt": processed_at,
            "expiresAt": processed_at + Duration::hours(LINK_TTL_HOURS),
        }
    }))
}
