//! Data models for the parts tracker backend
//!
//! This module defines all the data structures used throughout the application,
//! including request/response models and the records persisted in the database.
//! Field names follow the camelCase wire format used by the web client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single part on a distributed parts list
///
/// Parts are embedded in links and completed reports rather than stored as
/// standalone documents. The `status` field holds the raw machine-readable
/// disposition code submitted by the client (e.g. "pending-use"); see
/// [`crate::summary`] for the mapping to human-readable labels.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Quantity of this part, zero or more
    #[serde(default)]
    pub qty: u32,

    /// Part number as printed on the pick list
    #[serde(default)]
    pub part_number: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub customer: String,

    #[serde(default)]
    pub invoice_number: String,

    /// Raw disposition code for this part (e.g. "used", "pending-return")
    #[serde(default)]
    pub status: String,

    /// Free-form technician notes
    #[serde(default)]
    pub notes: String,
}

/// Lifecycle state of a distribution link
///
/// A link starts `active` and moves to `completed` exactly once when a report
/// is submitted against it. There is no reverse transition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Active,
    Completed,
}

/// A distribution link record stored in the `links_v1` table
///
/// The link grants a technician time-boxed access to a specific parts list
/// through an opaque generated id embedded in the distributed URL. The parts
/// list is copied in at creation time and never changes on the link itself;
/// the technician's final version lands in a [`CompletedReport`].
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Opaque generated id, also the lookup key
    pub id: String,

    /// Parts list snapshot taken when the link was issued
    pub parts_data: Vec<Part>,

    pub technician_name: String,

    /// Submission-only contact fields, never exposed when a link is resolved
    pub technician_email: String,
    pub manager_email: String,

    pub created_at: DateTime<Utc>,

    /// Fixed at creation to 48 hours after `created_at`
    pub expires_at: DateTime<Utc>,

    pub status: LinkStatus,

    /// Stamped when the link transitions to `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Identity info captured from the technician at submission time
///
/// Kept independent of the `technician_name` recorded on the link since the
/// person submitting may differ from the person the link was issued to.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianInfo {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,
}

/// The immutable final record of a submission, stored in `completed_reports_v1`
///
/// Holds a denormalized snapshot of the originating link's fields rather than
/// a live reference, so the report stays historically accurate even if the
/// link is read again later. Created exactly once per successful submission
/// and never mutated or deleted.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompletedReport {
    /// Id of the originating link; the link itself is not deleted
    pub link_id: String,

    pub technician: TechnicianInfo,

    /// The submitted parts list, the authoritative final version
    pub parts: Vec<Part>,

    pub completed_at: DateTime<Utc>,

    /// Copied from the link at submission time
    pub manager_email: String,

    /// Precomputed status tally, see [`crate::summary::summarize`]
    pub summary: BTreeMap<String, u32>,
}

/// Request payload for creating a new distribution link
///
/// # Example
/// ```json
/// {
///   "partsData": [{"qty": 1, "partNumber": "A1", "status": "pending-use"}],
///   "technicianName": "Jane Tech",
///   "technicianEmail": "jane@example.com",
///   "managerEmail": "manager@example.com"
/// }
/// ```
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    /// Parts list to distribute; defaults to empty
    #[serde(default)]
    pub parts_data: Vec<Part>,

    /// Defaults to "Unknown" when not provided
    #[serde(default)]
    pub technician_name: Option<String>,

    #[serde(default)]
    pub technician_email: Option<String>,

    /// Recipient of the completion notification
    #[serde(default)]
    pub manager_email: Option<String>,
}

/// Response returned after successfully creating a link
///
/// # Example
/// ```json
/// {
///   "success": true,
///   "linkId": "x7k2m9qp4a1c",
///   "secureLink": "http://localhost:8080/tech?id=x7k2m9qp4a1c",
///   "expiresAt": "2026-01-19T13:40:00Z"
/// }
/// ```
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub success: bool,

    /// The generated opaque link id
    pub link_id: String,

    /// Fully qualified URL handed to the technician
    pub secure_link: String,

    pub expires_at: DateTime<Utc>,
}

/// Query parameters for resolving a link to its parts data
///
/// Query string: `?id=x7k2m9qp4a1c`
#[derive(Deserialize)]
pub struct PartsQuery {
    /// The link id; absence is a client error
    pub id: Option<String>,
}

/// Request payload for submitting a completed parts report
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    /// Id of the link the technician is reporting against
    #[serde(default)]
    pub link_id: Option<String>,

    /// Final parts list with updated statuses; must be non-empty
    #[serde(default)]
    pub parts_data: Option<Vec<Part>>,

    #[serde(default)]
    pub technician_info: Option<TechnicianInfo>,
}

/// Request payload for the notification dispatch endpoint
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    /// Recipient address; absence is a client error
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    /// Prebuilt HTML body; when absent a parts-status-update template is
    /// rendered from `technician_name` and `link`
    #[serde(default)]
    pub html_content: Option<String>,

    #[serde(default)]
    pub technician_name: Option<String>,

    #[serde(default)]
    pub link: Option<String>,
}

/// Request payload for the PDF processing stub
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPdfRequest {
    #[serde(default)]
    pub file_name: String,

    #[serde(default)]
    pub technician_name: Option<String>,

    #[serde(default)]
    pub parts_count: Option<u32>,
}
