//! Email notification dispatch
//!
//! Delivery is behind the [`Notifier`] trait so the service logic never
//! branches on the runtime environment: the shipped [`LogNotifier`] records
//! the message in the log instead of sending it, and tests inject their own
//! implementation.

use std::collections::BTreeMap;
use std::fmt::Write;

use thiserror::Error;
use tracing::info;

/// A rendered email ready for dispatch
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Dispatch failure; logged by callers, never rolls back the operation that
/// triggered the send
#[derive(Debug, Error)]
#[error("email delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Email dispatch capability injected into the application state
pub trait Notifier: Send + Sync {
    fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Notifier that logs the message instead of delivering it
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "email logged instead of sent"
        );
        Ok(())
    }
}

/// Renders the parts-status-update email sent to a technician
///
/// The call-to-action link points at the technician's distribution URL.
pub fn parts_update_html(technician_name: &str, link: &str) -> String {
    format!(
        r#"<h2>Parts Status Update Required</h2>
<p>Hi {technician_name},</p>
<p>Please update the status of your assigned parts by clicking the link below:</p>
<p><a href="{link}" style="background: #3498db; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px;">Update Parts Status</a></p>
<p>This link will expire in 48 hours.</p>
<p>Best regards,<br>Parts Management Team</p>"#
    )
}

/// Builds the completion notice sent to the manager after a report lands
pub fn manager_report_email(
    manager_email: &str,
    technician_name: &str,
    summary: &BTreeMap<String, u32>,
) -> EmailMessage {
    let mut lines = String::new();
    for (label, count) in summary {
        if *count > 0 {
            let _ = writeln!(lines, "<li>{label}: {count}</li>");
        }
    }

    let html_body = format!(
        r#"<h2>Parts Report Completed</h2>
<p>{technician_name} has submitted a completed parts report.</p>
<ul>
{lines}</ul>
<p>Best regards,<br>Parts Management Team</p>"#
    );

    EmailMessage {
        to: manager_email.to_string(),
        subject: "Parts Report Completed".to_string(),
        html_body,
    }
}
