//! Notification classification and message rendering.
//!
//! Classification is an ordered, first-match chain over the notification's
//! fields. The order is load-bearing: a single input may satisfy more than
//! one branch (e.g. `action: Started` together with `conclusion: Success`),
//! and the earlier branch wins. An input matching no branch is an explicit
//! `ClassificationGap` error rather than a silently dropped notification —
//! notably `action: Completed` with no conclusion, which has no message
//! branch of its own.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{NotifyError, NotifyResult};
use crate::model::{Notification, TaskAction, TaskConclusion, TaskNotification};

/// Filename under which a decoded screenshot is attached.
const SCREENSHOT_FILENAME: &str = "screenshot.png";

/// Binary attachment carried alongside the message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Output of classification: message text plus optional attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub content: String,
    pub attachment: Option<Attachment>,
}

/// Render a notification into a message, deterministically.
///
/// # Errors
///
/// Returns `ClassificationGap` when no message branch matches,
/// `AttachmentDecode` when a screenshot is present but not valid base64, and
/// `Serialize` when the failure branch cannot serialize the task payload.
pub fn render(notification: &Notification) -> NotifyResult<RenderedMessage> {
    match notification {
        // The test ping never carries an attachment, whatever else is on the wire.
        Notification::Lifecycle(_) => Ok(RenderedMessage {
            content: "Test 🚀".to_string(),
            attachment: None,
        }),
        Notification::Task(task) => Ok(RenderedMessage {
            content: task_content(task)?,
            attachment: decode_screenshot(task)?,
        }),
    }
}

/// Ordered message branches for task notifications.
fn task_content(task: &TaskNotification) -> NotifyResult<String> {
    if task.action == Some(TaskAction::Started) {
        Ok(format!("🚀 Starting {}", task.event))
    } else if task.action == Some(TaskAction::Progress) {
        Ok(format!("🚧 {} in progress", task.event))
    } else if task.conclusion == Some(TaskConclusion::Failure) {
        let payload = serde_json::to_string(&task.task)?;
        Ok(format!("⚠️⚠️ {} failed: {}", task.event, payload))
    } else if task.conclusion == Some(TaskConclusion::Success) {
        Ok(format!("🎉 {} completed!", task.event))
    } else if task.conclusion == Some(TaskConclusion::Cancelled) {
        Ok(format!("{} cancelled", task.event))
    } else {
        // No branch exists for `action: Completed` without a conclusion, or
        // for a task notification with neither marker. Fail loudly.
        Err(NotifyError::ClassificationGap {
            payload: serde_json::to_value(task)?,
        })
    }
}

/// Decode a non-empty screenshot field into attachment bytes.
fn decode_screenshot(task: &TaskNotification) -> NotifyResult<Option<Attachment>> {
    match &task.screenshot {
        Some(encoded) if !encoded.is_empty() => {
            let bytes = BASE64.decode(encoded)?;
            Ok(Some(Attachment {
                filename: SCREENSHOT_FILENAME.to_string(),
                bytes,
            }))
        }
        _ => Ok(None),
    }
}
