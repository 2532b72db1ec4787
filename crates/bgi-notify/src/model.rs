//! Inbound notification data model.
//!
//! The producer sends a single JSON object that is one of two shapes: a task
//! notification (progress/outcome of an automation task) or a lifecycle
//! notification (currently only the connectivity test ping). There is no
//! explicit type tag on the wire; discrimination is structural, driven by the
//! value of the `event` field. The lifecycle variant is tried first so that
//! `event: "Test"` always classifies as a lifecycle ping, whatever other
//! fields ride along.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task events the producer reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskEvent {
    GeniusInvocation,
    Domain,
}

impl fmt::Display for TaskEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskEvent::GeniusInvocation => write!(f, "GeniusInvocation"),
            TaskEvent::Domain => write!(f, "Domain"),
        }
    }
}

/// Lifecycle events unrelated to task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Test,
}

/// Progress marker for an in-flight task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    Started,
    Completed,
    Progress,
}

/// Terminal outcome marker for a finished task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskConclusion {
    Success,
    Failure,
    Cancelled,
}

/// Progress/outcome report for an automation task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskNotification {
    pub event: TaskEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<TaskAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<TaskConclusion>,
    /// Base64-encoded image bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Opaque task payload of arbitrary shape.
    #[serde(default)]
    pub task: serde_json::Value,
}

/// Lifecycle ping from the producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleNotification {
    pub event: LifecycleEvent,
    /// Opaque payload of arbitrary shape.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Structurally discriminated inbound notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notification {
    Lifecycle(LifecycleNotification),
    Task(TaskNotification),
}
