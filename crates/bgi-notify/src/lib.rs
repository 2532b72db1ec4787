//! Notification relay core for BetterGI lifecycle/task events.
//!
//! Provides the notification data model, the ordered classifier/renderer that
//! turns a notification into a human-readable message (optionally with a
//! screenshot attachment), the persistent endpoint-token store, and the
//! Discord-compatible webhook sink client.

pub mod endpoint;
pub mod error;
pub mod model;
pub mod render;
pub mod sink;

pub use endpoint::load_or_create_token;
pub use error::NotifyError;
pub use model::{Notification, TaskAction, TaskConclusion, TaskEvent};
pub use render::{render, Attachment, RenderedMessage};
pub use sink::WebhookSink;
