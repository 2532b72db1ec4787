//! Error types for the notification relay core.

/// Relay core error variants.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The notification matched none of the ordered message branches.
    /// Carries the offending payload so the request boundary can log it.
    #[error("no message branch matches notification: {payload}")]
    ClassificationGap { payload: serde_json::Value },

    #[error("invalid screenshot encoding: {0}")]
    AttachmentDecode(#[from] base64::DecodeError),

    #[error("webhook request failed: {0}")]
    SinkRequest(#[from] reqwest::Error),

    #[error("webhook sink returned HTTP {status}: {body}")]
    SinkStatus { status: u16, body: String },

    #[error("endpoint token store: {0}")]
    TokenStore(#[from] std::io::Error),

    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type NotifyResult<T> = Result<T, NotifyError>;
