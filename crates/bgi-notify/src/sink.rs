//! Outbound webhook sink client.
//!
//! A thin pass-through to a Discord-compatible webhook: one synchronous
//! attempt per rendered message, no retry, no backoff, no batching. The
//! result — success or the sink's error — is propagated to the caller
//! unchanged.

use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;

use crate::error::{NotifyError, NotifyResult};
use crate::render::RenderedMessage;

/// Outbound request timeout.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body snippet length kept in error messages.
const BODY_SNIPPET_CHARS: usize = 4096;

/// Long-lived client for the configured webhook sink.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    /// Create a sink client with a shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `SinkRequest` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .user_agent("bgi-relay/0.1")
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Forward one rendered message to the sink.
    ///
    /// Text-only messages are sent as JSON; messages with an attachment go as
    /// `multipart/form-data` with a `payload_json` field and a `files[0]`
    /// file part, per the Discord webhook contract.
    ///
    /// # Errors
    ///
    /// Returns `SinkRequest` on transport failure and `SinkStatus` when the
    /// sink answers with a non-2xx status.
    pub async fn send(&self, message: &RenderedMessage) -> NotifyResult<()> {
        let payload = serde_json::json!({ "content": message.content });
        let request = self.client.post(&self.url);

        let response = match &message.attachment {
            Some(attachment) => {
                let part = multipart::Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.filename.clone());
                let form = multipart::Form::new()
                    .text("payload_json", payload.to_string())
                    .part("files[0]", part);
                request.multipart(form).send().await?
            }
            None => request.json(&payload).send().await?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(BODY_SNIPPET_CHARS)
                .collect::<String>();
            return Err(NotifyError::SinkStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            target: "webhook_sink",
            content_len = message.content.len(),
            has_attachment = message.attachment.is_some(),
            "Message forwarded to sink"
        );
        Ok(())
    }

    /// The configured sink URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}
