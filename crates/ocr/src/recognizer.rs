use std::future::Future;

use thiserror::Error;

use crate::response::OcrResponse;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request failed: {0}")]
    Transport(String),
    #[error("OCR provider returned HTTP {0}")]
    Status(u16),
    #[error("OCR provider reported an error: {0}")]
    Provider(String),
    #[error("Malformed OCR response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Abstraction over a table-aware OCR provider.
/// Implementations accept a base64-encoded PNG and return the provider's
/// decoded response.
pub trait OcrBackend: Send + Sync {
    fn recognize(
        &self,
        image_base64: &str,
    ) -> impl Future<Output = Result<OcrResponse, OcrError>> + Send;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

#[derive(Debug, Clone)]
enum MockReply {
    Response(OcrResponse),
    Body(String),
    Fail(String),
}

/// Replies with a canned response. Useful for exercising the pipeline and
/// the HTTP surface without network access.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    reply: MockReply,
}

impl MockRecognizer {
    pub fn new(response: OcrResponse) -> Self {
        Self { reply: MockReply::Response(response) }
    }

    /// Decode `body` on every call, as if the provider had sent it.
    pub fn from_body(body: impl Into<String>) -> Self {
        Self { reply: MockReply::Body(body.into()) }
    }

    /// Fail every call with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { reply: MockReply::Fail(message.into()) }
    }
}

impl OcrBackend for MockRecognizer {
    async fn recognize(&self, _image_base64: &str) -> Result<OcrResponse, OcrError> {
        match &self.reply {
            MockReply::Response(r) => Ok(r.clone()),
            MockReply::Body(b) => Ok(serde_json::from_str(b)?),
            MockReply::Fail(msg) => Err(OcrError::Transport(msg.clone())),
        }
    }
}

// ── OCR.space backend (optional, gated behind `ocr-space` feature) ────────────

#[cfg(feature = "ocr-space")]
pub mod ocr_space_backend {
    use std::time::Duration;

    use super::{OcrBackend, OcrError};
    use crate::response::OcrResponse;

    pub const DEFAULT_ENDPOINT: &str = "https://api.ocr.space/parse/image";

    pub struct OcrSpaceRecognizer {
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
    }

    impl OcrSpaceRecognizer {
        pub fn new(
            endpoint: impl Into<String>,
            api_key: impl Into<String>,
            timeout: Duration,
        ) -> Result<Self, OcrError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| OcrError::Transport(e.to_string()))?;
            Ok(Self { client, endpoint: endpoint.into(), api_key: api_key.into() })
        }
    }

    impl OcrBackend for OcrSpaceRecognizer {
        async fn recognize(&self, image_base64: &str) -> Result<OcrResponse, OcrError> {
            let form = [
                ("base64Image", format!("data:image/png;base64,{image_base64}")),
                ("isTable", "true".to_string()),
            ];

            let resp = self
                .client
                .post(&self.endpoint)
                .header("apikey", &self.api_key)
                .form(&form)
                .send()
                .await
                .map_err(|e| OcrError::Transport(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(OcrError::Status(status.as_u16()));
            }

            let body = resp.bytes().await.map_err(|e| OcrError::Transport(e.to_string()))?;
            tracing::debug!(bytes = body.len(), "received OCR response");
            Ok(serde_json::from_slice(&body)?)
        }
    }
}
