use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use splitt_ocr::{OcrBackend, Receipt, ReceiptPipeline};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub const RECEIPT_PATH: &str = "/api/receipt";

#[derive(Debug, Deserialize)]
pub struct ReceiptRequest {
    /// Base64-encoded PNG, without a `data:` prefix.
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub message: String,
}

/// JSON envelope returned for every request.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Receipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

impl Envelope {
    fn ok(receipt: Receipt) -> Self {
        Self { success: true, data: Some(receipt), error: None }
    }

    fn err(message: &str) -> Self {
        Self { success: false, data: None, error: Some(ErrorDetails { message: message.to_string() }) }
    }
}

pub struct AppState<R: OcrBackend> {
    pub pipeline: ReceiptPipeline<R>,
}

pub fn router<R: OcrBackend + 'static>(pipeline: ReceiptPipeline<R>, max_body_bytes: usize) -> Router {
    let state = Arc::new(AppState { pipeline });

    Router::new()
        .route(RECEIPT_PATH, post(receipt_handler::<R>))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn receipt_handler<R: OcrBackend + 'static>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<Envelope>) {
    let body = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::warn!("Rejected request body: {rejection}");
            return (rejection.status(), Json(Envelope::err("Invalid request body.")));
        }
    };

    let request: ReceiptRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            tracing::info!("Invalid receipt request: {e}");
            return (StatusCode::BAD_REQUEST, Json(Envelope::err("Invalid request body.")));
        }
    };

    if request.image.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(Envelope::err("No image query is populated.")));
    }

    tracing::info!(image_len = request.image.len(), "Processing receipt image");

    match state.pipeline.process_image(&request.image).await {
        Ok(receipt) => {
            tracing::info!(items = receipt.items.len(), total = %receipt.total, "Receipt reconstructed");
            (StatusCode::OK, Json(Envelope::ok(receipt)))
        }
        Err(e) if e.is_parse_failure() => {
            tracing::error!("Unusable OCR response: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Envelope::err("Failed to parse OCR response.")))
        }
        Err(e) => {
            tracing::warn!("Receipt pipeline error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Envelope::err("Failed to OCR.")))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
