use thiserror::Error;

use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::Receipt;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("OCR response contained no parsed results")]
    NoParsedResults,
}

impl PipelineError {
    /// Whether the provider answered but its body could not be used, as
    /// opposed to the call itself failing.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, PipelineError::NoParsedResults | PipelineError::Ocr(OcrError::Decode(_)))
    }
}

/// Orchestrates: OCR call → provider error check → merge → classify.
pub struct ReceiptPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ReceiptPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Recognize a base64-encoded PNG and rebuild the receipt it shows.
    pub async fn process_image(&self, image_base64: &str) -> Result<Receipt, PipelineError> {
        // 1. Run OCR.
        let response = self.recognizer.recognize(image_base64).await?;

        // 2. Surface provider-side failures.
        if let Some(message) = response.failure() {
            return Err(OcrError::Provider(message).into());
        }

        // 3. Reconstruct from the first page only.
        let page = response.first_page().ok_or(PipelineError::NoParsedResults)?;
        Ok(Extractor::reconstruct(page.lines()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
