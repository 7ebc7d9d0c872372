use serde::{Deserialize, Serialize};

use crate::types::OcrLine;

/// Error text as reported by the provider: a bare string or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ProviderMessage {
    One(String),
    Many(Vec<String>),
}

impl std::fmt::Display for ProviderMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMessage::One(s) => write!(f, "{s}"),
            ProviderMessage::Many(v) => write!(f, "{}", v.join("; ")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextOverlay {
    #[serde(rename = "Lines", default)]
    pub lines: Vec<OcrLine>,
}

/// One parsed page of a table-aware OCR response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedResult {
    #[serde(rename = "TextOverlay", default)]
    pub text_overlay: Option<TextOverlay>,
    #[serde(rename = "ParsedText", default)]
    pub parsed_text: Option<String>,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<ProviderMessage>,
}

impl ParsedResult {
    pub fn lines(&self) -> &[OcrLine] {
        self.text_overlay.as_ref().map(|o| o.lines.as_slice()).unwrap_or_default()
    }
}

/// Top-level body of an OCR.space `parse/image` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OcrResponse {
    #[serde(rename = "ParsedResults", default)]
    pub parsed_results: Vec<ParsedResult>,
    #[serde(rename = "OCRExitCode", default)]
    pub exit_code: Option<i32>,
    #[serde(rename = "IsErroredOnProcessing", default)]
    pub is_errored: bool,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: Option<ProviderMessage>,
}

impl OcrResponse {
    /// Build a response holding a single page with the given lines.
    pub fn from_lines(lines: Vec<OcrLine>) -> Self {
        Self {
            parsed_results: vec![ParsedResult {
                text_overlay: Some(TextOverlay { lines }),
                ..ParsedResult::default()
            }],
            exit_code: Some(1),
            ..Self::default()
        }
    }

    /// The first parsed page; later pages are not reconstructed.
    pub fn first_page(&self) -> Option<&ParsedResult> {
        self.parsed_results.first()
    }

    /// Provider-reported failure text, if processing errored.
    pub fn failure(&self) -> Option<String> {
        if !self.is_errored {
            return None;
        }
        Some(
            self.error_message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "unspecified provider error".to_string()),
        )
    }
}
