pub mod extract;
pub mod merge;
pub mod pipeline;
pub mod recognizer;
pub mod response;
pub mod types;

pub use extract::{is_price, Extractor};
pub use merge::{merge_lines, MERGE_TOLERANCE};
pub use pipeline::{PipelineError, ReceiptPipeline};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError};
pub use response::{OcrResponse, ParsedResult, ProviderMessage, TextOverlay};
pub use types::{Item, LogicalLine, OcrLine, OcrWord, Receipt, RowKind, DEFAULT_AMOUNT};
