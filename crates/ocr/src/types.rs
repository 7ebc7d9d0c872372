use serde::{Deserialize, Serialize};

/// Value reported for tax, tip, and total when the receipt has no matching row.
pub const DEFAULT_AMOUNT: &str = "0.00";

/// A single recognized token with its bounding box in pixel coordinates.
///
/// Providers report geometry as integers or fractions depending on their
/// version, so every coordinate is held as `f64`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrWord {
    #[serde(rename = "WordText")]
    pub text: String,
    #[serde(rename = "Left")]
    pub left: f64,
    #[serde(rename = "Top")]
    pub top: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
}

/// One text run as detected by the OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrLine {
    #[serde(rename = "LineText")]
    pub text: String,
    #[serde(rename = "Words", default)]
    pub words: Vec<OcrWord>,
}

impl OcrLine {
    /// Vertical anchor used for row clustering: the whole-pixel `top` of the
    /// first word. `None` for a line without words.
    pub fn anchor(&self) -> Option<i64> {
        self.words.first().map(|w| w.top.trunc() as i64)
    }
}

/// A printed receipt row reassembled from one or more OCR lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Anchor of the first OCR line assigned to this row.
    pub anchor: i64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    /// Matched price text, currency symbol included when present.
    pub price: String,
}

impl Item {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self { name: name.into(), price: price.into() }
    }
}

/// Outcome of classifying one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Item(Item),
    Tax(String),
    Tip(String),
    Total(String),
    Subtotal,
    /// No trailing price token, or nothing in front of it.
    Unparseable,
}

impl RowKind {
    pub fn label(&self) -> &'static str {
        match self {
            RowKind::Item(_) => "item",
            RowKind::Tax(_) => "tax",
            RowKind::Tip(_) => "tip",
            RowKind::Total(_) => "total",
            RowKind::Subtotal => "subtotal",
            RowKind::Unparseable => "unparseable",
        }
    }
}

/// The reconstructed receipt. Amounts are passed through as the text the
/// receipt printed, not parsed numerics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub items: Vec<Item>,
    pub tax: String,
    pub tip: String,
    pub total: String,
}

impl Default for Receipt {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            tax: DEFAULT_AMOUNT.to_string(),
            tip: DEFAULT_AMOUNT.to_string(),
            total: DEFAULT_AMOUNT.to_string(),
        }
    }
}

impl Receipt {
    /// Fold one classified row into the receipt. Repeated tax, tip, or total
    /// rows overwrite the earlier value.
    pub fn apply(&mut self, row: RowKind) {
        match row {
            RowKind::Item(item) => self.items.push(item),
            RowKind::Tax(price) => self.tax = price,
            RowKind::Tip(price) => self.tip = price,
            RowKind::Total(price) => self.total = price,
            RowKind::Subtotal | RowKind::Unparseable => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, top: f64) -> OcrWord {
        OcrWord { text: text.into(), left: 0.0, top, width: 10.0, height: 10.0 }
    }

    #[test]
    fn default_receipt_has_zero_amounts() {
        let r = Receipt::default();
        assert!(r.items.is_empty());
        assert_eq!(r.tax, "0.00");
        assert_eq!(r.tip, "0.00");
        assert_eq!(r.total, "0.00");
    }

    #[test]
    fn anchor_uses_first_word_and_truncates() {
        let line = OcrLine {
            text: "Apple 1.00".into(),
            words: vec![word("Apple", 100.7), word("1.00", 140.0)],
        };
        assert_eq!(line.anchor(), Some(100));
    }

    #[test]
    fn anchor_is_none_without_words() {
        let line = OcrLine { text: "ghost".into(), words: vec![] };
        assert_eq!(line.anchor(), None);
    }

    #[test]
    fn apply_last_write_wins() {
        let mut r = Receipt::default();
        r.apply(RowKind::Total("3.00".into()));
        r.apply(RowKind::Total("4.00".into()));
        r.apply(RowKind::Subtotal);
        r.apply(RowKind::Unparseable);
        assert_eq!(r.total, "4.00");
        assert!(r.items.is_empty());
    }

    #[test]
    fn word_geometry_accepts_integers_and_fractions() {
        let json = r#"{"WordText":"Tax","Left":12,"Top":40.5,"Width":30,"Height":11.25}"#;
        let w: OcrWord = serde_json::from_str(json).unwrap();
        assert_eq!(w.left, 12.0);
        assert_eq!(w.top, 40.5);
        assert_eq!(w.height, 11.25);
    }

    #[test]
    fn receipt_serializes_with_plain_field_names() {
        let mut r = Receipt::default();
        r.apply(RowKind::Item(Item::new("Apple", "$1.00")));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["items"][0]["name"], "Apple");
        assert_eq!(v["items"][0]["price"], "$1.00");
        assert_eq!(v["tip"], "0.00");
    }
}
