use std::sync::OnceLock;

use regex::Regex;

use crate::merge::merge_lines;
use crate::types::{Item, LogicalLine, OcrLine, Receipt, RowKind};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_price, r"^\$?[0-9]*\.[0-9]{2}$");

// Word boundaries are ASCII-only: a label followed by an accented letter
// ("Taxé") still counts as the whole word.
re!(re_word_subtotal, r"(?i)(?-u:\b)subtotal(?-u:\b)");
re!(re_word_tax, r"(?i)(?-u:\b)tax(?-u:\b)");
re!(re_word_tip, r"(?i)(?-u:\b)tip(?-u:\b)");
re!(re_word_total, r"(?i)(?-u:\b)total(?-u:\b)");

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Rebuild a receipt from the OCR lines of one parsed page.
    pub fn reconstruct(lines: &[OcrLine]) -> Receipt {
        let rows = merge_lines(lines);
        let receipt = Self::reconstruct_rows(&rows);
        tracing::debug!(
            ocr_lines = lines.len(),
            rows = rows.len(),
            items = receipt.items.len(),
            "reconstructed receipt"
        );
        receipt
    }

    /// Classify already-merged rows in order and fold them into a fresh receipt.
    pub fn reconstruct_rows(rows: &[LogicalLine]) -> Receipt {
        let mut receipt = Receipt::default();
        for row in rows {
            let kind = Self::classify(&row.text);
            if matches!(kind, RowKind::Unparseable | RowKind::Subtotal) {
                tracing::debug!(text = %row.text, kind = kind.label(), "discarding row");
            }
            receipt.apply(kind);
        }
        receipt
    }

    /// Route one row of text to the receipt field it belongs to.
    ///
    /// Labels are whole-word, case-insensitive, and checked in a fixed order:
    /// subtotal, tax, tip, total. The first match wins, so a subtotal row that
    /// also mentions "total" is still discarded.
    pub fn classify(text: &str) -> RowKind {
        let Some((name, price)) = Self::find_item(text) else {
            return RowKind::Unparseable;
        };
        if name.is_empty() || price.is_empty() {
            return RowKind::Unparseable;
        }

        if contains_word(re_word_subtotal(), &name) {
            RowKind::Subtotal
        } else if contains_word(re_word_tax(), &name) {
            RowKind::Tax(price)
        } else if contains_word(re_word_tip(), &name) {
            RowKind::Tip(price)
        } else if contains_word(re_word_total(), &name) {
            RowKind::Total(price)
        } else {
            RowKind::Item(Item { name, price })
        }
    }

    /// Split a row into `(name, price)` at its rightmost price token.
    ///
    /// The name is every token before the price, joined by single spaces.
    /// Tokens after the price are dropped.
    pub fn find_item(text: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let idx = parts.iter().rposition(|p| is_price(p))?;
        Some((parts[..idx].join(" "), parts[idx].to_string()))
    }
}

/// Whether a single token reads as a two-decimal amount, optionally prefixed
/// with `$`.
pub fn is_price(token: &str) -> bool {
    re_price().is_match(token)
}

fn contains_word(re: &Regex, name: &str) -> bool {
    re.is_match(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
