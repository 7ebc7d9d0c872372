use crate::types::{LogicalLine, OcrLine};

/// Maximum anchor distance, in pixels, at which two OCR lines are treated as
/// fragments of the same printed row.
pub const MERGE_TOLERANCE: u64 = 1;

/// Cluster OCR lines into printed rows by vertical anchor.
///
/// Engines often split one printed row into separate detected lines (item
/// name on the left, price on the right) at nearly the same height. Each line
/// joins the first row, in creation order, whose anchor is within
/// [`MERGE_TOLERANCE`]; otherwise it opens a new row. Rows come back in
/// first-seen order. Lines without words have no anchor and are skipped.
///
/// Two genuinely distinct rows printed within the tolerance are merged too.
pub fn merge_lines(lines: &[OcrLine]) -> Vec<LogicalLine> {
    let mut merged: Vec<LogicalLine> = Vec::new();

    for line in lines {
        let Some(anchor) = line.anchor() else {
            tracing::debug!(text = %line.text, "skipping OCR line without words");
            continue;
        };

        match merged
            .iter_mut()
            .find(|row| anchor.abs_diff(row.anchor) <= MERGE_TOLERANCE)
        {
            Some(row) => {
                row.text.push(' ');
                row.text.push_str(&line.text);
            }
            None => merged.push(LogicalLine { anchor, text: line.text.clone() }),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OcrWord;

    fn line(text: &str, top: f64) -> OcrLine {
        OcrLine {
            text: text.into(),
            words: vec![OcrWord { text: text.into(), left: 0.0, top, width: 50.0, height: 12.0 }],
        }
    }

    fn empty(text: &str) -> OcrLine {
        OcrLine { text: text.into(), words: vec![] }
    }

    fn texts(rows: &[LogicalLine]) -> Vec<&str> {
        rows.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn adjacent_anchors_merge() {
        let rows = merge_lines(&[line("Apple", 100.0), line("1.00", 101.0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "Apple 1.00");
        assert_eq!(rows[0].anchor, 100);
    }

    #[test]
    fn distant_anchors_stay_separate() {
        let rows = merge_lines(&[line("Apple", 100.0), line("1.00", 103.0)]);
        assert_eq!(texts(&rows), vec!["Apple", "1.00"]);
    }

    #[test]
    fn two_pixels_apart_is_outside_tolerance() {
        let rows = merge_lines(&[line("a", 100.0), line("b", 102.0)]);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn merge_is_symmetric_in_input_order() {
        let forward = merge_lines(&[line("Bread", 201.0), line("2.50", 200.0)]);
        let backward = merge_lines(&[line("2.50", 200.0), line("Bread", 201.0)]);
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
    }

    #[test]
    fn lines_without_words_are_ignored() {
        let with_ghost = merge_lines(&[
            line("Apple", 100.0),
            empty("ghost"),
            line("1.00", 100.0),
        ]);
        let without = merge_lines(&[line("Apple", 100.0), line("1.00", 100.0)]);
        assert_eq!(with_ghost, without);
    }

    #[test]
    fn output_preserves_first_seen_order() {
        let rows = merge_lines(&[
            line("Bread", 300.0),
            line("Apple", 100.0),
            line("2.50", 300.0),
            line("1.00", 99.0),
        ]);
        assert_eq!(texts(&rows), vec!["Bread 2.50", "Apple 1.00"]);
    }

    #[test]
    fn first_registered_bucket_wins_ties() {
        // 101 is within tolerance of both 100 and 102; the older row takes it.
        let rows = merge_lines(&[line("a", 100.0), line("b", 102.0), line("c", 101.0)]);
        assert_eq!(texts(&rows), vec!["a c", "b"]);
    }

    #[test]
    fn bucket_anchor_does_not_drift() {
        // 101 joins 100, but 102 is measured against the original anchor.
        let rows = merge_lines(&[line("a", 100.0), line("b", 101.0), line("c", 102.0)]);
        assert_eq!(texts(&rows), vec!["a b", "c"]);
    }

    #[test]
    fn extreme_anchors_stay_separate() {
        let rows = merge_lines(&[line("a", 1e19), line("b", -1.0)]);
        assert_eq!(texts(&rows), vec!["a", "b"]);

        let rows = merge_lines(&[line("low", -1e300), line("high", 1e300), line("low 2", -1e300)]);
        assert_eq!(texts(&rows), vec!["low low 2", "high"]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(merge_lines(&[]).is_empty());
    }
}
