//! Pure text-to-text transforms for the lyric pipeline.
//!
//! Each function is independent and idempotent where the pipeline relies on
//! it; the order they compose in is decided by [`crate::core::song::Song`].

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::core::patterns::{BLANK_RUN_PATTERN, CLEAN_PATTERN};

static PARAGRAPH_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Extract plain lyric text from an HTML fragment.
///
/// Paragraph elements are taken in document order; within one paragraph,
/// every text node is stripped and the pieces joined with newlines, which
/// renders `<br>` breaks as line breaks. A fragment with no paragraphs falls
/// back to all of its text content.
pub fn extract_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let paragraphs: Vec<String> = fragment
        .select(&PARAGRAPH_SELECTOR)
        .map(element_text)
        .collect();
    let joined = if paragraphs.is_empty() {
        element_text(fragment.root_element())
    } else {
        paragraphs.join("\n")
    };
    joined.trim().to_string()
}

fn element_text(element: ElementRef<'_>) -> String {
    let pieces: Vec<&str> = element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();
    pieces.join("\n")
}

/// Decode HTML entities in a short string (post titles arrive
/// entity-encoded from the API).
pub fn decode_entities(s: &str) -> String {
    Html::parse_fragment(s).root_element().text().collect()
}

/// Remove every instructional annotation. Safe to run repeatedly: cleaned
/// text contains no further matches.
pub fn strip_annotations(text: &str) -> String {
    CLEAN_PATTERN.replace_all(text, "").into_owned()
}

/// Collapse runs of three or more newlines to a single blank line and trim
/// the ends. The output never contains a blank-line run longer than one.
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN_PATTERN.replace_all(text, "\n\n").trim().to_string()
}

/// Keep only non-blank lines and insert one blank line after every
/// `interval`-th of them, never after the last. Callers branch on
/// `interval > 0` before getting here.
pub fn divide_by_interval(text: &str, interval: usize) -> String {
    debug_assert!(interval >= 1, "division interval must be positive");
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let mut out = String::with_capacity(text.len());
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        if i + 1 < lines.len() {
            out.push('\n');
            if (i + 1) % interval == 0 {
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_paragraphs_with_breaks() {
        assert_eq!(extract_text("<p>A<br>B</p><p>C</p>"), "A\nB\nC");
    }

    #[test]
    fn extract_falls_back_without_paragraphs() {
        assert_eq!(extract_text("plain <b>text</b> here"), "plain\ntext\nhere");
    }

    #[test]
    fn extract_trims_surrounding_whitespace() {
        assert_eq!(extract_text("<p>  Holy  </p>"), "Holy");
    }

    #[test]
    fn decodes_title_entities() {
        assert_eq!(decode_entities("Worthy &amp; True &#8211; Live"), "Worthy & True – Live");
    }

    #[test]
    fn strips_annotation_lines_but_keeps_lyrics() {
        let input = "[Verse 2]\n[Refrain]\n{Chorus}\nGlory in the Highest [x482]\n";
        assert_eq!(strip_annotations(input), "\nGlory in the Highest\n");
    }

    #[test]
    fn strip_is_idempotent_and_leaves_clean_text_alone() {
        let clean = "Glory in the Highest\nWorthy is the Lamb";
        assert_eq!(strip_annotations(clean), clean);
        let once = strip_annotations("[Chorus]\nHe reigns");
        assert_eq!(strip_annotations(&once), once);
    }

    #[test]
    fn collapses_blank_runs() {
        let input = "\nLine 1\n\n\n\nLine 2\nLine 3\n\nLine 4\n";
        assert_eq!(collapse_blank_runs(input), "Line 1\n\nLine 2\nLine 3\n\nLine 4");
    }

    #[test]
    fn collapse_is_idempotent_and_bounds_blank_runs() {
        let once = collapse_blank_runs("a\n\n\n\n\n\nb\n\n\nc");
        assert_eq!(once, "a\n\nb\n\nc");
        assert_eq!(collapse_blank_runs(&once), once);
        assert!(!once.contains("\n\n\n"));
    }

    #[test]
    fn divides_at_interval_without_trailing_blank() {
        let input = "Line 1\nLine 2\nLine 3\nLine 4\nLine 5\nLine 6\nLine 7";
        assert_eq!(
            divide_by_interval(input, 2),
            "Line 1\nLine 2\n\nLine 3\nLine 4\n\nLine 5\nLine 6\n\nLine 7"
        );
    }

    #[test]
    fn division_inserts_floor_k_minus_one_over_n_blanks() {
        for (k, n) in [(7usize, 2usize), (6, 3), (5, 1), (4, 10)] {
            let text: Vec<String> = (0..k).map(|i| format!("line {i}")).collect();
            let divided = divide_by_interval(&text.join("\n"), n);
            let blanks = divided.split('\n').filter(|l| l.is_empty()).count();
            assert_eq!(blanks, (k - 1) / n, "k={k} n={n}");
            assert!(!divided.ends_with('\n'));
        }
    }

    #[test]
    fn division_drops_existing_blank_lines() {
        assert_eq!(divide_by_interval("a\n\nb\n \nc", 3), "a\nb\nc");
    }
}
