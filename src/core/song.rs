//! A single fetched or searched song with its lazily processed lyrics.

use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

use crate::core::text;
use crate::error::ConstructionError;

/// One song record mapped from a response item. Immutable apart from the
/// one-time memoization of the processed lyric content.
#[derive(Debug, Clone)]
pub struct Song {
    title: String,
    raw_content: String,
    division_interval: usize,
    clean: bool,
    content: OnceLock<String>,
}

impl Song {
    /// Build a record from one wp-json post object. Both `title.rendered`
    /// and `content.rendered` must be present; a malformed item fails here
    /// so the resolver can drop it without touching the rest of the batch.
    pub fn from_post(
        post: &Value,
        division_interval: usize,
        clean: bool,
    ) -> Result<Self, ConstructionError> {
        let title = post
            .pointer("/title/rendered")
            .and_then(Value::as_str)
            .ok_or(ConstructionError::MissingTitle)?;
        let raw_content = post
            .pointer("/content/rendered")
            .and_then(Value::as_str)
            .ok_or(ConstructionError::MissingContent)?;
        Ok(Self::from_page(
            text::decode_entities(title),
            raw_content.to_string(),
            division_interval,
            clean,
        ))
    }

    /// Build a record from an already-located page title and lyric body
    /// fragment (the legacy HTML-scrape path).
    pub fn from_page(
        title: String,
        raw_content: String,
        division_interval: usize,
        clean: bool,
    ) -> Self {
        Self {
            title,
            raw_content,
            division_interval,
            clean,
            content: OnceLock::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The processed lyric text: extracted from the raw HTML, optionally
    /// stripped of annotations, then either divided at the configured
    /// interval or blank-collapsed. Division and collapse are mutually
    /// exclusive; the division pass already controls blank-line placement.
    ///
    /// Computed on first access and memoized; the computation is pure in
    /// (`raw_content`, `division_interval`, `clean`).
    pub fn content(&self) -> &str {
        self.content.get_or_init(|| {
            let mut lyrics = text::extract_text(&self.raw_content);
            if self.clean {
                lyrics = text::strip_annotations(&lyrics);
            }
            if self.division_interval > 0 {
                text::divide_by_interval(&lyrics, self.division_interval)
            } else {
                text::collapse_blank_runs(&lyrics)
            }
        })
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Title: {}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(title: &str, content: &str) -> Value {
        json!({
            "title": { "rendered": title },
            "content": { "rendered": content },
        })
    }

    #[test]
    fn builds_from_complete_post_and_decodes_title() {
        let song = Song::from_post(&post("Worthy &amp; True", "<p>Lyrics</p>"), 0, false)
            .expect("complete post");
        assert_eq!(song.title(), "Worthy & True");
        assert_eq!(song.to_string(), "Title: Worthy & True");
    }

    #[test]
    fn missing_fields_fail_construction() {
        let no_title = json!({ "content": { "rendered": "<p>x</p>" } });
        assert_eq!(
            Song::from_post(&no_title, 0, false).unwrap_err(),
            ConstructionError::MissingTitle
        );

        let no_content = json!({ "title": { "rendered": "x" } });
        assert_eq!(
            Song::from_post(&no_content, 0, false).unwrap_err(),
            ConstructionError::MissingContent
        );

        let wrong_shape = json!({ "title": "x", "content": { "rendered": "<p>x</p>" } });
        assert_eq!(
            Song::from_post(&wrong_shape, 0, false).unwrap_err(),
            ConstructionError::MissingTitle
        );
    }

    #[test]
    fn content_is_memoized() {
        let song = Song::from_post(&post("T", "<p>A<br>B</p>"), 0, false).unwrap();
        let first = song.content();
        assert_eq!(first, "A\nB");
        assert!(std::ptr::eq(first, song.content()));
    }

    #[test]
    fn collapse_branch_runs_without_interval() {
        let song = Song::from_post(&post("T", "<p>A</p><p></p><p></p><p>B</p>"), 0, false).unwrap();
        assert_eq!(song.content(), "A\n\nB");
    }

    #[test]
    fn division_branch_runs_with_interval() {
        let song = Song::from_post(&post("T", "<p>A<br>B<br>C</p>"), 2, false).unwrap();
        assert_eq!(song.content(), "A\nB\n\nC");
    }

    #[test]
    fn clean_flag_strips_annotations() {
        let song = Song::from_post(&post("T", "<p>[Chorus]<br>He reigns</p>"), 0, true).unwrap();
        assert_eq!(song.content(), "He reigns");
    }
}
