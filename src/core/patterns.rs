//! Compiled-once recognizers shared by the query, text, and find modules.
//!
//! All patterns are built a single time for the process lifetime; none of the
//! hot paths ever recompile a regex.

use regex::Regex;
use std::sync::LazyLock;

/// Canonical host of the lyrics site.
pub const HOST: &str = "loveworldlyrics.com";

/// Recognizes a direct song URL (`[scheme://]host/slug[/]`) and captures the
/// slug. Queries that do not match are treated as free-text searches.
pub static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:https?://)?{}/(?P<slug>[\w-]+)/?",
        regex::escape(HOST)
    ))
    .expect("valid URL pattern")
});

/// Matches instructional markers embedded in lyric text: stray bracket
/// characters (one optional leading whitespace char, so a bracket opening a
/// line swallows the newline before it), the `♪…♪` marker, and a closed
/// vocabulary of section/performance labels with an optional trailing colon,
/// plus `x<N>` repeat counts. The vocabulary is deliberately closed so that a
/// leftover annotation is preferred over deleting real lyric words.
pub static CLEAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)(?:\s?[{}<>\[\]])|(?:♪…♪)|(?:\b(?:ad(?:-|\s)libs?|b(?:eat|r(?:eak|idge))|call|cho(?:ir|rus)|coda|drop|echo|falsetto|growl|hook|in(?:strument(?:al|s)?|terludes?|tro(?:duction)?)|loop|middle\seight|outro|post(?:-|\s)chorus|pre(?:-|\s)chorus|re(?:frain|peat(?:\s(?:verse|chorus))?|prise|sponse)|riff|scat|solo|spo(?:ken(?:\sword)?|ntaneous)|vamp|verse(?:\s\d+)?|whisper|x\d+)(?::\s*)?\b)",
    )
    .expect("valid annotation pattern")
});

/// Runs of whitespace or dash-like characters, including the mis-decoded
/// multi-byte dash sequences that show up in copy-pasted titles.
pub static SEPARATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:â€“|â€”|[\s\p{Pd}\x{2212}])+").expect("valid separator pattern")
});

/// Three or more consecutive newlines, collapsed to a single blank line by
/// the text processor.
pub static BLANK_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank-run pattern"));
