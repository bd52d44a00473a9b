//! Error handling for the lwlyric CLI.
//!
//! Lookup failures are total-failure conditions and always surface to the
//! caller with the underlying cause (status code or transport message)
//! embedded. Per-item construction failures are recovered locally by the
//! resolver and never reach this level on their own.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LwLyricError {
    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("{0}")]
    Selection(#[from] SelectionError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// No usable result could be produced for a query. Never retried internally;
/// retry policy, if any, belongs to the transport.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(
        "HTTP {code} error.\nVisit https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/{code} for more information."
    )]
    Status { code: u16 },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No songs found.")]
    NoSongs,

    #[error("Page has no lyric body")]
    MissingBody,

    #[error("Page has no song title")]
    MissingTitle,
}

/// One search/fetch result item could not be turned into a song record.
/// The resolver drops such items; only a fully-empty batch is an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("result item has no rendered title")]
    MissingTitle,

    #[error("result item has no rendered content")]
    MissingContent,
}

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Invalid selection: {input:?} (expected 1-{max})")]
    OutOfRange { input: String, max: usize },
}

pub type Result<T> = std::result::Result<T, LwLyricError>;
