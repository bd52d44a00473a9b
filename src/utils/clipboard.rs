use arboard::Clipboard;

use crate::error::Result;

/// Copy the final lyric text to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
