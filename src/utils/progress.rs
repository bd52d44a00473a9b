use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner helpers for the single network round-trip.
pub struct ProgressUtils;

impl ProgressUtils {
    pub fn create_lookup_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid spinner template"),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

/// Status phases shown while a lookup is in flight.
pub struct ProgressMessages;

impl ProgressMessages {
    pub const FORMING: &'static str = "Forming URL.";
    pub const FINDING: &'static str = "Finding.";
    pub const SCRAPING: &'static str = "Fetching page.";
}
