//! Progress indicators for network calls
//!
//! Spinners draw on stderr and only when stderr is a terminal, so piped
//! output (`--format json`) stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Await `future` while showing a spinner
pub async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let pb = create_spinner(message);
    let output = future.await;
    pb.finish_and_clear();
    output
}
