//! # CLI Module
//!
//! One-shot commands that run the discovery pipeline once and print the
//! result instead of serving it over HTTP.
//!
//! - [`genres`] - list the catalog's genre seeds
//! - [`discover`] - one artist (by genre or random) with its top tracks
//! - [`tracks`] - a page of random tracks
//!
//! Failures end the process through the `fatal!` macro. "Nothing found" is
//! reported as a warning and is not a failure.

mod discover;
mod genres;
mod tracks;

pub use discover::discover;
pub use genres::genres;
pub use tracks::tracks;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
