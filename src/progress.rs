// src/progress.rs

//! Spinner shown while a package tool subprocess runs
//!
//! Only used when the tool's own output is captured. In verbose mode the
//! subprocess writes to the terminal directly and a spinner would fight it.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Transient status line for one long-running action
pub struct ActionSpinner {
    bar: ProgressBar,
}

impl ActionSpinner {
    /// Start a spinner, or a hidden no-op one when `visible` is false
    pub fn start(message: &str, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("   {spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Remove the spinner line so the result line can take its place
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for ActionSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
