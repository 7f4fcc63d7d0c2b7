use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);

/// A stderr spinner shown while waiting on the chat or speech service.
///
/// Hidden in quiet mode. Clears itself when dropped, so replacing the
/// `Option<Spinner>` that holds it is enough to move to the next phase.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        if output::is_quiet() {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .map_or_else(|_| ProgressStyle::default_spinner(), |s| s.tick_strings(FRAMES));

        let bar = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(message.to_string());
        bar.enable_steady_tick(TICK);

        Self { bar }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
