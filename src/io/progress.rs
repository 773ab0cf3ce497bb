//! Revert sequence progress display

use crate::interaction::RevertEvent;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static REVERT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.green/red}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows how many cells the revert sequence has unmarked
pub struct RevertProgress {
    bar: ProgressBar,
}

impl RevertProgress {
    /// Create a bar for a revert over `cells` cells
    pub fn new(cells: usize) -> Self {
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(REVERT_STYLE.clone());
        bar.set_prefix("Reverting");
        Self { bar }
    }

    /// Create a bar that draws nothing
    pub fn hidden(cells: usize) -> Self {
        let progress = Self::new(cells);
        progress.bar.set_draw_target(ProgressDrawTarget::hidden());
        progress
    }

    /// Reflect one revert step
    pub fn observe(&self, event: &RevertEvent) {
        match event {
            RevertEvent::Started => self.bar.set_message("started"),
            RevertEvent::Unmarked(id) => {
                self.bar.inc(1);
                self.bar.set_message(format!("unmarked {id}"));
            }
            RevertEvent::Finished => self.bar.finish_with_message("done"),
        }
    }

    /// Cells unmarked so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// True once the finish event was observed
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Remove the bar from the terminal
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
