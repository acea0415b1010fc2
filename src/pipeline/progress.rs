// file: src/pipeline/progress.rs
// description: progress reporting for a single ask run on the terminal
// reference: uses indicatif for progress bars

use crate::pipeline::AskStage;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    pub fn with_color(colored: bool) -> Self {
        let bar = ProgressBar::new(AskStage::ALL.len() as u64);
        bar.set_style(create_style(colored));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Draws nothing; used when output must stay machine-readable.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn stage(&self, stage: AskStage) {
        self.bar.set_position(stage.index() as u64);
        self.bar.set_message(stage.label());
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.set_position(AskStage::ALL.len() as u64);
            self.bar.finish_and_clear();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_style(colored: bool) -> ProgressStyle {
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:20.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:20}] {pos}/{len} {msg}"
    };

    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(if colored { "█▓▒░" } else { "=>-" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_moves_position() {
        let tracker = ProgressTracker::hidden();
        tracker.stage(AskStage::Fetch);
        assert_eq!(tracker.position(), 2);

        tracker.stage(AskStage::AnswerGeneration);
        assert_eq!(tracker.position(), 4);
    }

    #[test]
    fn test_finish_completes() {
        let tracker = ProgressTracker::hidden();
        tracker.stage(AskStage::KeywordPrompt);
        tracker.finish();
        assert_eq!(tracker.position(), 5);
    }
}
