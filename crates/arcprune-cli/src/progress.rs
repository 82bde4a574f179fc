//! Walk progress display for CLI operations.

use arcprune_core::SkipReason;
use arcprune_core::WalkObserver;
use arcprune_core::WalkResult;
use arcprune_core::types::RelativePath;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;

/// CLI observer: a spinner on a TTY and, in verbose mode, one line per
/// added or excluded path.
///
/// The number of files is unknown until the walk ends, so progress is a
/// spinner with a running count rather than a bar.
pub struct CliProgress {
    bar: Option<ProgressBar>,
    verbose: bool,
    term: Term,
    added: u64,
}

impl CliProgress {
    /// Creates the observer. `show_spinner` should be false when stdout is
    /// not a terminal or output is quiet or JSON.
    #[must_use]
    pub fn new(message: &str, show_spinner: bool, verbose: bool) -> Self {
        let bar = show_spinner.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg} {pos} files ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });

        Self {
            bar,
            verbose,
            term: Term::stdout(),
            added: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    fn line(&self, text: &str) {
        match &self.bar {
            Some(bar) => bar.println(text),
            None => {
                let _ = self.term.write_line(text);
            }
        }
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl WalkObserver for CliProgress {
    fn on_emitted(&mut self, path: &RelativePath) {
        self.added += 1;
        if let Some(bar) = &self.bar {
            bar.set_position(self.added);
        }
        if self.verbose {
            self.line(&format!("Added: {path}"));
        }
    }

    fn on_excluded(&mut self, path: &RelativePath, is_dir: bool) {
        if self.verbose {
            let slash = if is_dir { "/" } else { "" };
            self.line(&format!("Excluded: {path}{slash}"));
        }
    }

    fn on_skipped(&mut self, path: &RelativePath, reason: SkipReason) {
        if self.verbose {
            self.line(&format!("Skipped: {path} ({reason})"));
        }
    }

    fn on_complete(&mut self, _result: &WalkResult) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
