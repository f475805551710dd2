//! Progress reporting for workflow steps.
//!
//! Each step runs through a [Progress] implementation, which shows what is
//! happening while the blocking call runs and reports the outcome. The
//! indicator is cosmetic: the step's own result is always returned unchanged.

use crate::boundary::BoundaryWarning;
use crate::error::Result;
use crate::ui::formatter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Capability passed to the workflow for reporting step progress
pub trait Progress {
    /// Run `op` while showing `message`.
    ///
    /// A successful step is held until at least `min_duration` has passed
    /// since it started. The result of `op` is returned as is.
    fn run<T, F>(&self, message: &str, min_duration: Duration, op: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;

    /// Report a non-fatal condition
    fn warn(&self, warning: &BoundaryWarning);
}

fn hold_until(started: Instant, min_duration: Duration) {
    let elapsed = started.elapsed();
    if elapsed < min_duration {
        thread::sleep(min_duration - elapsed);
    }
}

/// Terminal spinner animated by a background ticker
#[derive(Debug, Default)]
pub struct SpinnerProgress;

impl SpinnerProgress {
    pub fn new() -> Self {
        SpinnerProgress
    }

    fn start(message: &str) -> SpinnerGuard {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        SpinnerGuard { bar }
    }
}

/// Stops the spinner however the step ends
struct SpinnerGuard {
    bar: ProgressBar,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl Progress for SpinnerProgress {
    fn run<T, F>(&self, message: &str, min_duration: Duration, op: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let started = Instant::now();
        let spinner = Self::start(message);

        let result = op();
        if result.is_ok() {
            hold_until(started, min_duration);
        }
        drop(spinner);

        match &result {
            Ok(_) => formatter::display_success(message),
            Err(_) => formatter::display_failure(message),
        }

        result
    }

    fn warn(&self, warning: &BoundaryWarning) {
        formatter::display_boundary_warning(warning);
    }
}

/// Prints nothing; keeps the messages and warnings it was given
#[derive(Debug, Default)]
pub struct SilentProgress {
    messages: Mutex<Vec<String>>,
    warnings: Mutex<Vec<BoundaryWarning>>,
}

impl SilentProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step messages in the order the steps ran
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<BoundaryWarning> {
        self.warnings.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl Progress for SilentProgress {
    fn run<T, F>(&self, message: &str, min_duration: Duration, op: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }

        let started = Instant::now();
        let result = op();
        if result.is_ok() {
            hold_until(started, min_duration);
        }
        result
    }

    fn warn(&self, warning: &BoundaryWarning) {
        if let Ok(mut warnings) = self.warnings.lock() {
            warnings.push(warning.clone());
        }
    }
}
