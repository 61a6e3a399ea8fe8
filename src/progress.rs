// src/progress.rs
use log::{info, warn};

use crate::error::Error;

/// Lightweight progress reporting used by the vendor batch loops.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of documents (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One document extracted.
    fn item_done(&mut self, _id: &str) {}

    /// One document skipped after a recoverable error.
    fn item_skipped(&mut self, _id: &str, _err: &Error) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress as log lines, every `every` documents.
pub struct LogProgress {
    label: String,
    total: usize,
    done: usize,
    skipped: usize,
    every: usize,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), total: 0, done: 0, skipped: 0, every: 25 }
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        info!("{}: {} documents", self.label, total);
    }

    fn log(&mut self, msg: &str) {
        info!("{}: {}", self.label, msg);
    }

    fn item_done(&mut self, _id: &str) {
        self.done += 1;
        if self.done % self.every == 0 {
            info!("{}: {}/{}", self.label, self.done + self.skipped, self.total);
        }
    }

    fn item_skipped(&mut self, id: &str, err: &Error) {
        self.skipped += 1;
        warn!("{}: skipping {id}: {err}", self.label);
    }

    fn finish(&mut self) {
        info!("{}: {} extracted, {} skipped", self.label, self.done, self.skipped);
    }
}
