use std::sync::Mutex;
use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(200);

/// Progress callback: `(stage, done, total, message)`, `done` counting
/// finished items from 1.
pub type ProgressCallback = dyn Fn(&str, u64, u64, &str) + Send + Sync;

/// Forwards at most one update per 200ms, plus the final one of each stage.
pub struct ThrottledProgress<'a> {
    inner: &'a ProgressCallback,
    last_emit: Mutex<Option<Instant>>,
}

impl<'a> ThrottledProgress<'a> {
    pub fn new(inner: &'a ProgressCallback) -> Self {
        Self {
            inner,
            last_emit: Mutex::new(None),
        }
    }

    /// Report that item `index` (0-based) of `total` has finished.
    pub fn report(&self, stage: &str, index: u64, total: u64, message: &str) {
        let done = index + 1;
        if done < total {
            let Ok(mut last) = self.last_emit.lock() else {
                return;
            };
            if last.is_some_and(|t| t.elapsed() < MIN_INTERVAL) {
                return;
            }
            *last = Some(Instant::now());
        }
        (self.inner)(stage, done, total, message);
    }
}
