use std::sync::{Arc, Mutex, MutexGuard};

/// Append-only, ordered progress lines for one controller.
///
/// Clones share the same underlying log, so overlapping poll sequences interleave
/// their lines in completion order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{}", line);
        self.guard().push(line);
    }

    /// Same as [`EventLog::push`], with the job id attached to the tracing event.
    pub fn push_for(&self, job_id: &str, line: impl Into<String>) {
        let line = line.into();
        tracing::info!(job_id, "{}", line);
        self.guard().push(line);
    }

    /// Clears every line. Only a new submission attempt does this.
    pub fn reset(&self) {
        self.guard().clear();
    }

    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.guard().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written line behind.
    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
