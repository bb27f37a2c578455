//! Thread-safe timeline handle for concurrent producers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::kind::StepKind;
use crate::step::Entry;
use crate::timeline::Timeline;

/// A cloneable handle to one [`Timeline`], shareable across tasks.
///
/// Appends are serialized by a single lock, so sequence indices stay gapless
/// and unique even when several sub-agents record steps at once.
///
/// # Example
///
/// ```rust
/// use workflow_trace::{SharedTimeline, StepKind};
///
/// let timeline = SharedTimeline::new("Parallel research");
/// let worker = timeline.clone();
/// std::thread::spawn(move || {
///     worker.log(StepKind::ToolUse, "research", "web_search");
/// })
/// .join()
/// .unwrap();
///
/// timeline.complete();
/// assert_eq!(timeline.snapshot().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SharedTimeline {
    inner: Arc<Mutex<Timeline>>,
}

impl SharedTimeline {
    /// Create a handle to a new, empty timeline.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from(Timeline::new(name))
    }

    /// Append a step, returning its sequence index.
    pub fn append(&self, entry: Entry) -> usize {
        self.lock().append(entry).sequence_index()
    }

    /// Append a step with no details, result or duration.
    pub fn log(&self, kind: StepKind, agent: impl Into<String>, action: impl Into<String>) -> usize {
        self.append(Entry::new(kind, agent, action))
    }

    /// See [`Timeline::complete`].
    pub fn complete(&self) {
        self.lock().complete();
    }

    /// See [`Timeline::duration`].
    pub fn duration(&self) -> f64 {
        self.lock().duration()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run `f` against the timeline while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Timeline) -> R) -> R {
        f(&self.lock())
    }

    /// Clone the current state for rendering or persistence.
    #[must_use]
    pub fn snapshot(&self) -> Timeline {
        self.lock().clone()
    }

    /// Take the timeline out of the handle, cloning it if other handles
    /// are still alive.
    pub fn into_inner(self) -> Timeline {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => {
                let guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
                guard.clone()
            }
        }
    }

    // A panic while holding the lock cannot leave a half-appended step, so a
    // poisoned timeline is still consistent.
    fn lock(&self) -> MutexGuard<'_, Timeline> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<Timeline> for SharedTimeline {
    fn from(timeline: Timeline) -> Self {
        Self {
            inner: Arc::new(Mutex::new(timeline)),
        }
    }
}
