//! Toast expiry scheduling.
//!
//! Each scheduled toast gets one fire-once Tokio task that sleeps for the
//! toast's duration and then reports the id on a channel. The owner of the
//! [`ToastQueue`](crate::toast::ToastQueue) reads [`ExpiredToasts`] and does
//! the removal, so the queue itself never needs to be shared across tasks.
//!
//! Timers are cancelled by aborting their task: on manual dismissal, on
//! reschedule, via [`ToastExpiry::cancel_all`], and when the scheduler drops.

use std::collections::HashMap;
use std::time::Duration;

use rosegold_core::ToastId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A timer firing: the toast id plus the generation it was scheduled under.
#[derive(Debug)]
struct Fired {
    id: ToastId,
    generation: u64,
}

struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Owns the pending expiry timers.
pub struct ToastExpiry {
    timers: HashMap<ToastId, Timer>,
    next_generation: u64,
    tx: mpsc::UnboundedSender<Fired>,
}

/// Receiving end for fired timers.
pub struct ExpiredToasts {
    rx: mpsc::UnboundedReceiver<Fired>,
}

/// Create a scheduler and the receiver its timers report to.
#[must_use]
pub fn channel() -> (ToastExpiry, ExpiredToasts) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ToastExpiry {
            timers: HashMap::new(),
            next_generation: 0,
            tx,
        },
        ExpiredToasts { rx },
    )
}

impl ToastExpiry {
    /// Start a timer that reports `id` after `after` has elapsed.
    ///
    /// Scheduling an id that already has a pending timer replaces it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn schedule(&mut self, id: ToastId, after: Duration) {
        self.cancel(&id);

        let generation = self.next_generation;
        self.next_generation += 1;

        let tx = self.tx.clone();
        let fired = Fired {
            id: id.clone(),
            generation,
        };
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // The receiver only goes away with the store; nothing to do then.
            let _ = tx.send(fired);
        });

        tracing::trace!(toast_id = %id, after_ms = after.as_millis(), "Expiry scheduled");
        self.timers.insert(id, Timer { generation, handle });
    }

    /// Cancel the pending timer for `id`. Returns whether one was pending.
    pub fn cancel(&mut self, id: &ToastId) -> bool {
        self.timers.remove(id).is_some_and(|timer| {
            timer.handle.abort();
            true
        })
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
    }

    /// Number of timers that have not yet been consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Whether `id` has a pending timer.
    #[must_use]
    pub fn is_pending(&self, id: &ToastId) -> bool {
        self.timers.contains_key(id)
    }

    /// Retire a fired timer. Returns the id only if it is still current,
    /// i.e. it was neither cancelled nor rescheduled after it fired.
    fn retire(&mut self, fired: Fired) -> Option<ToastId> {
        match self.timers.get(&fired.id) {
            Some(timer) if timer.generation == fired.generation => {
                self.timers.remove(&fired.id);
                Some(fired.id)
            }
            _ => None,
        }
    }
}

impl Drop for ToastExpiry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for ToastExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastExpiry")
            .field("pending", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl ExpiredToasts {
    /// Wait for the next current expiry.
    ///
    /// Returns `None` immediately when `expiry` has nothing pending.
    pub async fn next(&mut self, expiry: &mut ToastExpiry) -> Option<ToastId> {
        loop {
            if expiry.pending() == 0 {
                return None;
            }
            let fired = self.rx.recv().await?;
            if let Some(id) = expiry.retire(fired) {
                return Some(id);
            }
        }
    }

    /// Collect every expiry that has already fired, without waiting.
    pub fn drain(&mut self, expiry: &mut ToastExpiry) -> Vec<ToastId> {
        let mut expired = Vec::new();
        while let Ok(fired) = self.rx.try_recv() {
            if let Some(id) = expiry.retire(fired) {
                expired.push(id);
            }
        }
        expired
    }
}

impl std::fmt::Debug for ExpiredToasts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiredToasts").finish_non_exhaustive()
    }
}
