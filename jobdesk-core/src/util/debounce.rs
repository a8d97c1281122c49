//!  src/util/debounce.rs
//!  ===================================================================
//!  Trailing-edge debouncer built on a cancellable scheduled task.
//!
//!  • Every `submit` aborts the pending sleeper task and spawns a new one,
//!    so a burst of submissions produces a single delivery.
//!  • Deliveries are tagged with a sequence number. A delivery that was
//!    already queued when a newer `submit`/`cancel` happened is reported
//!    stale by `is_current`.
//!  • The pending event is stored with its sequence, and a sleeper only
//!    takes the event it was spawned for. An aborted sleeper that already
//!    woke up finds a newer sequence and leaves the slot alone.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::{debug, trace};

/* ======================== DebounceConfig ============================ */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    pub delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::filter_input()
    }
}

impl DebounceConfig {
    /// Quiet period before the job list is refetched after a filter edit
    #[must_use]
    pub const fn filter_input() -> Self {
        Self {
            delay: Duration::from_millis(500),
        }
    }

    #[must_use]
    pub const fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

/* ============================ Debouncer ============================ */

/// A debounced event as delivered on the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounced<T> {
    pub seq: u64,
    pub event: T,
}

pub struct Debouncer<T> {
    cfg: DebounceConfig,
    seq: u64,
    /// Latest submitted event and its sequence.
    slot: Arc<Mutex<Option<(u64, T)>>>,
    sleeper: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Debounced<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a new debouncer and its Rx endpoint
    #[must_use]
    pub fn new(cfg: DebounceConfig) -> (Self, mpsc::UnboundedReceiver<Debounced<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let deb = Self {
            cfg,
            seq: 0,
            slot: Arc::new(Mutex::new(None)),
            sleeper: None,
            tx,
        };
        (deb, rx)
    }

    #[must_use]
    pub const fn config(&self) -> DebounceConfig {
        self.cfg
    }

    /// Schedule `ev` for delivery after the quiet period, replacing and
    /// cancelling whatever was pending. Returns the delivery's sequence.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self, ev: T) -> u64 {
        self.abort_sleeper();
        self.seq += 1;
        let seq = self.seq;

        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some((seq, ev));
        }

        let slot = Arc::clone(&self.slot);
        let tx = self.tx.clone();
        let delay = self.cfg.delay;

        trace!(seq, delay_ms = delay.as_millis() as u64, "debounce scheduled");
        self.sleeper = Some(tokio::spawn(async move {
            sleep(delay).await;

            let event = slot.lock().ok().and_then(|mut s| take_matching(&mut s, seq));
            if let Some(event) = event {
                debug!(seq, "debounce elapsed, delivering");
                let _ = tx.send(Debounced { seq, event });
            }
        }));

        seq
    }

    /// Drop the pending event without delivering it. Returns true if
    /// something was pending.
    pub fn cancel(&mut self) -> bool {
        self.abort_sleeper();
        self.seq += 1;
        let dropped = self
            .slot
            .lock()
            .ok()
            .and_then(|mut s| s.take())
            .is_some();

        if dropped {
            debug!(seq = self.seq, "pending debounced event cancelled");
        }
        dropped
    }

    /// True if `seq` belongs to the most recent submission and no
    /// `submit` or `cancel` happened since.
    #[must_use]
    pub const fn is_current(&self, seq: u64) -> bool {
        seq == self.seq
    }

    fn abort_sleeper(&mut self) {
        if let Some(handle) = self.sleeper.take() {
            handle.abort();
        }
    }
}

/// Take the slot's event only if it was stored under `seq`.
fn take_matching<T>(slot: &mut Option<(u64, T)>, seq: u64) -> Option<T> {
    match slot.take() {
        Some((stored, event)) if stored == seq => Some(event),
        other => {
            *slot = other;
            None
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.sleeper.take() {
            handle.abort();
        }
    }
}
