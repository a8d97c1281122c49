//! ``src/controller/fetch_controller.rs``
//! ============================================================================
//! # Debounced Fetch Controller
//!
//! Filter edits go through [`FetchController::schedule`]; after the quiet
//! period the debouncer delivers a due event on its own receiver, which the
//! event loop turns into [`Action::FetchDue`](crate::controller::actions::Action::FetchDue).
//! The dispatcher then stamps a generation on [`AppState`](crate::model::app_state::AppState)
//! and calls [`FetchController::spawn_fetch`].

use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{Instrument, debug, info, info_span};

use crate::api::client::JobsApi;
use crate::controller::event_loop::TaskResult;
use crate::model::app_state::FetchTicket;
use crate::model::filter::FilterCriteria;
use crate::util::debounce::{DebounceConfig, Debounced, Debouncer};

pub struct FetchController {
    api: Arc<dyn JobsApi>,
    debouncer: Debouncer<FilterCriteria>,
    task_tx: UnboundedSender<TaskResult>,
}

impl FetchController {
    /// Returns the controller and the receiver of due fetches.
    pub fn new(
        api: Arc<dyn JobsApi>,
        debounce: DebounceConfig,
        task_tx: UnboundedSender<TaskResult>,
    ) -> (Self, UnboundedReceiver<Debounced<FilterCriteria>>) {
        let (debouncer, due_rx) = Debouncer::new(debounce);
        let controller = Self {
            api,
            debouncer,
            task_tx,
        };
        (controller, due_rx)
    }

    /// (Re)start the quiet period for `filters`. A pending fetch is
    /// cancelled.
    pub fn schedule(&mut self, filters: FilterCriteria) -> u64 {
        let seq = self.debouncer.submit(filters);
        debug!(
            marker = "FETCH_SCHEDULED",
            seq,
            delay_ms = self.debouncer.config().delay.as_millis() as u64,
            "fetch scheduled"
        );
        seq
    }

    /// False for a due event that was superseded after it was queued.
    #[must_use]
    pub const fn is_due(&self, seq: u64) -> bool {
        self.debouncer.is_current(seq)
    }

    pub fn cancel_scheduled(&mut self) {
        if self.debouncer.cancel() {
            debug!(marker = "FETCH_CANCELLED", "pending fetch cancelled");
        }
    }

    /// Issue the request for `ticket` on a background task. The result comes
    /// back as [`TaskResult::JobsFetched`] tagged with the ticket's generation.
    pub fn spawn_fetch(&self, ticket: FetchTicket) {
        let api = Arc::clone(&self.api);
        let task_tx = self.task_tx.clone();
        let FetchTicket {
            generation,
            filters,
        } = ticket;

        let span = info_span!("fetch", marker = "FETCH_TASK", generation);
        tokio::spawn(
            async move {
                info!(?filters, "fetching jobs");
                let result = api.list_jobs(&filters).await;
                let _ = task_tx.send(TaskResult::JobsFetched { generation, result });
            }
            .instrument(span),
        );
    }
}
