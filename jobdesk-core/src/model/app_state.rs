//! ``src/model/app_state.rs``
//! ============================================================================
//! # `AppState`: the client's single state container
//!
//! Holds filters, the fetched job collection, the fetch status and the UI
//! state. Transitions mutate the container and hand back the side effect the
//! caller has to perform; nothing in here touches the network or a timer.
//!
//! Fetch ordering: every fetch is stamped with a generation from
//! [`AppState::begin_fetch`]. Only the completion carrying the latest
//! generation is applied; anything older is dropped.

use compact_str::CompactString;
use tracing::{debug, info, warn};

use crate::api::client::ApiError;
use crate::controller::mutations::{MutationKind, MutationRequest};
use crate::error::AppError;
use crate::model::filter::{FilterCriteria, FilterField};
use crate::model::form::JobForm;
use crate::model::job::{JobId, JobPosting};
use crate::model::job_store::JobStore;
use crate::model::ui_state::{Focus, RedrawFlag, UIOverlay, UIState};

/// Inline message shown in place of the list after a failed fetch.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch jobs. Is the backend server running?";

/// Where the current fetch cycle stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Failed(CompactString),
}

/// Side effect requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Filters changed: fetch after the quiet period.
    ScheduleFetch(FilterCriteria),
    /// Fetch right away, bypassing the debounce.
    FetchNow,
    /// Send a create/update/delete to the server.
    Mutate(MutationRequest),
}

/// A fetch that has been started and is waiting for its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub filters: FilterCriteria,
}

/// Proof that the user confirmed a delete. Only
/// [`AppState::confirm_delete`] hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: JobId,
}

impl ConfirmedDelete {
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub filters: FilterCriteria,
    pub store: JobStore,
    pub status: FetchStatus,
    pub ui: UIState,
    latest_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(JobStore::default(), UIState::default())
    }
}

impl AppState {
    /// Starts in `Loading`: the first fetch is issued on startup.
    #[must_use]
    pub fn new(store: JobStore, ui: UIState) -> Self {
        Self {
            filters: FilterCriteria::default(),
            store,
            status: FetchStatus::Loading,
            ui,
            latest_generation: 0,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// The list is on screen only between a successful fetch and the next
    /// one. Loading and the error panel both hide it.
    #[must_use]
    pub fn list_visible(&self) -> bool {
        self.status == FetchStatus::Idle
    }

    #[must_use]
    pub const fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /* ------------------------------ filters ------------------------------ */

    /// Replace the filters wholesale. Unchanged filters schedule nothing.
    pub fn set_filters(&mut self, filters: FilterCriteria) -> Option<Effect> {
        if filters == self.filters {
            return None;
        }

        debug!(?filters, "filters changed");
        self.filters = filters;
        self.ui.request_redraw(RedrawFlag::All);
        Some(Effect::ScheduleFetch(self.filters.clone()))
    }

    pub fn filter_insert_char(&mut self, field: FilterField, ch: char) -> Option<Effect> {
        let mut next = self.filters.clone();
        next.field_mut(field).push(ch);
        self.set_filters(next)
    }

    pub fn filter_delete_char(&mut self, field: FilterField) -> Option<Effect> {
        let mut next = self.filters.clone();
        next.field_mut(field).pop()?;
        self.set_filters(next)
    }

    pub fn cycle_job_type(&mut self) -> Option<Effect> {
        let next = self.filters.with_next_job_type();
        self.set_filters(next)
    }

    pub fn cycle_sort(&mut self) -> Option<Effect> {
        let next = self.filters.with_next_sort();
        self.set_filters(next)
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.ui.focus = focus;
        self.ui.request_redraw(RedrawFlag::All);
    }

    /* ------------------------------ fetching ----------------------------- */

    /// Mark a new fetch as started and stamp it with the next generation.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_generation += 1;
        self.status = FetchStatus::Loading;
        self.ui.request_redraw(RedrawFlag::All);

        FetchTicket {
            generation: self.latest_generation,
            filters: self.filters.clone(),
        }
    }

    /// Apply a fetch result. Returns false when the result was stale and
    /// discarded.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<JobPosting>, ApiError>,
    ) -> bool {
        if generation != self.latest_generation {
            debug!(
                marker = "FETCH_STALE",
                generation,
                latest = self.latest_generation,
                "discarding stale fetch result"
            );
            return false;
        }

        match result {
            Ok(jobs) => {
                info!(marker = "FETCH_OK", generation, count = jobs.len(), "job list replaced");
                self.store.replace(jobs);
                self.status = FetchStatus::Idle;
                let rows = self.store.shown_count();
                self.ui.scroll_to_top(rows);
            }
            Err(err) => {
                warn!(marker = "FETCH_FAILED", generation, error = %err, "job list fetch failed");
                self.status = FetchStatus::Failed(FETCH_ERROR_MESSAGE.into());
            }
        }

        self.ui.request_redraw(RedrawFlag::All);
        true
    }

    /* ----------------------------- pagination ---------------------------- */

    pub fn show_more(&mut self) {
        if self.list_visible() && self.store.can_show_more() {
            self.store.show_more();
            self.ui.request_redraw(RedrawFlag::Main);
        }
    }

    /// Collapse to one page and jump back to the top of the results.
    pub fn show_less(&mut self) {
        if self.list_visible() && self.store.can_show_less() {
            self.store.show_less();
            let rows = self.store.shown_count();
            self.ui.scroll_to_top(rows);
        }
    }

    pub fn move_selection_up(&mut self) {
        self.ui.move_selection_up();
    }

    pub fn move_selection_down(&mut self) {
        let rows = self.store.shown_count();
        self.ui.move_selection_down(rows);
    }

    /// `None` while the list is hidden behind the spinner or error panel.
    #[must_use]
    pub fn selected_job(&self) -> Option<&JobPosting> {
        if !self.list_visible() {
            return None;
        }
        self.ui.selected.and_then(|idx| self.store.get(idx))
    }

    /* ------------------------------ overlays ----------------------------- */

    pub fn open_details(&mut self) {
        if let Some(job) = self.selected_job().cloned() {
            self.ui.set_overlay(UIOverlay::Details(Box::new(job)));
        }
    }

    pub fn open_add_form(&mut self) {
        self.ui.set_overlay(UIOverlay::Form(Box::new(JobForm::for_new())));
    }

    pub fn open_edit_form(&mut self) {
        if let Some(job) = self.selected_job() {
            let form = JobForm::for_edit(job);
            self.ui.set_overlay(UIOverlay::Form(Box::new(form)));
        }
    }

    pub fn toggle_help(&mut self) {
        if self.ui.overlay == UIOverlay::Help {
            self.ui.close_overlay();
        } else {
            self.ui.set_overlay(UIOverlay::Help);
        }
    }

    /// Close whatever overlay is open. A form with a save in flight stays
    /// open until the save resolves.
    pub fn close_overlay(&mut self) {
        if self.ui.form().is_some_and(|f| f.submitting) {
            return;
        }
        self.ui.close_overlay();
    }

    /* ------------------------------ mutations ---------------------------- */

    /// Validate the open form and turn it into a create or update request.
    ///
    /// Returns `Ok(None)` when no form is open or a save is already in
    /// flight. Missing required fields stay on the form as field errors.
    pub fn submit_form(&mut self) -> Result<Option<Effect>, AppError> {
        let Some(form) = self.ui.form_mut() else {
            return Ok(None);
        };
        if form.submitting {
            return Ok(None);
        }

        if !form.validate() {
            let fields = form.errors.clone();
            self.ui.request_redraw(RedrawFlag::Overlay);
            return Err(AppError::validation(fields));
        }

        form.submitting = true;
        let request = match form.editing {
            Some(id) => MutationRequest::Update(id, form.draft.clone()),
            None => MutationRequest::Create(form.draft.clone()),
        };
        self.ui.request_redraw(RedrawFlag::Overlay);

        Ok(Some(Effect::Mutate(request)))
    }

    /// Ask the user to confirm deleting the selected job.
    pub fn request_delete(&mut self) {
        if let Some(job) = self.selected_job() {
            let overlay = UIOverlay::ConfirmDelete {
                id: job.id,
                title: job.title.as_str().into(),
            };
            self.ui.set_overlay(overlay);
        }
    }

    /// The user confirmed: close the prompt and emit the delete.
    pub fn confirm_delete(&mut self) -> Option<Effect> {
        let UIOverlay::ConfirmDelete { id, .. } = self.ui.overlay else {
            return None;
        };

        self.ui.close_overlay();
        Some(Effect::Mutate(MutationRequest::Delete(ConfirmedDelete { id })))
    }

    pub fn cancel_delete(&mut self) {
        if matches!(self.ui.overlay, UIOverlay::ConfirmDelete { .. }) {
            self.ui.close_overlay();
        }
    }

    /// Record the outcome of a mutation. A success asks for an immediate
    /// refetch; the add/edit form closes either way.
    pub fn complete_mutation(
        &mut self,
        kind: MutationKind,
        result: Result<(), ApiError>,
    ) -> Option<Effect> {
        if kind.closes_form() && self.ui.form().is_some() {
            self.ui.close_overlay();
        }

        match result {
            Ok(()) => {
                info!(marker = "MUTATION_OK", ?kind, "mutation succeeded");
                self.ui.show_success(kind.success_message());
                Some(Effect::FetchNow)
            }
            Err(err) => {
                warn!(marker = "MUTATION_FAILED", ?kind, error = %err, "mutation failed");
                self.ui.show_error(kind.failure_message());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form::FormField;
    use crate::model::job::JobDraft;

    fn job(id: JobId, title: &str) -> JobPosting {
        JobPosting {
            id,
            title: title.into(),
            company: "Acme".into(),
            location: "Remote".into(),
            job_type: "Contract".into(),
            tags: String::new(),
            posting_date: "1d ago".into(),
        }
    }

    fn loaded(n: usize) -> AppState {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        let jobs = (0..n).map(|i| job(i as JobId, &format!("Job {i}"))).collect();
        assert!(state.complete_fetch(ticket.generation, Ok(jobs)));
        state
    }

    fn unavailable() -> ApiError {
        ApiError::Unavailable("connection refused".into())
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = AppState::default();
        assert!(state.is_loading());
        assert_eq!(state.filters, FilterCriteria::default());
        assert_eq!(state.latest_generation(), 0);
    }

    #[test]
    fn test_filter_edit_schedules_fetch_with_new_filters() {
        let mut state = AppState::default();
        let filters = match state.filter_insert_char(FilterField::Search, 'a') {
            Some(Effect::ScheduleFetch(filters)) => filters,
            other => panic!("expected a scheduled fetch, got {other:?}"),
        };
        assert_eq!(filters.search, "a");

        // same filters again: nothing to do
        assert_eq!(state.set_filters(filters), None);
        // deleting from an empty location is a no-op
        assert_eq!(state.filter_delete_char(FilterField::Location), None);
    }

    #[test]
    fn test_newer_fetch_wins_over_late_older_result() {
        let mut state = AppState::default();
        let a = state.begin_fetch();
        let b = state.begin_fetch();

        assert!(state.complete_fetch(b.generation, Ok(vec![job(2, "B")])));
        assert!(!state.is_loading());

        assert!(!state.complete_fetch(a.generation, Ok(vec![job(1, "A")])));
        assert_eq!(state.store.visible_jobs()[0].title, "B");
    }

    #[test]
    fn test_stale_result_does_not_clear_loading() {
        let mut state = AppState::default();
        let a = state.begin_fetch();
        let _b = state.begin_fetch();

        assert!(!state.complete_fetch(a.generation, Err(unavailable())));
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_failed_fetch_keeps_collection_and_sets_error() {
        let mut state = loaded(3);
        let ticket = state.begin_fetch();
        assert!(state.complete_fetch(ticket.generation, Err(unavailable())));

        assert_eq!(state.error(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(state.store.len(), 3);

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(vec![]));
        assert!(state.error().is_none());
    }

    #[test]
    fn test_successful_fetch_resets_cursor() {
        let mut state = loaded(40);
        state.show_more();
        assert_eq!(state.store.visible_count(), 30);

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok((0..40).map(|i| job(i, "x")).collect()));
        assert_eq!(state.store.visible_count(), 15);
        assert_eq!(state.ui.selected, Some(0));
    }

    #[test]
    fn test_show_less_scrolls_to_top() {
        let mut state = loaded(40);
        state.show_more();
        for _ in 0..20 {
            state.move_selection_down();
        }
        assert_eq!(state.ui.selected, Some(20));

        state.show_less();
        assert_eq!(state.store.visible_count(), 15);
        assert_eq!(state.ui.selected, Some(0));
    }

    #[test]
    fn test_submit_form_missing_company_is_rejected() {
        let mut state = loaded(1);
        state.open_add_form();
        {
            let form = state.ui.form_mut().unwrap();
            form.draft = JobDraft {
                title: "Analyst".into(),
                location: "NYC".into(),
                ..JobDraft::default()
            };
        }

        let err = state.submit_form().unwrap_err();
        let AppError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.get(FormField::Company), Some("Company is required."));

        let form = state.ui.form().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.focus, FormField::Company);
    }

    #[test]
    fn test_submit_edit_form_builds_update() {
        let mut state = loaded(2);
        state.move_selection_down();
        state.open_edit_form();

        let (id, draft) = match state.submit_form().unwrap() {
            Some(Effect::Mutate(MutationRequest::Update(id, draft))) => (id, draft),
            other => panic!("expected update, got {other:?}"),
        };
        assert_eq!(id, 1);
        assert_eq!(draft.title, "Job 1");

        // second submit while in flight does nothing; escape is ignored too
        assert_eq!(state.submit_form().unwrap(), None);
        state.close_overlay();
        assert!(state.ui.form().is_some());
    }

    #[test]
    fn test_mutation_outcome_closes_form_and_notifies() {
        let mut state = loaded(1);
        state.open_add_form();

        let effect = state.complete_mutation(MutationKind::Create, Err(unavailable()));
        assert_eq!(effect, None);
        assert!(state.ui.form().is_none());
        let note = state.ui.notification.as_ref().unwrap();
        assert_eq!(note.message, "Failed to save job.");

        state.open_add_form();
        let effect = state.complete_mutation(MutationKind::Create, Ok(()));
        assert_eq!(effect, Some(Effect::FetchNow));
        assert!(state.ui.form().is_none());
        assert_eq!(
            state.ui.notification.as_ref().unwrap().message,
            "Job added successfully!"
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = loaded(2);
        assert_eq!(state.confirm_delete(), None);

        state.request_delete();
        state.cancel_delete();
        assert_eq!(state.confirm_delete(), None);

        state.request_delete();
        let Some(Effect::Mutate(MutationRequest::Delete(confirmed))) = state.confirm_delete()
        else {
            panic!("expected confirmed delete");
        };
        assert_eq!(confirmed.id(), 0);
        assert!(!state.ui.overlay.is_open());
    }

    #[test]
    fn test_details_and_edit_need_a_selection() {
        let mut state = AppState::default();
        state.open_details();
        state.open_edit_form();
        state.request_delete();
        assert!(!state.ui.overlay.is_open());

        let mut state = loaded(1);
        state.open_details();
        assert!(matches!(state.ui.overlay, UIOverlay::Details(_)));
    }

    #[test]
    fn test_hidden_list_ignores_row_commands_while_loading() {
        let mut state = loaded(40);
        state.begin_fetch();
        assert!(state.selected_job().is_none());

        state.open_edit_form();
        state.open_details();
        state.request_delete();
        assert!(!state.ui.overlay.is_open());

        state.show_more();
        assert_eq!(state.store.visible_count(), 15);
    }

    #[test]
    fn test_hidden_list_ignores_row_commands_after_failure() {
        let mut state = loaded(40);
        state.show_more();
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Err(unavailable()));

        state.request_delete();
        assert_eq!(state.confirm_delete(), None);

        state.show_less();
        assert_eq!(state.store.visible_count(), 30);

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(vec![job(7, "Back")]));
        assert_eq!(state.selected_job().map(|j| j.id), Some(7));
    }
}
