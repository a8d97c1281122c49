//! ActionDispatcher: applies actions to [`AppState`] and performs the
//! effects the state transitions ask for.
//!
//! The dispatcher is the only place where state transitions meet I/O:
//! debounced fetches go to the [`FetchController`], mutations to the
//! [`MutationCoordinator`].

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::controller::actions::Action;
use crate::controller::event_loop::TaskResult;
use crate::controller::fetch_controller::FetchController;
use crate::controller::mutations::MutationCoordinator;
use crate::model::app_state::{AppState, Effect};
use crate::model::filter::FilterField;
use crate::model::ui_state::{Focus, RedrawFlag};

pub struct ActionDispatcher {
    pub state: AppState,
    fetch: FetchController,
    mutations: MutationCoordinator,
}

impl ActionDispatcher {
    pub fn new(state: AppState, fetch: FetchController, mutations: MutationCoordinator) -> Self {
        Self {
            state,
            fetch,
            mutations,
        }
    }

    /// Schedule the initial load. It waits out the same quiet period as a
    /// filter edit.
    pub fn start(&mut self) {
        info!(marker = "APP_START", "scheduling initial job fetch");
        let filters = self.state.filters.clone();
        self.fetch.schedule(filters);
    }

    /// Apply one action. Returns `false` when the application should quit.
    pub fn handle(&mut self, action: Action) -> bool {
        let effect = match action {
            Action::Quit => return false,

            Action::NoOp => None,

            Action::Tick => {
                self.state.ui.update_notification(Instant::now());
                if self.state.is_loading() {
                    // spinner
                    self.state.ui.request_redraw(RedrawFlag::Main);
                }
                None
            }

            Action::Resize(..) => {
                self.state.ui.request_redraw(RedrawFlag::All);
                None
            }

            Action::FilterInput(ch) => self.focused_filter().and_then(|field| {
                self.state.filter_insert_char(field, ch)
            }),

            Action::FilterBackspace => self
                .focused_filter()
                .and_then(|field| self.state.filter_delete_char(field)),

            Action::FocusFilter(field) => {
                self.state.set_focus(Focus::Filter(field));
                None
            }

            Action::FocusList => {
                self.state.set_focus(Focus::List);
                None
            }

            Action::CycleJobType => self.state.cycle_job_type(),

            Action::CycleSort => self.state.cycle_sort(),

            Action::Refresh => Some(Effect::FetchNow),

            Action::FetchDue(due) => {
                if self.fetch.is_due(due.seq) {
                    Some(Effect::FetchNow)
                } else {
                    debug!(seq = due.seq, "ignoring superseded fetch");
                    None
                }
            }

            Action::TaskResult(TaskResult::JobsFetched { generation, result }) => {
                self.state.complete_fetch(generation, result);
                None
            }

            Action::TaskResult(TaskResult::MutationFinished { kind, result }) => {
                self.state.complete_mutation(kind, result)
            }

            Action::MoveSelectionUp => {
                self.state.move_selection_up();
                None
            }

            Action::MoveSelectionDown => {
                self.state.move_selection_down();
                None
            }

            Action::ShowMore => {
                self.state.show_more();
                None
            }

            Action::ShowLess => {
                self.state.show_less();
                None
            }

            Action::OpenDetails => {
                self.state.open_details();
                None
            }

            Action::OpenAddForm => {
                self.state.open_add_form();
                None
            }

            Action::OpenEditForm => {
                self.state.open_edit_form();
                None
            }

            Action::ToggleHelp => {
                self.state.toggle_help();
                None
            }

            Action::CloseOverlay => {
                self.state.close_overlay();
                None
            }

            Action::FormInput(ch) => {
                if let Some(form) = self.state.ui.form_mut()
                    && !form.submitting
                {
                    form.insert_char(ch);
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
                None
            }

            Action::FormBackspace => {
                if let Some(form) = self.state.ui.form_mut()
                    && !form.submitting
                    && form.delete_char_before()
                {
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
                None
            }

            Action::FormNextField => {
                if let Some(form) = self.state.ui.form_mut() {
                    form.focus_next();
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
                None
            }

            Action::FormPrevField => {
                if let Some(form) = self.state.ui.form_mut() {
                    form.focus_prev();
                    self.state.ui.request_redraw(RedrawFlag::Overlay);
                }
                None
            }

            Action::SubmitForm => match self.state.submit_form() {
                Ok(effect) => effect,
                Err(e) => {
                    debug!(error = %e, "form rejected");
                    None
                }
            },

            Action::RequestDelete => {
                self.state.request_delete();
                None
            }

            Action::ConfirmDelete => self.state.confirm_delete(),

            Action::CancelDelete => {
                self.state.cancel_delete();
                None
            }

            Action::DismissNotification => {
                self.state.ui.dismiss_notification();
                None
            }
        };

        if let Some(effect) = effect {
            self.run_effect(effect);
        }
        true
    }

    fn focused_filter(&self) -> Option<FilterField> {
        match self.state.ui.focus {
            Focus::Filter(field) => Some(field),
            Focus::List => None,
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleFetch(filters) => {
                self.fetch.schedule(filters);
            }

            Effect::FetchNow => {
                // a pending debounced fetch would only repeat this one
                self.fetch.cancel_scheduled();
                let ticket = self.state.begin_fetch();
                self.fetch.spawn_fetch(ticket);
            }

            Effect::Mutate(request) => {
                let kind = request.kind();
                if let Err(e) = self.mutations.submit(request) {
                    warn!(marker = "MUTATION_REJECTED", ?kind, error = %e, "mutation not sent");
                    if let Some(form) = self.state.ui.form_mut() {
                        form.submitting = false;
                    }
                    self.state.ui.show_error(kind.failure_message());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeJobsApi, job};
    use crate::model::app_state::FETCH_ERROR_MESSAGE;
    use crate::model::filter::FilterCriteria;
    use crate::model::job::JobPosting;
    use crate::util::debounce::{DebounceConfig, Debounced};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Harness {
        dispatcher: ActionDispatcher,
        api: Arc<FakeJobsApi>,
        task_rx: UnboundedReceiver<TaskResult>,
        due_rx: UnboundedReceiver<Debounced<FilterCriteria>>,
    }

    impl Harness {
        fn new(jobs: Vec<JobPosting>) -> Self {
            let api = Arc::new(FakeJobsApi::with_jobs(jobs));
            let (task_tx, task_rx) = mpsc::unbounded_channel();
            let (fetch, due_rx) = FetchController::new(
                api.clone(),
                DebounceConfig::with_delay(Duration::from_millis(500)),
                task_tx.clone(),
            );
            let mutations = MutationCoordinator::new(api.clone(), task_tx);
            let dispatcher = ActionDispatcher::new(AppState::default(), fetch, mutations);
            Self {
                dispatcher,
                api,
                task_rx,
                due_rx,
            }
        }

        /// Feed the next background event back into the dispatcher.
        async fn pump(&mut self) {
            let action = tokio::select! {
                Some(r) = self.task_rx.recv() => Action::TaskResult(r),
                Some(d) = self.due_rx.recv() => Action::FetchDue(d),
            };
            assert!(self.dispatcher.handle(action));
        }

        fn state(&self) -> &AppState {
            &self.dispatcher.state
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_startup_loads_jobs_after_quiet_period() {
        let mut h = Harness::new((1..=20).map(|i| job(i, &format!("Job {i}"))).collect());
        h.dispatcher.start();
        assert!(h.state().is_loading());

        h.pump().await; // due
        h.pump().await; // fetched

        assert!(!h.state().is_loading());
        assert_eq!(h.state().store.len(), 20);
        assert_eq!(h.state().store.summary(), "Showing 15 of 20 open positions");
        assert_eq!(h.api.calls(), ["list sort=date_desc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_in_search_fetches_once() {
        let mut h = Harness::new(vec![job(1, "Data Analyst"), job(2, "Engineer")]);
        h.dispatcher.handle(Action::FocusFilter(FilterField::Search));
        for ch in "analyst".chars() {
            h.dispatcher.handle(Action::FilterInput(ch));
        }

        h.pump().await;
        h.pump().await;

        assert_eq!(h.api.calls(), ["list search=analyst&sort=date_desc"]);
        assert_eq!(h.state().store.visible_jobs()[0].title, "Data Analyst");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_shows_inline_error() {
        let mut h = Harness::new(vec![job(1, "Analyst")]);
        h.api.fail_lists(true);
        h.dispatcher.handle(Action::Refresh);
        h.pump().await;

        assert_eq!(h.state().error(), Some(FETCH_ERROR_MESSAGE));
        assert!(h.state().ui.notification.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_job_refetches_and_toasts() {
        let mut h = Harness::new(vec![job(1, "Analyst")]);
        h.dispatcher.handle(Action::Refresh);
        h.pump().await;

        h.dispatcher.handle(Action::OpenAddForm);
        for ch in "Dev".chars() {
            h.dispatcher.handle(Action::FormInput(ch));
        }
        h.dispatcher.handle(Action::FormNextField);
        for ch in "Initech".chars() {
            h.dispatcher.handle(Action::FormInput(ch));
        }
        h.dispatcher.handle(Action::FormNextField);
        for ch in "Austin".chars() {
            h.dispatcher.handle(Action::FormInput(ch));
        }
        h.dispatcher.handle(Action::SubmitForm);

        h.pump().await; // mutation finished
        assert!(h.state().ui.form().is_none());
        assert_eq!(
            h.state().ui.notification.as_ref().unwrap().message,
            "Job added successfully!"
        );

        h.pump().await; // refetch
        assert_eq!(h.state().store.len(), 2);
        assert_eq!(
            h.api.calls(),
            ["list sort=date_desc", "create Dev", "list sort=date_desc"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_job_refetches_and_toasts() {
        let mut h = Harness::new(vec![job(1, "Analyst"), job(2, "Engineer")]);
        h.dispatcher.handle(Action::Refresh);
        h.pump().await;

        h.dispatcher.handle(Action::OpenEditForm);
        for ch in " II".chars() {
            h.dispatcher.handle(Action::FormInput(ch));
        }
        h.dispatcher.handle(Action::SubmitForm);
        assert!(h.state().ui.form().unwrap().submitting);

        h.pump().await; // mutation finished
        assert!(h.state().ui.form().is_none());
        assert_eq!(
            h.state().ui.notification.as_ref().unwrap().message,
            "Job updated successfully!"
        );
        assert!(h.state().is_loading());

        h.pump().await; // refetch
        assert_eq!(h.state().store.visible_jobs()[0].title, "Analyst II");
        assert_eq!(
            h.api.calls(),
            ["list sort=date_desc", "update 1", "list sort=date_desc"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_sends_nothing() {
        let mut h = Harness::new(vec![]);
        h.dispatcher.handle(Action::OpenAddForm);
        h.dispatcher.handle(Action::FormInput('x'));
        h.dispatcher.handle(Action::SubmitForm);

        let form = h.state().ui.form().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.errors.len(), 2);

        tokio::task::yield_now().await;
        assert!(h.api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delete_leaves_list_alone() {
        let mut h = Harness::new(vec![job(1, "Analyst"), job(2, "Engineer")]);
        h.dispatcher.handle(Action::Refresh);
        h.pump().await;

        h.api.fail_mutations(true);
        h.dispatcher.handle(Action::RequestDelete);
        h.dispatcher.handle(Action::ConfirmDelete);
        h.pump().await;

        assert_eq!(h.state().store.len(), 2);
        assert!(h.state().error().is_none());
        assert_eq!(
            h.state().ui.notification.as_ref().unwrap().message,
            "Failed to delete job."
        );
        assert_eq!(h.api.calls(), ["list sort=date_desc", "delete 1"]);
    }

    #[tokio::test]
    async fn test_quit_stops_dispatch() {
        let mut h = Harness::new(vec![]);
        assert!(h.dispatcher.handle(Action::Tick));
        assert!(!h.dispatcher.handle(Action::Quit));
    }
}
