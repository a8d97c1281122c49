//! ``src/controller/event_loop.rs``
//! ============================================================================
//! # Event Loop: terminal input, task results, due fetches and ticks
//!
//! [`EventLoop::next_action`] waits on every event source at once and turns
//! whatever arrives first into an [`Action`]. Key mapping depends on the
//! current focus and overlay, so it reads the state but never changes it.

use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, info, trace};

use crate::api::client::ApiError;
use crate::controller::actions::Action;
use crate::controller::mutations::MutationKind;
use crate::model::app_state::AppState;
use crate::model::filter::{FilterCriteria, FilterField};
use crate::model::job::JobPosting;
use crate::model::ui_state::{Focus, UIOverlay};
use crate::util::debounce::Debounced;

/// How often toasts are checked for expiry.
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Outcome of a background request.
#[derive(Debug)]
pub enum TaskResult {
    /// A list fetch finished. `generation` is the stamp it was issued with.
    JobsFetched {
        generation: u64,
        result: Result<Vec<JobPosting>, ApiError>,
    },

    /// A create, update or delete finished.
    MutationFinished {
        kind: MutationKind,
        result: Result<(), ApiError>,
    },
}

pub struct EventLoop {
    task_rx: mpsc::UnboundedReceiver<TaskResult>,
    due_rx: mpsc::UnboundedReceiver<Debounced<FilterCriteria>>,
    event_stream: EventStream,
    tick: Interval,
}

impl EventLoop {
    pub fn new(
        task_rx: mpsc::UnboundedReceiver<TaskResult>,
        due_rx: mpsc::UnboundedReceiver<Debounced<FilterCriteria>>,
    ) -> Self {
        info!("Initializing event loop");
        let mut tick = interval(TICK_INTERVAL);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            task_rx,
            due_rx,
            event_stream: EventStream::new(),
            tick,
        }
    }

    /// Wait for the next thing to react to. `None` once every source is
    /// closed.
    pub async fn next_action(&mut self, state: &AppState) -> Option<Action> {
        tokio::select! {
            Some(Ok(event)) = self.event_stream.next() => {
                trace!("Terminal event received: {:?}", event);
                Some(Self::handle_terminal_event(state, event))
            }

            Some(task_result) = self.task_rx.recv() => {
                debug!("Task result received: {:?}", task_result);
                Some(Action::TaskResult(task_result))
            }

            Some(due) = self.due_rx.recv() => {
                debug!(seq = due.seq, "Debounced fetch due");
                Some(Action::FetchDue(due))
            }

            _ = self.tick.tick() => Some(Action::Tick),

            else => {
                info!("Event loop terminated - no more events");
                None
            }
        }
    }

    fn handle_terminal_event(state: &AppState, event: TermEvent) -> Action {
        match event {
            TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                let action = key_to_action(state, key);
                trace!(code = ?key.code, ?action, "key mapped");
                action
            }
            TermEvent::Resize(w, h) => {
                info!("Terminal resize: {}x{}", w, h);
                Action::Resize(w, h)
            }
            _ => Action::NoOp,
        }
    }
}

/// Map a key press to an action given the current focus and overlay.
#[must_use]
pub fn key_to_action(state: &AppState, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match &state.ui.overlay {
        UIOverlay::Form(_) => form_keys(key, ctrl),
        UIOverlay::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y' | 'Y') => Action::ConfirmDelete,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Action::CancelDelete,
            _ => Action::NoOp,
        },
        UIOverlay::Details(_) => match key.code {
            KeyCode::Char('e') => Action::OpenEditForm,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::CloseOverlay,
            _ => Action::NoOp,
        },
        UIOverlay::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?') => Action::CloseOverlay,
            _ => Action::NoOp,
        },
        UIOverlay::None => match state.ui.focus {
            Focus::Filter(field) => filter_keys(field, key, ctrl),
            Focus::List => list_keys(state, key, ctrl),
        },
    }
}

fn global_ctrl_keys(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('t') => Some(Action::CycleJobType),
        KeyCode::Char('s') => Some(Action::CycleSort),
        KeyCode::Char('n') => Some(Action::OpenAddForm),
        KeyCode::Char('r') => Some(Action::Refresh),
        _ => None,
    }
}

fn form_keys(key: KeyEvent, ctrl: bool) -> Action {
    match key.code {
        KeyCode::Esc => Action::CloseOverlay,
        KeyCode::Enter => Action::SubmitForm,
        KeyCode::Tab | KeyCode::Down => Action::FormNextField,
        KeyCode::BackTab | KeyCode::Up => Action::FormPrevField,
        KeyCode::Backspace => Action::FormBackspace,
        KeyCode::Char(c) if !ctrl => Action::FormInput(c),
        _ => Action::NoOp,
    }
}

fn filter_keys(field: FilterField, key: KeyEvent, ctrl: bool) -> Action {
    if ctrl {
        return global_ctrl_keys(key.code).unwrap_or(Action::NoOp);
    }

    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Down => Action::FocusList,
        KeyCode::Tab => Action::FocusFilter(field.next()),
        KeyCode::Backspace => Action::FilterBackspace,
        KeyCode::Char(c) => Action::FilterInput(c),
        _ => Action::NoOp,
    }
}

fn list_keys(state: &AppState, key: KeyEvent, ctrl: bool) -> Action {
    if ctrl {
        return global_ctrl_keys(key.code).unwrap_or(Action::NoOp);
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Tab | KeyCode::Char('/') => Action::FocusFilter(FilterField::Search),
        KeyCode::Up | KeyCode::Char('k') => Action::MoveSelectionUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveSelectionDown,
        KeyCode::Enter => Action::OpenDetails,
        KeyCode::Char('a') => Action::OpenAddForm,
        KeyCode::Char('e') => Action::OpenEditForm,
        KeyCode::Char('d') => Action::RequestDelete,
        KeyCode::Char('m') => Action::ShowMore,
        KeyCode::Char('l') => Action::ShowLess,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Esc if state.ui.notification.is_some() => Action::DismissNotification,
        _ => Action::NoOp,
    }
}
