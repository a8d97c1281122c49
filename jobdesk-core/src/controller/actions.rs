//! src/controller/actions.rs
//! ============================================================================
//! # Actions: every input the application reacts to
//!
//! Key presses are mapped to actions by the event loop; background task
//! results and due fetches arrive as actions too, so the dispatcher has a
//! single entry point.

use crate::controller::event_loop::TaskResult;
use crate::model::filter::{FilterCriteria, FilterField};
use crate::util::debounce::Debounced;

#[derive(Debug)]
pub enum Action {
    /// Cancel the add/edit form, close details or help.
    CloseOverlay,

    /// Cycle the job type filter.
    CycleJobType,

    /// Cycle the sort order.
    CycleSort,

    /// The user answered the delete prompt with yes.
    ConfirmDelete,

    /// The user answered the delete prompt with no.
    CancelDelete,

    DismissNotification,

    /// A debounced fetch became due.
    FetchDue(Debounced<FilterCriteria>),

    /// Remove the last character of the focused filter field.
    FilterBackspace,

    /// Type into the focused filter field.
    FilterInput(char),

    /// Move keyboard focus to a filter text field.
    FocusFilter(FilterField),

    /// Give keyboard focus back to the results list.
    FocusList,

    FormBackspace,

    FormInput(char),

    FormNextField,

    FormPrevField,

    MoveSelectionDown,

    MoveSelectionUp,

    /// Event consumed, nothing to change.
    NoOp,

    OpenAddForm,

    /// Show the selected job in the details overlay.
    OpenDetails,

    OpenEditForm,

    Quit,

    /// Fetch the list again with the current filters.
    Refresh,

    /// Ask for confirmation before deleting the selected job.
    RequestDelete,

    /// A terminal resize event.
    Resize(u16, u16),

    ShowLess,

    ShowMore,

    SubmitForm,

    /// A result from a background task.
    TaskResult(TaskResult),

    /// Periodic tick; expires toasts.
    Tick,

    ToggleHelp,
}
