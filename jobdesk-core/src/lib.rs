pub mod error;

pub mod config;

pub mod api {
    pub mod client;
    pub use client::{ApiError, HttpJobsApi, JobsApi};

    #[cfg(test)]
    pub mod fake;
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod action_dispatcher;
    pub use action_dispatcher::ActionDispatcher;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};

    pub mod fetch_controller;
    pub use fetch_controller::FetchController;

    pub mod mutations;
    pub use mutations::{MutationCoordinator, MutationKind, MutationRequest};
}

pub mod model {
    pub mod app_state;
    pub use app_state::{AppState, Effect, FetchStatus};

    pub mod filter;
    pub use filter::{FilterCriteria, FilterField, SortOrder};

    pub mod form;
    pub use form::{FieldErrors, FormField, JobForm};

    pub mod job;
    pub use job::{JobDraft, JobId, JobPosting};

    pub mod job_store;
    pub use job_store::JobStore;

    pub mod ui_state;
    pub use ui_state::{Focus, Notification, NotificationLevel, RedrawFlag, UIOverlay, UIState};
}

pub mod view {
    pub mod theme;

    pub mod ui;
    pub use ui::UIRenderer;

    pub mod components {
        pub mod confirm_overlay;
        pub use confirm_overlay::ConfirmDeleteOverlay;
        pub mod error_overlay;
        pub use error_overlay::ErrorOverlay;
        pub mod filter_bar;
        pub use filter_bar::OptimizedFilterBar;
        pub mod help_overlay;
        pub use help_overlay::OptimizedHelpOverlay;
        pub mod job_details_overlay;
        pub use job_details_overlay::JobDetailsOverlay;
        pub mod job_form_overlay;
        pub use job_form_overlay::JobFormOverlay;
        pub mod job_table;
        pub use job_table::OptimizedJobTable;
        pub mod loading_overlay;
        pub use loading_overlay::OptimizedLoadingOverlay;
        pub mod notification_overlay;
        pub use notification_overlay::OptimizedNotificationOverlay;
        pub mod status_bar;
        pub use status_bar::OptimizedStatusBar;
    }
}

pub mod logging;
pub use logging::Logger;

pub mod util {
    pub mod debounce;
}

pub use error::AppError;

pub use model::{app_state::AppState, ui_state::UIState};
