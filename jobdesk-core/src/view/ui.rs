//! src/view/ui.rs
//! ============================================================
//! Frame renderer that draws the whole TUI from `AppState`.
//! Filter bar on top, results in the middle, status line at the
//! bottom; overlays and the toast are painted last.

use ratatui::prelude::*;
use tracing::instrument;

use crate::{
    model::{
        app_state::{AppState, FetchStatus},
        ui_state::UIOverlay,
    },
    view::components::{
        confirm_overlay::ConfirmDeleteOverlay, error_overlay::ErrorOverlay,
        filter_bar::OptimizedFilterBar, help_overlay::OptimizedHelpOverlay,
        job_details_overlay::JobDetailsOverlay, job_form_overlay::JobFormOverlay,
        job_table::OptimizedJobTable, loading_overlay::OptimizedLoadingOverlay,
        notification_overlay::OptimizedNotificationOverlay, status_bar::OptimizedStatusBar,
    },
};

pub struct UIRenderer {
    api_url: String,
    frame: u64,
}

impl UIRenderer {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            frame: 0,
        }
    }

    #[instrument(level = "trace", skip_all, fields(frame = self.frame))]
    pub fn render(&mut self, f: &mut Frame<'_>, state: &AppState) {
        let screen = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .split(screen);

        OptimizedFilterBar::new().render_filters(f, state, chunks[0]);
        self.draw_main(f, state, chunks[1]);
        OptimizedStatusBar::new().render_status(f, state, &self.api_url, chunks[2]);
        self.draw_overlays(f, state, screen);

        self.frame += 1;
    }

    fn draw_main(&self, f: &mut Frame<'_>, state: &AppState, area: Rect) {
        match &state.status {
            FetchStatus::Loading => OptimizedLoadingOverlay::new().render_loading(f, self.frame, area),
            FetchStatus::Failed(message) => ErrorOverlay::new(message.as_str()).render(f, area),
            FetchStatus::Idle => OptimizedJobTable::new().render_jobs(f, state, area),
        }
    }

    fn draw_overlays(&self, f: &mut Frame<'_>, state: &AppState, screen: Rect) {
        match &state.ui.overlay {
            UIOverlay::None => {}
            UIOverlay::Help => {
                OptimizedHelpOverlay::new().render_fast(f, centered_rect(70, 80, screen));
            }
            UIOverlay::Details(job) => {
                JobDetailsOverlay::new().render_details(f, job, centered_rect(60, 50, screen));
            }
            UIOverlay::Form(form) => {
                JobFormOverlay::render(f, form, centered_rect(60, 70, screen));
            }
            UIOverlay::ConfirmDelete { title, .. } => {
                ConfirmDeleteOverlay::render(f, title, centered_rect(50, 25, screen));
            }
        }

        if let Some(n) = &state.ui.notification {
            OptimizedNotificationOverlay::new().render_notification(f, n, notification_rect(screen));
        }
    }
}

/// Toast area in the top-right corner.
fn notification_rect(screen: Rect) -> Rect {
    let width = (screen.width / 3).clamp(24.min(screen.width), 48.min(screen.width));
    let height = 4.min(screen.height);
    Rect {
        x: screen.x + screen.width.saturating_sub(width),
        y: screen.y,
        width,
        height,
    }
}

/// A rectangle of `percent_x` × `percent_y` centered inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::job;
    use crate::api::client::ApiError;
    use crate::model::app_state::FETCH_ERROR_MESSAGE;
    use crate::view::components::job_table::EMPTY_MESSAGE;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut renderer = UIRenderer::new("http://127.0.0.1:5000/api");
        terminal.draw(|f| renderer.render(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_replaces_list() {
        let state = AppState::default();
        assert!(screen_text(&state).contains("Loading jobs"));
    }

    #[test]
    fn test_list_summary_and_pager() {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        let jobs = (1..=20).map(|i| job(i, &format!("Job {i}"))).collect();
        state.complete_fetch(ticket.generation, Ok(jobs));

        let text = screen_text(&state);
        assert!(text.contains("Showing 15 of 20 open positions"));
        assert!(text.contains("[m] Show More"));
        assert!(!text.contains("[l] Show Less"));
    }

    #[test]
    fn test_empty_and_error_states() {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(vec![]));
        assert!(screen_text(&state).contains(EMPTY_MESSAGE));

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Err(ApiError::Unavailable("down".into())));
        assert!(screen_text(&state).contains(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_delete_prompt_names_job() {
        let mut state = AppState::default();
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(vec![job(4, "Analyst")]));
        state.request_delete();
        assert!(screen_text(&state).contains("Delete \"Analyst\"?"));
    }
}
