//! src/view/components/status_bar.rs
//!
//! One-line footer: focus and filter summary on the left, fetch state and
//! the API endpoint on the right.

use crate::{
    model::{
        app_state::{AppState, FetchStatus},
        filter::FilterField,
        ui_state::Focus,
    },
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

pub struct OptimizedStatusBar;

impl OptimizedStatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render_status(&self, frame: &mut Frame<'_>, state: &AppState, api_url: &str, area: Rect) {
        let focus_str = match state.ui.focus {
            Focus::List => "List",
            Focus::Filter(FilterField::Search) => "Search",
            Focus::Filter(FilterField::Location) => "Location",
        };

        let left_text = format!(
            " {focus_str} | {} | {} | ? help",
            state.filters.job_type,
            state.filters.sort.label()
        );

        let (status, status_color) = match &state.status {
            FetchStatus::Loading => ("loading", theme::YELLOW),
            FetchStatus::Failed(_) => ("offline", theme::RED),
            FetchStatus::Idle => ("ready", theme::GREEN),
        };

        let right = Line::from(vec![
            Span::styled(status, Style::default().fg(status_color)),
            Span::raw(format!(" | {api_url} ")),
        ]);

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        Paragraph::new(left_text)
            .style(theme::panel_style())
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(right)
            .style(theme::panel_style())
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for OptimizedStatusBar {
    fn default() -> Self {
        Self::new()
    }
}
