//! src/view/components/filter_bar.rs
//! Search, location, job type and sort controls above the job list.

use crate::{
    model::{
        app_state::AppState,
        filter::FilterField,
        ui_state::Focus,
    },
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub struct OptimizedFilterBar;

impl OptimizedFilterBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render_filters(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
                Constraint::Percentage(20),
            ])
            .split(area);

        let filters = &state.filters;
        let focused = match state.ui.focus {
            Focus::Filter(field) => Some(field),
            Focus::List => None,
        };

        self.render_text_field(
            frame,
            " Search (title, company, keyword) ",
            &filters.search,
            focused == Some(FilterField::Search),
            cols[0],
        );
        self.render_text_field(
            frame,
            " Location ",
            &filters.location,
            focused == Some(FilterField::Location),
            cols[1],
        );
        self.render_choice(frame, " Job Type ^T ", &filters.job_type, cols[2]);
        self.render_choice(frame, " Sort ^S ", filters.sort.label(), cols[3]);

        // cursor only when no modal is on top
        if let Some(field) = focused
            && !state.ui.overlay.is_open()
        {
            let rect = match field {
                FilterField::Search => cols[0],
                FilterField::Location => cols[1],
            };
            let text = filters.field(field);
            let x = rect.x + 1 + (text.chars().count() as u16).min(rect.width.saturating_sub(3));
            frame.set_cursor_position((x, rect.y + 1));
        }
    }

    fn render_text_field(
        &self,
        frame: &mut Frame<'_>,
        title: &str,
        value: &str,
        focused: bool,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme::border_style(focused))
            .style(theme::panel_style());

        let text = if value.is_empty() && !focused {
            Span::styled("…", theme::hint_style())
        } else {
            Span::raw(value)
        };
        frame.render_widget(Paragraph::new(text).block(block), area);
    }

    fn render_choice(&self, frame: &mut Frame<'_>, title: &str, value: &str, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme::border_style(false))
            .style(theme::panel_style());

        frame.render_widget(
            Paragraph::new(Span::styled(value, Style::default().fg(theme::YELLOW))).block(block),
            area,
        );
    }
}

impl Default for OptimizedFilterBar {
    fn default() -> Self {
        Self::new()
    }
}
