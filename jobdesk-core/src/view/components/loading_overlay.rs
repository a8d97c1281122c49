//! src/view/components/loading_overlay.rs
//! Placeholder drawn in place of the job list while a fetch is outstanding.

use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct OptimizedLoadingOverlay;

impl OptimizedLoadingOverlay {
    pub fn new() -> Self {
        Self
    }

    /// `frame_count` advances the spinner.
    pub fn render_loading(&self, frame: &mut Frame<'_>, frame_count: u64, rect: Rect) {
        let spinner = SPINNER[(frame_count % SPINNER.len() as u64) as usize];

        let chrome = Block::default()
            .title(" Loading ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::PURPLE))
            .style(theme::panel_style());

        let text = Text::from(vec![
            Line::default(),
            Line::from(Span::styled(
                format!("{spinner} Loading jobs…"),
                Style::default()
                    .fg(theme::YELLOW)
                    .add_modifier(Modifier::BOLD),
            )),
        ]);

        frame.render_widget(
            Paragraph::new(text).block(chrome).alignment(Alignment::Center),
            rect,
        );
    }
}

impl Default for OptimizedLoadingOverlay {
    fn default() -> Self {
        Self::new()
    }
}
