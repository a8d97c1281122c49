//! src/view/components/error_overlay.rs
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Inline error shown instead of the job list after a failed fetch.
pub struct ErrorOverlay<'a> {
    message: &'a str,
}

impl<'a> ErrorOverlay<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(theme::error_style())
            .style(theme::panel_style());

        let text = Text::from(vec![
            Line::default(),
            Line::from(Span::styled(self.message, theme::error_style().bold())),
            Line::default(),
            Line::from(Span::styled("Press r to retry", theme::hint_style())),
        ]);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
