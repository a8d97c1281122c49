//! src/view/components/confirm_overlay.rs
use crate::view::theme;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Yes/no prompt shown before a job is deleted.
pub struct ConfirmDeleteOverlay;

impl ConfirmDeleteOverlay {
    pub fn render(frame: &mut Frame<'_>, title: &str, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Delete Job ")
            .title_alignment(Alignment::Center)
            .border_style(theme::error_style())
            .style(theme::panel_style());

        let text = Text::from(vec![
            Line::from(vec![
                Span::raw("Delete "),
                Span::styled(format!("\"{title}\""), Style::default().fg(theme::YELLOW).bold()),
                Span::raw("?"),
            ]),
            Line::default(),
            Line::from(vec![
                Span::styled("[y]", Style::default().fg(theme::RED).bold()),
                Span::raw(" delete   "),
                Span::styled("[n]", Style::default().fg(theme::GREEN).bold()),
                Span::raw(" cancel"),
            ]),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
