//! ``src/view/components/job_form_overlay.rs``
//! ============================================================================
//! # `JobFormOverlay`: add/edit form with per-field validation messages

use crate::{
    model::form::{FormField, JobForm},
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Rows per field: label + value, and one for a possible error.
const FIELD_HEIGHT: u16 = 3;

pub struct JobFormOverlay;

impl JobFormOverlay {
    #[allow(clippy::cast_possible_truncation)]
    pub fn render(frame: &mut Frame<'_>, form: &JobForm, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", form.title()))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme::PURPLE))
            .style(theme::panel_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> = FormField::ALL
            .iter()
            .map(|_| Constraint::Length(FIELD_HEIGHT))
            .collect();
        constraints.push(Constraint::Fill(1));
        constraints.push(Constraint::Length(1));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in FormField::ALL.iter().copied().enumerate() {
            let rect = rows[i];
            let focused = form.focus == field;

            let marker = if field.is_required() { " *" } else { "" };
            let label_style = if focused {
                Style::default().fg(theme::PURPLE).bold()
            } else {
                Style::default().fg(theme::COMMENT)
            };
            let value_style = if focused {
                theme::highlight_style().fg(theme::FOREGROUND)
            } else {
                Style::default().fg(theme::FOREGROUND)
            };

            let mut lines = vec![
                Line::from(Span::styled(format!("{}{marker}", field.label()), label_style)),
                Line::from(Span::styled(format!(" {} ", form.value(field)), value_style)),
            ];
            if let Some(err) = form.errors.get(field) {
                lines.push(Line::from(Span::styled(err, theme::error_style())));
            }
            frame.render_widget(Paragraph::new(lines), rect);

            if focused && !form.submitting {
                let x = rect.x + 1 + (form.value(field).chars().count() as u16).min(rect.width.saturating_sub(2));
                frame.set_cursor_position((x, rect.y + 1));
            }
        }

        let footer = if form.submitting {
            Line::from(Span::styled("Saving…", Style::default().fg(theme::YELLOW)))
        } else {
            Line::from(Span::styled(
                format!("Tab next field · Enter {} · Esc cancel", form.submit_label()),
                theme::hint_style(),
            ))
        };
        frame.render_widget(
            Paragraph::new(footer).alignment(Alignment::Center),
            rows[rows.len() - 1],
        );
    }
}
