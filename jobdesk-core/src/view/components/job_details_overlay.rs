//! src/view/components/job_details_overlay.rs
//! Full record of one posting, opened with Enter on the list.

use crate::{model::job::JobPosting, view::theme};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct JobDetailsOverlay;

impl JobDetailsOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render_details(&self, frame: &mut Frame<'_>, job: &JobPosting, area: Rect) {
        frame.render_widget(Clear, area);

        let label = |name: &'static str| Span::styled(format!("{name:<10}"), Style::default().fg(theme::COMMENT));
        let or_dash = |value: &str| if value.trim().is_empty() { "-".to_string() } else { value.to_string() };

        let mut tags: Vec<Span> = vec![label("Tags")];
        let mut any_tag = false;
        for tag in job.tag_list() {
            any_tag = true;
            tags.push(Span::styled(format!("#{tag} "), theme::tag_style()));
        }
        if !any_tag {
            tags.push(Span::raw("-"));
        }

        let mut title_line = vec![Span::styled(
            job.title.as_str(),
            Style::default().fg(theme::YELLOW).bold(),
        )];
        if job.is_new() {
            title_line.push(Span::raw("  "));
            title_line.push(Span::styled("New", theme::new_badge_style()));
        }

        let lines = vec![
            Line::from(title_line),
            Line::default(),
            Line::from(vec![label("Company"), Span::raw(job.company.as_str())]),
            Line::from(vec![label("Location"), Span::raw(job.location.as_str())]),
            Line::from(vec![label("Type"), Span::raw(or_dash(&job.job_type))]),
            Line::from(vec![label("Posted"), Span::raw(or_dash(&job.posting_date))]),
            Line::from(tags),
            Line::default(),
            Line::from(Span::styled("e edit · Esc close", theme::hint_style())),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", job.company_initials()))
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(theme::PURPLE))
            .style(theme::panel_style());

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

impl Default for JobDetailsOverlay {
    fn default() -> Self {
        Self::new()
    }
}
