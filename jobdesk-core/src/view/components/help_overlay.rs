//! Key reference, toggled with `?`
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub struct OptimizedHelpOverlay;

impl OptimizedHelpOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render_fast(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Clear, area);

        let help_paragraph = Paragraph::new(Text::from(Self::help_lines()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" jobdesk Help ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(theme::CYAN))
                    .style(Style::default().bg(theme::BACKGROUND)),
            )
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: false });

        frame.render_widget(help_paragraph, area);
    }

    fn section(title: &'static str) -> Line<'static> {
        Line::from(Span::styled(title, Style::default().fg(theme::CYAN)))
    }

    fn help_lines() -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                "Job Board",
                Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Self::section("Results list:"),
            Line::from("  ↑↓ / k j       Move selection"),
            Line::from("  Enter          Show job details"),
            Line::from("  a / Ctrl+N     Add a new job"),
            Line::from("  e              Edit selected job"),
            Line::from("  d              Delete selected job (asks first)"),
            Line::from("  m / l          Show more / show less"),
            Line::from("  r / Ctrl+R     Refresh"),
            Line::from(""),
            Self::section("Filters:"),
            Line::from("  Tab or /       Focus search, Tab again for location"),
            Line::from("  Esc / Enter    Back to the list"),
            Line::from("  Ctrl+T         Cycle job type"),
            Line::from("  Ctrl+S         Cycle sort order"),
            Line::from(""),
            Self::section("Form:"),
            Line::from("  Tab / Shift+Tab  Next / previous field"),
            Line::from("  Enter          Save"),
            Line::from("  Esc            Cancel"),
            Line::from(""),
            Self::section("Application:"),
            Line::from("  ?              Toggle this help"),
            Line::from("  q / Ctrl+C     Quit"),
        ]
    }
}

impl Default for OptimizedHelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
