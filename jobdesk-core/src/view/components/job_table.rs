//! src/view/components/job_table.rs

use crate::{
    model::{app_state::AppState, job::JobPosting, ui_state::Focus},
    view::theme,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
};

/// Tags shown per row; the details overlay lists all of them.
const MAX_TAGS: usize = 4;

pub const EMPTY_MESSAGE: &str = "No jobs found matching your criteria.";

pub struct OptimizedJobTable;

impl OptimizedJobTable {
    pub fn new() -> Self {
        Self
    }

    pub fn render_jobs(&self, frame: &mut Frame<'_>, state: &AppState, area: Rect) {
        let store = &state.store;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", store.summary()))
            .title_style(Style::default().fg(theme::PURPLE).bold())
            .border_style(theme::border_style(state.ui.focus == Focus::List))
            .style(theme::panel_style());

        if store.is_empty() {
            let empty = Paragraph::new(EMPTY_MESSAGE)
                .style(Style::default().fg(theme::COMMENT))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Fill(1), Constraint::Length(1)])
            .split(inner);

        let header = Row::new(vec!["", "Title", "Company", "Location", "Posted", "Tags"])
            .style(Style::default().fg(theme::YELLOW).bold())
            .bottom_margin(1);

        let rows: Vec<Row> = store.visible_jobs().iter().map(Self::job_row).collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Fill(3),
        ];

        let mut table_state = TableState::default().with_selected(state.ui.selected);

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::highlight_style())
            .highlight_symbol("▶ ")
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, chunks[0], &mut table_state);
        frame.render_widget(Self::pager_line(state), chunks[1]);
    }

    fn job_row(job: &JobPosting) -> Row<'_> {
        let badge = if job.is_new() {
            Span::styled("New", theme::new_badge_style())
        } else {
            Span::styled(job.company_initials(), Style::default().fg(theme::PINK))
        };

        let tags: Vec<Span> = job
            .tag_list()
            .take(MAX_TAGS)
            .flat_map(|tag| [Span::styled(format!("#{tag}"), theme::tag_style()), Span::raw(" ")])
            .collect();

        Row::new(vec![
            Cell::from(badge),
            Cell::from(job.title.as_str()).style(Style::default().fg(theme::FOREGROUND).bold()),
            Cell::from(job.company.as_str()),
            Cell::from(job.location.as_str()),
            Cell::from(job.posting_date.as_str()).style(Style::default().fg(theme::COMMENT)),
            Cell::from(Line::from(tags)),
        ])
    }

    fn pager_line(state: &AppState) -> Paragraph<'static> {
        let mut spans = Vec::new();
        if state.store.can_show_more() {
            spans.push(Span::styled(" [m] Show More ", Style::default().fg(theme::CYAN)));
        }
        if state.store.can_show_less() {
            spans.push(Span::styled(" [l] Show Less ", Style::default().fg(theme::ORANGE)));
        }
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for OptimizedJobTable {
    fn default() -> Self {
        Self::new()
    }
}
