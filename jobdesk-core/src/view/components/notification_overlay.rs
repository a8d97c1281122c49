//! src/view/components/notification_overlay.rs
use crate::model::ui_state::{Notification, NotificationLevel};
use crate::view::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, instrument};

pub struct OptimizedNotificationOverlay;

impl OptimizedNotificationOverlay {
    pub fn new() -> Self {
        Self
    }

    #[instrument(
        level = "trace",
        skip_all,
        fields(marker = "NOTIFICATION_DISPLAYED", level = ?notification.level)
    )]
    pub fn render_notification(
        &self,
        frame: &mut Frame<'_>,
        notification: &Notification,
        area: Rect,
    ) {
        frame.render_widget(Clear, area);

        let (border_style, title, icon) = match notification.level {
            NotificationLevel::Error => (Style::default().fg(theme::RED), "Error", "✕"),
            NotificationLevel::Success => (Style::default().fg(theme::GREEN), "Success", "✓"),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {icon} {title} "))
            .title_style(border_style.bold())
            .border_style(border_style)
            .style(Style::default().bg(theme::BACKGROUND));

        let message = Paragraph::new(notification.message.as_str())
            .block(block)
            .style(Style::default().fg(theme::FOREGROUND))
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        frame.render_widget(message, area);

        if notification.level == NotificationLevel::Error {
            debug!(
                marker = "NOTIFICATION_ERROR",
                message = %notification.message,
                "Error notification displayed to user"
            );
        }
    }
}

impl Default for OptimizedNotificationOverlay {
    fn default() -> Self {
        Self::new()
    }
}
