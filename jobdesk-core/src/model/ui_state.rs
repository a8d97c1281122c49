//! UI state: focus, overlays, list selection and toast notifications

use std::time::{Duration, Instant};

use compact_str::CompactString;

use crate::model::filter::FilterField;
use crate::model::form::JobForm;
use crate::model::job::{JobId, JobPosting};

/// Redraw flags, combined into a bit set on [`UIState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Main = 1,
    StatusBar = 2,
    Overlay = 4,
    Notification = 8,
    All = 15,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Which part of the screen receives typed keys when no overlay is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Filter(FilterField),
}

/// Modal overlays. At most one is open at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UIOverlay {
    #[default]
    None,
    Help,
    Details(Box<JobPosting>),
    Form(Box<JobForm>),
    ConfirmDelete { id: JobId, title: CompactString },
}

impl UIOverlay {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Success = 0,
    Error = 1,
}

/// Toast with its creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss: Option<Duration>,
}

impl Notification {
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.auto_dismiss
            .is_some_and(|ttl| now.saturating_duration_since(self.timestamp) >= ttl)
    }
}

#[derive(Debug, Clone)]
pub struct UIState {
    pub redraw_flags: u8,
    pub focus: Focus,
    pub overlay: UIOverlay,

    /// Selected row within the visible prefix of the job list.
    pub selected: Option<usize>,

    pub notification: Option<Notification>,
    pub success_ttl: Duration,
    pub error_ttl: Duration,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(Duration::from_secs(3), Duration::from_secs(3))
    }
}

impl UIState {
    #[must_use]
    pub fn new(success_ttl: Duration, error_ttl: Duration) -> Self {
        Self {
            redraw_flags: RedrawFlag::All.bits(),
            focus: Focus::List,
            overlay: UIOverlay::None,
            selected: None,
            notification: None,
            success_ttl,
            error_ttl,
        }
    }

    #[inline]
    pub fn request_redraw(&mut self, flag: RedrawFlag) {
        self.redraw_flags |= flag.bits();
    }

    #[inline]
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        self.redraw_flags != 0
    }

    #[inline]
    pub fn clear_redraw(&mut self) {
        self.redraw_flags = 0;
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss: Option<Duration>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss,
        });
        self.request_redraw(RedrawFlag::Notification);
    }

    #[inline]
    pub fn show_success(&mut self, message: impl Into<CompactString>) {
        let ttl = self.success_ttl;
        self.show_notification(message, NotificationLevel::Success, Some(ttl));
    }

    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        let ttl = self.error_ttl;
        self.show_notification(message, NotificationLevel::Error, Some(ttl));
    }

    pub fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.request_redraw(RedrawFlag::All);
        }
    }

    /// Drop an expired toast. Returns true when one was removed.
    pub fn update_notification(&mut self, now: Instant) -> bool {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
            self.request_redraw(RedrawFlag::All);
            return true;
        }
        false
    }

    pub fn set_overlay(&mut self, overlay: UIOverlay) {
        self.overlay = overlay;
        self.request_redraw(RedrawFlag::All);
    }

    pub fn close_overlay(&mut self) {
        self.set_overlay(UIOverlay::None);
    }

    /// The open form, if the form overlay is showing.
    pub fn form_mut(&mut self) -> Option<&mut JobForm> {
        match &mut self.overlay {
            UIOverlay::Form(form) => Some(form),
            _ => None,
        }
    }

    #[must_use]
    pub fn form(&self) -> Option<&JobForm> {
        match &self.overlay {
            UIOverlay::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn move_selection_up(&mut self) {
        if let Some(sel) = self.selected
            && sel > 0
        {
            self.selected = Some(sel - 1);
            self.request_redraw(RedrawFlag::Main);
        }
    }

    pub fn move_selection_down(&mut self, rows: usize) {
        match self.selected {
            Some(sel) if sel + 1 < rows => {
                self.selected = Some(sel + 1);
                self.request_redraw(RedrawFlag::Main);
            }
            None if rows > 0 => {
                self.selected = Some(0);
                self.request_redraw(RedrawFlag::Main);
            }
            _ => {}
        }
    }

    /// Jump back to the first row of the results region.
    pub fn scroll_to_top(&mut self, rows: usize) {
        self.selected = (rows > 0).then_some(0);
        self.request_redraw(RedrawFlag::Main);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redraw_flags() {
        let mut ui = UIState::default();
        assert!(ui.needs_redraw());

        ui.clear_redraw();
        assert!(!ui.needs_redraw());

        ui.request_redraw(RedrawFlag::Main);
        assert_eq!(ui.redraw_flags, RedrawFlag::Main.bits());
    }

    #[test]
    fn test_notification_auto_dismiss() {
        let mut ui = UIState::new(Duration::from_millis(100), Duration::from_millis(100));
        ui.show_success("Job added successfully!");

        let shown_at = ui.notification.as_ref().unwrap().timestamp;
        assert!(!ui.update_notification(shown_at + Duration::from_millis(50)));
        assert!(ui.notification.is_some());

        assert!(ui.update_notification(shown_at + Duration::from_millis(100)));
        assert!(ui.notification.is_none());
    }

    #[test]
    fn test_error_notification_level() {
        let mut ui = UIState::default();
        ui.show_error("Failed to delete job.");
        let note = ui.notification.as_ref().unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.auto_dismiss, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_selection_stays_in_rows() {
        let mut ui = UIState::default();
        ui.scroll_to_top(3);
        assert_eq!(ui.selected, Some(0));

        ui.move_selection_down(3);
        ui.move_selection_down(3);
        ui.move_selection_down(3);
        assert_eq!(ui.selected, Some(2));

        ui.scroll_to_top(1);
        assert_eq!(ui.selected, Some(0));

        ui.scroll_to_top(0);
        assert_eq!(ui.selected, None);

        ui.move_selection_up();
        assert_eq!(ui.selected, None);
    }

    #[test]
    fn test_form_accessors_follow_overlay() {
        let mut ui = UIState::default();
        assert!(ui.form().is_none());

        ui.set_overlay(UIOverlay::Form(Box::new(JobForm::for_new())));
        assert!(ui.overlay.is_open());
        ui.form_mut().unwrap().insert_char('x');
        assert_eq!(ui.form().unwrap().draft.title, "x");

        ui.close_overlay();
        assert!(!ui.overlay.is_open());
    }
}
