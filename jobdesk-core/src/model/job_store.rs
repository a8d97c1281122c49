//! ``src/model/job_store.rs``
//! ============================================================================
//! # `JobStore`: last fetched job collection plus the visible-count cursor
//!
//! Pagination is client-side: the whole result set is held and a prefix of
//! `visible` rows is rendered. The cursor may run past the end of the
//! collection; everything that displays it clamps.

use crate::model::job::JobPosting;

/// Rows revealed per "show more".
pub const DEFAULT_PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStore {
    jobs: Vec<JobPosting>,
    visible: usize,
    page_size: usize,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl JobStore {
    /// A page size of zero is bumped to one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            jobs: Vec::new(),
            visible: page_size,
            page_size,
        }
    }

    /// Replace the collection wholesale and reset the cursor.
    pub fn replace(&mut self, jobs: Vec<JobPosting>) {
        self.jobs = jobs;
        self.visible = self.page_size;
    }

    pub fn show_more(&mut self) {
        self.visible = self.visible.saturating_add(self.page_size);
    }

    pub fn show_less(&mut self) {
        self.visible = self.page_size;
    }

    #[must_use]
    pub fn can_show_more(&self) -> bool {
        self.visible < self.jobs.len()
    }

    #[must_use]
    pub fn can_show_less(&self) -> bool {
        self.visible > self.page_size && self.jobs.len() > self.page_size
    }

    /// Raw cursor value, possibly beyond `len()`.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible
    }

    /// Number of rows actually rendered.
    #[must_use]
    pub fn shown_count(&self) -> usize {
        self.visible.min(self.jobs.len())
    }

    #[must_use]
    pub fn visible_jobs(&self) -> &[JobPosting] {
        &self.jobs[..self.shown_count()]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&JobPosting> {
        self.visible_jobs().get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Result summary line above the list.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} open positions",
            self.shown_count(),
            self.jobs.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(n: usize) -> Vec<JobPosting> {
        (0..n)
            .map(|i| JobPosting {
                id: i as u64,
                title: format!("Job {i}"),
                company: "Acme".into(),
                location: "Remote".into(),
                job_type: "Contract".into(),
                tags: String::new(),
                posting_date: "1d ago".into(),
            })
            .collect()
    }

    #[test]
    fn test_show_more_grows_by_page_and_clamps_on_display() {
        let page = 15;
        let n = 40;
        let mut store = JobStore::new(page);
        store.replace(jobs(n));

        for k in 0..5 {
            assert_eq!(store.visible_count(), page + k * page);
            assert_eq!(store.shown_count(), (page + k * page).min(n));
            assert_eq!(store.can_show_more(), store.visible_count() < n);
            store.show_more();
        }
        assert_eq!(store.visible_jobs().len(), n);
        assert!(!store.can_show_more());
    }

    #[test]
    fn test_show_less_resets_to_one_page() {
        let mut store = JobStore::new(15);
        store.replace(jobs(50));
        store.show_more();
        store.show_more();
        assert!(store.can_show_less());

        store.show_less();
        assert_eq!(store.visible_count(), 15);
        assert!(!store.can_show_less());
        assert!(store.can_show_more());
    }

    #[test]
    fn test_show_less_hidden_for_short_collections() {
        let mut store = JobStore::new(15);
        store.replace(jobs(10));
        store.show_more();
        // cursor is past a page but the whole list fits in one page
        assert_eq!(store.visible_count(), 30);
        assert!(!store.can_show_less());
        assert!(!store.can_show_more());
        assert_eq!(store.summary(), "Showing 10 of 10 open positions");
    }

    #[test]
    fn test_replace_resets_cursor() {
        let mut store = JobStore::new(5);
        store.replace(jobs(20));
        store.show_more();
        store.replace(jobs(3));
        assert_eq!(store.visible_count(), 5);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(2).map(|j| j.id), Some(2));
        assert!(store.get(3).is_none());
    }

    #[test]
    fn test_zero_page_size_is_bumped() {
        let store = JobStore::new(0);
        assert_eq!(store.page_size(), 1);
        assert!(store.is_empty());
    }
}
