//! ``src/model/form.rs``
//! ============================================================================
//! # Add/edit job form state and its local validation

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::model::job::{JobDraft, JobId, JobPosting};

/// Editable form fields, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Company,
    Location,
    JobType,
    Tags,
}

impl FormField {
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Company,
        Self::Location,
        Self::JobType,
        Self::Tags,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Job Title",
            Self::Company => "Company",
            Self::Location => "Location",
            Self::JobType => "Job Type (e.g., Full-time)",
            Self::Tags => "Tags (comma-separated)",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Location => "location",
            Self::JobType => "job_type",
            Self::Tags => "tags",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Title | Self::Company | Self::Location)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Company,
            Self::Company => Self::Location,
            Self::Location => Self::JobType,
            Self::JobType => Self::Tags,
            Self::Tags => Self::Title,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Tags,
            Self::Company => Self::Title,
            Self::Location => Self::Company,
            Self::JobType => Self::Location,
            Self::Tags => Self::JobType,
        }
    }
}

/// Field-level validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(SmallVec<[(FormField, CompactString); 3]>);

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<CompactString>) {
        let message = message.into();
        if let Some(slot) = self.0.iter_mut().find(|(f, _)| *f == field) {
            slot.1 = message;
        } else {
            self.0.push((field, message));
        }
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.0.retain(|(f, _)| *f != field);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, (field, msg)) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {msg}", field.key())?;
        }
        Ok(())
    }
}

/// Check the required fields of a draft.
pub fn validate_draft(draft: &JobDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if draft.title.trim().is_empty() {
        errors.insert(FormField::Title, "Title is required.");
    }
    if draft.company.trim().is_empty() {
        errors.insert(FormField::Company, "Company is required.");
    }
    if draft.location.trim().is_empty() {
        errors.insert(FormField::Location, "Location is required.");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Open add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    /// `Some` when editing an existing posting.
    pub editing: Option<JobId>,
    pub draft: JobDraft,
    pub focus: FormField,
    pub errors: FieldErrors,
    /// A save request is in flight; further submits are ignored.
    pub submitting: bool,
}

impl JobForm {
    #[must_use]
    pub fn for_new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_edit(job: &JobPosting) -> Self {
        Self {
            editing: Some(job.id),
            draft: job.to_draft(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.is_editing() { "Edit Job" } else { "Add a New Job" }
    }

    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Save Changes" } else { "Add Job" }
    }

    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.draft.title,
            FormField::Company => &self.draft.company,
            FormField::Location => &self.draft.location,
            FormField::JobType => &self.draft.job_type,
            FormField::Tags => &self.draft.tags,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.draft.title,
            FormField::Company => &mut self.draft.company,
            FormField::Location => &mut self.draft.location,
            FormField::JobType => &mut self.draft.job_type,
            FormField::Tags => &mut self.draft.tags,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let field = self.focus;
        self.value_mut(field).push(ch);
        self.errors.clear_field(field);
    }

    pub fn delete_char_before(&mut self) -> bool {
        let field = self.focus;
        self.value_mut(field).pop().is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Validate and record any field errors on the form.
    pub fn validate(&mut self) -> bool {
        match validate_draft(&self.draft) {
            Ok(()) => {
                self.errors = FieldErrors::default();
                true
            }
            Err(errors) => {
                if let Some(first) = FormField::ALL.iter().find(|f| errors.get(**f).is_some()) {
                    self.focus = *first;
                }
                self.errors = errors;
                false
            }
        }
    }
}
