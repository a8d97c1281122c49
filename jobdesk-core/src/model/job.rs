//! ``src/model/job.rs``
//! ============================================================================
//! # Job postings as served by the jobs API, and the draft sent back to it

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned job identifier.
pub type JobId = u64;

/// A job posting snapshot. Owned by the server, never patched locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_type: String,
    /// Comma-joined tag list.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: String,
    /// Display string such as `3h ago` or `2024-05-01`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub posting_date: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl JobPosting {
    /// Trimmed, non-empty tags in their original order.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Two-letter avatar text for the company.
    #[must_use]
    pub fn company_initials(&self) -> String {
        let company = self.company.trim();
        if company.is_empty() {
            return "?".to_string();
        }

        let mut words = company.split_whitespace();
        let initials: String = match (words.next(), words.next()) {
            (Some(first), Some(second)) => first
                .chars()
                .take(1)
                .chain(second.chars().take(1))
                .collect(),
            _ => company.chars().take(2).collect(),
        };

        initials.to_uppercase()
    }

    /// Posted within the last day (the API reports those as `Nh ago`).
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.posting_date.contains("h ago")
    }

    /// Draft pre-filled from this posting, for the edit form.
    #[must_use]
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Body of `POST /jobs` and `PUT /jobs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(company: &str, tags: &str, posting_date: &str) -> JobPosting {
        JobPosting {
            id: 1,
            title: "Quant Analyst".into(),
            company: company.into(),
            location: "London".into(),
            job_type: "Full-time".into(),
            tags: tags.into(),
            posting_date: posting_date.into(),
        }
    }

    #[test]
    fn test_null_optional_fields_decode_as_empty() {
        let job: JobPosting = serde_json::from_str(
            r#"{"id":7,"title":"Analyst","company":"Acme","location":"Remote",
                "job_type":null,"tags":null,"posting_date":null}"#,
        )
        .unwrap();

        assert_eq!(job.id, 7);
        assert!(job.job_type.is_empty());
        assert_eq!(job.tag_list().count(), 0);
    }

    #[test]
    fn test_tag_list_trims_and_drops_empties() {
        let job = posting("Acme", " python, sql,,  risk ", "1d ago");
        assert_eq!(job.tag_list().collect::<Vec<_>>(), ["python", "sql", "risk"]);
    }

    #[test]
    fn test_company_initials() {
        assert_eq!(posting("Goldman Sachs", "", "").company_initials(), "GS");
        assert_eq!(posting("citadel", "", "").company_initials(), "CI");
        assert_eq!(posting("  ", "", "").company_initials(), "?");
    }

    #[test]
    fn test_is_new_uses_hours_marker() {
        assert!(posting("Acme", "", "5h ago").is_new());
        assert!(!posting("Acme", "", "2d ago").is_new());
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let draft = posting("Acme", "a,b", "1h ago").to_draft();
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["company"], "Acme");
    }
}
