//! ``src/model/filter.rs``
//! ============================================================================
//! # `FilterCriteria`: what the job list is currently filtered and sorted by
//!
//! Filters are replaced wholesale on every edit. The outgoing query omits any
//! empty value and the `All` job type sentinel.

use serde::{Deserialize, Serialize};

/// Job type value meaning "no job type filter".
pub const JOB_TYPE_ALL: &str = "All";

/// Job types offered by the filter bar, in cycling order.
pub const JOB_TYPE_CHOICES: [&str; 4] = [JOB_TYPE_ALL, "Full-time", "Contract", "Internship"];

/// Sort orders understood by the jobs API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    CompanyAsc,
    CompanyDesc,
}

impl SortOrder {
    /// Wire value for the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::CompanyAsc => "company_asc",
            Self::CompanyDesc => "company_desc",
        }
    }

    /// Human label for the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "Newest first",
            Self::DateAsc => "Oldest first",
            Self::CompanyAsc => "Company A-Z",
            Self::CompanyDesc => "Company Z-A",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::DateDesc => Self::DateAsc,
            Self::DateAsc => Self::CompanyAsc,
            Self::CompanyAsc => Self::CompanyDesc,
            Self::CompanyDesc => Self::DateDesc,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text fields of the filter bar that accept typed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterField {
    #[default]
    Search,
    Location,
}

impl FilterField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Search => Self::Location,
            Self::Location => Self::Search,
        }
    }
}

/// Current filter state of the job list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub location: String,
    pub job_type: String,
    pub sort: SortOrder,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: String::new(),
            job_type: JOB_TYPE_ALL.to_string(),
            sort: SortOrder::DateDesc,
        }
    }
}

impl FilterCriteria {
    /// Query parameters for `GET /jobs`, in a stable order.
    ///
    /// Empty values and the `All` job type are left out; `sort` is always sent.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);

        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        if !self.location.is_empty() {
            params.push(("location", self.location.clone()));
        }
        if !self.job_type.is_empty() && self.job_type != JOB_TYPE_ALL {
            params.push(("job_type", self.job_type.clone()));
        }
        params.push(("sort", self.sort.as_str().to_string()));

        params
    }

    /// Mutable access to a typed text field.
    pub fn field_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Search => &mut self.search,
            FilterField::Location => &mut self.location,
        }
    }

    #[must_use]
    pub fn field(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.search,
            FilterField::Location => &self.location,
        }
    }

    /// Copy of these filters with the job type advanced to the next choice.
    ///
    /// A job type that is not one of the offered choices cycles back to `All`.
    #[must_use]
    pub fn with_next_job_type(&self) -> Self {
        let next = JOB_TYPE_CHOICES
            .iter()
            .position(|choice| *choice == self.job_type)
            .map_or(JOB_TYPE_ALL, |idx| {
                JOB_TYPE_CHOICES[(idx + 1) % JOB_TYPE_CHOICES.len()]
            });

        Self {
            job_type: next.to_string(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_next_sort(&self) -> Self {
        Self {
            sort: self.sort.next(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(filters: &FilterCriteria) -> String {
        filters
            .query_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[test]
    fn test_default_filters() {
        let filters = FilterCriteria::default();
        assert_eq!(filters.job_type, "All");
        assert_eq!(filters.sort, SortOrder::DateDesc);
        assert_eq!(encoded(&filters), "sort=date_desc");
    }

    #[test]
    fn test_search_only_query() {
        let filters = FilterCriteria {
            search: "analyst".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(encoded(&filters), "search=analyst&sort=date_desc");
    }

    #[test]
    fn test_job_type_all_is_omitted() {
        let filters = FilterCriteria {
            location: "London".into(),
            job_type: "All".into(),
            ..FilterCriteria::default()
        };
        assert!(filters.query_params().iter().all(|(k, _)| *k != "job_type"));
    }

    #[test]
    fn test_specific_job_type_is_sent() {
        let filters = FilterCriteria {
            job_type: "Contract".into(),
            sort: SortOrder::CompanyAsc,
            ..FilterCriteria::default()
        };
        assert_eq!(encoded(&filters), "job_type=Contract&sort=company_asc");
    }

    #[test]
    fn test_empty_job_type_is_omitted() {
        let filters = FilterCriteria {
            job_type: String::new(),
            ..FilterCriteria::default()
        };
        assert_eq!(encoded(&filters), "sort=date_desc");
    }

    #[test]
    fn test_job_type_cycles_through_choices() {
        let mut filters = FilterCriteria::default();
        let mut seen = Vec::new();
        for _ in 0..JOB_TYPE_CHOICES.len() {
            filters = filters.with_next_job_type();
            seen.push(filters.job_type.clone());
        }
        assert_eq!(seen, ["Full-time", "Contract", "Internship", "All"]);

        let custom = FilterCriteria {
            job_type: "Temporary".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(custom.with_next_job_type().job_type, "All");
    }

    #[test]
    fn test_sort_cycles_back_to_default() {
        let mut sort = SortOrder::default();
        for _ in 0..4 {
            sort = sort.next();
        }
        assert_eq!(sort, SortOrder::DateDesc);
        assert_eq!(SortOrder::CompanyDesc.to_string(), "company_desc");
    }
}
