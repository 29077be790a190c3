use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::jobs::domain::{JobId, JobPosting, JobSummary};
use crate::board::RegistryError;
use crate::identity::{UserId, UserProfile};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

/// Review status of an application. Any value may replace any other; there
/// is no enforced transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == raw)
            .ok_or_else(|| RegistryError::validation("Invalid status"))
    }
}

/// A stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub job_id: JobId,
    pub resume_link: String,
    pub cover_note: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// Body of `POST /api/applications`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub job_id: Option<String>,
    pub resume_link: Option<String>,
    pub cover_note: Option<String>,
}

/// Application joined with the projections a listing needs. A posting that
/// has since been deleted shows up as `job: null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: Application,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<UserProfile>,
    pub job: Option<JobSummary>,
}

/// Single application with the submitter and the full posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant: Option<UserProfile>,
    pub job: Option<JobPosting>,
}

/// Store-level filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub user_id: Option<UserId>,
    pub job_id: Option<JobId>,
    /// Exact status label. Labels outside the enum match nothing.
    pub status: Option<String>,
}

impl ApplicationFilter {
    pub fn for_applicant(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, application: &Application) -> bool {
        self.user_id
            .as_ref()
            .map_or(true, |user_id| &application.user_id == user_id)
            && self
                .job_id
                .as_ref()
                .map_or(true, |job_id| &application.job_id == job_id)
            && self
                .status
                .as_deref()
                .map_or(true, |status| application.status.label() == status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Raw `GET /api/applications` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    pub job_id: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

impl ApplicationQuery {
    pub fn filter(&self) -> ApplicationFilter {
        let present = |value: &Option<String>| value.clone().filter(|value| !value.is_empty());
        ApplicationFilter {
            user_id: None,
            job_id: present(&self.job_id).map(JobId),
            status: present(&self.status),
        }
    }

    pub fn order(&self) -> SortOrder {
        match self.sort_by.as_deref() {
            Some("oldest") => SortOrder::OldestFirst,
            _ => SortOrder::NewestFirst,
        }
    }
}

/// Per-status counters shown on an applicant's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusTally {
    pub applied: usize,
    pub shortlisted: usize,
    pub selected: usize,
    pub rejected: usize,
}

impl StatusTally {
    pub fn count<'a>(applications: impl IntoIterator<Item = &'a Application>) -> Self {
        applications
            .into_iter()
            .fold(Self::default(), |mut tally, application| {
                match application.status {
                    ApplicationStatus::Applied => tally.applied += 1,
                    ApplicationStatus::Shortlisted => tally.shortlisted += 1,
                    ApplicationStatus::Selected => tally.selected += 1,
                    ApplicationStatus::Rejected => tally.rejected += 1,
                }
                tally
            })
    }
}
