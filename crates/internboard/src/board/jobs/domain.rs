use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::RegistryError;
use crate::identity::{UserId, UserProfile};

pub const NOT_SPECIFIED: &str = "Not specified";

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    Internship,
    Job,
}

impl JobType {
    pub const ALL: [JobType; 2] = [JobType::Internship, JobType::Job];

    pub const fn label(self) -> &'static str {
        match self {
            JobType::Internship => "Internship",
            JobType::Job => "Job",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == raw.trim())
            .ok_or_else(|| {
                RegistryError::validation(format!(
                    "Job type must be one of {}, {}",
                    JobType::Internship.label(),
                    JobType::Job.label()
                ))
            })
    }
}

/// A stored job or internship posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub location: String,
    pub stipend: String,
    pub duration: String,
    pub is_active: bool,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            job_type: self.job_type,
            location: self.location.clone(),
        }
    }
}

/// The `title`/`type`/`location` projection joined onto applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub location: String,
}

/// Posting joined with the profile of the admin who created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: JobPosting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserProfile>,
}

/// Fields accepted when creating a posting. Everything is optional on the
/// wire so missing values surface as validation errors, not decode errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub duration: Option<String>,
}

/// Validated draft, ready to be stamped with an id and creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidJobDraft {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub job_type: JobType,
    pub location: String,
    pub stipend: String,
    pub duration: String,
}

impl JobDraft {
    pub(crate) fn validate(self) -> Result<ValidJobDraft, RegistryError> {
        let required = |value: Option<String>, trim: bool| {
            value
                .map(|value| if trim { value.trim().to_string() } else { value })
                .filter(|value| !value.trim().is_empty())
        };

        let (Some(title), Some(description), Some(job_type), Some(location)) = (
            required(self.title, true),
            required(self.description, false),
            required(self.job_type, true),
            required(self.location, true),
        ) else {
            return Err(RegistryError::validation(
                "Please provide all required fields",
            ));
        };

        Ok(ValidJobDraft {
            title,
            description,
            skills: normalize_skills(self.skills.unwrap_or_default()),
            job_type: JobType::parse(&job_type)?,
            location,
            stipend: self.stipend.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            duration: self.duration.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        })
    }
}

/// Partial update of a posting; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub stipend: Option<String>,
    pub duration: Option<String>,
    pub is_active: Option<bool>,
}

impl JobChanges {
    /// Check and normalize every touched field without looking at the stored
    /// posting, so the merge itself can run inside the store.
    pub(crate) fn validate(self) -> Result<JobChanges, RegistryError> {
        let title = match self.title {
            Some(title) => Some(non_empty(title.trim(), "Job title is required")?),
            None => None,
        };
        if let Some(description) = &self.description {
            non_empty(description, "Job description is required")?;
        }
        let location = match self.location {
            Some(location) => Some(non_empty(location.trim(), "Job location is required")?),
            None => None,
        };
        let job_type = match self.job_type {
            Some(job_type) => Some(JobType::parse(&job_type)?.label().to_string()),
            None => None,
        };

        Ok(JobChanges {
            title,
            description: self.description,
            skills: self.skills.map(normalize_skills),
            job_type,
            location,
            stipend: self.stipend,
            duration: self.duration,
            is_active: self.is_active,
        })
    }

    /// Copy the present fields onto `job`. Expects changes that went through
    /// [`JobChanges::validate`]; an unknown type label is ignored.
    pub fn merge_into(&self, job: &mut JobPosting) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(location) = &self.location {
            job.location = location.clone();
        }
        if let Some(job_type) = self
            .job_type
            .as_deref()
            .and_then(|raw| JobType::parse(raw).ok())
        {
            job.job_type = job_type;
        }
        if let Some(skills) = &self.skills {
            job.skills = skills.clone();
        }
        if let Some(stipend) = &self.stipend {
            job.stipend = stipend.clone();
        }
        if let Some(duration) = &self.duration {
            job.duration = duration.clone();
        }
        if let Some(is_active) = self.is_active {
            job.is_active = is_active;
        }
    }
}

fn non_empty(value: &str, message: &'static str) -> Result<String, RegistryError> {
    if value.trim().is_empty() {
        Err(RegistryError::validation(message))
    } else {
        Ok(value.to_string())
    }
}

fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Listing filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Exact match against the type label. Unknown labels match nothing.
    pub job_type: Option<String>,
    pub location: Option<String>,
    /// Matched against title or description.
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl JobFilter {
    pub fn matches(&self, job: &JobPosting) -> bool {
        if let Some(job_type) = &self.job_type {
            if job.job_type.label() != job_type {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ignore_case(&job.location, location) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ignore_case(&job.title, search)
                && !contains_ignore_case(&job.description, search)
            {
                return false;
            }
        }
        if let Some(is_active) = self.is_active {
            if job.is_active != is_active {
                return false;
            }
        }
        true
    }
}

/// Raw `/api/jobs` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub is_active: Option<String>,
}

impl From<JobQuery> for JobFilter {
    fn from(query: JobQuery) -> Self {
        let present = |value: Option<String>| value.filter(|value| !value.is_empty());
        Self {
            job_type: present(query.job_type),
            location: present(query.location),
            search: present(query.search),
            is_active: query.is_active.map(|value| value == "true"),
        }
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
