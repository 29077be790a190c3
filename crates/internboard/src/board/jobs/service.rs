use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::info;

use super::domain::{JobChanges, JobDraft, JobFilter, JobId, JobPosting, JobView};
use super::repository::JobRepository;
use crate::board::clock::{Clock, SystemClock};
use crate::board::RegistryError;
use crate::identity::{Identity, UserDirectory};

/// Registry owning job postings.
pub struct JobService<J, U> {
    jobs: Arc<J>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

impl<J, U> JobService<J, U>
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    pub fn new(jobs: Arc<J>, users: Arc<U>) -> Self {
        Self::with_clock(jobs, users, Arc::new(SystemClock))
    }

    pub fn with_clock(jobs: Arc<J>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { jobs, users, clock }
    }

    /// Postings matching `filter`, newest first.
    pub fn list(&self, filter: &JobFilter) -> Result<Vec<JobView>, RegistryError> {
        let mut jobs = self.jobs.list(filter)?;
        jobs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        jobs.into_iter().map(|job| self.view(job)).collect()
    }

    pub fn get(&self, id: &JobId) -> Result<JobView, RegistryError> {
        let job = self.jobs.fetch(id)?.ok_or(RegistryError::NotFound("Job"))?;
        self.view(job)
    }

    /// Create a posting on behalf of `creator`. Role checks belong to the caller.
    pub fn create(&self, draft: JobDraft, creator: &Identity) -> Result<JobPosting, RegistryError> {
        let draft = draft.validate()?;
        self.users.upsert(creator.profile())?;

        let job = JobPosting {
            id: next_job_id(),
            title: draft.title,
            description: draft.description,
            skills: draft.skills,
            job_type: draft.job_type,
            location: draft.location,
            stipend: draft.stipend,
            duration: draft.duration,
            is_active: true,
            created_by: creator.user_id.clone(),
            created_at: self.clock.now(),
        };

        let stored = self.jobs.insert(job)?;
        info!(job_id = %stored.id.0, created_by = %stored.created_by.0, "job posting created");
        Ok(stored)
    }

    /// Apply a partial update; the store merges it atomically.
    pub fn update(&self, id: &JobId, changes: JobChanges) -> Result<JobPosting, RegistryError> {
        let changes = changes.validate()?;
        let job = self
            .jobs
            .modify(id, &changes)?
            .ok_or(RegistryError::NotFound("Job"))?;

        info!(job_id = %job.id.0, is_active = job.is_active, "job posting updated");
        Ok(job)
    }

    /// Remove a posting. Applications referencing it are left in place.
    pub fn delete(&self, id: &JobId) -> Result<JobPosting, RegistryError> {
        let removed = self.jobs.remove(id)?.ok_or(RegistryError::NotFound("Job"))?;
        info!(job_id = %removed.id.0, "job posting deleted");
        Ok(removed)
    }

    /// Non-failing lookup used when joining postings onto applications.
    pub(crate) fn lookup(&self, id: &JobId) -> Result<Option<JobPosting>, RegistryError> {
        Ok(self.jobs.fetch(id)?)
    }

    fn view(&self, job: JobPosting) -> Result<JobView, RegistryError> {
        let creator = self.users.fetch(&job.created_by)?;
        Ok(JobView { job, creator })
    }
}
