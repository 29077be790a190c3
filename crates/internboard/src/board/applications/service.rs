use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    Application, ApplicationDetail, ApplicationFilter, ApplicationId, ApplicationStatus,
    ApplicationSubmission, ApplicationView, SortOrder,
};
use super::repository::ApplicationRepository;
use crate::board::clock::{Clock, SystemClock};
use crate::board::jobs::{JobId, JobRepository, JobService};
use crate::board::{RegistryError, RepositoryError};
use crate::identity::{Identity, UserDirectory, UserId};

/// Registry owning applications. Postings are only read, through the job
/// registry, to check them at submission time and to build projections.
pub struct ApplicationService<A, J, U> {
    applications: Arc<A>,
    jobs: Arc<JobService<J, U>>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<A, J, U> ApplicationService<A, J, U>
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    pub fn new(applications: Arc<A>, jobs: Arc<JobService<J, U>>, users: Arc<U>) -> Self {
        Self::with_clock(applications, jobs, users, Arc::new(SystemClock))
    }

    pub fn with_clock(
        applications: Arc<A>,
        jobs: Arc<JobService<J, U>>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            applications,
            jobs,
            users,
            clock,
        }
    }

    /// Submit an application for `applicant`.
    ///
    /// Fails with `NotFound` for an unknown posting, `Inactive` when the
    /// posting no longer accepts applications and `Duplicate` when the
    /// applicant already applied, including when a concurrent submission
    /// wins the race at the store.
    pub fn apply(
        &self,
        applicant: &Identity,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationView, RegistryError> {
        let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
        let (Some(job_id), Some(resume_link)) =
            (present(submission.job_id), present(submission.resume_link))
        else {
            return Err(RegistryError::validation(
                "Job ID and resume link are required",
            ));
        };
        let job_id = JobId(job_id);

        let job = self
            .jobs
            .lookup(&job_id)?
            .ok_or(RegistryError::NotFound("Job"))?;
        if !job.is_active {
            return Err(RegistryError::Inactive);
        }

        if self
            .applications
            .find_by_applicant(&applicant.user_id, &job_id)?
            .is_some()
        {
            return Err(RegistryError::Duplicate);
        }

        let application = Application {
            id: next_application_id(),
            user_id: applicant.user_id.clone(),
            job_id,
            resume_link,
            cover_note: submission.cover_note.unwrap_or_default(),
            status: ApplicationStatus::Applied,
            applied_at: self.clock.now(),
        };

        let stored = match self.applications.insert(application) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => {
                warn!(
                    user_id = %applicant.user_id.0,
                    job_id = %job.id.0,
                    "concurrent duplicate application rejected by store"
                );
                return Err(RegistryError::Duplicate);
            }
            Err(other) => return Err(other.into()),
        };
        self.users.upsert(applicant.profile())?;

        info!(
            application_id = %stored.id.0,
            job_id = %stored.job_id.0,
            user_id = %stored.user_id.0,
            "application submitted"
        );
        Ok(ApplicationView {
            application: stored,
            applicant: None,
            job: Some(job.summary()),
        })
    }

    /// Applications submitted by `user_id`, newest first.
    pub fn list_mine(&self, user_id: &UserId) -> Result<Vec<ApplicationView>, RegistryError> {
        let applications = self
            .applications
            .list(&ApplicationFilter::for_applicant(user_id.clone()))?;

        sorted(applications, SortOrder::NewestFirst)
            .into_iter()
            .map(|application| self.view(application, false))
            .collect()
    }

    /// Every application matching `filter`, joined with submitter and posting.
    /// Role checks belong to the caller.
    pub fn list_all(
        &self,
        filter: &ApplicationFilter,
        order: SortOrder,
    ) -> Result<Vec<ApplicationView>, RegistryError> {
        let applications = self.applications.list(filter)?;

        sorted(applications, order)
            .into_iter()
            .map(|application| self.view(application, true))
            .collect()
    }

    /// Overwrite the status with any legal value, whatever the current one is.
    pub fn update_status(
        &self,
        id: &ApplicationId,
        status: &str,
    ) -> Result<ApplicationView, RegistryError> {
        let status = ApplicationStatus::parse(status)?;
        let updated = self
            .applications
            .set_status(id, status)?
            .ok_or(RegistryError::NotFound("Application"))?;

        info!(application_id = %updated.id.0, status = status.label(), "application status changed");
        self.view(updated, true)
    }

    /// Fetch one application. Only admins and the submitter may see it.
    pub fn get(
        &self,
        id: &ApplicationId,
        requester: &Identity,
    ) -> Result<ApplicationDetail, RegistryError> {
        let application = self
            .applications
            .fetch(id)?
            .ok_or(RegistryError::NotFound("Application"))?;

        if !requester.is_admin() && application.user_id != requester.user_id {
            return Err(RegistryError::Forbidden);
        }

        let applicant = self.users.fetch(&application.user_id)?;
        let job = self.jobs.lookup(&application.job_id)?;
        Ok(ApplicationDetail {
            application,
            applicant,
            job,
        })
    }

    fn view(
        &self,
        application: Application,
        with_applicant: bool,
    ) -> Result<ApplicationView, RegistryError> {
        let applicant = if with_applicant {
            self.users.fetch(&application.user_id)?
        } else {
            None
        };
        let job = self
            .jobs
            .lookup(&application.job_id)?
            .map(|job| job.summary());

        Ok(ApplicationView {
            application,
            applicant,
            job,
        })
    }
}

fn sorted(mut applications: Vec<Application>, order: SortOrder) -> Vec<Application> {
    applications.sort_by(|a, b| {
        a.applied_at
            .cmp(&b.applied_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    if order == SortOrder::NewestFirst {
        applications.reverse();
    }
    applications
}
