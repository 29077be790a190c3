use std::sync::Arc;

use axum::response::Response;
use axum::{Extension, Router};
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use crate::board::applications::domain::{
    Application, ApplicationFilter, ApplicationId, ApplicationStatus, ApplicationSubmission,
};
use crate::board::applications::repository::ApplicationRepository;
use crate::board::applications::{application_router, ApplicationService};
use crate::board::clock::SteppingClock;
use crate::board::jobs::{job_router, JobDraft, JobId, JobPosting, JobService};
use crate::board::memory::{
    InMemoryApplicationRepository, InMemoryJobRepository, InMemoryUserDirectory,
};
use crate::board::RepositoryError;
use crate::identity::{Identity, JwtAuthority, Role, UserId};

pub(super) type Jobs = JobService<InMemoryJobRepository, InMemoryUserDirectory>;
pub(super) type Applications<A> = ApplicationService<A, InMemoryJobRepository, InMemoryUserDirectory>;

pub(super) struct Board<A> {
    pub(super) jobs: Arc<Jobs>,
    pub(super) applications: Arc<Applications<A>>,
    pub(super) store: Arc<A>,
}

pub(super) fn admin() -> Identity {
    Identity {
        user_id: UserId("admin-1".to_string()),
        role: Role::Admin,
        name: "Priya Admin".to_string(),
        email: "priya@example.com".to_string(),
    }
}

pub(super) fn applicant(id: &str) -> Identity {
    Identity {
        user_id: UserId(id.to_string()),
        role: Role::Applicant,
        name: format!("Applicant {id}"),
        email: format!("{id}@example.com"),
    }
}

pub(super) fn build_board_with<A>(store: A) -> Board<A>
where
    A: ApplicationRepository + 'static,
{
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    let clock = Arc::new(SteppingClock::new(start, Duration::minutes(1)));
    let users = Arc::new(InMemoryUserDirectory::default());
    let jobs = Arc::new(JobService::with_clock(
        Arc::new(InMemoryJobRepository::default()),
        users.clone(),
        clock.clone(),
    ));
    let store = Arc::new(store);
    let applications = Arc::new(ApplicationService::with_clock(
        store.clone(),
        jobs.clone(),
        users,
        clock,
    ));

    Board {
        jobs,
        applications,
        store,
    }
}

pub(super) fn build_board() -> Board<InMemoryApplicationRepository> {
    build_board_with(InMemoryApplicationRepository::default())
}

pub(super) fn post_job(jobs: &Jobs, title: &str) -> JobPosting {
    jobs.create(
        JobDraft {
            title: Some(title.to_string()),
            description: Some(format!("{title} on the platform team")),
            job_type: Some("Internship".to_string()),
            location: Some("Remote".to_string()),
            ..JobDraft::default()
        },
        &admin(),
    )
    .expect("job created")
}

pub(super) fn submission(job_id: &JobId) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: Some(job_id.0.clone()),
        resume_link: Some("https://cv.example.com/resume.pdf".to_string()),
        cover_note: None,
    }
}

pub(super) fn authority() -> Arc<JwtAuthority> {
    Arc::new(JwtAuthority::new("routing-test-secret", Duration::hours(1)))
}

pub(super) fn bearer(authority: &JwtAuthority, identity: &Identity) -> String {
    format!(
        "Bearer {}",
        authority.issue(identity).expect("token signs")
    )
}

pub(super) fn board_router<A>(board: &Board<A>, authority: Arc<JwtAuthority>) -> Router
where
    A: ApplicationRepository + 'static,
{
    job_router(board.jobs.clone())
        .merge(application_router(board.applications.clone()))
        .layer(Extension(authority))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose applicant lookup never sees a competing submission, so every
/// duplicate is caught by the unique index instead of the pre-check.
#[derive(Default)]
pub(super) struct RacingRepository {
    pub(super) inner: InMemoryApplicationRepository,
}

impl ApplicationRepository for RacingRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        self.inner.insert(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_by_applicant(
        &self,
        _user_id: &UserId,
        _job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(None)
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        self.inner.set_status(id, status)
    }

    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        self.inner.list(filter)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _application: Application) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_applicant(
        &self,
        _user_id: &UserId,
        _job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
