//! Mutex-guarded in-memory stores backing the service and the tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::applications::domain::{Application, ApplicationFilter, ApplicationId, ApplicationStatus};
use super::applications::repository::ApplicationRepository;
use super::jobs::domain::{JobChanges, JobFilter, JobId, JobPosting};
use super::jobs::repository::JobRepository;
use super::RepositoryError;
use crate::identity::{UserDirectory, UserId, UserProfile};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
}

#[derive(Default, Clone)]
pub struct InMemoryJobRepository {
    records: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn modify(
        &self,
        id: &JobId,
        changes: &JobChanges,
    ) -> Result<Option<JobPosting>, RepositoryError> {
        let mut guard = lock(&self.records)?;
        Ok(guard.get_mut(id).map(|job| {
            changes.merge_into(job);
            job.clone()
        }))
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn remove(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(lock(&self.records)?.remove(id))
    }

    fn list(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(lock(&self.records)?
            .values()
            .filter(|job| filter.matches(job))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct ApplicationTable {
    records: HashMap<ApplicationId, Application>,
    by_applicant_and_job: HashMap<(UserId, JobId), ApplicationId>,
}

/// Application store with a unique index over (`userId`, `jobId`).
#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    table: Arc<Mutex<ApplicationTable>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = lock(&self.table)?;
        let key = (application.user_id.clone(), application.job_id.clone());
        if guard.records.contains_key(&application.id)
            || guard.by_applicant_and_job.contains_key(&key)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.by_applicant_and_job.insert(key, application.id.clone());
        guard
            .records
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(lock(&self.table)?.records.get(id).cloned())
    }

    fn find_by_applicant(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = lock(&self.table)?;
        Ok(guard
            .by_applicant_and_job
            .get(&(user_id.clone(), job_id.clone()))
            .and_then(|id| guard.records.get(id))
            .cloned())
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError> {
        let mut guard = lock(&self.table)?;
        Ok(guard.records.get_mut(id).map(|application| {
            application.status = status;
            application.clone()
        }))
    }

    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        Ok(lock(&self.table)?
            .records
            .values()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryUserDirectory {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl UserDirectory for InMemoryUserDirectory {
    fn upsert(&self, profile: UserProfile) -> Result<(), RepositoryError> {
        lock(&self.profiles)?.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(lock(&self.profiles)?.get(id).cloned())
    }
}
