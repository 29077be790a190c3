use super::domain::{JobChanges, JobFilter, JobId, JobPosting};
use crate::board::RepositoryError;

/// Storage abstraction for postings so the registry can be exercised in isolation.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    /// Merge `changes` into the stored posting as one atomic step, returning
    /// the result, or `None` when no posting has that id.
    fn modify(
        &self,
        id: &JobId,
        changes: &JobChanges,
    ) -> Result<Option<JobPosting>, RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    /// Remove a posting, returning it if it existed.
    fn remove(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    /// Postings matching `filter`, in no particular order.
    fn list(&self, filter: &JobFilter) -> Result<Vec<JobPosting>, RepositoryError>;
}
