use super::domain::{Application, ApplicationFilter, ApplicationId, ApplicationStatus};
use crate::board::jobs::domain::JobId;
use crate::board::RepositoryError;
use crate::identity::UserId;

/// Storage abstraction for applications.
///
/// `insert` must enforce uniqueness of (`user_id`, `job_id`) atomically and
/// report a violation as [`RepositoryError::Conflict`]; the registry's own
/// pre-check is not enough under concurrent submissions.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn find_by_applicant(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<Option<Application>, RepositoryError>;
    /// Overwrite the status, returning the updated record or `None` if absent.
    fn set_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, RepositoryError>;
    /// Applications matching `filter`, in no particular order.
    fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError>;
}
