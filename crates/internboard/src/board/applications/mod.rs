//! Application Registry: submissions, duplicate prevention and status tracking.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDetail, ApplicationFilter, ApplicationId, ApplicationQuery,
    ApplicationStatus, ApplicationSubmission, ApplicationView, SortOrder, StatusTally,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::ApplicationService;
