//! Job Registry: postings, filtered listing and soft deactivation.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    JobChanges, JobDraft, JobFilter, JobId, JobPosting, JobQuery, JobSummary, JobType, JobView,
};
pub use repository::JobRepository;
pub use router::job_router;
pub use service::JobService;
