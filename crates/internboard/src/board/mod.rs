//! The job board: two registries over pluggable stores, plus their HTTP routes.

pub mod applications;
pub mod clock;
pub(crate) mod envelope;
pub mod error;
pub mod jobs;
pub mod memory;

pub use applications::{application_router, ApplicationService};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use error::{RegistryError, RepositoryError};
pub use jobs::{job_router, JobService};
pub use memory::{InMemoryApplicationRepository, InMemoryJobRepository, InMemoryUserDirectory};
