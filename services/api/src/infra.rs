use internboard::board::{
    ApplicationService, InMemoryApplicationRepository, InMemoryJobRepository,
    InMemoryUserDirectory, JobService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type Jobs = JobService<InMemoryJobRepository, InMemoryUserDirectory>;
pub(crate) type Applications =
    ApplicationService<InMemoryApplicationRepository, InMemoryJobRepository, InMemoryUserDirectory>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Both registries wired over one shared set of in-memory stores.
pub(crate) struct Registries {
    pub(crate) jobs: Arc<Jobs>,
    pub(crate) applications: Arc<Applications>,
}

impl Registries {
    pub(crate) fn in_memory() -> Self {
        let users = Arc::new(InMemoryUserDirectory::default());
        let jobs = Arc::new(JobService::new(
            Arc::new(InMemoryJobRepository::default()),
            users.clone(),
        ));
        let applications = Arc::new(ApplicationService::new(
            Arc::new(InMemoryApplicationRepository::default()),
            jobs.clone(),
            users,
        ));

        Self { jobs, applications }
    }
}
