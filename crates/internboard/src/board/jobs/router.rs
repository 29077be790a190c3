use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::domain::{JobChanges, JobDraft, JobFilter, JobId, JobQuery};
use super::repository::JobRepository;
use super::service::JobService;
use crate::board::envelope::{failure, rejected_body, rejected_query, success};
use crate::identity::{AdminUser, UserDirectory};

/// Router exposing `/api/jobs`. Reads are public, writes require an admin.
pub fn job_router<J, U>(service: Arc<JobService<J, U>>) -> Router
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    Router::new()
        .route(
            "/api/jobs",
            get(list_handler::<J, U>).post(create_handler::<J, U>),
        )
        .route(
            "/api/jobs/:job_id",
            get(get_handler::<J, U>)
                .put(update_handler::<J, U>)
                .delete(delete_handler::<J, U>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<J, U>(
    State(service): State<Arc<JobService<J, U>>>,
    query: Result<Query<JobQuery>, QueryRejection>,
) -> Response
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected_query(rejection),
    };

    match service.list(&JobFilter::from(query)) {
        Ok(jobs) => success(
            StatusCode::OK,
            None,
            json!({ "count": jobs.len(), "jobs": jobs }),
        ),
        Err(err) => failure(err, "Error fetching jobs"),
    }
}

pub(crate) async fn get_handler<J, U>(
    State(service): State<Arc<JobService<J, U>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    match service.get(&JobId(job_id)) {
        Ok(job) => success(StatusCode::OK, None, json!({ "job": job })),
        Err(err) => failure(err, "Error fetching job"),
    }
}

pub(crate) async fn create_handler<J, U>(
    State(service): State<Arc<JobService<J, U>>>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<JobDraft>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };

    match service.create(draft, &admin) {
        Ok(job) => success(
            StatusCode::CREATED,
            Some("Job created successfully"),
            json!({ "job": job }),
        ),
        Err(err) => failure(err, "Error creating job"),
    }
}

pub(crate) async fn update_handler<J, U>(
    State(service): State<Arc<JobService<J, U>>>,
    AdminUser(_admin): AdminUser,
    Path(job_id): Path<String>,
    payload: Result<Json<JobChanges>, JsonRejection>,
) -> Response
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    let Json(changes) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };

    match service.update(&JobId(job_id), changes) {
        Ok(job) => success(
            StatusCode::OK,
            Some("Job updated successfully"),
            json!({ "job": job }),
        ),
        Err(err) => failure(err, "Error updating job"),
    }
}

pub(crate) async fn delete_handler<J, U>(
    State(service): State<Arc<JobService<J, U>>>,
    AdminUser(_admin): AdminUser,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    match service.delete(&JobId(job_id)) {
        Ok(_) => success(StatusCode::OK, Some("Job deleted successfully"), json!({})),
        Err(err) => failure(err, "Error deleting job"),
    }
}
