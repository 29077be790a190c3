use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationQuery, ApplicationSubmission, StatusTally};
use super::repository::ApplicationRepository;
use super::service::ApplicationService;
use crate::board::envelope::{failure, rejected_body, rejected_query, success};
use crate::board::jobs::JobRepository;
use crate::identity::{AdminUser, AuthUser, UserDirectory};

type SharedService<A, J, U> = Arc<ApplicationService<A, J, U>>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusChange {
    #[serde(default)]
    status: Option<String>,
}

/// Router exposing `/api/applications`.
pub fn application_router<A, J, U>(service: SharedService<A, J, U>) -> Router
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_all_handler::<A, J, U>).post(submit_handler::<A, J, U>),
        )
        .route("/api/applications/me", get(list_mine_handler::<A, J, U>))
        .route(
            "/api/applications/:application_id",
            get(detail_handler::<A, J, U>),
        )
        .route(
            "/api/applications/:application_id/status",
            put(status_handler::<A, J, U>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<A, J, U>(
    State(service): State<SharedService<A, J, U>>,
    AuthUser(applicant): AuthUser,
    payload: Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };

    match service.apply(&applicant, submission) {
        Ok(application) => success(
            StatusCode::CREATED,
            Some("Application submitted successfully"),
            json!({ "application": application }),
        ),
        Err(err) => failure(err, "Error submitting application"),
    }
}

pub(crate) async fn list_mine_handler<A, J, U>(
    State(service): State<SharedService<A, J, U>>,
    AuthUser(applicant): AuthUser,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    match service.list_mine(&applicant.user_id) {
        Ok(applications) => {
            let stats = StatusTally::count(applications.iter().map(|view| &view.application));
            success(
                StatusCode::OK,
                None,
                json!({
                    "count": applications.len(),
                    "stats": stats,
                    "applications": applications,
                }),
            )
        }
        Err(err) => failure(err, "Error fetching applications"),
    }
}

pub(crate) async fn list_all_handler<A, J, U>(
    State(service): State<SharedService<A, J, U>>,
    AdminUser(_admin): AdminUser,
    query: Result<Query<ApplicationQuery>, QueryRejection>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected_query(rejection),
    };

    match service.list_all(&query.filter(), query.order()) {
        Ok(applications) => success(
            StatusCode::OK,
            None,
            json!({ "count": applications.len(), "applications": applications }),
        ),
        Err(err) => failure(err, "Error fetching applications"),
    }
}

pub(crate) async fn detail_handler<A, J, U>(
    State(service): State<SharedService<A, J, U>>,
    AuthUser(requester): AuthUser,
    Path(application_id): Path<String>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    match service.get(&ApplicationId(application_id), &requester) {
        Ok(application) => success(StatusCode::OK, None, json!({ "application": application })),
        Err(err) => failure(err, "Error fetching application"),
    }
}

pub(crate) async fn status_handler<A, J, U>(
    State(service): State<SharedService<A, J, U>>,
    AdminUser(_admin): AdminUser,
    Path(application_id): Path<String>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Response
where
    A: ApplicationRepository + 'static,
    J: JobRepository + 'static,
    U: UserDirectory + 'static,
{
    let Json(change) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejected_body(rejection),
    };

    let status = change.status.unwrap_or_default();
    match service.update_status(&ApplicationId(application_id), &status) {
        Ok(application) => success(
            StatusCode::OK,
            Some("Application status updated successfully"),
            json!({ "application": application }),
        ),
        Err(err) => failure(err, "Error updating application status"),
    }
}
