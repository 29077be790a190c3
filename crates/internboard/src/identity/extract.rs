//! Extractors that resolve the caller before a handler runs.
//!
//! The [`JwtAuthority`] is read from the request extensions, so any router that
//! uses these extractors must be wrapped in `Extension(Arc<JwtAuthority>)`.

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

use super::token::{JwtAuthority, TokenError};
use super::Identity;

/// Any caller holding a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

/// A caller holding a valid bearer token with the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub enum IdentityRejection {
    MissingToken,
    InvalidToken(TokenError),
    AdminOnly,
    Unconfigured,
}

impl IdentityRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            IdentityRejection::MissingToken | IdentityRejection::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            IdentityRejection::AdminOnly => StatusCode::FORBIDDEN,
            IdentityRejection::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            IdentityRejection::MissingToken => "Not authorized, no token",
            IdentityRejection::InvalidToken(TokenError::Expired) => {
                "Not authorized, token expired"
            }
            IdentityRejection::InvalidToken(_) => "Not authorized, token failed",
            IdentityRejection::AdminOnly => "Access denied. Admin only.",
            IdentityRejection::Unconfigured => "Authentication is unavailable",
        }
    }
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        match &self {
            IdentityRejection::InvalidToken(err) => debug!(error = %err, "bearer token rejected"),
            IdentityRejection::Unconfigured => {
                error!("request reached an authenticated route without a token authority")
            }
            IdentityRejection::MissingToken | IdentityRejection::AdminOnly => {}
        }

        let body = Json(json!({ "success": false, "message": self.message() }));
        (self.status(), body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(IdentityRejection::MissingToken)?;

        let authority = parts
            .extensions
            .get::<Arc<JwtAuthority>>()
            .ok_or(IdentityRejection::Unconfigured)?;

        authority
            .verify(token)
            .map(AuthUser)
            .map_err(IdentityRejection::InvalidToken)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        if identity.is_admin() {
            Ok(AdminUser(identity))
        } else {
            Err(IdentityRejection::AdminOnly)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::{Extension, Router};
    use chrono::Duration;
    use tower::ServiceExt;

    use crate::identity::{Role, UserId};

    async fn whoami(AuthUser(identity): AuthUser) -> String {
        identity.user_id.0
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).expect("request")
    }

    #[tokio::test]
    async fn missing_authority_is_a_server_error() {
        let app = Router::new().route("/whoami", get(whoami));
        let response = app
            .oneshot(request(Some("Bearer anything")))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn bearer_scheme_is_required() {
        let authority = Arc::new(JwtAuthority::new("extract-secret", Duration::hours(1)));
        let token = authority
            .issue(&Identity {
                user_id: UserId("user-9".to_string()),
                role: Role::Applicant,
                name: "Meera".to_string(),
                email: "meera@example.com".to_string(),
            })
            .expect("signs");
        let app = Router::new()
            .route("/whoami", get(whoami))
            .layer(Extension(authority));

        let response = app
            .clone()
            .oneshot(request(Some(&format!("Token {token}"))))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .expect("responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body");
        assert_eq!(&body[..], b"user-9");
    }
}
