use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use super::domain::{AuthenticatedPrincipal, ProfileDocument, UserId};
use super::repository::UserDirectory;
use super::service::{MatchServiceError, RoommateMatchService};

/// Header carrying the id of the caller, set by the authentication layer in front of the API.
pub const PRINCIPAL_HEADER: &str = "x-user-id";

/// Router builder exposing the roommate matching and profile endpoints.
pub fn roommate_router<D>(service: Arc<RoommateMatchService<D>>) -> Router
where
    D: UserDirectory + 'static,
{
    Router::new()
        .route("/api/roommates/find", get(find_handler::<D>))
        .route("/api/roommates/saved/list", get(saved_list_handler::<D>))
        .route("/api/roommates/save/:user_id", post(toggle_saved_handler::<D>))
        .route("/api/roommates/:user_id", get(public_profile_handler::<D>))
        .route("/api/users/roommate-profile", put(update_profile_handler::<D>))
        .with_state(service)
}

pub(crate) async fn find_handler<D>(
    State(service): State<Arc<RoommateMatchService<D>>>,
    headers: HeaderMap,
) -> Response
where
    D: UserDirectory + 'static,
{
    let principal = match principal_from_headers(&headers) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match service.find_matches(&principal) {
        Ok(matches) => (StatusCode::OK, Json(json!({ "matches": matches }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn saved_list_handler<D>(
    State(service): State<Arc<RoommateMatchService<D>>>,
    headers: HeaderMap,
) -> Response
where
    D: UserDirectory + 'static,
{
    let principal = match principal_from_headers(&headers) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match service.saved_roommates(&principal) {
        Ok(roommates) => (StatusCode::OK, Json(json!({ "roommates": roommates }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn toggle_saved_handler<D>(
    State(service): State<Arc<RoommateMatchService<D>>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response
where
    D: UserDirectory + 'static,
{
    let principal = match principal_from_headers(&headers) {
        Ok(principal) => principal,
        Err(response) => return response,
    };

    match service.toggle_saved(&principal, &UserId(user_id)) {
        Ok(saved) => {
            let message = if saved {
                "Roommate saved"
            } else {
                "Roommate removed from saved"
            };
            (
                StatusCode::OK,
                Json(json!({ "saved": saved, "message": message })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn public_profile_handler<D>(
    State(service): State<Arc<RoommateMatchService<D>>>,
    Path(user_id): Path<String>,
) -> Response
where
    D: UserDirectory + 'static,
{
    match service.public_profile(&UserId(user_id)) {
        Ok(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_profile_handler<D>(
    State(service): State<Arc<RoommateMatchService<D>>>,
    headers: HeaderMap,
    payload: Result<Json<ProfileDocument>, JsonRejection>,
) -> Response
where
    D: UserDirectory + 'static,
{
    let principal = match principal_from_headers(&headers) {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    let Json(document) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let body = json!({ "error": rejection.body_text() });
            return (rejection.status(), Json(body)).into_response();
        }
    };

    match service.update_profile(&principal, document) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "Roommate profile updated successfully",
                "user": user,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn principal_from_headers(headers: &HeaderMap) -> Result<AuthenticatedPrincipal, Response> {
    headers
        .get(PRINCIPAL_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| AuthenticatedPrincipal::new(UserId::new(value)))
        .ok_or_else(|| {
            let payload = json!({ "error": "authentication required" });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        })
}

impl MatchServiceError {
    /// HTTP status reported for this error, wherever it surfaces.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MatchServiceError::ProfileIncomplete | MatchServiceError::SelfReference => {
                StatusCode::BAD_REQUEST
            }
            MatchServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,
            MatchServiceError::InvalidProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MatchServiceError::Directory(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(err: MatchServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (err.status_code(), Json(payload)).into_response()
}
