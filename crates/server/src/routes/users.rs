use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

use models::user::{parse_user_id, User, UserCreated, UserInput, UserSummary};

use crate::errors::ApiError;
use crate::routes::{json_body, run_gate};
use crate::state::AppState;

const NOT_FOUND: &str = "user not found";

/// Read the gated payload into the user input shape. Without a schema gate
/// this is the only structural check a user body gets.
fn into_input(payload: Value) -> Result<UserInput, ApiError> {
    serde_json::from_value(payload).map_err(|e| ApiError::BadRequest(format!("invalid user body: {e}")))
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserCreatedDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UserCreated>), ApiError> {
    let mut payload = json_body(body)?;
    run_gate(state.user_gate.as_ref(), "POST /users", &mut payload)
        .map_err(|report| ApiError::validation(report.into_errors()))?;
    let created = state.users.create(into_input(payload)?).await;
    info!(id = %created.id, "user created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "Numeric user id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::UserSummaryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<UserSummary>, ApiError> {
    let id = parse_user_id(&raw_id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    let user = state.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Full update through `POST /users/{id}`. An unknown id answers 404 even
/// when the body would also be rejected.
#[utoipa::path(
    post, path = "/users/{id}", tag = "users",
    params(("id" = String, Path, description = "Numeric user id")),
    request_body = crate::openapi::UserInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ValidationErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&raw_id).ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    let mut payload = json_body(body)?;
    if let Err(report) = run_gate(state.user_gate.as_ref(), "POST /users/{id}", &mut payload) {
        state.users.get_by_id(id).await?;
        return Err(ApiError::validation(report.into_errors()));
    }
    let input = match into_input(payload) {
        Ok(input) => input,
        Err(e) => {
            state.users.get_by_id(id).await?;
            return Err(e);
        }
    };
    let user = state.users.replace(id, input).await?;
    info!(id = user.id, "user updated");
    Ok(Json(user))
}
