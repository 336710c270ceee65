use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiError;
use crate::{app_state::AppState, domain::Activities};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities))
        .route("/:activity_name/signup", post(signup))
        .route("/:activity_name/unregister", delete(unregister))
}

#[derive(Debug, Deserialize)]
pub struct ParticipantQuery {
    email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

#[instrument(name = "list_activities", skip(app_state))]
async fn list_activities(State(app_state): State<AppState>) -> Json<Activities> {
    Json(app_state.directory.list_activities().await)
}

#[instrument(name = "signup", skip(app_state))]
async fn signup(
    State(app_state): State<AppState>,
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = app_state
        .directory
        .signup(&activity_name, &query.email)
        .await?;

    Ok(Json(MessageResponse { message }))
}

#[instrument(name = "unregister", skip(app_state))]
async fn unregister(
    State(app_state): State<AppState>,
    Path(activity_name): Path<String>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = app_state
        .directory
        .unregister(&activity_name, &query.email)
        .await?;

    Ok(Json(MessageResponse { message }))
}
