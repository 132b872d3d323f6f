use axum::{extract::State, Json};

use crate::dtos::{CreateUserRequest, PredictionResponse};
use crate::error::AppError;
use crate::services::prompt;
use crate::startup::AppState;

/// `POST /api/users` — persist the user record, then ask the text provider
/// for a numerology prediction built from the stored name and date of birth.
///
/// The record stays persisted even when the prediction call fails; the
/// caller gets a 400 with the failure's message text either way.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<PredictionResponse>, AppError> {
    let user = state
        .db
        .create_user(&request.name, &request.dob, &request.email)
        .await?;

    tracing::info!(user_id = %user.id, "User record created");

    let prompt = prompt::numerology_prompt(&user.name, user.dob);
    let prediction = state.text_provider.generate(&prompt).await?;

    Ok(Json(PredictionResponse { prediction }))
}
