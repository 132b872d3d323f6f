use serde::{Deserialize, Serialize};

/// Request body for `POST /api/users`.
///
/// `dob` arrives as a string and is only validated by the record store's
/// date parse; name and email are stored verbatim.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub dob: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: String,
}
