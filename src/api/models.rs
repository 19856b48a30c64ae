use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::TripSplitError;
use crate::core::models::participant::NewParticipant;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateTripRequest {
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub participants: Vec<NewParticipant>,
}

#[derive(Deserialize, ToSchema)]
pub struct RenameTripRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for TripSplitError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub TripSplitError);

impl From<TripSplitError> for ApiError {
    fn from(err: TripSplitError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TripSplitError::TripNotFound(_)
            | TripSplitError::ParticipantNotFound(_)
            | TripSplitError::TransactionNotFound(_) => StatusCode::NOT_FOUND,
            TripSplitError::ParticipantInUse(_) => StatusCode::CONFLICT,
            TripSplitError::InvalidTransaction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TripSplitError::InvalidInput(..) => StatusCode::BAD_REQUEST,
            TripSplitError::StorageError(_) | TripSplitError::LoggingError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match self.0 {
            TripSplitError::InvalidInput(field, detail) => {
                format!("Invalid input for {}: {}", field, detail.description)
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
