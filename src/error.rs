use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

/// A rule broken by a candidate shift. Raised before anything is submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShiftViolation {
    #[error("End time must be after start time")]
    InvalidTimeRange,

    #[error("Cannot create shifts in the past")]
    ShiftInPast,

    #[error("This time slot is already booked")]
    ShiftConflict { conflicting_shift_id: Uuid },
}

impl ShiftViolation {
    pub fn code(&self) -> &'static str {
        match self {
            ShiftViolation::InvalidTimeRange => "INVALID_TIME_RANGE",
            ShiftViolation::ShiftInPast => "SHIFT_IN_PAST",
            ShiftViolation::ShiftConflict { .. } => "SHIFT_CONFLICT",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ShiftViolation::ShiftConflict { .. } => StatusCode::CONFLICT,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Shift(#[from] ShiftViolation),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        if let Error::Shift(violation) = &self {
            let mut body = json!({
                "error": violation.to_string(),
                "code": violation.code(),
            });
            if let ShiftViolation::ShiftConflict {
                conflicting_shift_id,
            } = violation
            {
                body["conflicting_shift_id"] = json!(conflicting_shift_id);
            }
            return (violation.status(), Json(body)).into_response();
        }

        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Database(err) => {
                tracing::error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
